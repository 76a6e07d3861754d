//! Magnetic field components and their corner composers
//!
//! Each component is the projection of one row of the kernel tensor onto
//! the magnetization direction:
//!
//! - `b_x = jx·xx + jy·xy + jz·xz`
//! - `b_y = jx·xy + jy·yy + jz·yz`
//! - `b_z = jx·xz + jy·yz + jz·zz`

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::Error;
use crate::kernels::{self, radius};

/// Field component evaluated for a whole forward call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldComponent {
    #[serde(rename = "b_x")]
    Bx,
    #[serde(rename = "b_y")]
    By,
    #[serde(rename = "b_z")]
    Bz,
}

impl FieldComponent {
    pub const ALL: [FieldComponent; 3] = [FieldComponent::Bx, FieldComponent::By, FieldComponent::Bz];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldComponent::Bx => "b_x",
            FieldComponent::By => "b_y",
            FieldComponent::Bz => "b_z",
        }
    }

    /// Corner contribution for a precomputed unit magnetization vector.
    ///
    /// Only the three kernels of this component's row are evaluated, all
    /// sharing one radius.
    #[inline]
    pub fn compose(&self, y: f64, x: f64, z: f64, j: &Vector3<f64>) -> f64 {
        let r = radius(y, x, z);
        let [wx, wy, wz] = match self {
            FieldComponent::Bx => [kernels::xx(y, x, z, r), kernels::xy(z, r), kernels::xz(y, r)],
            FieldComponent::By => [kernels::xy(z, r), kernels::yy(y, x, z, r), kernels::yz(x, r)],
            FieldComponent::Bz => [kernels::xz(y, r), kernels::yz(x, r), kernels::zz(y, x, z, r)],
        };
        j.x * wx + j.y * wy + j.z * wz
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b_x" => Ok(FieldComponent::Bx),
            "b_y" => Ok(FieldComponent::By),
            "b_z" => Ok(FieldComponent::Bz),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

pub fn kernel_b_x(y: f64, x: f64, z: f64, direction: &Direction) -> f64 {
    FieldComponent::Bx.compose(y, x, z, &direction.unit_vector())
}

pub fn kernel_b_y(y: f64, x: f64, z: f64, direction: &Direction) -> f64 {
    FieldComponent::By.compose(y, x, z, &direction.unit_vector())
}

pub fn kernel_b_z(y: f64, x: f64, z: f64, direction: &Direction) -> f64 {
    FieldComponent::Bz.compose(y, x, z, &direction.unit_vector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_components() {
        assert_eq!("b_x".parse::<FieldComponent>(), Ok(FieldComponent::Bx));
        assert_eq!("b_y".parse::<FieldComponent>(), Ok(FieldComponent::By));
        assert_eq!("b_z".parse::<FieldComponent>(), Ok(FieldComponent::Bz));
        for c in FieldComponent::ALL {
            assert_eq!(c.to_string().parse::<FieldComponent>(), Ok(c));
        }
    }

    #[test]
    fn test_unknown_component_is_echoed() {
        let err = "b_q".parse::<FieldComponent>().unwrap_err();
        assert_eq!(err, Error::UnknownField("b_q".to_string()));
        assert!(err.to_string().contains("b_q"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FieldComponent::By).unwrap();
        assert_eq!(json, "\"b_y\"");
        let c: FieldComponent = serde_json::from_str("\"b_z\"").unwrap();
        assert_eq!(c, FieldComponent::Bz);
    }

    #[test]
    fn test_composers_match_explicit_formulas() {
        let dir = Direction::new(35.0, -20.0);
        let j = dir.unit_vector();
        let (y, x, z) = (3.0, -1.5, 7.0);

        let bx = j.x * kernel_xx(y, x, z) + j.y * kernel_xy(y, x, z) + j.z * kernel_xz(y, x, z);
        let by = j.x * kernel_xy(y, x, z) + j.y * kernel_yy(y, x, z) + j.z * kernel_yz(y, x, z);
        let bz = j.x * kernel_xz(y, x, z) + j.y * kernel_yz(y, x, z) + j.z * kernel_zz(y, x, z);

        assert!((kernel_b_x(y, x, z, &dir) - bx).abs() < 1e-14);
        assert!((kernel_b_y(y, x, z, &dir) - by).abs() < 1e-14);
        assert!((kernel_b_z(y, x, z, &dir) - bz).abs() < 1e-14);
    }

    #[test]
    fn test_vertical_magnetization_selects_last_column() {
        let dir = Direction::new(90.0, 0.0);
        let (y, x, z) = (2.0, 5.0, 1.0);
        assert!((kernel_b_x(y, x, z, &dir) - kernel_xz(y, x, z)).abs() < 1e-15);
        assert!((kernel_b_y(y, x, z, &dir) - kernel_yz(y, x, z)).abs() < 1e-15);
        assert!((kernel_b_z(y, x, z, &dir) - kernel_zz(y, x, z)).abs() < 1e-15);
    }

    #[test]
    fn test_compose_equals_row_of_free_kernels() {
        let j = Direction::new(-62.0, 141.0).unit_vector();
        let offsets = [(3.0, -1.5, 7.0), (0.0, 4.0, -2.0), (-8.0, 0.0, 0.0), (0.0, 0.0, 0.0)];
        for &(y, x, z) in &offsets {
            let rows = [
                [kernel_xx(y, x, z), kernel_xy(y, x, z), kernel_xz(y, x, z)],
                [kernel_xy(y, x, z), kernel_yy(y, x, z), kernel_yz(y, x, z)],
                [kernel_xz(y, x, z), kernel_yz(y, x, z), kernel_zz(y, x, z)],
            ];
            for (component, [wx, wy, wz]) in FieldComponent::ALL.into_iter().zip(rows) {
                let expected = j.x * wx + j.y * wy + j.z * wz;
                assert_eq!(component.compose(y, x, z, &j), expected, "{component} at ({y}, {x}, {z})");
            }
        }
    }
}
