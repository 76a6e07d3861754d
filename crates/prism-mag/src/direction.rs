//! Magnetization direction from inclination and declination

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Direction of a uniform magnetization, in degrees.
///
/// Inclination is measured from the horizontal plane (positive down),
/// declination clockwise from north. No range check is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub inclination: f64,
    pub declination: f64,
}

impl Direction {
    pub fn new(inclination: f64, declination: f64) -> Self {
        Self { inclination, declination }
    }

    /// Unit vector `(jx, jy, jz)` in (northing, easting, down) axes
    pub fn unit_vector(&self) -> Vector3<f64> {
        let inc = self.inclination.to_radians();
        let dec = self.declination.to_radians();
        Vector3::new(inc.cos() * dec.cos(), inc.cos() * dec.sin(), inc.sin())
    }
}

impl From<(f64, f64)> for Direction {
    fn from((inclination, declination): (f64, f64)) -> Self {
        Self::new(inclination, declination)
    }
}

impl From<[f64; 2]> for Direction {
    fn from([inclination, declination]: [f64; 2]) -> Self {
        Self::new(inclination, declination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_direction() {
        let j = Direction::new(90.0, 0.0).unit_vector();
        assert!(j.x.abs() < 1e-15);
        assert!(j.y.abs() < 1e-15);
        assert!((j.z - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_horizontal_east() {
        let j = Direction::new(0.0, 90.0).unit_vector();
        assert!(j.x.abs() < 1e-15);
        assert!((j.y - 1.0).abs() < 1e-15);
        assert!(j.z.abs() < 1e-15);
    }

    #[test]
    fn test_unit_length_for_arbitrary_angles() {
        for &(i, d) in &[(30.0, 20.0), (-45.0, 170.0), (400.0, -725.0), (12.5, 0.0)] {
            let j = Direction::new(i, d).unit_vector();
            assert!((j.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_angles_are_periodic() {
        let a = Direction::new(30.0, 20.0).unit_vector();
        let b = Direction::new(390.0, 380.0).unit_vector();
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn test_from_pair() {
        let d: Direction = (60.0, -10.0).into();
        assert_eq!(d, Direction::new(60.0, -10.0));
        let d: Direction = [60.0, -10.0].into();
        assert_eq!(d.declination, -10.0);
    }
}
