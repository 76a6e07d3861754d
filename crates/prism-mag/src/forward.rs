//! Corner-summation engine
//!
//! For every observation point and every prism the field is the signed sum
//! of the component composer over the eight prism corners, scaled by the
//! prism intensity. The engine accumulates raw (unscaled) values; unit
//! conversion happens in the driver.

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::component::FieldComponent;
use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::prism::{Prism, CORNERS};

/// Observation points per rayon work item
const CHUNK: usize = 64;

/// Observation points as three parallel coordinate arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoints {
    pub easting: Vec<f64>,
    pub northing: Vec<f64>,
    /// Positive down
    pub vertical: Vec<f64>,
}

impl ObservationPoints {
    pub fn new(easting: Vec<f64>, northing: Vec<f64>, vertical: Vec<f64>) -> Result<Self> {
        let expected = easting.len();
        for (axis, len) in [(1, northing.len()), (2, vertical.len())] {
            if len != expected {
                return Err(Error::CoordinateLength { axis, found: len, expected });
            }
        }
        Ok(Self { easting, northing, vertical })
    }

    /// Build from `[easting, northing, vertical]` rows
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        match rows {
            [e, n, v] => Self::new(e.as_ref().to_vec(), n.as_ref().to_vec(), v.as_ref().to_vec()),
            _ => Err(Error::CoordinateRank { found: rows.len() }),
        }
    }

    pub fn len(&self) -> usize {
        self.easting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.easting.is_empty()
    }

    /// Points as `[easting, northing, vertical]`
    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.easting
            .iter()
            .zip(&self.northing)
            .zip(&self.vertical)
            .map(|((&e, &n), &v)| [e, n, v])
    }
}

/// Uniform magnetization of one prism
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Magnetization {
    pub intensity: f64,
    pub direction: Direction,
}

impl Magnetization {
    pub fn new(intensity: f64, direction: Direction) -> Self {
        Self { intensity, direction }
    }
}

/// Add the raw field of every prism into `out[l]` for each point `l`.
///
/// `out` is expected to have one slot per observation point and `prisms`
/// one magnetization each; extra entries on either side are ignored.
pub fn accumulate(
    points: &ObservationPoints,
    prisms: &[Prism],
    magnetizations: &[Magnetization],
    component: FieldComponent,
    out: &mut [f64],
) {
    let sources = sources(prisms, magnetizations);
    accumulate_from(points, 0, &sources, component, out);
}

/// Same as [`accumulate`] with observation points split across the rayon
/// pool. Per-point summation order is unchanged, so results are identical.
pub fn accumulate_par(
    points: &ObservationPoints,
    prisms: &[Prism],
    magnetizations: &[Magnetization],
    component: FieldComponent,
    out: &mut [f64],
) {
    let sources = sources(prisms, magnetizations);
    out.par_chunks_mut(CHUNK)
        .enumerate()
        .for_each(|(i, chunk)| accumulate_from(points, i * CHUNK, &sources, component, chunk));
}

struct Source<'a> {
    prism: &'a Prism,
    intensity: f64,
    j: Vector3<f64>,
}

fn sources<'a>(prisms: &'a [Prism], magnetizations: &[Magnetization]) -> Vec<Source<'a>> {
    prisms
        .iter()
        .zip(magnetizations)
        .map(|(prism, m)| Source {
            prism,
            intensity: m.intensity,
            j: m.direction.unit_vector(),
        })
        .collect()
}

fn accumulate_from(
    points: &ObservationPoints,
    start: usize,
    sources: &[Source<'_>],
    component: FieldComponent,
    out: &mut [f64],
) {
    for (value, point) in out.iter_mut().zip(points.iter().skip(start)) {
        for s in sources {
            for c in &CORNERS {
                let y = s.prism.easting(c.easting) - point[0];
                let x = s.prism.northing(c.northing) - point[1];
                let z = s.prism.vertical(c.vertical) - point[2];
                *value += s.intensity * c.sign() * component.compose(y, x, z, &s.j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::kernel_b_z;
    use pretty_assertions::assert_eq;

    fn cube() -> Prism {
        Prism::new(-10.0, 10.0, -10.0, 10.0, 0.0, 20.0)
    }

    #[test]
    fn test_points_from_rows() {
        let pts = ObservationPoints::from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0], vec![-1.0, -1.0]]).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts.iter().collect::<Vec<_>>(), vec![[0.0, 2.0, -1.0], [1.0, 3.0, -1.0]]);
    }

    #[test]
    fn test_points_rank_and_length_errors() {
        let err = ObservationPoints::from_rows(&[vec![0.0], vec![0.0]]).unwrap_err();
        assert_eq!(err, Error::CoordinateRank { found: 2 });

        let err = ObservationPoints::from_rows(&[vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert_eq!(err, Error::CoordinateLength { axis: 2, found: 1, expected: 2 });
    }

    #[test]
    fn test_accumulate_matches_corner_composers() {
        let prism = cube();
        let m = Magnetization::new(3.0, Direction::new(45.0, 30.0));
        let pts = ObservationPoints::new(vec![5.0, -40.0], vec![2.0, 7.0], vec![-15.0, -3.0]).unwrap();

        let mut out = vec![0.0; 2];
        accumulate(&pts, &[prism], &[m], FieldComponent::Bz, &mut out);

        for (value, [e, n, v]) in out.iter().zip(pts.iter()) {
            let expected: f64 = CORNERS
                .iter()
                .map(|c| {
                    let (y, x, z) = (
                        prism.easting(c.easting) - e,
                        prism.northing(c.northing) - n,
                        prism.vertical(c.vertical) - v,
                    );
                    3.0 * c.sign() * kernel_b_z(y, x, z, &m.direction)
                })
                .sum();
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_accumulate_adds_to_existing_values() {
        let pts = ObservationPoints::new(vec![0.0], vec![0.0], vec![-50.0]).unwrap();
        let m = Magnetization::new(1.0, Direction::new(90.0, 0.0));

        let mut fresh = vec![0.0];
        accumulate(&pts, &[cube()], &[m], FieldComponent::Bz, &mut fresh);

        let mut seeded = vec![1.0];
        accumulate(&pts, &[cube()], &[m], FieldComponent::Bz, &mut seeded);
        assert!((seeded[0] - 1.0 - fresh[0]).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_is_bit_identical() {
        let n = 300;
        let easting: Vec<f64> = (0..n).map(|i| -75.0 + i as f64 * 0.5).collect();
        let northing: Vec<f64> = (0..n).map(|i| 10.0 - i as f64 * 0.1).collect();
        let vertical = vec![-5.0; n];
        let pts = ObservationPoints::new(easting, northing, vertical).unwrap();

        let prisms = [cube(), Prism::new(20.0, 40.0, -5.0, 5.0, 2.0, 8.0)];
        let mags = [
            Magnetization::new(1.5, Direction::new(60.0, -15.0)),
            Magnetization::new(-0.5, Direction::new(10.0, 80.0)),
        ];

        for component in FieldComponent::ALL {
            let mut serial = vec![0.0; n];
            let mut parallel = vec![0.0; n];
            accumulate(&pts, &prisms, &mags, component, &mut serial);
            accumulate_par(&pts, &prisms, &mags, component, &mut parallel);
            assert_eq!(serial, parallel);
        }
    }

    #[test]
    fn test_point_on_prism_face_is_finite() {
        // observation point on the top face and on an edge
        let pts = ObservationPoints::new(vec![0.0, 10.0], vec![0.0, 10.0], vec![0.0, 0.0]).unwrap();
        let m = Magnetization::new(1.0, Direction::new(30.0, 20.0));
        for component in FieldComponent::ALL {
            let mut out = vec![0.0; 2];
            accumulate(&pts, &[cube()], &[m], component, &mut out);
            assert!(out.iter().all(|v| v.is_finite()), "{component}: {out:?}");
        }
    }
}
