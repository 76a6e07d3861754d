//! prism-mag: Magnetic field of uniformly magnetized rectangular prisms
//!
//! This crate provides:
//! - Closed-form second-derivative kernels of the prism potential
//!   (Nagy et al. 2000, 2002) with degeneracy-safe `atan`/`ln`
//! - Corner summation of those kernels into `b_x`, `b_y`, `b_z`
//! - Survey files (JSON) and result rendering for the `prism-mag` CLI
//!
//! Coordinates follow the geophysical convention used by the prisms:
//! easting, northing, and vertical positive down. Lengths may be in any
//! consistent unit; the field is returned in nanotesla.

pub mod component;
pub mod direction;
pub mod error;
pub mod forward;
pub mod kernels;
pub mod prism;
pub mod report;
pub mod stable;
pub mod survey;

pub use component::{kernel_b_x, kernel_b_y, kernel_b_z, FieldComponent};
pub use direction::Direction;
pub use error::{Error, Result};
pub use forward::{Magnetization, ObservationPoints};
pub use prism::{check_prisms, Prism};
pub use report::{render, OutputFormat};
pub use survey::{Survey, SurveyResult};

use std::f64::consts::PI;

/// Magnetic permeability of free space (H/m), as used by the model
pub const MAGNETIC_PERM: f64 = 0.000001256;

/// Tesla to nanotesla
pub const TESLA_TO_NANOTESLA: f64 = 1e9;

/// Configuration for a forward computation
#[derive(Debug, Clone)]
pub struct ForwardConfig {
    /// Split observation points across the rayon thread pool
    pub parallel: bool,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Main entry point: magnetic field of `prisms` at `coordinates`, in nT.
///
/// * `coordinates` - rows `[easting, northing, vertical]`, each of length N
/// * `prisms` - rows `[west, east, south, north, top, bottom]`
/// * `intensities` - one magnetization intensity per prism
/// * `directions` - one `(inclination, declination)` pair per prism, degrees
/// * `field` - `"b_x"`, `"b_y"` or `"b_z"`
pub fn magnetics<C, P>(
    coordinates: &[C],
    prisms: &[P],
    intensities: &[f64],
    directions: &[(f64, f64)],
    field: &str,
) -> Result<Vec<f64>>
where
    C: AsRef<[f64]>,
    P: AsRef<[f64]>,
{
    magnetics_with(coordinates, prisms, intensities, directions, field, &ForwardConfig::default())
}

/// [`magnetics`] with an explicit [`ForwardConfig`]
pub fn magnetics_with<C, P>(
    coordinates: &[C],
    prisms: &[P],
    intensities: &[f64],
    directions: &[(f64, f64)],
    field: &str,
    config: &ForwardConfig,
) -> Result<Vec<f64>>
where
    C: AsRef<[f64]>,
    P: AsRef<[f64]>,
{
    let component: FieldComponent = field.parse()?;
    let points = ObservationPoints::from_rows(coordinates)?;
    let prisms = prisms
        .iter()
        .enumerate()
        .map(|(i, row)| Prism::from_row(i, row.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    for (what, found) in [("intensities", intensities.len()), ("directions", directions.len())] {
        if found != prisms.len() {
            return Err(Error::CardinalityMismatch { what, found, expected: prisms.len() });
        }
    }

    let magnetizations: Vec<Magnetization> = intensities
        .iter()
        .zip(directions)
        .map(|(&intensity, &direction)| Magnetization::new(intensity, direction.into()))
        .collect();

    magnetics_typed(&points, &prisms, &magnetizations, component, config)
}

/// Typed entry point over already-parsed inputs.
///
/// Still validates the prism boundaries and the magnetization count.
pub fn magnetics_typed(
    points: &ObservationPoints,
    prisms: &[Prism],
    magnetizations: &[Magnetization],
    component: FieldComponent,
    config: &ForwardConfig,
) -> Result<Vec<f64>> {
    if magnetizations.len() != prisms.len() {
        return Err(Error::CardinalityMismatch {
            what: "magnetizations",
            found: magnetizations.len(),
            expected: prisms.len(),
        });
    }
    check_prisms(prisms)?;

    tracing::debug!(
        points = points.len(),
        prisms = prisms.len(),
        %component,
        parallel = config.parallel,
        "computing prism magnetic field"
    );

    let mut result = vec![0.0; points.len()];
    if config.parallel {
        forward::accumulate_par(points, prisms, magnetizations, component, &mut result);
    } else {
        forward::accumulate(points, prisms, magnetizations, component, &mut result);
    }

    let scale = MAGNETIC_PERM / (4.0 * PI);
    for v in &mut result {
        *v *= scale;
        *v *= TESLA_TO_NANOTESLA;
    }

    Ok(result)
}
