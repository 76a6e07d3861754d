//! Survey description files (JSON)
//!
//! A survey bundles observation points, prisms with their magnetization
//! and the requested field component:
//!
//! ```json
//! {
//!   "name": "dike",
//!   "component": "b_z",
//!   "observations": { "grid": { "easting": [-100, 100, 41], "northing": [-100, 100, 41], "vertical": -1 } },
//!   "prisms": [
//!     { "bounds": [-10, 10, -50, 50, 5, 200], "intensity": 2.0, "inclination": 60, "declination": 10 },
//!     { "center": [40, 0, 30], "size": [10, 10, 20], "intensity": 1.0, "inclination": 90, "declination": 0 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::component::FieldComponent;
use crate::error::{Error, Result};
use crate::forward::ObservationPoints;
use crate::prism::Prism;
use crate::{magnetics_with, ForwardConfig};

/// Top-level survey file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    /// Optional label, carried into reports
    #[serde(default)]
    pub name: Option<String>,
    /// Component to compute (default: b_z)
    #[serde(default = "default_component")]
    pub component: FieldComponent,
    pub observations: Observations,
    pub prisms: Vec<PrismSpec>,
}

fn default_component() -> FieldComponent {
    FieldComponent::Bz
}

/// Observation points, listed explicitly or as a regular grid.
///
/// Exactly one form is expected: `grid`, or all three coordinate lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easting: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub northing: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
}

/// Regular horizontal grid at a constant height
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    /// `(min, max, count)`
    pub easting: (f64, f64, usize),
    /// `(min, max, count)`
    pub northing: (f64, f64, usize),
    pub vertical: f64,
}

/// A prism given either by its bounds or by center and size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// `[west, east, south, north, top, bottom]`
    #[serde(default)]
    pub bounds: Option<[f64; 6]>,
    /// `[easting, northing, vertical]`
    #[serde(default)]
    pub center: Option<[f64; 3]>,
    /// Full extents along `[easting, northing, vertical]`
    #[serde(default)]
    pub size: Option<[f64; 3]>,
    pub intensity: f64,
    pub inclination: f64,
    pub declination: f64,
}

/// Field values computed for a survey
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResult {
    pub name: Option<String>,
    pub component: FieldComponent,
    pub prism_count: usize,
    pub points: ObservationPoints,
    /// nT, one per observation point
    pub values: Vec<f64>,
}

fn axis_values(axis: &str, (min, max, n): (f64, f64, usize)) -> Result<Vec<f64>> {
    match n {
        0 => Err(Error::Survey(format!("grid {} axis needs at least one point", axis))),
        1 => Ok(vec![min]),
        _ => {
            let step = (max - min) / (n - 1) as f64;
            Ok((0..n).map(|i| min + i as f64 * step).collect())
        }
    }
}

impl GridSpec {
    /// Expand row by row: northing outer, easting inner
    pub fn points(&self) -> Result<ObservationPoints> {
        let easting = axis_values("easting", self.easting)?;
        let northing = axis_values("northing", self.northing)?;

        let n = easting.len() * northing.len();
        let mut points = ObservationPoints {
            easting: Vec::with_capacity(n),
            northing: Vec::with_capacity(n),
            vertical: vec![self.vertical; n],
        };
        for &north in &northing {
            for &east in &easting {
                points.easting.push(east);
                points.northing.push(north);
            }
        }
        Ok(points)
    }
}

impl Observations {
    pub fn points(&self) -> Result<ObservationPoints> {
        match (&self.grid, &self.easting, &self.northing, &self.vertical) {
            (Some(grid), None, None, None) => grid.points(),
            (None, Some(e), Some(n), Some(v)) => ObservationPoints::new(e.clone(), n.clone(), v.clone()),
            _ => Err(Error::Survey(
                "observations need either 'grid' or all of 'easting', 'northing' and 'vertical'".to_string(),
            )),
        }
    }
}

impl PrismSpec {
    pub fn prism(&self, index: usize) -> Result<Prism> {
        match (self.bounds, self.center, self.size) {
            (Some(bounds), None, None) => Ok(Prism::from_bounds(bounds)),
            (None, Some(center), Some(size)) => Ok(Prism::from_center_size(center, size)),
            _ => Err(Error::Survey(format!(
                "prism {}{} needs either 'bounds' or both 'center' and 'size'",
                index,
                self.name.as_deref().map(|n| format!(" ({})", n)).unwrap_or_default()
            ))),
        }
    }
}

impl Survey {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Survey(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Survey(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn prisms(&self) -> Result<Vec<Prism>> {
        self.prisms.iter().enumerate().map(|(i, p)| p.prism(i)).collect()
    }

    /// Compute the survey's field component at every observation point
    pub fn run(&self, config: &ForwardConfig) -> Result<SurveyResult> {
        let points = self.observations.points()?;
        let prisms = self.prisms()?;

        for (i, prism) in prisms.iter().enumerate() {
            let inside = points.iter().filter(|&[e, n, v]| prism.contains(e, n, v)).count();
            if inside > 0 {
                tracing::warn!(
                    prism = i,
                    center = ?prism.center(),
                    points = inside,
                    "observation points inside or on a prism"
                );
            }
        }

        let coordinates = [&points.easting, &points.northing, &points.vertical];
        let rows: Vec<[f64; 6]> = prisms.iter().map(Prism::bounds).collect();
        let intensities: Vec<f64> = self.prisms.iter().map(|p| p.intensity).collect();
        let directions: Vec<(f64, f64)> = self
            .prisms
            .iter()
            .map(|p| (p.inclination, p.declination))
            .collect();

        let values = magnetics_with(
            &coordinates,
            &rows,
            &intensities,
            &directions,
            self.component.as_str(),
            config,
        )?;

        Ok(SurveyResult {
            name: self.name.clone(),
            component: self.component,
            prism_count: prisms.len(),
            points,
            values,
        })
    }
}
