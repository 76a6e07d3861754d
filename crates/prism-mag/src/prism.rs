//! Rectangular prisms, their corners and boundary validation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned rectangular prism.
///
/// Boundaries are in consistent length units, `vertical` positive down, so
/// `top <= bottom` for a well-formed prism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Which boundary of an axis a corner sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Low,
    High,
}

/// One of the eight corners of a prism.
///
/// `northing` picks south/north, `easting` west/east and `vertical`
/// top/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub northing: Bound,
    pub easting: Bound,
    pub vertical: Bound,
}

use Bound::{High, Low};

/// Corners in summation order: high before low on every axis, northing
/// outermost and vertical innermost.
pub const CORNERS: [Corner; 8] = [
    Corner { northing: High, easting: High, vertical: High },
    Corner { northing: High, easting: High, vertical: Low },
    Corner { northing: High, easting: Low, vertical: High },
    Corner { northing: High, easting: Low, vertical: Low },
    Corner { northing: Low, easting: High, vertical: High },
    Corner { northing: Low, easting: High, vertical: Low },
    Corner { northing: Low, easting: Low, vertical: High },
    Corner { northing: Low, easting: Low, vertical: Low },
];

impl Corner {
    /// Inclusion–exclusion sign: `+1` for an even number of low bounds
    pub fn sign(&self) -> f64 {
        let lows = [self.northing, self.easting, self.vertical]
            .iter()
            .filter(|&&b| b == Low)
            .count();
        if lows % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Prism {
    pub fn new(west: f64, east: f64, south: f64, north: f64, top: f64, bottom: f64) -> Self {
        Self { west, east, south, north, top, bottom }
    }

    /// Build from a `[west, east, south, north, top, bottom]` row
    pub fn from_bounds(b: [f64; 6]) -> Self {
        Self::new(b[0], b[1], b[2], b[3], b[4], b[5])
    }

    /// Build from a row of unknown length; `index` is used in the error
    pub fn from_row(index: usize, row: &[f64]) -> Result<Self> {
        let bounds: [f64; 6] = row
            .try_into()
            .map_err(|_| Error::PrismColumns { index, found: row.len() })?;
        Ok(Self::from_bounds(bounds))
    }

    /// Build from a center `(easting, northing, vertical)` and full extents
    pub fn from_center_size(center: [f64; 3], size: [f64; 3]) -> Self {
        let [ce, cn, cv] = center;
        let [de, dn, dv] = size.map(|s| s / 2.0);
        Self::new(ce - de, ce + de, cn - dn, cn + dn, cv - dv, cv + dv)
    }

    pub fn bounds(&self) -> [f64; 6] {
        [self.west, self.east, self.south, self.north, self.top, self.bottom]
    }

    pub fn easting(&self, bound: Bound) -> f64 {
        match bound {
            Low => self.west,
            High => self.east,
        }
    }

    pub fn northing(&self, bound: Bound) -> f64 {
        match bound {
            Low => self.south,
            High => self.north,
        }
    }

    pub fn vertical(&self, bound: Bound) -> f64 {
        match bound {
            Low => self.top,
            High => self.bottom,
        }
    }

    /// Center as `(easting, northing, vertical)`
    pub fn center(&self) -> [f64; 3] {
        [
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
            (self.top + self.bottom) / 2.0,
        ]
    }

    /// True if the point lies inside or on the surface of the prism
    pub fn contains(&self, easting: f64, northing: f64, vertical: f64) -> bool {
        (self.west..=self.east).contains(&easting)
            && (self.south..=self.north).contains(&northing)
            && (self.top..=self.bottom).contains(&vertical)
    }
}

impl fmt::Display for Prism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}]",
            self.west, self.east, self.south, self.north, self.top, self.bottom
        )
    }
}

/// Check the boundary ordering of every prism.
///
/// Collects all offending prisms under each violated rule instead of
/// stopping at the first one. Boundaries are never swapped.
pub fn check_prisms(prisms: &[Prism]) -> Result<()> {
    let rules: [(&str, fn(&Prism) -> bool); 3] = [
        ("The west boundary can't be greater than the east one.", |p: &Prism| p.west > p.east),
        ("The south boundary can't be greater than the north one.", |p: &Prism| p.south > p.north),
        ("The top boundary can't be greater than the bottom one.", |p: &Prism| p.top > p.bottom),
    ];

    let mut msg = String::new();
    for (rule, is_bad) in rules {
        let bad: Vec<(usize, &Prism)> = prisms.iter().enumerate().filter(|(_, p)| is_bad(p)).collect();
        if bad.is_empty() {
            continue;
        }
        msg.push_str(rule);
        msg.push('\n');
        for (index, prism) in bad {
            msg.push_str(&format!("\tInvalid prism {}: {}\n", index, prism));
        }
    }

    if msg.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidPrisms(format!("Invalid prism or prisms. {}", msg.trim_end())))
    }
}
