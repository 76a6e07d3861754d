//! Second derivatives of the prism potential evaluated at one corner
//!
//! Arguments follow the corner-offset convention of the forward model:
//! `y` is the easting offset, `x` the northing offset and `z` the vertical
//! offset (positive down) from the observation point to the prism corner.
//! References: Nagy et al. (2000, 2002).

use crate::stable::{safe_atan2, safe_log};

#[inline]
pub(crate) fn radius(y: f64, x: f64, z: f64) -> f64 {
    (y * y + x * x + z * z).sqrt()
}

pub fn kernel_xx(y: f64, x: f64, z: f64) -> f64 {
    xx(y, x, z, radius(y, x, z))
}

pub fn kernel_yy(y: f64, x: f64, z: f64) -> f64 {
    yy(y, x, z, radius(y, x, z))
}

pub fn kernel_zz(y: f64, x: f64, z: f64) -> f64 {
    zz(y, x, z, radius(y, x, z))
}

pub fn kernel_xy(y: f64, x: f64, z: f64) -> f64 {
    xy(z, radius(y, x, z))
}

pub fn kernel_xz(y: f64, x: f64, z: f64) -> f64 {
    xz(y, radius(y, x, z))
}

pub fn kernel_yz(y: f64, x: f64, z: f64) -> f64 {
    yz(x, radius(y, x, z))
}

// Variants taking a precomputed radius, so a composer evaluating three
// kernels at one corner takes a single square root.

#[inline]
pub(crate) fn xx(y: f64, x: f64, z: f64, r: f64) -> f64 {
    -safe_atan2(y * z, x * r)
}

#[inline]
pub(crate) fn yy(y: f64, x: f64, z: f64, r: f64) -> f64 {
    -safe_atan2(x * z, y * r)
}

#[inline]
pub(crate) fn zz(y: f64, x: f64, z: f64, r: f64) -> f64 {
    -safe_atan2(x * y, z * r)
}

#[inline]
pub(crate) fn xy(z: f64, r: f64) -> f64 {
    safe_log(z + r)
}

#[inline]
pub(crate) fn xz(y: f64, r: f64) -> f64 {
    safe_log(y + r)
}

#[inline]
pub(crate) fn yz(x: f64, r: f64) -> f64 {
    safe_log(x + r)
}
