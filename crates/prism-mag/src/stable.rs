//! Degeneracy-safe elementary functions used by every prism kernel
//!
//! The corner offsets fed to the kernels vanish whenever an observation
//! point lies in one of a prism's coordinate planes. A plain `atan2` or
//! `ln` would then either pick the wrong branch or produce `-inf`/`NaN`.

use std::f64::consts::FRAC_PI_2;

/// Below this magnitude the log argument is treated as its singular limit
pub const LOG_CLAMP: f64 = 1e-10;

/// Principal value of `atan(y / x)` with an explicit branch at `x == 0`.
///
/// Not a quadrant-aware `atan2`: for `x != 0` the result stays in
/// `(-π/2, π/2)`. At `x == 0` it returns `π/2`, `-π/2` or `0` depending on
/// the sign of `y` (Fukushima 2020, eq. 72), which keeps the field of the
/// prism consistent with its symmetry planes.
#[inline]
pub fn safe_atan2(y: f64, x: f64) -> f64 {
    if x != 0.0 {
        (y / x).atan()
    } else if y > 0.0 {
        FRAC_PI_2
    } else if y < 0.0 {
        -FRAC_PI_2
    } else {
        0.0
    }
}

/// Natural log that returns `0` for arguments within [`LOG_CLAMP`] of zero.
///
/// Kernel arguments are `>= 0` analytically; cancellation can push them to
/// zero or a tiny negative value, where the limit term of the formula is 0.
#[inline]
pub fn safe_log(x: f64) -> f64 {
    if x.abs() < LOG_CLAMP {
        0.0
    } else {
        x.ln()
    }
}
