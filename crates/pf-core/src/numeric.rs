/// Absolute and relative tolerance pair for [`nearly_equal`].
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Replace values below machine epsilon with an exact zero.
///
/// Subtractive blends (Stone II, for one) leave residue like `-1e-17` where the
/// physical answer is zero.
#[inline]
pub fn floor_to_zero(v: f64) -> f64 {
    if v < f64::EPSILON { 0.0 } else { v }
}

/// Clamp into the closed unit interval.
#[inline]
pub fn unit_clamp(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
