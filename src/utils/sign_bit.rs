use crate::math::Real;

/// Returns `1` if `x` is strictly negative and `0` otherwise.
///
/// Both `-0.0` and `NaN` map to `0`. Several queries use the result directly
/// as an array index or as a bit shift, so the value is always `0` or `1`.
#[inline(always)]
pub fn sign_bit(x: Real) -> usize {
    (x < 0.0) as usize
}
