//! Per-coordinate predicates used on every bucket scan.
//!
//! The lane-chunked versions evaluate four dimensions without branching so the
//! compiler can lower them to vector compares. The `_scalar` versions are the
//! reference behaviour; both must agree for every input.

use lochash_common::Scalar;

const LANES: usize = 4;

/// True when every dimension differs by at most `T::TOLERANCE`
/// (exact for integers, machine epsilon for floats).
#[inline]
pub fn coordinates_match<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> bool {
    let mut lanes_a = a.chunks_exact(LANES);
    let mut lanes_b = b.chunks_exact(LANES);
    for (la, lb) in (&mut lanes_a).zip(&mut lanes_b) {
        let hit = la[0].approx_eq(lb[0])
            & la[1].approx_eq(lb[1])
            & la[2].approx_eq(lb[2])
            & la[3].approx_eq(lb[3]);
        if !hit {
            return false;
        }
    }
    lanes_a
        .remainder()
        .iter()
        .zip(lanes_b.remainder())
        .fold(true, |all, (x, y)| all & x.approx_eq(*y))
}

pub fn coordinates_match_scalar<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> bool {
    (0..N).all(|i| a[i].approx_eq(b[i]))
}

/// Inclusive per-dimension containment in `[min, max]`.
#[inline]
pub fn within_bounds<T: Scalar, const N: usize>(coordinate: &[T; N], min: &[T; N], max: &[T; N]) -> bool {
    (0..N).fold(true, |all, i| {
        all & (min[i] <= coordinate[i]) & (coordinate[i] <= max[i])
    })
}

/// Squared Euclidean distance. Overflow for integer scalars is the caller's concern.
#[inline]
pub fn distance_squared<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    (0..N).fold(T::ZERO, |sum, i| {
        let d = a[i].abs_difference(b[i]);
        sum + d * d
    })
}
