//! Enumeration of every cell key intersecting an axis-aligned box.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use lochash_common::{CellInt, CellSize, Scalar};

use crate::key::CellKey;
use crate::quantize::quantize;

/// Largest up-front allocation `cells_in_range` makes; longer ranges grow as they fill.
const PRESIZE_LIMIT: usize = 1 << 16;

/// Odometer over the cells between two corners, inclusive on both ends.
///
/// Dimension 0 advances fastest. If any dimension has `max < min` after
/// quantization the range is empty. Step counts and the total saturate at
/// `usize::MAX`, so `len()` of an astronomically large range is a lower bound.
#[derive(Debug, Clone)]
pub struct CellRange<Q, const N: usize> {
    origin: [i128; N],
    steps: [usize; N],
    index: [usize; N],
    stride: i128,
    remaining: usize,
    _cells: PhantomData<Q>,
}

impl<Q: CellInt, const N: usize> CellRange<Q, N> {
    pub fn new<T: Scalar>(min: &[T; N], max: &[T; N], cell: CellSize) -> Self {
        let shift = cell.shift();
        let mut origin = [0i128; N];
        let mut steps = [0usize; N];
        for i in 0..N {
            let low = quantize::<T, Q>(min[i], cell).to_i128();
            let high = quantize::<T, Q>(max[i], cell).to_i128();
            origin[i] = low;
            steps[i] = if high < low {
                0
            } else {
                usize::try_from(((high - low) >> shift) + 1).unwrap_or(usize::MAX)
            };
        }
        let remaining = steps
            .iter()
            .fold(1usize, |total, &count| total.saturating_mul(count));

        Self {
            origin,
            steps,
            index: [0; N],
            stride: cell.get() as i128,
            remaining,
            _cells: PhantomData,
        }
    }

    /// Cells overlapped by the box `[center - radius, center + radius]`.
    pub fn around<T: Scalar>(center: &[T; N], radius: T, cell: CellSize) -> Self {
        let (min, max) = extent_bounds(center, radius);
        Self::new(&min, &max, cell)
    }

    /// Number of cells along each dimension.
    pub fn steps(&self) -> &[usize; N] {
        &self.steps
    }

    /// Lowest and highest cell origin of the full range, per dimension.
    /// Meaningless when the range is empty.
    pub fn corners(&self) -> ([i128; N], [i128; N]) {
        let high = std::array::from_fn(|i| {
            self.origin[i] + (self.steps[i] as i128 - 1) * self.stride
        });
        (self.origin, high)
    }
}

impl<Q: CellInt, const N: usize> Iterator for CellRange<Q, N> {
    type Item = CellKey<Q, N>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = CellKey::new(std::array::from_fn(|i| {
            Q::from_i128(self.origin[i] + self.index[i] as i128 * self.stride)
        }));
        self.remaining -= 1;

        for i in 0..N {
            self.index[i] += 1;
            if self.index[i] < self.steps[i] {
                break;
            }
            self.index[i] = 0;
        }
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<Q: CellInt, const N: usize> ExactSizeIterator for CellRange<Q, N> {}

impl<Q: CellInt, const N: usize> FusedIterator for CellRange<Q, N> {}

/// Corners of the box spanned by `radius` around `center`.
///
/// For unsigned scalars `center - radius` must not underflow.
pub fn extent_bounds<T: Scalar, const N: usize>(center: &[T; N], radius: T) -> ([T; N], [T; N]) {
    (
        std::array::from_fn(|i| center[i] - radius),
        std::array::from_fn(|i| center[i] + radius),
    )
}

/// All keys whose cells intersect `[min, max]`.
///
/// Ranges of up to 65536 cells are allocated once at the exact size. The
/// result is materialized, so the caller bounds the range to something that
/// fits in memory; use [`CellRange`] directly to walk larger ones lazily.
pub fn cells_in_range<T: Scalar, Q: CellInt, const N: usize>(
    min: &[T; N],
    max: &[T; N],
    cell: CellSize,
) -> Vec<CellKey<Q, N>> {
    let range = CellRange::new(min, max, cell);
    let mut keys = Vec::with_capacity(range.len().min(PRESIZE_LIMIT));
    keys.extend(range);
    keys
}

/// All keys whose cells intersect the box of half-width `radius` around `center`.
pub fn cells_within_distance<T: Scalar, Q: CellInt, const N: usize>(
    center: &[T; N],
    radius: T,
    cell: CellSize,
) -> Vec<CellKey<Q, N>> {
    let (min, max) = extent_bounds(center, radius);
    cells_in_range(&min, &max, cell)
}
