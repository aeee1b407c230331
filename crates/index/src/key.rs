use std::hash::{Hash, Hasher};

use lochash_common::{CellInt, CellSize, Scalar};
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::quantize::quantize_coordinate;

/// Identifies one cell of the grid: the quantized origin in every dimension.
///
/// Keys are plain values. Two coordinates share a key iff they quantize
/// identically in every dimension. Ordering is lexicographic, dimension 0 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellKey<Q, const N: usize>([Q; N]);

impl<Q: CellInt, const N: usize> CellKey<Q, N> {
    /// Wrap already-quantized cell origins.
    pub const fn new(cells: [Q; N]) -> Self {
        Self(cells)
    }

    /// Key of the cell containing `coordinate`.
    #[inline]
    pub fn from_coordinate<T: Scalar>(coordinate: &[T; N], cell: CellSize) -> Self {
        Self(quantize_coordinate(coordinate, cell))
    }

    pub fn cells(&self) -> &[Q; N] {
        &self.0
    }

    pub fn dimension(&self, index: usize) -> Q {
        self.0[index]
    }

    pub fn into_inner(self) -> [Q; N] {
        self.0
    }

    /// Order-sensitive mix of the per-dimension cell origins
    /// (golden-ratio combiner), so permuted keys hash differently.
    pub fn combined_hash(&self) -> u64 {
        self.0.iter().fold(0u64, |seed, cell| {
            seed ^ (cell.to_i128() as u64)
                .wrapping_add(0x9e37_79b9)
                .wrapping_add(seed << 6)
                .wrapping_add(seed >> 2)
        })
    }
}

impl<Q: CellInt, const N: usize> Hash for CellKey<Q, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.combined_hash());
    }
}

impl<Q: CellInt, const N: usize> From<[Q; N]> for CellKey<Q, N> {
    fn from(cells: [Q; N]) -> Self {
        Self(cells)
    }
}

impl<Q: CellInt + Serialize, const N: usize> Serialize for CellKey<Q, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for cell in &self.0 {
            tuple.serialize_element(cell)?;
        }
        tuple.end()
    }
}

/// Bucket hash of a raw coordinate without materializing the key.
pub fn cell_hash<T: Scalar, Q: CellInt, const N: usize>(coordinate: &[T; N], cell: CellSize) -> u64 {
    CellKey::<Q, N>::from_coordinate(coordinate, cell).combined_hash()
}
