use lochash_common::{CellInt, CellSize, Scalar};

/// Origin of the cell containing `value`.
///
/// Floors toward negative infinity before masking, so `quantize(-10, 8) == -16`
/// and `quantize(-0.5, 8) == -8`. The result must fit in `Q`; values outside
/// its range are truncated.
#[inline]
pub fn quantize<T: Scalar, Q: CellInt>(value: T, cell: CellSize) -> Q {
    Q::from_i128(value.floor_to_i128() & cell.mask())
}

/// Quantize every dimension of a coordinate independently.
#[inline]
pub fn quantize_coordinate<T: Scalar, Q: CellInt, const N: usize>(
    coordinate: &[T; N],
    cell: CellSize,
) -> [Q; N] {
    std::array::from_fn(|i| quantize(coordinate[i], cell))
}
