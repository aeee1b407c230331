/// Configuration errors raised when an index or coordinate is built from runtime values.
///
/// Absent entries and empty regions are not errors; those are reported through
/// `bool` and empty results by the index itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cell size {0} is not a power of two")]
    CellSizeNotPowerOfTwo(u64),
    #[error("coordinate has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
