use crate::error::{Error, Result};

/// Edge length of one grid cell. Always a non-zero power of two.
///
/// Quantization relies on masking (`value & !(size - 1)`) instead of
/// division, which is only equivalent to flooring for powers of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellSize(u64);

struct CellSizeCheck<const CELL: u64>;

impl<const CELL: u64> CellSizeCheck<CELL> {
    const SIZE: CellSize = {
        assert!(CELL.is_power_of_two(), "cell size must be a power of two");
        CellSize(CELL)
    };
}

impl CellSize {
    /// Validate a cell size supplied at runtime.
    pub fn new(size: u64) -> Result<Self> {
        if size.is_power_of_two() {
            Ok(Self(size))
        } else {
            Err(Error::CellSizeNotPowerOfTwo(size))
        }
    }

    /// Cell size from a const parameter. Fails to compile for non-powers of two.
    pub const fn of<const CELL: u64>() -> Self {
        CellSizeCheck::<CELL>::SIZE
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// log2 of the cell size.
    pub const fn shift(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// Mask that clears the in-cell bits of a quantized value.
    pub const fn mask(self) -> i128 {
        !((self.0 as i128) - 1)
    }
}

impl TryFrom<u64> for CellSize {
    type Error = Error;

    fn try_from(size: u64) -> Result<Self> {
        Self::new(size)
    }
}
