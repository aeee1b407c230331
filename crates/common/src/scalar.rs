use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Mul, Sub};

/// An arithmetic coordinate component: any primitive integer, `f32` or `f64`.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    const ZERO: Self;
    /// Largest per-dimension difference still treated as the same stored coordinate.
    /// Zero for integers, machine epsilon for floats.
    const TOLERANCE: Self;

    /// Floor toward negative infinity. Floats outside the `i128` range saturate
    /// and NaN maps to zero.
    fn floor_to_i128(self) -> i128;

    /// `|self - other|` without unsigned underflow.
    fn abs_difference(self, other: Self) -> Self;

    /// Bit pattern used for content hashing.
    fn hash_bits(self) -> u64;

    fn approx_eq(self, other: Self) -> bool {
        self.abs_difference(other) <= Self::TOLERANCE
    }
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;
            const TOLERANCE: Self = 0;

            #[inline]
            fn floor_to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn abs_difference(self, other: Self) -> Self {
                if self > other { self - other } else { other - self }
            }

            #[inline]
            fn hash_bits(self) -> u64 {
                self as i128 as u64
            }

            #[inline]
            fn approx_eq(self, other: Self) -> bool {
                self == other
            }
        }
    )*};
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const TOLERANCE: Self = <$t>::EPSILON;

            #[inline]
            fn floor_to_i128(self) -> i128 {
                self.floor() as i128
            }

            #[inline]
            fn abs_difference(self, other: Self) -> Self {
                (self - other).abs()
            }

            #[inline]
            fn hash_bits(self) -> u64 {
                self.to_bits() as u64
            }
        }
    )*};
}

impl_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_scalar_float!(f32, f64);

/// Integer type holding quantized cell origins.
///
/// Values that do not fit are truncated by `from_i128`; keeping coordinates
/// inside the representable range is the caller's responsibility.
pub trait CellInt: Copy + Eq + Ord + Hash + Debug + Default + 'static {
    fn from_i128(value: i128) -> Self;
    fn to_i128(self) -> i128;
}

macro_rules! impl_cell_int {
    ($($t:ty),*) => {$(
        impl CellInt for $t {
            #[inline]
            fn from_i128(value: i128) -> Self {
                value as $t
            }

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

impl_cell_int!(i32, i64, i128);
