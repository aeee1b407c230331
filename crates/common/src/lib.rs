//! Shared building blocks for the lochash spatial index.
//!
//! # Invariants
//! - A [`CellSize`] is always a non-zero power of two.
//! - Scalars quantize by flooring toward negative infinity, never by truncation.
//! - Handles are compared by identity and never dereferenced by the index.

mod cell;
mod error;
mod impl_glam;
mod scalar;
mod types;

pub use cell::CellSize;
pub use error::{Error, Result};
pub use impl_glam::ToCoordinate;
pub use scalar::{CellInt, Scalar};
pub use types::{Handle, ObjectId};
