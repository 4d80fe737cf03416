//! Common types and utilities shared by the record framer and the drawing codec.

// Submodule declarations
pub mod binary;
pub mod coordinate;
pub mod error;

// Re-exports for convenience
pub use binary::FloatByteOrder;
pub use coordinate::CellCoordinate;
pub use error::{Error, Result};
