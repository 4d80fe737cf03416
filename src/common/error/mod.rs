//! Error types for BIFF framing and OfficeArt encoding/decoding.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
