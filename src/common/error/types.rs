//! Error taxonomy shared by the record framer and the drawing codec.
//!
//! Every variant is fatal for the call that produced it: a failed decode
//! returns no tree and a failed encode returns no bytes. Records the decoder
//! recognizes but does not model are not errors at all; they are skipped.
use thiserror::Error;

/// Main error type for record and drawing operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error from the output sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The host stores doubles in neither little- nor big-endian IEEE 754 order
    #[error("Required floating point format not supported on this platform")]
    Platform,

    /// A declared record length does not fit in the remaining buffer
    #[error(
        "Record 0x{record_type:04X} at offset {offset} declares {declared} bytes but only {available} remain"
    )]
    Format {
        record_type: u16,
        offset: usize,
        declared: i64,
        available: usize,
    },

    /// The buffer ended inside a fixed-size field
    #[error("Truncated data: {0}")]
    Truncated(String),

    /// Structurally invalid content (bad property table sizes, out-of-range fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Coordinate text that is not `<letters><row>`
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),
}

/// Result type for record and drawing operations.
pub type Result<T> = std::result::Result<T, Error>;
