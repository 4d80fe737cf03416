//! XLS stream writing
//!
//! Record framing and writer configuration for BIFF5 and BIFF8 streams.

/// BIFF record framing
pub mod biff;

/// Writer configuration
pub mod options;

// Re-export public types
pub use biff::{BiffWriter, add_continue, record, record_type, stream_kind, write_bof, write_eof};
pub use options::{Dialect, WriterOptions};
