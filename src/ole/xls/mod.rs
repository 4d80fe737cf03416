//! Legacy Excel (.xls) BIFF stream writing.
//!
//! This module frames records into a BIFF workbook stream (BOF/EOF markers,
//! CONTINUE splitting) and emits the drawing records that carry OfficeArt
//! data.

/// MSODRAWINGGROUP and MSODRAWING emitters
pub mod drawing;

/// BIFF record framing
pub mod writer;

pub use drawing::{DrawingSegment, drawing_segments, write_drawing, write_drawing_group};
pub use writer::{BiffWriter, Dialect, WriterOptions};
