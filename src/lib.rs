//! biff-escher - BIFF record framing and the OfficeArt drawing-object codec
//!
//! This library writes the record layer of legacy Excel (.xls) workbook
//! streams and encodes/decodes the OfficeArt ("Escher") drawing records
//! embedded in them.
//!
//! # Features
//!
//! - **Record framing**: BOF/EOF markers, CONTINUE splitting for oversized
//!   records, BIFF5 and BIFF8 dialects
//! - **Drawing tree codec**: drawing groups, blip stores, drawings, shape
//!   groups, shapes, property tables and client anchors in both directions
//! - **Drawing records**: MSODRAWINGGROUP and per-shape MSODRAWING emission
//!
//! # Example - Encoding and decoding a drawing
//!
//! ```
//! use biff_escher::ole::escher::{
//!     AnchorPoint, ClientAnchor, DrawingContainer, DrawingNode, ShapeContainer,
//!     ShapeGroupContainer, decode, encode, shape_type,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut group = ShapeGroupContainer::new();
//! group.add_shape(ShapeContainer::group(1024));
//! group.add_shape(
//!     ShapeContainer::new(shape_type::RECTANGLE, 1025)
//!         .with_anchor(ClientAnchor::new(AnchorPoint::at("B2")?, AnchorPoint::at("D8")?)),
//! );
//!
//! let node = DrawingNode::Drawing(DrawingContainer::new(1, group));
//! let bytes = encode(&node)?;
//! assert_eq!(decode(&bytes)?, vec![node]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing a framed stream
//!
//! ```
//! use biff_escher::ole::xls::writer::{BiffWriter, Dialect, WriterOptions, stream_kind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = BiffWriter::with_options(Vec::new(), WriterOptions::new(Dialect::Biff8))?;
//! writer.write_bof(stream_kind::WORKBOOK)?;
//! writer.append_record(0x00EB, &[0u8; 10_000])?; // split into CONTINUE records
//! writer.write_eof()?;
//!
//! let stream = writer.into_inner()?;
//! assert_eq!(&stream[..2], &[0x09, 0x08]);
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate
///
/// Binary primitives, cell coordinates and the error type.
pub mod common;

/// OLE2 binary format components
///
/// The OfficeArt drawing codec and the XLS record writer.
pub mod ole;

// Re-export commonly used types for convenience
pub use common::{CellCoordinate, Error, FloatByteOrder, Result};
pub use ole::escher::{DrawingNode, decode, encode};
pub use ole::xls::{BiffWriter, Dialect, WriterOptions};
