//! OfficeArt (Escher) drawing records as used by Excel.
//!
//! The drawing layer is a tree of container and atom records. A workbook
//! holds one drawing group (shape id bookkeeping and the blip store with the
//! embedded images); every sheet with drawing objects holds one drawing
//! (its shapes, organized in groups).
//!
//! # Modules
//!
//! - `types`: record type and blip type definitions
//! - `record`: the 8-byte record header
//! - `node`: the [`DrawingNode`] tagged union
//! - `drawing`, `blip`, `shape`, `properties`, `anchor`: the typed tree
//! - `writer`: encoding, including the shape offset table
//! - `parser`: position-driven decoding

pub mod anchor;
pub mod blip;
pub mod drawing;
pub mod node;
pub mod parser;
pub mod properties;
pub mod record;
pub mod shape;
pub mod types;
pub mod writer;

pub use anchor::{AnchorPoint, ClientAnchor};
pub use blip::{Blip, BlipStoreContainer, BlipStoreEntry};
pub use drawing::{DrawingContainer, DrawingGroupContainer, DrawingGroupRecord, DrawingRecord, IdCluster};
pub use node::DrawingNode;
pub use parser::{DecodeContext, decode};
pub use properties::{Property, PropertyTable, PropertyValue, property_id};
pub use record::{EscherRecordHeader, RecordHeader};
pub use shape::{
    ShapeContainer, ShapeFlags, ShapeGroupChild, ShapeGroupContainer, ShapeGroupRecord,
    ShapeRecord, shape_type,
};
pub use types::{BlipType, EscherRecordType};
pub use writer::{EncodeContext, EncodedShapes, encode, encode_all, encode_drawing};
