//! Shapes and shape groups.
//!
//! A [`ShapeContainer`] (SpContainer) gathers the atoms describing one shape:
//! an optional group marker (Spgr), the shape atom (Sp), its property table
//! (Opt), an optional client anchor, client data and client textbox. A
//! [`ShapeGroupContainer`] (SpgrContainer) holds shapes and nested groups in
//! drawing order.

use bitflags::bitflags;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::anchor::ClientAnchor;
use super::properties::PropertyTable;
use crate::common::binary::{read_i32_le, write_i32_le, write_u32_le};
use crate::common::Result;

bitflags! {
    /// Shape flags for the Sp record (MS-ODRAW 2.2.40)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ShapeFlags: u32 {
        /// Shape is a group
        const GROUP = 0x0001;
        /// Shape is a child of a group
        const CHILD = 0x0002;
        /// Shape is the topmost group (patriarch)
        const PATRIARCH = 0x0004;
        /// Shape has been deleted
        const DELETED = 0x0008;
        /// Shape is an OLE object
        const OLE_SHAPE = 0x0010;
        /// Shape has a valid master
        const HAVE_MASTER = 0x0020;
        /// Shape is flipped horizontally
        const FLIP_H = 0x0040;
        /// Shape is flipped vertically
        const FLIP_V = 0x0080;
        /// Shape is a connector
        const CONNECTOR = 0x0100;
        /// Shape has an anchor
        const HAVE_ANCHOR = 0x0200;
        /// Shape is a background shape
        const BACKGROUND = 0x0400;
        /// Shape has a shape type property
        const HAVE_SPT = 0x0800;
    }
}

impl Default for ShapeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shape types (MSOSPT values) Excel uses for drawing objects.
pub mod shape_type {
    pub const NOT_PRIMITIVE: u16 = 0;
    pub const RECTANGLE: u16 = 1;
    pub const ROUND_RECTANGLE: u16 = 2;
    pub const ELLIPSE: u16 = 3;
    pub const LINE: u16 = 20;
    pub const PICTURE_FRAME: u16 = 75;
    pub const HOST_CONTROL: u16 = 201;
    pub const TEXT_BOX: u16 = 202;
}

/// Sp atom: shape type (record instance), shape id and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub shape_type: u16,
    pub shape_id: u32,
    pub flags: ShapeFlags,
}

impl ShapeRecord {
    pub const SIZE: usize = 8;

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        write_u32_le(&mut out, self.shape_id);
        write_u32_le(&mut out, self.flags.bits());
        out
    }

    pub fn decode(data: &[u8], instance: u16) -> Result<Self> {
        Ok(Self {
            shape_type: instance,
            shape_id: read_i32_le(data, 0)? as u32,
            flags: ShapeFlags::from_bits_retain(read_i32_le(data, 4)? as u32),
        })
    }
}

/// Spgr atom: the coordinate system of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeGroupRecord {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ShapeGroupRecord {
    pub const SIZE: usize = 16;

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        for value in [self.left, self.top, self.right, self.bottom] {
            write_i32_le(&mut out, value);
        }
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self {
            left: read_i32_le(data, 0)?,
            top: read_i32_le(data, 4)?,
            right: read_i32_le(data, 8)?,
            bottom: read_i32_le(data, 12)?,
        })
    }
}

/// One shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeContainer {
    pub shape_type: u16,
    pub shape_id: u32,
    pub flags: ShapeFlags,
    pub properties: PropertyTable,
    pub anchor: Option<ClientAnchor>,
    /// Spgr atom, present on the shape that describes a group
    pub group_marker: Option<ShapeGroupRecord>,
    /// Whether an (empty) ClientData atom follows
    pub client_data: bool,
    /// Raw ClientTextbox payload
    pub client_textbox: Option<Bytes>,
}

impl ShapeContainer {
    /// A regular shape with an anchor and client data, the way Excel writes
    /// pictures and comments.
    pub fn new(shape_type: u16, shape_id: u32) -> Self {
        Self {
            shape_type,
            shape_id,
            flags: ShapeFlags::HAVE_ANCHOR | ShapeFlags::HAVE_SPT,
            client_data: true,
            ..Self::default()
        }
    }

    /// The shape describing a group's own coordinate space.
    pub fn group(shape_id: u32) -> Self {
        Self {
            shape_type: shape_type::NOT_PRIMITIVE,
            shape_id,
            flags: ShapeFlags::GROUP | ShapeFlags::PATRIARCH,
            group_marker: Some(ShapeGroupRecord::default()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.flags.contains(ShapeFlags::GROUP)
    }

    pub fn with_properties(mut self, properties: PropertyTable) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_anchor(mut self, anchor: ClientAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_textbox(mut self, data: impl Into<Bytes>) -> Self {
        self.client_textbox = Some(data.into());
        self
    }

    pub(crate) fn record(&self) -> ShapeRecord {
        ShapeRecord {
            shape_type: self.shape_type,
            shape_id: self.shape_id,
            flags: self.flags,
        }
    }

    pub(crate) fn apply_record(&mut self, record: ShapeRecord) {
        self.shape_type = record.shape_type;
        self.shape_id = record.shape_id;
        self.flags = record.flags;
    }
}

/// A child of a shape group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeGroupChild {
    Shape(ShapeContainer),
    Group(ShapeGroupContainer),
}

/// Shapes and nested groups, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeGroupContainer {
    pub children: Vec<ShapeGroupChild>,
}

impl ShapeGroupContainer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: ShapeContainer) {
        self.children.push(ShapeGroupChild::Shape(shape));
    }

    pub fn add_group(&mut self, group: ShapeGroupContainer) {
        self.children.push(ShapeGroupChild::Group(group));
    }

    /// Direct shape children, skipping nested groups.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeContainer> {
        self.children.iter().filter_map(|child| match child {
            ShapeGroupChild::Shape(shape) => Some(shape),
            ShapeGroupChild::Group(_) => None,
        })
    }

    /// Number of shapes in this group and every nested group.
    pub fn shape_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                ShapeGroupChild::Shape(_) => 1,
                ShapeGroupChild::Group(group) => group.shape_count(),
            })
            .sum()
    }

    /// Largest shape id in this group and every nested group.
    pub fn max_shape_id(&self) -> Option<u32> {
        self.children
            .iter()
            .filter_map(|child| match child {
                ShapeGroupChild::Shape(shape) => Some(shape.shape_id),
                ShapeGroupChild::Group(group) => group.max_shape_id(),
            })
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_record_roundtrip() {
        let record = ShapeRecord {
            shape_type: shape_type::PICTURE_FRAME,
            shape_id: 1025,
            flags: ShapeFlags::HAVE_ANCHOR | ShapeFlags::HAVE_SPT,
        };
        let data = record.encode();
        assert_eq!(data, vec![0x01, 0x04, 0, 0, 0x00, 0x0A, 0, 0]);
        assert_eq!(ShapeRecord::decode(&data, 75).unwrap(), record);
    }

    #[test]
    fn test_shape_record_sign_flag_byte() {
        // Top byte >= 0x80 goes through the sign-flag read and keeps its bits
        let data = [0xFE, 0xFF, 0xFF, 0xFF, 0x00, 0x0A, 0x00, 0x80];
        let record = ShapeRecord::decode(&data, 1).unwrap();
        assert_eq!(record.shape_id, 0xFFFF_FFFE);
        assert_eq!(record.flags.bits(), 0x8000_0A00);
        assert_eq!(record.encode(), data);
    }

    #[test]
    fn test_shape_record_keeps_unknown_flags() {
        let data = [1, 0, 0, 0, 0x00, 0x10, 0, 0];
        let record = ShapeRecord::decode(&data, 0).unwrap();
        assert_eq!(record.flags.bits(), 0x1000);
    }

    #[test]
    fn test_group_constructors() {
        let group = ShapeContainer::group(1024);
        assert!(group.is_group());
        assert_eq!(group.flags.bits(), 0x0005);
        assert!(!group.client_data);

        let shape = ShapeContainer::new(shape_type::TEXT_BOX, 1025);
        assert!(!shape.is_group());
        assert_eq!(shape.flags.bits(), 0x0A00);
        assert!(shape.client_data);
    }

    #[test]
    fn test_group_counts() {
        let mut inner = ShapeGroupContainer::new();
        inner.add_shape(ShapeContainer::group(1030));
        inner.add_shape(ShapeContainer::new(shape_type::RECTANGLE, 1031));

        let mut outer = ShapeGroupContainer::new();
        outer.add_shape(ShapeContainer::group(1024));
        outer.add_group(inner);
        outer.add_shape(ShapeContainer::new(shape_type::ELLIPSE, 1026));

        assert_eq!(outer.shapes().count(), 2);
        assert_eq!(outer.shape_count(), 4);
        assert_eq!(outer.max_shape_id(), Some(1031));
    }
}
