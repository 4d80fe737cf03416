//! The drawing-object tree as one tagged union.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::anchor::ClientAnchor;
use super::blip::{Blip, BlipStoreContainer, BlipStoreEntry};
use super::drawing::{DrawingContainer, DrawingGroupContainer, DrawingGroupRecord, DrawingRecord};
use super::properties::PropertyTable;
use super::shape::{ShapeContainer, ShapeGroupContainer, ShapeGroupChild, ShapeGroupRecord, ShapeRecord};
use super::types::{BlipType, EscherRecordType};

/// Any node of a drawing-object tree.
///
/// Containers own their children; atoms carry scalar or binary data. Atoms
/// normally live inside their container's fields and only appear as
/// standalone nodes when decoded at the top level of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawingNode {
    DrawingGroup(DrawingGroupContainer),
    BlipStore(BlipStoreContainer),
    Drawing(DrawingContainer),
    ShapeGroup(ShapeGroupContainer),
    Shape(ShapeContainer),

    DrawingGroupRecord(DrawingGroupRecord),
    BlipStoreEntry(BlipStoreEntry),
    DrawingRecord(DrawingRecord),
    ShapeGroupRecord(ShapeGroupRecord),
    ShapeRecord(ShapeRecord),
    PropertyTable(PropertyTable),
    ClientAnchor(ClientAnchor),
    ClientData,
    ClientTextbox(Bytes),
    /// Blip outside a blip store entry; carries its own storage type
    Blip { blip_type: BlipType, blip: Blip },
}

impl DrawingNode {
    /// Record type this node encodes to.
    pub fn record_type(&self) -> EscherRecordType {
        match self {
            Self::DrawingGroup(_) => EscherRecordType::DggContainer,
            Self::BlipStore(_) => EscherRecordType::BStoreContainer,
            Self::Drawing(_) => EscherRecordType::DgContainer,
            Self::ShapeGroup(_) => EscherRecordType::SpgrContainer,
            Self::Shape(_) => EscherRecordType::SpContainer,
            Self::DrawingGroupRecord(_) => EscherRecordType::Dgg,
            Self::BlipStoreEntry(_) => EscherRecordType::BSE,
            Self::DrawingRecord(_) => EscherRecordType::Dg,
            Self::ShapeGroupRecord(_) => EscherRecordType::Spgr,
            Self::ShapeRecord(_) => EscherRecordType::Sp,
            Self::PropertyTable(_) => EscherRecordType::Opt,
            Self::ClientAnchor(_) => EscherRecordType::ClientAnchor,
            Self::ClientData => EscherRecordType::ClientData,
            Self::ClientTextbox(_) => EscherRecordType::ClientTextbox,
            Self::Blip { blip_type, .. } => blip_type
                .record()
                .map_or(EscherRecordType::Unknown, |(record_type, _)| record_type),
        }
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.record_type().is_container()
    }
}

impl From<DrawingGroupContainer> for DrawingNode {
    fn from(value: DrawingGroupContainer) -> Self {
        Self::DrawingGroup(value)
    }
}

impl From<BlipStoreContainer> for DrawingNode {
    fn from(value: BlipStoreContainer) -> Self {
        Self::BlipStore(value)
    }
}

impl From<DrawingContainer> for DrawingNode {
    fn from(value: DrawingContainer) -> Self {
        Self::Drawing(value)
    }
}

impl From<ShapeGroupContainer> for DrawingNode {
    fn from(value: ShapeGroupContainer) -> Self {
        Self::ShapeGroup(value)
    }
}

impl From<ShapeContainer> for DrawingNode {
    fn from(value: ShapeContainer) -> Self {
        Self::Shape(value)
    }
}

impl From<ShapeGroupChild> for DrawingNode {
    fn from(value: ShapeGroupChild) -> Self {
        match value {
            ShapeGroupChild::Shape(shape) => Self::Shape(shape),
            ShapeGroupChild::Group(group) => Self::ShapeGroup(group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_types() {
        assert_eq!(
            DrawingNode::from(DrawingGroupContainer::new()).record_type(),
            EscherRecordType::DggContainer
        );
        assert!(DrawingNode::from(ShapeGroupContainer::new()).is_container());
        assert!(!DrawingNode::ClientData.is_container());

        let blip = DrawingNode::Blip {
            blip_type: BlipType::Dib,
            blip: Blip::new(vec![]),
        };
        assert_eq!(blip.record_type(), EscherRecordType::BlipDib);
    }
}
