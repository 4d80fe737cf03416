//! Drawing-tree decoder.
//!
//! Decoding is position driven: at each position the 8-byte header is read,
//! the record is decoded (containers recursively over their payload) and the
//! cursor advances by `8 + length` whatever the record was. Decoded nodes are
//! attached to the enclosing container through [`Parent`]; a node the parent
//! has no place for is dropped.
//!
//! Any header that does not fit aborts the whole decode, so a caller either
//! gets the complete tree or an error.

use bytes::Bytes;
use tracing::{debug, trace};

use super::anchor::ClientAnchor;
use super::blip::{Blip, BlipStoreContainer, BlipStoreEntry};
use super::drawing::{DrawingContainer, DrawingGroupContainer, DrawingGroupRecord, DrawingRecord};
use super::node::DrawingNode;
use super::properties::PropertyTable;
use super::record::RecordHeader;
use super::shape::{ShapeContainer, ShapeGroupContainer, ShapeGroupRecord, ShapeRecord};
use super::types::{BlipType, EscherRecordType};
use crate::common::{Error, Result};

/// Deepest container nesting accepted before decoding gives up.
pub const MAX_DEPTH: usize = 64;

/// State handed down from a container to the records it encloses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeContext {
    /// Storage type of the enclosing blip store entry
    pub blip_type: Option<BlipType>,
    depth: usize,
}

impl DecodeContext {
    fn nested(self) -> Result<Self> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::Validation(format!(
                "drawing records nested deeper than {}",
                MAX_DEPTH
            )));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}

/// Decode a buffer holding a sequence of top-level records.
pub fn decode(data: &[u8]) -> Result<Vec<DrawingNode>> {
    let mut nodes = Vec::new();
    decode_stream(data, &mut Parent::Root(&mut nodes), DecodeContext::default())?;
    Ok(nodes)
}

/// Decode one record starting at `offset`, returning it (if modeled) and
/// the number of bytes it spans.
pub fn decode_record(
    data: &[u8],
    offset: usize,
    ctx: DecodeContext,
) -> Result<(Option<DrawingNode>, usize)> {
    let header = RecordHeader::read(data, offset)?;
    let payload = header.payload(data, offset);
    let node = decode_payload(&header, payload, offset, ctx)?;
    Ok((node, header.total_size()))
}

/// The container a decoded node is attached to.
pub enum Parent<'a> {
    Root(&'a mut Vec<DrawingNode>),
    DrawingGroup(&'a mut DrawingGroupContainer),
    BlipStore(&'a mut BlipStoreContainer),
    BlipStoreEntry(&'a mut BlipStoreEntry),
    Drawing(&'a mut DrawingContainer),
    ShapeGroup(&'a mut ShapeGroupContainer),
    Shape(&'a mut ShapeContainer),
}

impl Parent<'_> {
    /// Attach `node`; returns it back when this parent has no slot for it.
    pub fn attach(&mut self, node: DrawingNode) -> Option<DrawingNode> {
        match (self, node) {
            (Parent::Root(nodes), node) => nodes.push(node),

            (Parent::DrawingGroup(group), DrawingNode::DrawingGroupRecord(record)) => {
                group.group = record
            },
            (Parent::DrawingGroup(group), DrawingNode::BlipStore(store)) => {
                group.blip_store = Some(store)
            },

            (Parent::BlipStore(store), DrawingNode::BlipStoreEntry(entry)) => {
                store.entries.push(entry)
            },

            (Parent::BlipStoreEntry(entry), DrawingNode::Blip { blip_type, blip }) => {
                // An Error/Unknown entry takes the type of the blip it holds
                if entry.blip_type.record().is_none() {
                    entry.blip_type = blip_type;
                }
                entry.blip = Some(blip)
            },

            (Parent::Drawing(drawing), DrawingNode::DrawingRecord(record)) => {
                drawing.record = record
            },
            (Parent::Drawing(drawing), DrawingNode::ShapeGroup(group)) => {
                drawing.shape_group = Some(group)
            },

            (Parent::ShapeGroup(group), DrawingNode::Shape(shape)) => group.add_shape(shape),
            (Parent::ShapeGroup(group), DrawingNode::ShapeGroup(nested)) => group.add_group(nested),

            (Parent::Shape(shape), DrawingNode::ShapeGroupRecord(record)) => {
                shape.group_marker = Some(record)
            },
            (Parent::Shape(shape), DrawingNode::ShapeRecord(record)) => shape.apply_record(record),
            (Parent::Shape(shape), DrawingNode::PropertyTable(table)) => shape.properties = table,
            (Parent::Shape(shape), DrawingNode::ClientAnchor(anchor)) => shape.anchor = Some(anchor),
            (Parent::Shape(shape), DrawingNode::ClientData) => shape.client_data = true,
            (Parent::Shape(shape), DrawingNode::ClientTextbox(data)) => {
                shape.client_textbox = Some(data)
            },

            (_, node) => return Some(node),
        }
        None
    }

    fn name(&self) -> &'static str {
        match self {
            Parent::Root(_) => "root",
            Parent::DrawingGroup(_) => "DggContainer",
            Parent::BlipStore(_) => "BStoreContainer",
            Parent::BlipStoreEntry(_) => "BSE",
            Parent::Drawing(_) => "DgContainer",
            Parent::ShapeGroup(_) => "SpgrContainer",
            Parent::Shape(_) => "SpContainer",
        }
    }
}

/// Decode every record in `data` and attach it to `parent`.
pub fn decode_stream(data: &[u8], parent: &mut Parent<'_>, ctx: DecodeContext) -> Result<()> {
    let mut pos = 0;
    while pos < data.len() {
        let (node, size) = decode_record(data, pos, ctx)?;
        if let Some(node) = node {
            if let Some(dropped) = parent.attach(node) {
                debug!(
                    "dropping {:?} at offset {} with no place under {}",
                    dropped.record_type(),
                    pos,
                    parent.name()
                );
            }
        }
        pos += size;
    }
    Ok(())
}

fn decode_payload(
    header: &RecordHeader,
    payload: &[u8],
    offset: usize,
    ctx: DecodeContext,
) -> Result<Option<DrawingNode>> {
    trace!(
        "record 0x{:04X} instance {} at offset {}, {} bytes",
        header.record_type_raw,
        header.instance,
        offset,
        header.length
    );

    let node = match header.record_type {
        EscherRecordType::DggContainer => {
            let mut group = DrawingGroupContainer::default();
            decode_stream(payload, &mut Parent::DrawingGroup(&mut group), ctx.nested()?)?;
            DrawingNode::DrawingGroup(group)
        },
        EscherRecordType::BStoreContainer => {
            let mut store = BlipStoreContainer::default();
            decode_stream(payload, &mut Parent::BlipStore(&mut store), ctx.nested()?)?;
            DrawingNode::BlipStore(store)
        },
        EscherRecordType::DgContainer => {
            let mut drawing = DrawingContainer::default();
            decode_stream(payload, &mut Parent::Drawing(&mut drawing), ctx.nested()?)?;
            DrawingNode::Drawing(drawing)
        },
        EscherRecordType::SpgrContainer => {
            let mut group = ShapeGroupContainer::default();
            decode_stream(payload, &mut Parent::ShapeGroup(&mut group), ctx.nested()?)?;
            DrawingNode::ShapeGroup(group)
        },
        EscherRecordType::SpContainer => {
            let mut shape = ShapeContainer::default();
            decode_stream(payload, &mut Parent::Shape(&mut shape), ctx.nested()?)?;
            DrawingNode::Shape(shape)
        },

        EscherRecordType::Dgg => DrawingNode::DrawingGroupRecord(DrawingGroupRecord::decode(payload)?),
        EscherRecordType::BSE => {
            let (mut entry, blip_data) = BlipStoreEntry::decode_prefix(payload, header.instance)?;
            let nested = DecodeContext {
                blip_type: entry.blip_type.record().map(|_| entry.blip_type),
                ..ctx.nested()?
            };
            decode_stream(blip_data, &mut Parent::BlipStoreEntry(&mut entry), nested)?;
            DrawingNode::BlipStoreEntry(entry)
        },
        EscherRecordType::Dg => DrawingNode::DrawingRecord(DrawingRecord::decode(payload, header.instance)?),
        EscherRecordType::Spgr => DrawingNode::ShapeGroupRecord(ShapeGroupRecord::decode(payload)?),
        EscherRecordType::Sp => DrawingNode::ShapeRecord(ShapeRecord::decode(payload, header.instance)?),
        EscherRecordType::Opt => DrawingNode::PropertyTable(PropertyTable::decode(
            payload,
            usize::from(header.instance),
        )?),
        EscherRecordType::ClientAnchor => DrawingNode::ClientAnchor(ClientAnchor::decode(payload)?),
        EscherRecordType::ClientData => DrawingNode::ClientData,
        EscherRecordType::ClientTextbox => DrawingNode::ClientTextbox(Bytes::copy_from_slice(payload)),

        record_type if record_type.is_blip() => {
            let Some(blip_type) = ctx.blip_type.or(BlipType::from_record(record_type)) else {
                return Ok(None);
            };
            DrawingNode::Blip {
                blip_type,
                blip: Blip::decode(payload, header.instance, blip_type)?,
            }
        },

        _ => {
            debug!(
                "skipping unsupported drawing record 0x{:04X} at offset {} ({} bytes)",
                header.record_type_raw, offset, header.length
            );
            return Ok(None);
        },
    };

    Ok(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::binary::write_u32_le;
    use crate::ole::escher::anchor::AnchorPoint;
    use crate::ole::escher::properties::{Property, property_id};
    use crate::ole::escher::record::{write_atom, write_container};
    use crate::ole::escher::shape::shape_type;
    use crate::ole::escher::writer::{encode, encode_all};

    fn sample_drawing() -> DrawingContainer {
        let properties = PropertyTable::new()
            .with(property_id::BLIP_TO_DISPLAY, Property::blip_id(1))
            .unwrap()
            .with(property_id::SHAPE_NAME, Property::complex(b"P\0i\0c\0\0\0".to_vec()))
            .unwrap();

        let mut group = ShapeGroupContainer::new();
        group.add_shape(ShapeContainer::group(1024));
        group.add_shape(
            ShapeContainer::new(shape_type::PICTURE_FRAME, 1025)
                .with_properties(properties)
                .with_anchor(ClientAnchor::new(
                    AnchorPoint::at("B2").unwrap(),
                    AnchorPoint::at("E9").unwrap(),
                )),
        );
        group.add_shape(ShapeContainer::new(shape_type::TEXT_BOX, 1026).with_textbox(vec![0; 4]));

        DrawingContainer::new(1, group)
    }

    #[test]
    fn test_drawing_roundtrip() {
        let node = DrawingNode::Drawing(sample_drawing());
        let data = encode(&node).unwrap();
        assert_eq!(decode(&data).unwrap(), vec![node]);
    }

    #[test]
    fn test_drawing_group_roundtrip() {
        let mut store = BlipStoreContainer::new();
        let mut entry = BlipStoreEntry::new(BlipType::Png, Blip::new(vec![0x89, b'P', b'N', b'G']));
        entry.digest = [7; 16];
        store.add(entry);
        store.add(BlipStoreEntry::new(BlipType::Emf, Blip::new(vec![1, 2, 3])));

        let mut group = DrawingGroupContainer::new().with_blip_store(store);
        group.register_drawing(&sample_drawing());

        let nodes = vec![
            DrawingNode::DrawingGroup(group),
            DrawingNode::Drawing(sample_drawing()),
        ];
        let data = encode_all(&nodes).unwrap();
        assert_eq!(decode(&data).unwrap(), nodes);
    }

    #[test]
    fn test_untyped_entry_takes_blip_type() {
        let entry = BlipStoreEntry::new(BlipType::Png, Blip::new(vec![1, 2, 3]));
        let expected = encode(&DrawingNode::BlipStoreEntry(entry.clone())).unwrap();

        // Same entry with the BSE instance set to Unknown
        let mut data = expected.clone();
        data[0..2].copy_from_slice(&(2u16 | (BlipType::Unknown as u16) << 4).to_le_bytes());

        let decoded = decode(&data).unwrap();
        assert_eq!(decoded, vec![DrawingNode::BlipStoreEntry(entry)]);
        assert_eq!(encode(&decoded[0]).unwrap(), expected);
    }

    #[test]
    fn test_root_level_atoms() {
        let nodes = vec![
            DrawingNode::ClientData,
            DrawingNode::Blip {
                blip_type: BlipType::Jpeg,
                blip: Blip::new(vec![0xFF, 0xD8]),
            },
        ];
        let data = encode_all(&nodes).unwrap();
        assert_eq!(decode(&data).unwrap(), nodes);
    }

    #[test]
    fn test_unknown_record_skipped() {
        let mut children = Vec::new();
        // Unknown atom with a 5-byte payload, then a known Sp atom
        children.extend_from_slice(&[0x00, 0x00, 0x34, 0x12]);
        write_u32_le(&mut children, 5);
        children.extend_from_slice(&[0xEE; 5]);
        let record = ShapeRecord {
            shape_type: shape_type::RECTANGLE,
            shape_id: 1030,
            flags: Default::default(),
        };
        write_atom(&mut children, 2, record.shape_type, EscherRecordType::Sp, &record.encode())
            .unwrap();
        write_atom(&mut children, 0, 0, EscherRecordType::ClientData, &[]).unwrap();

        let mut data = Vec::new();
        write_container(&mut data, 0, EscherRecordType::SpContainer, &children).unwrap();

        let nodes = decode(&data).unwrap();
        let DrawingNode::Shape(shape) = &nodes[0] else {
            panic!("expected a shape, got {:?}", nodes);
        };
        assert_eq!(shape.record(), record);
        assert!(shape.client_data);
    }

    #[test]
    fn test_unmodeled_records_skipped() {
        let mut data = Vec::new();
        write_atom(&mut data, 0, 4, EscherRecordType::SplitMenuColors, &[0; 16]).unwrap();
        write_atom(&mut data, 3, 0, EscherRecordType::TertiaryOpt, &[]).unwrap();
        // Solver container holding a connector rule, then a child anchor
        data.extend_from_slice(&[0x0F, 0x00, 0x05, 0xF0]);
        write_u32_le(&mut data, 8 + 24);
        data.extend_from_slice(&[0x10, 0x00, 0x12, 0xF0]);
        write_u32_le(&mut data, 24);
        data.extend_from_slice(&[0xAB; 24]);
        data.extend_from_slice(&[0x00, 0x00, 0x0F, 0xF0]);
        write_u32_le(&mut data, 16);
        data.extend_from_slice(&[0xCD; 16]);
        write_atom(&mut data, 0, 0, EscherRecordType::ClientData, &[]).unwrap();
        assert_eq!(decode(&data).unwrap(), vec![DrawingNode::ClientData]);
    }

    #[test]
    fn test_misplaced_atom_dropped() {
        let mut children = Vec::new();
        write_atom(&mut children, 0, 0, EscherRecordType::ClientData, &[]).unwrap();
        let mut data = Vec::new();
        write_container(&mut data, 0, EscherRecordType::SpgrContainer, &children).unwrap();

        assert_eq!(
            decode(&data).unwrap(),
            vec![DrawingNode::ShapeGroup(ShapeGroupContainer::new())]
        );
    }

    #[test]
    fn test_overrun_aborts_decode() {
        let mut data = encode(&DrawingNode::Drawing(sample_drawing())).unwrap();
        // Corrupt the first SpContainer length (inside the SpgrContainer)
        let sp_container = 24 + 8;
        data[sp_container + 4..sp_container + 8].copy_from_slice(&0x7FFF_0000u32.to_le_bytes());

        assert!(matches!(
            decode(&data),
            Err(Error::Format {
                record_type: 0xF004,
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_partial_header() {
        let mut data = encode(&DrawingNode::ClientData).unwrap();
        data.extend_from_slice(&[0, 0, 0x11]);
        assert!(matches!(decode(&data), Err(Error::Format { offset: 8, .. })));
    }

    #[test]
    fn test_bad_property_table() {
        let mut children = Vec::new();
        // Opt declaring 2 entries with only 6 bytes of payload
        write_atom(&mut children, 3, 2, EscherRecordType::Opt, &[0x04, 0x41, 1, 0, 0, 0]).unwrap();
        let mut data = Vec::new();
        write_container(&mut data, 0, EscherRecordType::SpContainer, &children).unwrap();

        assert!(matches!(decode(&data), Err(Error::Validation(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let mut data = Vec::new();
        for _ in 0..=MAX_DEPTH {
            let mut outer = Vec::new();
            write_container(&mut outer, 0, EscherRecordType::SpgrContainer, &data).unwrap();
            data = outer;
        }
        assert!(matches!(decode(&data), Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    mod property_tests {
        use super::*;
        use crate::common::CellCoordinate;
        use crate::ole::escher::properties::PropertyValue;
        use crate::ole::escher::shape::{ShapeFlags, ShapeGroupChild};
        use proptest::prelude::*;

        fn property_strategy() -> impl Strategy<Value = Property> {
            prop_oneof![
                (any::<i32>(), any::<bool>()).prop_map(|(v, blip)| Property {
                    value: PropertyValue::Simple(v),
                    is_blip_id: blip,
                }),
                prop::collection::vec(any::<u8>(), 0..24).prop_map(Property::complex),
            ]
        }

        fn table_strategy() -> impl Strategy<Value = PropertyTable> {
            prop::collection::btree_map(0u16..=0x3FFF, property_strategy(), 0..6)
                .prop_map(|map| map.into_iter().collect())
        }

        fn point_strategy() -> impl Strategy<Value = AnchorPoint> {
            (0u32..=0xFFFF, 1u32..=0x1_0000, any::<u16>(), any::<u16>())
                .prop_map(|(c, r, dx, dy)| AnchorPoint::new(CellCoordinate::new(c, r), dx, dy))
        }

        fn shape_strategy() -> impl Strategy<Value = ShapeContainer> {
            (
                0u16..=0x0FFF,
                any::<u32>(),
                any::<u32>(),
                table_strategy(),
                prop::option::of((any::<u16>(), point_strategy(), point_strategy())),
                prop::option::of(any::<[i32; 4]>()),
                any::<bool>(),
                prop::option::of(prop::collection::vec(any::<u8>(), 0..16)),
            )
                .prop_map(
                    |(shape_type, shape_id, flags, properties, anchor, marker, client_data, textbox)| {
                        ShapeContainer {
                            shape_type,
                            shape_id,
                            flags: ShapeFlags::from_bits_retain(flags),
                            properties,
                            anchor: anchor.map(|(f, s, e)| ClientAnchor::new(s, e).with_flags(f)),
                            group_marker: marker.map(|[left, top, right, bottom]| ShapeGroupRecord {
                                left,
                                top,
                                right,
                                bottom,
                            }),
                            client_data,
                            client_textbox: textbox.map(Bytes::from),
                        }
                    },
                )
        }

        fn group_strategy() -> impl Strategy<Value = ShapeGroupContainer> {
            let leaf = prop::collection::vec(shape_strategy(), 0..4).prop_map(|shapes| {
                ShapeGroupContainer {
                    children: shapes.into_iter().map(ShapeGroupChild::Shape).collect(),
                }
            });
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop::collection::vec(
                    prop_oneof![
                        shape_strategy().prop_map(ShapeGroupChild::Shape),
                        inner.prop_map(ShapeGroupChild::Group),
                    ],
                    0..4,
                )
                .prop_map(|children| ShapeGroupContainer { children })
            })
        }

        fn blip_type_strategy() -> impl Strategy<Value = BlipType> {
            prop::sample::select(vec![
                BlipType::Emf,
                BlipType::Wmf,
                BlipType::Pict,
                BlipType::Jpeg,
                BlipType::Png,
                BlipType::Dib,
                BlipType::Tiff,
                BlipType::CmykJpeg,
            ])
        }

        fn entry_strategy() -> impl Strategy<Value = BlipStoreEntry> {
            (
                blip_type_strategy(),
                any::<[u8; 16]>(),
                prop::option::of(any::<[u8; 16]>()),
                any::<u8>(),
                prop::collection::vec(any::<u8>(), 0..32),
                prop::collection::vec(any::<u8>(), 0..8),
                any::<bool>(),
            )
                .prop_map(|(blip_type, uid, secondary_uid, tag, data, name, embedded)| {
                    let mut blip = Blip::new(data);
                    blip.uid = uid;
                    blip.secondary_uid = secondary_uid;
                    if blip_type.is_bitmap() {
                        blip.tag = tag;
                    }
                    let mut entry = BlipStoreEntry::new(blip_type, blip);
                    entry.name = Bytes::from(name);
                    if !embedded {
                        entry.blip = None;
                    }
                    entry
                })
        }

        fn drawing_group_strategy() -> impl Strategy<Value = DrawingGroupContainer> {
            (
                any::<[u32; 3]>(),
                prop::collection::vec(any::<(u32, u32)>(), 0..4),
                prop::option::of(prop::collection::vec(entry_strategy(), 0..3)),
            )
                .prop_map(|([shape_id_max, shapes_saved, drawings_saved], clusters, entries)| {
                    DrawingGroupContainer {
                        group: DrawingGroupRecord {
                            shape_id_max,
                            shapes_saved,
                            drawings_saved,
                            clusters: clusters
                                .into_iter()
                                .map(|(drawing_id, current_shape_id)| {
                                    crate::ole::escher::drawing::IdCluster {
                                        drawing_id,
                                        current_shape_id,
                                    }
                                })
                                .collect(),
                        },
                        blip_store: entries.map(|entries| BlipStoreContainer { entries }),
                    }
                })
        }

        fn drawing_strategy() -> impl Strategy<Value = DrawingContainer> {
            (0u16..=0x0FFF, any::<u32>(), any::<u32>(), prop::option::of(group_strategy())).prop_map(
                |(drawing_id, shape_count, last_shape_id, shape_group)| DrawingContainer {
                    record: DrawingRecord {
                        drawing_id,
                        shape_count,
                        last_shape_id,
                    },
                    shape_group,
                },
            )
        }

        fn count_shapes(group: &ShapeGroupContainer) -> usize {
            group
                .children
                .iter()
                .map(|child| match child {
                    ShapeGroupChild::Shape(_) => 1,
                    ShapeGroupChild::Group(nested) => count_shapes(nested),
                })
                .sum()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_drawing_offsets_rebased_by_24(group in group_strategy()) {
                use crate::common::binary::read_u16_le;
                use crate::ole::escher::writer::{encode_drawing, encode_shape_group};

                let encoded_group = encode_shape_group(&group).unwrap();
                let encoded = encode_drawing(&DrawingContainer::new(1, group.clone())).unwrap();

                let rebased: Vec<usize> =
                    encoded_group.shape_offsets.iter().map(|o| o + 24).collect();
                prop_assert_eq!(&encoded.shape_offsets, &rebased);
                prop_assert_eq!(encoded.shape_offsets.len(), count_shapes(&group));
                prop_assert_eq!(encoded.shape_types.len(), encoded.shape_offsets.len());
                prop_assert!(encoded.shape_offsets.windows(2).all(|w| w[0] < w[1]));

                for &offset in &encoded.shape_offsets {
                    if offset < encoded.data.len() {
                        let next = read_u16_le(&encoded.data, offset + 2).unwrap();
                        prop_assert!(next == 0xF003 || next == 0xF004);
                    } else {
                        prop_assert_eq!(offset, encoded.data.len());
                    }
                }
            }

            #[test]
            fn prop_drawing_roundtrip(drawing in drawing_strategy()) {
                let node = DrawingNode::Drawing(drawing);
                let data = encode(&node).unwrap();
                prop_assert_eq!(decode(&data).unwrap(), vec![node]);
            }

            #[test]
            fn prop_drawing_group_roundtrip(group in drawing_group_strategy()) {
                let node = DrawingNode::DrawingGroup(group);
                let data = encode(&node).unwrap();
                prop_assert_eq!(decode(&data).unwrap(), vec![node]);
            }

            #[test]
            fn prop_property_table_roundtrip(table in table_strategy()) {
                let data = table.encode().unwrap();
                let decoded = PropertyTable::decode(&data, table.len()).unwrap();
                prop_assert_eq!(decoded, table);
            }

            #[test]
            fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
                let _ = decode(&data);
            }
        }
    }
}
