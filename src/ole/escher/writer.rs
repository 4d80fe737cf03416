//! Drawing-tree encoder.
//!
//! Containers are encoded bottom-up: children are serialized first so the
//! container length is known when its header is written. Encoding a drawing
//! also produces the shape offset table the MSODRAWING emitter uses to cut
//! the stream into one record per shape.

use super::anchor::ClientAnchor;
use super::blip::{Blip, BlipStoreContainer, BlipStoreEntry};
use super::drawing::{DrawingContainer, DrawingGroupContainer};
use super::node::DrawingNode;
use super::properties::PropertyTable;
use super::record::{HEADER_SIZE, write_atom, write_container};
use super::shape::{
    ShapeContainer, ShapeGroupChild, ShapeGroupContainer, ShapeGroupRecord, ShapeRecord,
};
use super::types::{BlipType, EscherRecordType};
use crate::common::{Error, Result};

/// Bytes in front of the shape group inside an encoded drawing: the Dg
/// container header plus the whole Dg atom.
pub const DRAWING_PREFIX_SIZE: usize = HEADER_SIZE + HEADER_SIZE + 8;

const DGG_VERSION: u8 = 0;
const BSE_VERSION: u8 = 2;
const DG_VERSION: u8 = 0;
const SPGR_VERSION: u8 = 1;
const SP_VERSION: u8 = 2;
const OPT_VERSION: u8 = 3;
const ATOM_VERSION: u8 = 0;

/// State handed down from a container to the records it encloses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeContext {
    /// Storage type of the enclosing blip store entry
    pub blip_type: Option<BlipType>,
}

impl EncodeContext {
    #[inline]
    pub fn with_blip_type(blip_type: BlipType) -> Self {
        Self {
            blip_type: Some(blip_type),
        }
    }
}

/// An encoded shape group plus the per-shape bookkeeping gathered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedShapes {
    pub data: Vec<u8>,
    /// End offset of every shape, nested groups included, counted from the
    /// start of the encoded bytes (header included)
    pub shape_offsets: Vec<usize>,
    /// Shape type of each entry of `shape_offsets`
    pub shape_types: Vec<u16>,
}

/// Encode one node.
pub fn encode(node: &DrawingNode) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, node)?;
    Ok(out)
}

/// Encode a sequence of sibling nodes back to back.
pub fn encode_all(nodes: &[DrawingNode]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for node in nodes {
        encode_into(&mut out, node)?;
    }
    Ok(out)
}

/// Append the encoding of `node` to `out`.
pub fn encode_into(out: &mut Vec<u8>, node: &DrawingNode) -> Result<()> {
    match node {
        DrawingNode::DrawingGroup(group) => encode_drawing_group(out, group),
        DrawingNode::BlipStore(store) => encode_blip_store(out, store),
        DrawingNode::Drawing(drawing) => {
            out.extend_from_slice(&encode_drawing(drawing)?.data);
            Ok(())
        },
        DrawingNode::ShapeGroup(group) => {
            out.extend_from_slice(&encode_shape_group(group)?.data);
            Ok(())
        },
        DrawingNode::Shape(shape) => encode_shape(out, shape),
        DrawingNode::DrawingGroupRecord(record) => write_atom(
            out,
            DGG_VERSION,
            0,
            EscherRecordType::Dgg,
            &record.encode()?,
        ),
        DrawingNode::BlipStoreEntry(entry) => encode_blip_store_entry(out, entry),
        DrawingNode::DrawingRecord(record) => write_atom(
            out,
            DG_VERSION,
            record.drawing_id,
            EscherRecordType::Dg,
            &record.encode(),
        ),
        DrawingNode::ShapeGroupRecord(record) => encode_spgr(out, record),
        DrawingNode::ShapeRecord(record) => encode_sp(out, record),
        DrawingNode::PropertyTable(table) => encode_opt(out, table),
        DrawingNode::ClientAnchor(anchor) => encode_client_anchor(out, anchor),
        DrawingNode::ClientData => write_atom(out, ATOM_VERSION, 0, EscherRecordType::ClientData, &[]),
        DrawingNode::ClientTextbox(data) => {
            write_atom(out, ATOM_VERSION, 0, EscherRecordType::ClientTextbox, data)
        },
        DrawingNode::Blip { blip_type, blip } => {
            encode_blip(out, blip, EncodeContext::with_blip_type(*blip_type))
        },
    }
}

/// DggContainer: the Dgg atom, then the blip store if any.
pub fn encode_drawing_group(out: &mut Vec<u8>, group: &DrawingGroupContainer) -> Result<()> {
    let mut children = Vec::new();
    write_atom(
        &mut children,
        DGG_VERSION,
        0,
        EscherRecordType::Dgg,
        &group.group.encode()?,
    )?;
    if let Some(store) = &group.blip_store {
        encode_blip_store(&mut children, store)?;
    }
    write_container(out, 0, EscherRecordType::DggContainer, &children)
}

/// BStoreContainer; the instance is the entry count.
pub fn encode_blip_store(out: &mut Vec<u8>, store: &BlipStoreContainer) -> Result<()> {
    let count = u16::try_from(store.entries.len()).map_err(|_| {
        Error::Validation(format!(
            "blip store with {} entries exceeds the instance field",
            store.entries.len()
        ))
    })?;

    let mut children = Vec::new();
    for entry in &store.entries {
        encode_blip_store_entry(&mut children, entry)?;
    }
    write_container(out, count, EscherRecordType::BStoreContainer, &children)
}

/// BSE: prefix, name, then the entry's blip encoded as `entry.blip_type`.
pub fn encode_blip_store_entry(out: &mut Vec<u8>, entry: &BlipStoreEntry) -> Result<()> {
    let mut blip_data = Vec::new();
    if let Some(blip) = &entry.blip {
        encode_blip(&mut blip_data, blip, EncodeContext::with_blip_type(entry.blip_type))?;
    }

    let mut payload = entry.encode_prefix(blip_data.len())?;
    payload.extend_from_slice(&blip_data);
    write_atom(
        out,
        BSE_VERSION,
        entry.blip_type as u16,
        EscherRecordType::BSE,
        &payload,
    )
}

/// Blip record in the storage type carried by `ctx`.
pub fn encode_blip(out: &mut Vec<u8>, blip: &Blip, ctx: EncodeContext) -> Result<()> {
    let blip_type = ctx
        .blip_type
        .ok_or_else(|| Error::Validation("blip encoded without a blip type".to_string()))?;
    let (record_type, instance, data) = blip.encode(blip_type)?;
    write_atom(out, ATOM_VERSION, instance, record_type, &data)
}

/// An encoded drawing with its shape offset table.
///
/// Offsets are those of the shape group rebiased by the Dg container header
/// and Dg atom, so they count from the start of `data`.
pub fn encode_drawing(drawing: &DrawingContainer) -> Result<EncodedShapes> {
    let mut children = Vec::with_capacity(DRAWING_PREFIX_SIZE - HEADER_SIZE);
    write_atom(
        &mut children,
        DG_VERSION,
        drawing.record.drawing_id,
        EscherRecordType::Dg,
        &drawing.record.encode(),
    )?;

    let shapes = match &drawing.shape_group {
        Some(group) => encode_shape_group(group)?,
        None => EncodedShapes::default(),
    };
    children.extend_from_slice(&shapes.data);

    let mut data = Vec::with_capacity(HEADER_SIZE + children.len());
    write_container(&mut data, 0, EscherRecordType::DgContainer, &children)?;

    Ok(EncodedShapes {
        data,
        shape_offsets: shapes
            .shape_offsets
            .into_iter()
            .map(|offset| offset + DRAWING_PREFIX_SIZE)
            .collect(),
        shape_types: shapes.shape_types,
    })
}

/// SpgrContainer, recording where each shape ends.
///
/// Shapes of nested groups get their own entries, shifted to count from the
/// start of this container.
pub fn encode_shape_group(group: &ShapeGroupContainer) -> Result<EncodedShapes> {
    let mut children = Vec::new();
    let mut shape_offsets = Vec::new();
    let mut shape_types = Vec::new();
    let mut total = HEADER_SIZE;

    for child in &group.children {
        let start = children.len();
        match child {
            ShapeGroupChild::Shape(shape) => {
                encode_shape(&mut children, shape)?;
                total += children.len() - start;
                shape_offsets.push(total);
                shape_types.push(shape.shape_type);
            },
            ShapeGroupChild::Group(nested) => {
                let encoded = encode_shape_group(nested)?;
                children.extend_from_slice(&encoded.data);
                shape_offsets.extend(encoded.shape_offsets.iter().map(|offset| offset + total));
                shape_types.extend(encoded.shape_types);
                total += encoded.data.len();
            },
        }
    }

    let mut data = Vec::with_capacity(HEADER_SIZE + children.len());
    write_container(&mut data, 0, EscherRecordType::SpgrContainer, &children)?;

    Ok(EncodedShapes {
        data,
        shape_offsets,
        shape_types,
    })
}

/// SpContainer: Spgr, Sp, Opt, ClientAnchor, ClientData, ClientTextbox.
pub fn encode_shape(out: &mut Vec<u8>, shape: &ShapeContainer) -> Result<()> {
    let mut children = Vec::new();

    if let Some(marker) = &shape.group_marker {
        encode_spgr(&mut children, marker)?;
    }
    encode_sp(&mut children, &shape.record())?;
    if !shape.properties.is_empty() {
        encode_opt(&mut children, &shape.properties)?;
    }
    if let Some(anchor) = &shape.anchor {
        encode_client_anchor(&mut children, anchor)?;
    }
    if shape.client_data {
        write_atom(&mut children, ATOM_VERSION, 0, EscherRecordType::ClientData, &[])?;
    }
    if let Some(textbox) = &shape.client_textbox {
        write_atom(
            &mut children,
            ATOM_VERSION,
            0,
            EscherRecordType::ClientTextbox,
            textbox,
        )?;
    }

    write_container(out, 0, EscherRecordType::SpContainer, &children)
}

fn encode_spgr(out: &mut Vec<u8>, record: &ShapeGroupRecord) -> Result<()> {
    write_atom(out, SPGR_VERSION, 0, EscherRecordType::Spgr, &record.encode())
}

fn encode_sp(out: &mut Vec<u8>, record: &ShapeRecord) -> Result<()> {
    write_atom(
        out,
        SP_VERSION,
        record.shape_type,
        EscherRecordType::Sp,
        &record.encode(),
    )
}

fn encode_opt(out: &mut Vec<u8>, table: &PropertyTable) -> Result<()> {
    write_atom(
        out,
        OPT_VERSION,
        table.instance()?,
        EscherRecordType::Opt,
        &table.encode()?,
    )
}

fn encode_client_anchor(out: &mut Vec<u8>, anchor: &ClientAnchor) -> Result<()> {
    write_atom(
        out,
        ATOM_VERSION,
        0,
        EscherRecordType::ClientAnchor,
        &anchor.encode()?,
    )
}
