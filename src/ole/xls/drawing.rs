//! Drawing records of a BIFF8 stream.
//!
//! The workbook's drawing group goes into one MSODRAWINGGROUP record
//! (continued as needed). A sheet's drawing is cut at shape boundaries into
//! one MSODRAWING record per shape so that the caller can place each shape's
//! OBJ record right after its drawing data. The patriarch group shape has no
//! OBJ record and travels with the first real shape.

use std::io::Write;

use tracing::debug;

use super::writer::biff::{BiffWriter, record, record_type};
use crate::common::Result;
use crate::ole::escher::drawing::{DrawingContainer, DrawingGroupContainer};
use crate::ole::escher::writer::{EncodedShapes, encode_drawing, encode_drawing_group};

/// One MSODRAWING chunk and the shape it ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingSegment<'a> {
    pub data: &'a [u8],
    /// Type of the shape closing this segment, if known
    pub shape_type: Option<u16>,
}

/// Write the MSODRAWINGGROUP record(s) for `group`.
pub fn write_drawing_group<W: Write>(
    writer: &mut BiffWriter<W>,
    group: &DrawingGroupContainer,
) -> Result<()> {
    let mut data = Vec::new();
    encode_drawing_group(&mut data, group)?;
    debug!("drawing group of {} bytes", data.len());
    writer.append(&record(record_type::MSODRAWINGGROUP, &data))
}

/// Cut an encoded drawing at its shape boundaries.
///
/// The first segment runs from the start of the drawing to the end of the
/// second shape; each following segment ends with one shape. A nested group's
/// container header travels with its own group shape, and bytes after the
/// last boundary (empty trailing groups) join the last segment.
pub fn drawing_segments(encoded: &EncodedShapes) -> Vec<DrawingSegment<'_>> {
    let data = encoded.data.as_slice();
    if encoded.shape_offsets.len() <= 1 {
        return vec![DrawingSegment {
            data,
            shape_type: encoded.shape_types.last().copied(),
        }];
    }

    let mut bounds: Vec<usize> = encoded.shape_offsets.clone();
    bounds[0] = 0;
    if let Some(last) = bounds.last_mut() {
        *last = data.len();
    }

    bounds
        .windows(2)
        .enumerate()
        .map(|(i, w)| DrawingSegment {
            data: &data[w[0]..w[1]],
            shape_type: encoded.shape_types.get(i + 1).copied(),
        })
        .collect()
}

/// Write a sheet drawing as MSODRAWING records.
///
/// `after_shape` is called after each record with the segment index and the
/// shape type, to emit the shape's OBJ record.
pub fn write_drawing<W, F>(
    writer: &mut BiffWriter<W>,
    drawing: &DrawingContainer,
    mut after_shape: F,
) -> Result<()>
where
    W: Write,
    F: FnMut(&mut BiffWriter<W>, usize, Option<u16>) -> Result<()>,
{
    let encoded = encode_drawing(drawing)?;
    for (index, segment) in drawing_segments(&encoded).into_iter().enumerate() {
        writer.append(&record(record_type::MSODRAWING, segment.data))?;
        after_shape(writer, index, segment.shape_type)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::escher::anchor::{AnchorPoint, ClientAnchor};
    use crate::ole::escher::blip::{Blip, BlipStoreContainer, BlipStoreEntry};
    use crate::ole::escher::node::DrawingNode;
    use crate::ole::escher::parser::decode;
    use crate::ole::escher::shape::{ShapeContainer, ShapeGroupContainer, shape_type};
    use crate::ole::escher::types::BlipType;
    use crate::ole::xls::writer::options::{Dialect, WriterOptions};

    fn records(stream: &[u8]) -> Vec<(u16, Vec<u8>)> {
        let mut out = Vec::new();
        let mut pos = 0;
        while pos + 4 <= stream.len() {
            let record_type = u16::from_le_bytes([stream[pos], stream[pos + 1]]);
            let len = u16::from_le_bytes([stream[pos + 2], stream[pos + 3]]) as usize;
            out.push((record_type, stream[pos + 4..pos + 4 + len].to_vec()));
            pos += 4 + len;
        }
        out
    }

    fn drawing(pictures: u32) -> DrawingContainer {
        let mut group = ShapeGroupContainer::new();
        group.add_shape(ShapeContainer::group(1024));
        for i in 0..pictures {
            group.add_shape(
                ShapeContainer::new(shape_type::PICTURE_FRAME, 1025 + i).with_anchor(
                    ClientAnchor::new(AnchorPoint::at("A1").unwrap(), AnchorPoint::at("C3").unwrap()),
                ),
            );
        }
        DrawingContainer::new(1, group)
    }

    #[test]
    fn test_segments_split_at_shapes() {
        let encoded = encode_drawing(&drawing(2)).unwrap();
        let segments = drawing_segments(&encoded);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].data.len(), encoded.shape_offsets[1]);
        assert_eq!(
            segments.iter().map(|s| s.data.len()).sum::<usize>(),
            encoded.data.len()
        );
        assert!(
            segments
                .iter()
                .all(|s| s.shape_type == Some(shape_type::PICTURE_FRAME))
        );
        // The second segment is exactly one SpContainer
        assert_eq!(&segments[1].data[2..4], &[0x04, 0xF0]);
    }

    #[test]
    fn test_patriarch_only_drawing() {
        let encoded = encode_drawing(&drawing(0)).unwrap();
        let segments = drawing_segments(&encoded);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].data, encoded.data.as_slice());
    }

    #[test]
    fn test_write_drawing_records() {
        let source = drawing(3);
        let mut writer = BiffWriter::new(Vec::new()).unwrap();
        let mut seen = Vec::new();
        write_drawing(&mut writer, &source, |w, index, shape_type| {
            seen.push((index, shape_type));
            // stand-in for the OBJ record
            w.append_record(0x005D, &[0; 4])
        })
        .unwrap();

        let stream = writer.into_inner().unwrap();
        let parts = records(&stream);
        let types: Vec<u16> = parts.iter().map(|(t, _)| *t).collect();
        assert_eq!(types, vec![0x00EC, 0x005D, 0x00EC, 0x005D, 0x00EC, 0x005D]);
        assert_eq!(seen.len(), 3);

        let escher: Vec<u8> = parts
            .into_iter()
            .filter(|(t, _)| *t == 0x00EC)
            .flat_map(|(_, d)| d)
            .collect();
        assert_eq!(decode(&escher).unwrap(), vec![DrawingNode::Drawing(source)]);
    }

    #[test]
    fn test_nested_group_segments() {
        let mut nested = ShapeGroupContainer::new();
        nested.add_shape(ShapeContainer::group(1030));
        nested.add_shape(ShapeContainer::new(shape_type::ELLIPSE, 1031));

        let mut group = ShapeGroupContainer::new();
        group.add_shape(ShapeContainer::group(1024));
        group.add_shape(ShapeContainer::new(shape_type::RECTANGLE, 1025));
        group.add_group(nested);
        group.add_shape(
            ShapeContainer::new(shape_type::PICTURE_FRAME, 1026).with_anchor(ClientAnchor::new(
                AnchorPoint::at("A1").unwrap(),
                AnchorPoint::at("C3").unwrap(),
            )),
        );
        let source = DrawingContainer::new(1, group);

        let mut writer = BiffWriter::new(Vec::new()).unwrap();
        let mut seen = Vec::new();
        write_drawing(&mut writer, &source, |w, index, shape_type| {
            seen.push((index, shape_type));
            w.append_record(0x005D, &[0; 4])
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (0, Some(shape_type::RECTANGLE)),
                (1, Some(shape_type::NOT_PRIMITIVE)),
                (2, Some(shape_type::ELLIPSE)),
                (3, Some(shape_type::PICTURE_FRAME)),
            ]
        );

        let parts = records(&writer.into_inner().unwrap());
        // The nested group's segment opens with its SpgrContainer
        assert_eq!(&parts[2].1[2..4], &[0x03, 0xF0]);
        let escher: Vec<u8> = parts
            .into_iter()
            .filter(|(t, _)| *t == 0x00EC)
            .flat_map(|(_, d)| d)
            .collect();
        assert_eq!(decode(&escher).unwrap(), vec![DrawingNode::Drawing(source)]);
    }

    #[test]
    fn test_drawing_group_continues() {
        let mut store = BlipStoreContainer::new();
        store.add(BlipStoreEntry::new(BlipType::Png, Blip::new(vec![0x5A; 5000])));
        let group = DrawingGroupContainer::new().with_blip_store(store);

        let options = WriterOptions::new(Dialect::Biff5);
        let mut writer = BiffWriter::with_options(Vec::new(), options).unwrap();
        write_drawing_group(&mut writer, &group).unwrap();
        let stream = writer.into_inner().unwrap();

        let parts = records(&stream);
        assert_eq!(parts[0].0, 0x00EB);
        assert_eq!(parts[0].1.len(), 2080);
        assert!(parts[1..].iter().all(|(t, _)| *t == 0x003C));

        let escher: Vec<u8> = parts.into_iter().flat_map(|(_, d)| d).collect();
        assert_eq!(decode(&escher).unwrap(), vec![DrawingNode::DrawingGroup(group)]);
    }
}
