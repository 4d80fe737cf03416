//! Drawing group (workbook level) and drawing (sheet level) containers.

use serde::{Deserialize, Serialize};

use super::blip::BlipStoreContainer;
use super::shape::ShapeGroupContainer;
use crate::common::binary::{read_i32_le, write_u32_le};
use crate::common::{Error, Result};

/// File identifier cluster of the Dgg atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdCluster {
    pub drawing_id: u32,
    /// Next free shape id in this cluster
    pub current_shape_id: u32,
}

/// Dgg atom: shape id bookkeeping for the whole workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingGroupRecord {
    /// Current maximum shape id
    pub shape_id_max: u32,
    pub shapes_saved: u32,
    pub drawings_saved: u32,
    pub clusters: Vec<IdCluster>,
}

impl DrawingGroupRecord {
    const FIXED_SIZE: usize = 16;

    pub fn encode(&self) -> Result<Vec<u8>> {
        let cidcl = u32::try_from(self.clusters.len() + 1)
            .map_err(|_| Error::Validation("too many id clusters".to_string()))?;

        let mut out = Vec::with_capacity(Self::FIXED_SIZE + self.clusters.len() * 8);
        write_u32_le(&mut out, self.shape_id_max);
        write_u32_le(&mut out, cidcl);
        write_u32_le(&mut out, self.shapes_saved);
        write_u32_le(&mut out, self.drawings_saved);
        for cluster in &self.clusters {
            write_u32_le(&mut out, cluster.drawing_id);
            write_u32_le(&mut out, cluster.current_shape_id);
        }
        Ok(out)
    }

    /// Decode a Dgg payload. Clusters are read from whatever follows the
    /// fixed part, so a `cidcl` that disagrees with the payload size does not
    /// fail.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let shape_id_max = read_i32_le(data, 0)? as u32;
        let shapes_saved = read_i32_le(data, 8)? as u32;
        let drawings_saved = read_i32_le(data, 12)? as u32;

        let clusters = data[Self::FIXED_SIZE..]
            .chunks_exact(8)
            .map(|chunk| -> Result<IdCluster> {
                Ok(IdCluster {
                    drawing_id: read_i32_le(chunk, 0)? as u32,
                    current_shape_id: read_i32_le(chunk, 4)? as u32,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            shape_id_max,
            shapes_saved,
            drawings_saved,
            clusters,
        })
    }
}

/// Workbook-wide drawing group (DggContainer), stored in MSODRAWINGGROUP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingGroupContainer {
    pub group: DrawingGroupRecord,
    pub blip_store: Option<BlipStoreContainer>,
}

impl DrawingGroupContainer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blip_store(mut self, store: BlipStoreContainer) -> Self {
        self.blip_store = Some(store);
        self
    }

    /// Register a drawing's shapes in the id bookkeeping, the way Excel does
    /// when saving: one cluster per drawing, shape ids counted from the
    /// drawing's max id.
    pub fn register_drawing(&mut self, drawing: &DrawingContainer) {
        let shapes = drawing.shape_count() as u32;
        self.group.clusters.push(IdCluster {
            drawing_id: u32::from(drawing.record.drawing_id),
            current_shape_id: drawing.record.last_shape_id.saturating_add(1),
        });
        self.group.shapes_saved = self.group.shapes_saved.saturating_add(shapes);
        self.group.drawings_saved = self.group.drawings_saved.saturating_add(1);
        self.group.shape_id_max = self
            .group
            .shape_id_max
            .max(drawing.record.last_shape_id.saturating_add(1));
    }
}

/// Dg atom: drawing id (record instance), shape count, last shape id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub drawing_id: u16,
    pub shape_count: u32,
    pub last_shape_id: u32,
}

impl DrawingRecord {
    pub const SIZE: usize = 8;

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        write_u32_le(&mut out, self.shape_count);
        write_u32_le(&mut out, self.last_shape_id);
        out
    }

    pub fn decode(data: &[u8], instance: u16) -> Result<Self> {
        Ok(Self {
            drawing_id: instance,
            shape_count: read_i32_le(data, 0)? as u32,
            last_shape_id: read_i32_le(data, 4)? as u32,
        })
    }
}

/// A sheet's drawing (DgContainer), stored in MSODRAWING records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingContainer {
    pub record: DrawingRecord,
    pub shape_group: Option<ShapeGroupContainer>,
}

impl DrawingContainer {
    /// A drawing whose Dg atom is derived from `shape_group`.
    pub fn new(drawing_id: u16, shape_group: ShapeGroupContainer) -> Self {
        let record = DrawingRecord {
            drawing_id,
            shape_count: shape_group.shape_count() as u32,
            last_shape_id: shape_group.max_shape_id().unwrap_or(0),
        };
        Self {
            record,
            shape_group: Some(shape_group),
        }
    }

    pub fn shape_count(&self) -> usize {
        self.shape_group
            .as_ref()
            .map_or(0, ShapeGroupContainer::shape_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::binary::read_u32_le;
    use crate::ole::escher::shape::{ShapeContainer, shape_type};

    #[test]
    fn test_dgg_roundtrip() {
        let record = DrawingGroupRecord {
            shape_id_max: 2050,
            shapes_saved: 4,
            drawings_saved: 2,
            clusters: vec![
                IdCluster {
                    drawing_id: 1,
                    current_shape_id: 3,
                },
                IdCluster {
                    drawing_id: 2,
                    current_shape_id: 2,
                },
            ],
        };
        let data = record.encode().unwrap();
        assert_eq!(data.len(), 16 + 16);
        assert_eq!(read_u32_le(&data, 4).unwrap(), 3);
        assert_eq!(DrawingGroupRecord::decode(&data).unwrap(), record);
    }

    #[test]
    fn test_dgg_short() {
        assert!(DrawingGroupRecord::decode(&[0; 12]).is_err());
    }

    #[test]
    fn test_drawing_new_counts_shapes() {
        let mut group = ShapeGroupContainer::new();
        group.add_shape(ShapeContainer::group(1024));
        group.add_shape(ShapeContainer::new(shape_type::PICTURE_FRAME, 1025));

        let drawing = DrawingContainer::new(1, group);
        assert_eq!(drawing.record.shape_count, 2);
        assert_eq!(drawing.record.last_shape_id, 1025);

        let mut dgg = DrawingGroupContainer::new();
        dgg.register_drawing(&drawing);
        assert_eq!(dgg.group.shape_id_max, 1026);
        assert_eq!(dgg.group.drawings_saved, 1);
        assert_eq!(
            dgg.group.clusters,
            vec![IdCluster {
                drawing_id: 1,
                current_shape_id: 1026
            }]
        );
    }
}
