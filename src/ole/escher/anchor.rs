//! Client anchors: cell-relative shape placement used by Excel.
//!
//! The ClientAnchor payload is nine consecutive u16 fields:
//!
//! ```text
//! flags | col1 | dx1 | row1 | dy1 | col2 | dx2 | row2 | dy2
//! ```
//!
//! Columns and rows are 0-based on the wire. Column offsets are in 1/1024 of
//! the column width, row offsets in 1/256 of the row height.

use serde::{Deserialize, Serialize};

use crate::common::binary::{read_u16_le, write_u16_le};
use crate::common::{CellCoordinate, Error, Result};

/// Size of a ClientAnchor payload in bytes.
pub const CLIENT_ANCHOR_SIZE: usize = 18;

/// One corner of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub cell: CellCoordinate,
    /// Horizontal offset in 1/1024 of the column width
    pub offset_x: u16,
    /// Vertical offset in 1/256 of the row height
    pub offset_y: u16,
}

impl AnchorPoint {
    #[inline]
    pub const fn new(cell: CellCoordinate, offset_x: u16, offset_y: u16) -> Self {
        Self {
            cell,
            offset_x,
            offset_y,
        }
    }

    /// Parse a `"B7"` style coordinate with zero offsets.
    pub fn at(coordinate: &str) -> Result<Self> {
        Ok(Self::new(coordinate.parse()?, 0, 0))
    }

    fn wire_column(&self) -> Result<u16> {
        u16::try_from(self.cell.column).map_err(|_| {
            Error::Validation(format!("anchor column {} exceeds 16 bits", self.cell.column))
        })
    }

    fn wire_row(&self) -> Result<u16> {
        self.cell
            .row_index()
            .and_then(|r| u16::try_from(r).ok())
            .ok_or_else(|| Error::Validation(format!("anchor row {} is out of range", self.cell.row)))
    }
}

/// Two-corner anchor of a shape on a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientAnchor {
    /// Leading flags field (move/size with cells)
    pub flags: u16,
    pub start: AnchorPoint,
    pub end: AnchorPoint,
}

impl ClientAnchor {
    #[inline]
    pub const fn new(start: AnchorPoint, end: AnchorPoint) -> Self {
        Self {
            flags: 0,
            start,
            end,
        }
    }

    #[inline]
    pub const fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Encode the nine-field payload.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(CLIENT_ANCHOR_SIZE);
        write_u16_le(&mut out, self.flags);
        for point in [&self.start, &self.end] {
            write_u16_le(&mut out, point.wire_column()?);
            write_u16_le(&mut out, point.offset_x);
            write_u16_le(&mut out, point.wire_row()?);
            write_u16_le(&mut out, point.offset_y);
        }
        Ok(out)
    }

    /// Decode the nine-field payload; the exact inverse of [`encode`](Self::encode).
    pub fn decode(data: &[u8]) -> Result<Self> {
        let field = |index: usize| read_u16_le(data, index * 2);
        let point = |base: usize| -> Result<AnchorPoint> {
            let column = field(base)?;
            let offset_x = field(base + 1)?;
            let row = field(base + 2)?;
            let offset_y = field(base + 3)?;
            Ok(AnchorPoint::new(
                CellCoordinate::from_indices(u32::from(column), u32::from(row)),
                offset_x,
                offset_y,
            ))
        };

        Ok(Self {
            flags: field(0)?,
            start: point(1)?,
            end: point(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(fields: [u16; 9]) -> Vec<u8> {
        fields.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_to_coordinates() {
        let data = wire([0, 1, 0, 0, 0, 2, 0, 1, 0]);
        let anchor = ClientAnchor::decode(&data).unwrap();

        assert_eq!(anchor.start.cell.to_string(), "B1");
        assert_eq!(anchor.end.cell.to_string(), "C2");
        assert_eq!(anchor.encode().unwrap(), data);
    }

    #[test]
    fn test_encode_from_coordinates() {
        let anchor = ClientAnchor::new(
            AnchorPoint::new("D3".parse().unwrap(), 512, 128),
            AnchorPoint::new("AA10".parse().unwrap(), 1023, 255),
        )
        .with_flags(0x0002);

        let data = anchor.encode().unwrap();
        assert_eq!(data, wire([2, 3, 512, 2, 128, 26, 1023, 9, 255]));
        assert_eq!(ClientAnchor::decode(&data).unwrap(), anchor);
    }

    #[test]
    fn test_encode_rejects_row_zero() {
        let anchor = ClientAnchor::new(
            AnchorPoint::new(CellCoordinate::new(0, 0), 0, 0),
            AnchorPoint::at("A1").unwrap(),
        );
        assert!(matches!(anchor.encode(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_encode_rejects_wide_column() {
        let anchor = ClientAnchor::new(
            AnchorPoint::new(CellCoordinate::new(0x1_0000, 1), 0, 0),
            AnchorPoint::at("A1").unwrap(),
        );
        assert!(anchor.encode().is_err());
    }

    #[test]
    fn test_decode_short_payload() {
        assert!(matches!(
            ClientAnchor::decode(&[0; 16]),
            Err(Error::Truncated(_))
        ));
    }
}
