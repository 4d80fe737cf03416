//! The 8-byte OfficeArt record header.
//!
//! # Format
//!
//! - Bytes 0-1: Version (4 bits) | Instance (12 bits)
//! - Bytes 2-3: Record Type
//! - Bytes 4-7: Record Length (32-bit)

use zerocopy::IntoBytes;
use zerocopy_derive::*;

use super::types::EscherRecordType;
use crate::common::binary::{read_i32_le, read_u16_le};
use crate::common::{Error, Result};

/// Size of every record header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Version nibble used by all container records.
pub const CONTAINER_VERSION: u8 = 0x0F;

/// Largest value of the 12-bit instance field.
pub const MAX_INSTANCE: u16 = 0x0FFF;

/// Escher record header (8 bytes) - zerocopy compatible
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EscherRecordHeader {
    pub ver_inst: u16,
    pub rec_type: u16,
    pub length: u32,
}

impl EscherRecordHeader {
    pub const fn new(version: u8, instance: u16, rec_type: u16, length: u32) -> Self {
        let ver_inst = (version as u16 & 0x0F) | ((instance & 0x0FFF) << 4);
        Self {
            ver_inst: ver_inst.to_le(),
            rec_type: rec_type.to_le(),
            length: length.to_le(),
        }
    }

    pub const fn container(rec_type: u16, length: u32) -> Self {
        Self::new(CONTAINER_VERSION, 0, rec_type, length)
    }
}

/// A header read back from a buffer, with its payload bounds validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub version: u8,
    pub instance: u16,
    pub record_type_raw: u16,
    pub record_type: EscherRecordType,
    /// Payload length (excluding the header)
    pub length: usize,
}

impl RecordHeader {
    /// Read the header at `offset` and check that its payload fits in `data`.
    ///
    /// A header cut short, a negative length, or a length that runs past the
    /// end of `data` are all `Error::Format`.
    pub fn read(data: &[u8], offset: usize) -> Result<Self> {
        let available = data.len().saturating_sub(offset);
        if available < HEADER_SIZE {
            return Err(Error::Format {
                record_type: read_u16_le(data, offset + 2).unwrap_or(0),
                offset,
                declared: HEADER_SIZE as i64,
                available,
            });
        }

        let ver_inst = read_u16_le(data, offset)?;
        let record_type_raw = read_u16_le(data, offset + 2)?;
        let declared = read_i32_le(data, offset + 4)?;

        let remaining = available - HEADER_SIZE;
        if declared < 0 || declared as usize > remaining {
            return Err(Error::Format {
                record_type: record_type_raw,
                offset,
                declared: i64::from(declared),
                available: remaining,
            });
        }

        Ok(Self {
            version: (ver_inst & 0x000F) as u8,
            instance: (ver_inst >> 4) & 0x0FFF,
            record_type_raw,
            record_type: EscherRecordType::from(record_type_raw),
            length: declared as usize,
        })
    }

    /// Payload slice of this record when its header starts at `offset`.
    #[inline]
    pub fn payload<'data>(&self, data: &'data [u8], offset: usize) -> &'data [u8] {
        let start = offset + HEADER_SIZE;
        &data[start..start + self.length]
    }

    /// Bytes consumed by this record, header included.
    #[inline]
    pub const fn total_size(&self) -> usize {
        HEADER_SIZE + self.length
    }
}

fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&l| l <= i32::MAX as u32)
        .ok_or_else(|| Error::Validation(format!("record payload of {} bytes is too large", len)))
}

/// Append an atom record (header followed by `data`).
pub fn write_atom(
    out: &mut Vec<u8>,
    version: u8,
    instance: u16,
    record_type: EscherRecordType,
    data: &[u8],
) -> Result<()> {
    if instance > MAX_INSTANCE {
        return Err(Error::Validation(format!(
            "instance 0x{:X} of record {:?} exceeds 12 bits",
            instance, record_type
        )));
    }
    let header = EscherRecordHeader::new(version, instance, record_type.into(), length_field(data.len())?);
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(data);
    Ok(())
}

/// Append a container record with pre-encoded child data.
pub fn write_container(
    out: &mut Vec<u8>,
    instance: u16,
    record_type: EscherRecordType,
    child_data: &[u8],
) -> Result<()> {
    write_atom(out, CONTAINER_VERSION, instance, record_type, child_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = EscherRecordHeader::new(0x03, 2, 0xF00B, 12);
        assert_eq!(
            header.as_bytes(),
            &[0x23, 0x00, 0x0B, 0xF0, 0x0C, 0x00, 0x00, 0x00]
        );
        let container = EscherRecordHeader::container(0xF004, 0);
        assert_eq!(container.as_bytes()[..2], [0x0F, 0x00]);
    }

    #[test]
    fn test_read_header() {
        let data = [0x0F, 0x00, 0x02, 0xF0, 0x04, 0x00, 0x00, 0x00, 1, 2, 3, 4];
        let header = RecordHeader::read(&data, 0).unwrap();
        assert_eq!(header.version, 0x0F);
        assert_eq!(header.instance, 0);
        assert_eq!(header.record_type, EscherRecordType::DgContainer);
        assert_eq!(header.length, 4);
        assert_eq!(header.payload(&data, 0), &[1, 2, 3, 4]);
        assert_eq!(header.total_size(), 12);
    }

    #[test]
    fn test_read_header_overrun() {
        let data = [0x00, 0x00, 0x0A, 0xF0, 0x09, 0x00, 0x00, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];
        match RecordHeader::read(&data, 0) {
            Err(Error::Format {
                record_type,
                declared,
                available,
                ..
            }) => {
                assert_eq!(record_type, 0xF00A);
                assert_eq!(declared, 9);
                assert_eq!(available, 8);
            },
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_header_negative_length() {
        let data = [0x00, 0x00, 0x0A, 0xF0, 0x00, 0x00, 0x00, 0x80];
        assert!(matches!(
            RecordHeader::read(&data, 0),
            Err(Error::Format { declared, .. }) if declared == i64::from(i32::MIN)
        ));
    }

    #[test]
    fn test_read_header_truncated() {
        assert!(matches!(
            RecordHeader::read(&[0x00, 0x00, 0x0A], 0),
            Err(Error::Format { available: 3, .. })
        ));
    }

    #[test]
    fn test_write_atom() {
        let mut out = Vec::new();
        write_atom(&mut out, 0x02, 1, EscherRecordType::Sp, &[9; 8]).unwrap();
        assert_eq!(&out[..8], &[0x12, 0x00, 0x0A, 0xF0, 0x08, 0x00, 0x00, 0x00]);
        assert_eq!(out.len(), 16);
    }
}
