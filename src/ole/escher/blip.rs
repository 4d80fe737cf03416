//! Blip store: the workbook-wide catalog of embedded images.
//!
//! Each [`BlipStoreEntry`] (BSE) describes one image and owns the blip record
//! holding its bytes. The image bytes themselves are opaque here; they are
//! sliced out on decode and written back unchanged.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::types::{BlipType, EscherRecordType};
use crate::common::binary::{read_i32_le, read_u16_le, write_u16_le, write_u32_le};
use crate::common::{Error, Result};

/// Size of the fixed BSE prefix preceding the name and the blip.
pub const BSE_PREFIX_SIZE: usize = 36;

const UID_SIZE: usize = 16;

/// Tag byte Excel writes in front of bitmap data.
pub const DEFAULT_BITMAP_TAG: u8 = 0xFF;

/// Raw image record (OfficeArtBlip*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blip {
    /// Primary uid (MD4 digest of the image data)
    pub uid: [u8; UID_SIZE],
    /// Secondary uid; its presence makes the record instance odd
    pub secondary_uid: Option<[u8; UID_SIZE]>,
    /// Tag byte of bitmap blips; ignored for metafiles
    pub tag: u8,
    /// Image bytes (for metafiles: the metafile header followed by the data)
    pub data: Bytes,
}

impl Blip {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            uid: [0; UID_SIZE],
            secondary_uid: None,
            tag: DEFAULT_BITMAP_TAG,
            data: data.into(),
        }
    }

    /// Record type, instance and payload for this blip stored as `blip_type`.
    pub fn encode(&self, blip_type: BlipType) -> Result<(EscherRecordType, u16, Vec<u8>)> {
        let (record_type, base_instance) = blip_type.record().ok_or_else(|| {
            Error::Validation(format!("blip type {:?} has no blip record", blip_type))
        })?;

        let mut out = Vec::with_capacity(2 * UID_SIZE + 1 + self.data.len());
        out.extend_from_slice(&self.uid);
        let instance = match &self.secondary_uid {
            Some(uid) => {
                out.extend_from_slice(uid);
                base_instance | 1
            },
            None => base_instance,
        };
        if blip_type.is_bitmap() {
            out.push(self.tag);
        }
        out.extend_from_slice(&self.data);

        Ok((record_type, instance, out))
    }

    /// Decode a blip payload stored as `blip_type`.
    pub fn decode(data: &[u8], instance: u16, blip_type: BlipType) -> Result<Self> {
        let mut pos = 0;

        let uid = to_uid(take(data, &mut pos, UID_SIZE)?);
        let secondary_uid = if instance & 1 == 1 {
            Some(to_uid(take(data, &mut pos, UID_SIZE)?))
        } else {
            None
        };
        let tag = if blip_type.is_bitmap() {
            take(data, &mut pos, 1)?[0]
        } else {
            DEFAULT_BITMAP_TAG
        };

        Ok(Self {
            uid,
            secondary_uid,
            tag,
            data: Bytes::copy_from_slice(&data[pos..]),
        })
    }
}

fn take<'data>(data: &'data [u8], pos: &mut usize, len: usize) -> Result<&'data [u8]> {
    let slice = data.get(*pos..*pos + len).ok_or_else(|| {
        Error::Truncated(format!(
            "blip needs {} bytes at offset {}, has {}",
            len,
            pos,
            data.len()
        ))
    })?;
    *pos += len;
    Ok(slice)
}

fn to_uid(bytes: &[u8]) -> [u8; UID_SIZE] {
    let mut uid = [0; UID_SIZE];
    uid.copy_from_slice(bytes);
    uid
}

/// Blip store entry (OfficeArtFBSE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlipStoreEntry {
    /// Blip type, stored in the record instance
    pub blip_type: BlipType,
    pub win32_type: u8,
    pub mac_type: u8,
    pub digest: [u8; UID_SIZE],
    pub tag: u16,
    pub ref_count: u32,
    /// Offset of the blip in the delay stream (0 when embedded)
    pub delay_offset: u32,
    pub name: Bytes,
    pub blip: Option<Blip>,
}

impl BlipStoreEntry {
    pub fn new(blip_type: BlipType, blip: Blip) -> Self {
        Self {
            blip_type,
            win32_type: blip_type as u8,
            mac_type: blip_type as u8,
            digest: [0; UID_SIZE],
            tag: 0,
            ref_count: 1,
            delay_offset: 0,
            name: Bytes::new(),
            blip: Some(blip),
        }
    }

    /// Encode the 36-byte prefix and the name; `blip_size` is the encoded
    /// size of the blip record that follows.
    pub(crate) fn encode_prefix(&self, blip_size: usize) -> Result<Vec<u8>> {
        let cb_name = u8::try_from(self.name.len()).map_err(|_| {
            Error::Validation(format!("blip name of {} bytes exceeds 255", self.name.len()))
        })?;
        let size = u32::try_from(blip_size)
            .map_err(|_| Error::Validation(format!("blip of {} bytes is too large", blip_size)))?;

        let mut out = Vec::with_capacity(BSE_PREFIX_SIZE + self.name.len());
        out.push(self.win32_type);
        out.push(self.mac_type);
        out.extend_from_slice(&self.digest);
        write_u16_le(&mut out, self.tag);
        write_u32_le(&mut out, size);
        write_u32_le(&mut out, self.ref_count);
        write_u32_le(&mut out, self.delay_offset);
        out.push(0);
        out.push(cb_name);
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&self.name);
        Ok(out)
    }

    /// Decode the prefix and name, returning the entry (without its blip) and
    /// the nested blip sub-stream.
    pub(crate) fn decode_prefix(data: &[u8], instance: u16) -> Result<(Self, &[u8])> {
        if data.len() < BSE_PREFIX_SIZE {
            return Err(Error::Truncated(format!(
                "blip store entry needs {} bytes, has {}",
                BSE_PREFIX_SIZE,
                data.len()
            )));
        }

        let cb_name = data[33] as usize;
        let name_end = BSE_PREFIX_SIZE + cb_name;
        let name = data.get(BSE_PREFIX_SIZE..name_end).ok_or_else(|| {
            Error::Truncated(format!(
                "blip store entry name of {} bytes overruns {} bytes",
                cb_name,
                data.len()
            ))
        })?;

        let entry = Self {
            blip_type: BlipType::from(instance),
            win32_type: data[0],
            mac_type: data[1],
            digest: to_uid(&data[2..18]),
            tag: read_u16_le(data, 18)?,
            ref_count: read_i32_le(data, 24)? as u32,
            delay_offset: read_i32_le(data, 28)? as u32,
            name: Bytes::copy_from_slice(name),
            blip: None,
        };

        Ok((entry, &data[name_end..]))
    }
}

/// Ordered collection of blip store entries.
///
/// Shapes reference entries by 1-based position through the
/// `BLIP_TO_DISPLAY` property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlipStoreContainer {
    pub entries: Vec<BlipStoreEntry>,
}

impl BlipStoreContainer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its 1-based blip id.
    pub fn add(&mut self, entry: BlipStoreEntry) -> u32 {
        self.entries.push(entry);
        self.entries.len() as u32
    }

    /// Entry for a 1-based blip id.
    pub fn get(&self, blip_id: u32) -> Option<&BlipStoreEntry> {
        let index = usize::try_from(blip_id).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }
}
