//! Shape property tables (Opt records, MS-ODRAW 2.2.9 / 2.3).
//!
//! A table holds `n` fixed 6-byte entries followed by the data of every
//! complex entry, in entry order:
//!
//! ```text
//! opid (u16) | value_or_size (u32)      x n
//! complex block 0 | complex block 1 | ...
//! ```
//!
//! `opid` packs a 14-bit property id, bit 14 (the value is a blip id) and
//! bit 15 (complex: the 4-byte field is the size of a trailing block).

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::common::binary::{read_i32_le, read_u16_le, write_i32_le, write_u16_le, write_u32_le};
use crate::common::{Error, Result};

const IS_COMPLEX: u16 = 0x8000;
const IS_BLIP_ID: u16 = 0x4000;
const PROPERTY_ID_MASK: u16 = 0x3FFF;

/// Size of one fixed property entry.
pub const ENTRY_SIZE: usize = 6;

/// Largest property id that fits in the 14-bit id field.
pub const MAX_PROPERTY_ID: u16 = PROPERTY_ID_MASK;

/// Frequently used property ids.
pub mod property_id {
    pub const LOCK_AGAINST_GROUPING: u16 = 0x007F;
    pub const TEXT_ID: u16 = 0x0080;
    pub const TEXT_LEFT: u16 = 0x0081;
    pub const TEXT_TOP: u16 = 0x0082;
    pub const TEXT_RIGHT: u16 = 0x0083;
    pub const TEXT_BOTTOM: u16 = 0x0084;
    pub const BLIP_TO_DISPLAY: u16 = 0x0104;
    pub const PICTURE_FILE_NAME: u16 = 0x0105;
    pub const FILL_COLOR: u16 = 0x0181;
    pub const FILL_BACK_COLOR: u16 = 0x0183;
    pub const FILL_STYLE_BOOLEANS: u16 = 0x01BF;
    pub const LINE_COLOR: u16 = 0x01C0;
    pub const LINE_STYLE_BOOLEANS: u16 = 0x01FF;
    pub const SHADOW_COLOR: u16 = 0x0201;
    pub const SHADOW_STYLE_BOOLEANS: u16 = 0x023F;
    pub const SHAPE_NAME: u16 = 0x0380;
    pub const GROUP_SHAPE_BOOLEANS: u16 = 0x03BF;
}

/// Value of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Value stored directly in the 4-byte field
    Simple(i32),
    /// Value stored in a trailing variable-length block
    Complex(Bytes),
}

/// One property: its value plus the "value is a blip id" marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub value: PropertyValue,
    pub is_blip_id: bool,
}

impl Property {
    #[inline]
    pub fn simple(value: i32) -> Self {
        Self {
            value: PropertyValue::Simple(value),
            is_blip_id: false,
        }
    }

    #[inline]
    pub fn complex(data: impl Into<Bytes>) -> Self {
        Self {
            value: PropertyValue::Complex(data.into()),
            is_blip_id: false,
        }
    }

    /// A simple property whose value references a blip store entry (1-based).
    #[inline]
    pub fn blip_id(index: u32) -> Self {
        Self {
            value: PropertyValue::Simple(index as i32),
            is_blip_id: true,
        }
    }
}

/// Property table of a shape, keyed by property id.
///
/// Entries are encoded in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    properties: BTreeMap<u16, Property>,
}

impl PropertyTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value for the id.
    pub fn set(&mut self, id: u16, property: Property) -> Result<()> {
        if id > MAX_PROPERTY_ID {
            return Err(Error::Validation(format!(
                "property id 0x{:04X} exceeds 14 bits",
                id
            )));
        }
        self.properties.insert(id, property);
        Ok(())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, id: u16, property: Property) -> Result<Self> {
        self.set(id, property)?;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, id: u16) -> Option<&Property> {
        self.properties.get(&id)
    }

    #[inline]
    pub fn get_int(&self, id: u16) -> Option<i32> {
        match self.properties.get(&id) {
            Some(Property {
                value: PropertyValue::Simple(v),
                ..
            }) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn get_binary(&self, id: u16) -> Option<&Bytes> {
        match self.properties.get(&id) {
            Some(Property {
                value: PropertyValue::Complex(data),
                ..
            }) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn remove(&mut self, id: u16) -> Option<Property> {
        self.properties.remove(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Property)> {
        self.properties.iter().map(|(id, prop)| (*id, prop))
    }

    /// Record instance of the Opt record: the property count.
    pub fn instance(&self) -> Result<u16> {
        u16::try_from(self.properties.len())
            .ok()
            .filter(|&n| n <= 0x0FFF)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "{} properties do not fit the 12-bit instance field",
                    self.properties.len()
                ))
            })
    }

    /// Encode the Opt payload: the fixed entries, then complex blocks in order.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let fixed_size = self.properties.len() * ENTRY_SIZE;
        let complex_size: usize = self
            .properties
            .values()
            .map(|p| match &p.value {
                PropertyValue::Complex(data) => data.len(),
                PropertyValue::Simple(_) => 0,
            })
            .sum();

        let mut fixed = Vec::with_capacity(fixed_size + complex_size);
        let mut complex = Vec::with_capacity(complex_size);

        for (id, prop) in &self.properties {
            let mut opid = id & PROPERTY_ID_MASK;
            if prop.is_blip_id {
                opid |= IS_BLIP_ID;
            }
            match &prop.value {
                PropertyValue::Simple(value) => {
                    write_u16_le(&mut fixed, opid);
                    write_i32_le(&mut fixed, *value);
                },
                PropertyValue::Complex(data) => {
                    let size = u32::try_from(data.len())
                        .ok()
                        .filter(|&s| s <= i32::MAX as u32)
                        .ok_or_else(|| {
                            Error::Validation(format!(
                                "complex property 0x{:04X} is too large",
                                id
                            ))
                        })?;
                    write_u16_le(&mut fixed, opid | IS_COMPLEX);
                    write_u32_le(&mut fixed, size);
                    complex.extend_from_slice(data);
                },
            }
        }

        fixed.extend_from_slice(&complex);
        Ok(fixed)
    }

    /// Decode an Opt payload holding `count` entries.
    ///
    /// A fixed block longer than the payload, or complex sizes that add up
    /// past its end, is `Error::Validation`. Bytes after the last complex
    /// block are ignored.
    pub fn decode(data: &[u8], count: usize) -> Result<Self> {
        let fixed_size = count * ENTRY_SIZE;
        if fixed_size > data.len() {
            return Err(Error::Validation(format!(
                "property table declares {} entries ({} bytes) but holds {} bytes",
                count,
                fixed_size,
                data.len()
            )));
        }

        let mut properties = BTreeMap::new();
        let mut complex_offset = fixed_size;

        for i in 0..count {
            let offset = i * ENTRY_SIZE;
            let opid = read_u16_le(data, offset)?;
            let op = read_i32_le(data, offset + 2)?;

            let id = opid & PROPERTY_ID_MASK;
            let is_blip_id = opid & IS_BLIP_ID != 0;

            let value = if opid & IS_COMPLEX != 0 {
                let end = usize::try_from(op)
                    .ok()
                    .and_then(|size| complex_offset.checked_add(size))
                    .filter(|&end| end <= data.len())
                    .ok_or_else(|| {
                        Error::Validation(format!(
                            "complex property 0x{:04X} declares {} bytes but {} remain",
                            id,
                            op,
                            data.len() - complex_offset
                        ))
                    })?;
                let block = Bytes::copy_from_slice(&data[complex_offset..end]);
                complex_offset = end;
                PropertyValue::Complex(block)
            } else {
                PropertyValue::Simple(op)
            };

            properties.insert(id, Property { value, is_blip_id });
        }

        Ok(Self { properties })
    }
}

impl FromIterator<(u16, Property)> for PropertyTable {
    /// Collect properties; ids are masked to 14 bits.
    fn from_iter<I: IntoIterator<Item = (u16, Property)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(id, prop)| (id & PROPERTY_ID_MASK, prop))
                .collect(),
        }
    }
}
