//! Fixed-width little-endian primitives shared by the BIFF framer and the
//! OfficeArt codec.
//!
//! All 4-byte quantities read by the drawing decoder go through
//! [`read_i32_le`], which treats the top byte as a sign flag. Lengths, sizes
//! and offsets are read the same way, so a length with the top bit set comes
//! back negative and is rejected by the caller.

use zerocopy::{FromBytes, LE, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn ensure(data: &[u8], offset: usize, width: usize) -> BinaryResult<()> {
    match offset.checked_add(width) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(BinaryError::InsufficientData {
            expected: offset.saturating_add(width),
            available: data.len(),
        }),
    }
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use biff_escher::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    ensure(data, offset, 2)?;
    U16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Read a little-endian u32 from a byte slice at the given offset.
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> BinaryResult<u32> {
    ensure(data, offset, 4)?;
    U32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
}

/// Read a 4-byte little-endian value whose fourth byte is a sign flag.
///
/// When byte 3 is `>= 128` the result is `-((256 - byte3) << 24)` plus the
/// low 24 bits, otherwise `(byte3 & 0x7F) << 24` plus the low 24 bits.
///
/// # Examples
///
/// ```
/// use biff_escher::common::binary::read_i32_le;
/// assert_eq!(read_i32_le(&[0xFF, 0xFF, 0xFF, 0xFF], 0).unwrap(), -1);
/// assert_eq!(read_i32_le(&[0x10, 0x00, 0x00, 0x00], 0).unwrap(), 16);
/// ```
#[inline]
pub fn read_i32_le(data: &[u8], offset: usize) -> BinaryResult<i32> {
    ensure(data, offset, 4)?;
    let low = i64::from(data[offset])
        | (i64::from(data[offset + 1]) << 8)
        | (i64::from(data[offset + 2]) << 16);
    let top = i64::from(data[offset + 3]);
    let high = if top >= 128 {
        -((256 - top) << 24)
    } else {
        (top & 0x7F) << 24
    };
    Ok((high | low) as i32)
}

#[inline]
pub fn write_u16_le(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn write_u32_le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn write_i32_le(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Byte order the host uses for IEEE 754 doubles.
///
/// Detected once (typically when a `BiffWriter` is created) and then passed
/// around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatByteOrder {
    LittleEndian,
    BigEndian,
}

impl FloatByteOrder {
    /// Probe value and its expected little-endian encoding.
    const PROBE: f64 = 1.2345;
    const PROBE_LE: [u8; 8] = [0x8D, 0x97, 0x6E, 0x12, 0x83, 0xC0, 0xF3, 0x3F];

    /// Detect the host double layout.
    pub fn detect() -> crate::common::Result<Self> {
        Self::classify(Self::PROBE.to_ne_bytes())
    }

    fn classify(native: [u8; 8]) -> crate::common::Result<Self> {
        let mut reversed = Self::PROBE_LE;
        reversed.reverse();

        if native == Self::PROBE_LE {
            Ok(Self::LittleEndian)
        } else if native == reversed {
            Ok(Self::BigEndian)
        } else {
            Err(crate::common::Error::Platform)
        }
    }

    /// Wire (little-endian) representation of a double.
    #[inline]
    pub fn f64_to_le_bytes(self, value: f64) -> [u8; 8] {
        let mut bytes = value.to_ne_bytes();
        if self == Self::BigEndian {
            bytes.reverse();
        }
        bytes
    }
}
