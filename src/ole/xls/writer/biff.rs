//! BIFF record framing.
//!
//! # BIFF Record Structure
//!
//! Each BIFF record consists of:
//! - Record type (2 bytes) - identifies the record
//! - Record length (2 bytes) - length of data in bytes
//! - Record data (variable length)
//!
//! A record whose data exceeds the dialect's size limit is split: the first
//! part keeps the record type, the rest follow as CONTINUE records.

use std::io::Write;

use tracing::{debug, trace};

use super::options::{Dialect, WriterOptions};
use crate::common::{Error, FloatByteOrder, Result};

/// Size of a BIFF record header.
pub const RECORD_HEADER_SIZE: usize = 4;

/// Record type ids used by the framer and the drawing emitters.
pub mod record_type {
    pub const EOF: u16 = 0x000A;
    pub const CONTINUE: u16 = 0x003C;
    pub const MSODRAWINGGROUP: u16 = 0x00EB;
    pub const MSODRAWING: u16 = 0x00EC;
    pub const BOF: u16 = 0x0809;
}

/// Substream kinds written into the BOF record.
pub mod stream_kind {
    pub const WORKBOOK: u16 = 0x0005;
    pub const WORKSHEET: u16 = 0x0010;
    pub const CHART: u16 = 0x0020;
    pub const MACRO_SHEET: u16 = 0x0040;
}

/// Write a BIFF record header
#[inline]
pub(crate) fn write_record_header<W: Write>(
    writer: &mut W,
    record_type: u16,
    data_len: u16,
) -> Result<()> {
    writer.write_all(&record_type.to_le_bytes())?;
    writer.write_all(&data_len.to_le_bytes())?;
    Ok(())
}

/// Build a complete record (header and data), ready for [`add_continue`].
///
/// Data longer than the 16-bit length field gets a saturated length; the
/// field is rewritten when the record is split.
pub fn record(record_type: u16, data: &[u8]) -> Vec<u8> {
    let len = u16::try_from(data.len()).unwrap_or(u16::MAX);
    let mut out = Vec::with_capacity(RECORD_HEADER_SIZE + data.len());
    out.extend_from_slice(&record_type.to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(data);
    out
}

/// Split a complete record into CONTINUE-chained records of at most `limit`
/// data bytes each.
///
/// The length field of the input header is ignored; lengths are recomputed
/// from the data, also for a record that fits without splitting.
pub fn add_continue(record: &[u8], limit: usize) -> Result<Vec<u8>> {
    if record.len() < RECORD_HEADER_SIZE {
        return Err(Error::Truncated(format!(
            "BIFF record of {} bytes has no header",
            record.len()
        )));
    }
    let limit_field = u16::try_from(limit)
        .ok()
        .filter(|&l| l > 0)
        .ok_or_else(|| Error::Validation(format!("record limit {} is out of range", limit)))?;

    let data = &record[RECORD_HEADER_SIZE..];
    if data.len() <= limit {
        let mut out = record.to_vec();
        // data.len() <= limit, which fits in u16
        out[2..RECORD_HEADER_SIZE].copy_from_slice(&(data.len() as u16).to_le_bytes());
        return Ok(out);
    }

    let continues = (data.len() - limit).div_ceil(limit);
    debug!(
        "splitting record 0x{:04X} of {} bytes into {} CONTINUE records",
        u16::from_le_bytes([record[0], record[1]]),
        data.len(),
        continues
    );

    let mut out = Vec::with_capacity(data.len() + (continues + 1) * RECORD_HEADER_SIZE);
    out.extend_from_slice(&record[..2]);
    out.extend_from_slice(&limit_field.to_le_bytes());
    out.extend_from_slice(&data[..limit]);

    for chunk in data[limit..].chunks(limit) {
        // chunk.len() <= limit, which fits in u16
        write_record_header(&mut out, record_type::CONTINUE, chunk.len() as u16)?;
        out.extend_from_slice(chunk);
    }

    Ok(out)
}

/// Write BOF (Beginning of File) record
///
/// Record type: 0x0809. BIFF5 carries 8 data bytes, BIFF8 adds the file
/// history flags and lowest BIFF version for 16.
pub fn write_bof<W: Write>(writer: &mut W, dialect: Dialect, stream_kind: u16) -> Result<()> {
    let (build, year) = dialect.build();
    let data_len = match dialect {
        Dialect::Biff5 => 8,
        Dialect::Biff8 => 16,
    };

    write_record_header(writer, record_type::BOF, data_len)?;
    writer.write_all(&dialect.version().to_le_bytes())?;
    writer.write_all(&stream_kind.to_le_bytes())?;
    writer.write_all(&build.to_le_bytes())?;
    writer.write_all(&year.to_le_bytes())?;

    if dialect == Dialect::Biff8 {
        // File history flags
        writer.write_all(&0x0001_00D1u32.to_le_bytes())?;
        // Lowest BIFF version
        writer.write_all(&0x0000_0406u32.to_le_bytes())?;
    }

    Ok(())
}

/// Write EOF (End of File) record
///
/// Record type: 0x000A
pub fn write_eof<W: Write>(writer: &mut W) -> Result<()> {
    write_record_header(writer, record_type::EOF, 0)
}

/// Append-only BIFF stream writer.
///
/// Every record passes through [`add_continue`] with the configured limit.
/// Bytes handed to the sink are never revisited.
#[derive(Debug)]
pub struct BiffWriter<W: Write> {
    sink: W,
    options: WriterOptions,
    float_order: FloatByteOrder,
    position: usize,
}

impl<W: Write> BiffWriter<W> {
    /// Create a BIFF8 writer.
    pub fn new(sink: W) -> Result<Self> {
        Self::with_options(sink, WriterOptions::default())
    }

    /// Create a writer; fails with `Error::Platform` when the host double
    /// layout is unsupported.
    pub fn with_options(sink: W, options: WriterOptions) -> Result<Self> {
        options.validate()?;
        let float_order = FloatByteOrder::detect()?;
        Ok(Self {
            sink,
            options,
            float_order,
            position: 0,
        })
    }

    #[inline]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    #[inline]
    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    #[inline]
    pub fn float_byte_order(&self) -> FloatByteOrder {
        self.float_order
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Wire bytes of a double, for records carrying IEEE 754 values.
    #[inline]
    pub fn pack_f64(&self, value: f64) -> [u8; 8] {
        self.float_order.f64_to_le_bytes(value)
    }

    /// Frame a complete record and append it.
    pub fn append(&mut self, record: &[u8]) -> Result<()> {
        let framed = add_continue(record, self.options.limit())?;
        self.write_raw(&framed)
    }

    /// Append a record given its type and data.
    pub fn append_record(&mut self, record_type: u16, data: &[u8]) -> Result<()> {
        self.append(&record(record_type, data))
    }

    pub fn write_bof(&mut self, stream_kind: u16) -> Result<()> {
        let mut out = Vec::with_capacity(20);
        write_bof(&mut out, self.options.dialect, stream_kind)?;
        self.write_raw(&out)
    }

    pub fn write_eof(&mut self) -> Result<()> {
        let mut out = Vec::with_capacity(RECORD_HEADER_SIZE);
        write_eof(&mut out)?;
        self.write_raw(&out)
    }

    /// Write bytes that are already framed.
    pub(crate) fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        trace!("writing {} bytes at {}", bytes.len(), self.position);
        self.sink.write_all(bytes)?;
        self.position += bytes.len();
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
