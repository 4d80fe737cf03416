//! OfficeArt record type and blip type definitions.
//!
//! Based on MS-ODRAW 2.1.1 / 2.4.1 and the record ids Excel writes into
//! MSODRAWINGGROUP and MSODRAWING records.

use serde::{Deserialize, Serialize};

/// OfficeArt record ids the codec reads or writes.
///
/// Ids outside this set decode as `Unknown` and are skipped by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EscherRecordType {
    Unknown = 0x0000,

    DggContainer = 0xF000,
    BStoreContainer = 0xF001,
    DgContainer = 0xF002,
    SpgrContainer = 0xF003,
    SpContainer = 0xF004,

    /// Drawing group atom: shape id bookkeeping and id clusters
    Dgg = 0xF006,
    /// Blip store entry
    BSE = 0xF007,
    /// Drawing atom: shape count and last shape id
    Dg = 0xF008,
    /// Group coordinate system
    Spgr = 0xF009,
    /// Shape id and flags
    Sp = 0xF00A,
    /// Property table
    Opt = 0xF00B,
    ClientTextbox = 0xF00D,
    ClientAnchor = 0xF010,
    ClientData = 0xF011,

    BlipEmf = 0xF01A,
    BlipWmf = 0xF01B,
    BlipPict = 0xF01C,
    BlipJpeg = 0xF01D,
    BlipPng = 0xF01E,
    BlipDib = 0xF01F,
    BlipTiff = 0xF029,
    BlipCmykJpeg = 0xF02A,

    // Written by Excel after the Dgg atom and inside shapes; kept opaque
    SplitMenuColors = 0xF11E,
    TertiaryOpt = 0xF122,
}

impl EscherRecordType {
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::DggContainer
                | Self::BStoreContainer
                | Self::DgContainer
                | Self::SpgrContainer
                | Self::SpContainer
        )
    }

    /// Image records that can sit inside a blip store entry.
    #[inline]
    pub const fn is_blip(self) -> bool {
        matches!(
            self,
            Self::BlipEmf
                | Self::BlipWmf
                | Self::BlipPict
                | Self::BlipJpeg
                | Self::BlipPng
                | Self::BlipDib
                | Self::BlipTiff
                | Self::BlipCmykJpeg
        )
    }
}

impl From<u16> for EscherRecordType {
    fn from(value: u16) -> Self {
        match value {
            0xF000 => Self::DggContainer,
            0xF001 => Self::BStoreContainer,
            0xF002 => Self::DgContainer,
            0xF003 => Self::SpgrContainer,
            0xF004 => Self::SpContainer,
            0xF006 => Self::Dgg,
            0xF007 => Self::BSE,
            0xF008 => Self::Dg,
            0xF009 => Self::Spgr,
            0xF00A => Self::Sp,
            0xF00B => Self::Opt,
            0xF00D => Self::ClientTextbox,
            0xF010 => Self::ClientAnchor,
            0xF011 => Self::ClientData,
            0xF01A => Self::BlipEmf,
            0xF01B => Self::BlipWmf,
            0xF01C => Self::BlipPict,
            0xF01D => Self::BlipJpeg,
            0xF01E => Self::BlipPng,
            0xF01F => Self::BlipDib,
            0xF029 => Self::BlipTiff,
            0xF02A => Self::BlipCmykJpeg,
            0xF11E => Self::SplitMenuColors,
            0xF122 => Self::TertiaryOpt,
            _ => Self::Unknown,
        }
    }
}

impl From<EscherRecordType> for u16 {
    fn from(record_type: EscherRecordType) -> Self {
        record_type as u16
    }
}

/// Image format stored in a blip store entry (MS-ODRAW 2.4.1 MSOBLIPTYPE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlipType {
    Error = 0x00,
    Unknown = 0x01,
    Emf = 0x02,
    Wmf = 0x03,
    Pict = 0x04,
    Jpeg = 0x05,
    Png = 0x06,
    Dib = 0x07,
    Tiff = 0x11,
    CmykJpeg = 0x12,
}

impl BlipType {
    /// Blip record type and base instance used to store this format.
    ///
    /// `None` for `Error` and `Unknown`, which have no blip record of their own.
    pub const fn record(self) -> Option<(EscherRecordType, u16)> {
        match self {
            Self::Emf => Some((EscherRecordType::BlipEmf, 0x03D4)),
            Self::Wmf => Some((EscherRecordType::BlipWmf, 0x0216)),
            Self::Pict => Some((EscherRecordType::BlipPict, 0x0542)),
            Self::Jpeg => Some((EscherRecordType::BlipJpeg, 0x046A)),
            Self::Png => Some((EscherRecordType::BlipPng, 0x06E0)),
            Self::Dib => Some((EscherRecordType::BlipDib, 0x07A8)),
            Self::Tiff => Some((EscherRecordType::BlipTiff, 0x06E4)),
            Self::CmykJpeg => Some((EscherRecordType::BlipCmykJpeg, 0x06E2)),
            Self::Error | Self::Unknown => None,
        }
    }

    /// Blip type stored by a blip record type.
    pub const fn from_record(record_type: EscherRecordType) -> Option<Self> {
        match record_type {
            EscherRecordType::BlipEmf => Some(Self::Emf),
            EscherRecordType::BlipWmf => Some(Self::Wmf),
            EscherRecordType::BlipPict => Some(Self::Pict),
            EscherRecordType::BlipJpeg => Some(Self::Jpeg),
            EscherRecordType::BlipPng => Some(Self::Png),
            EscherRecordType::BlipDib => Some(Self::Dib),
            EscherRecordType::BlipTiff => Some(Self::Tiff),
            EscherRecordType::BlipCmykJpeg => Some(Self::CmykJpeg),
            _ => None,
        }
    }

    /// Bitmap blips carry a one-byte tag between the uids and the image data;
    /// metafile blips (EMF, WMF, PICT) do not.
    #[inline]
    pub const fn is_bitmap(self) -> bool {
        matches!(
            self,
            Self::Jpeg | Self::Png | Self::Dib | Self::Tiff | Self::CmykJpeg
        )
    }
}

impl From<u16> for BlipType {
    fn from(value: u16) -> Self {
        match value {
            0x00 => Self::Error,
            0x02 => Self::Emf,
            0x03 => Self::Wmf,
            0x04 => Self::Pict,
            0x05 => Self::Jpeg,
            0x06 => Self::Png,
            0x07 => Self::Dib,
            0x11 => Self::Tiff,
            0x12 => Self::CmykJpeg,
            _ => Self::Unknown,
        }
    }
}
