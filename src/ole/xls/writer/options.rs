//! Writer configuration.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// BIFF dialect of the stream being written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// Excel 5.0/95
    Biff5,
    /// Excel 97-2003
    #[default]
    Biff8,
}

impl Dialect {
    /// Largest record payload the dialect allows before CONTINUE records are needed.
    #[inline]
    pub const fn record_limit(self) -> usize {
        match self {
            Self::Biff5 => 2080,
            Self::Biff8 => 8224,
        }
    }

    /// BIFF version field of the BOF record.
    #[inline]
    pub const fn version(self) -> u16 {
        match self {
            Self::Biff5 => 0x0500,
            Self::Biff8 => 0x0600,
        }
    }

    /// Build identifier and build year written into the BOF record.
    #[inline]
    pub const fn build(self) -> (u16, u16) {
        match self {
            Self::Biff5 => (0x096C, 0x07C9),
            Self::Biff8 => (0x0DBB, 0x07CC),
        }
    }
}

/// Options for [`BiffWriter`](super::BiffWriter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub dialect: Dialect,
    /// Override of the dialect's record size limit
    pub record_limit: Option<usize>,
}

impl WriterOptions {
    #[inline]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            record_limit: None,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_record_limit(mut self, limit: usize) -> Self {
        self.record_limit = Some(limit);
        self
    }

    /// Active record size limit.
    #[inline]
    pub fn limit(&self) -> usize {
        self.record_limit
            .unwrap_or_else(|| self.dialect.record_limit())
    }

    /// The limit must be non-zero and fit the 16-bit length field.
    pub fn validate(&self) -> Result<()> {
        let limit = self.limit();
        if limit == 0 || limit > usize::from(u16::MAX) {
            return Err(Error::Validation(format!(
                "record limit {} is outside 1..={}",
                limit,
                u16::MAX
            )));
        }
        Ok(())
    }
}
