//! Cell coordinates in `<ColumnLetters><Row>` form.
//!
//! Internally a coordinate is a 0-based column index and a 1-based row
//! number, which is exactly what the text form spells out (`"B7"` is column
//! 1, row 7).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Convert a 0-based column index to Excel column letters (0 -> "A", 26 -> "AA").
pub fn column_index_to_name(index: u32) -> String {
    let mut col = u64::from(index) + 1;
    let mut name = String::new();

    while col > 0 {
        col -= 1;
        let ch = (b'A' + (col % 26) as u8) as char;
        name.insert(0, ch);
        col /= 26;
    }

    name
}

/// Convert Excel column letters to a 0-based column index (A=0, B=1, ..., AA=26).
pub fn column_name_to_index(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }

    let mut result: u32 = 0;
    for ch in name.chars() {
        let ch = ch.to_ascii_uppercase();
        if !ch.is_ascii_uppercase() {
            return None;
        }
        result = result
            .checked_mul(26)?
            .checked_add(ch as u32 - 'A' as u32 + 1)?;
    }

    Some(result - 1)
}

/// A cell position: 0-based column, 1-based row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoordinate {
    pub column: u32,
    pub row: u32,
}

impl CellCoordinate {
    /// Create a coordinate from a 0-based column and a 1-based row.
    #[inline]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Create a coordinate from 0-based column and row indices.
    #[inline]
    pub const fn from_indices(column: u32, row_index: u32) -> Self {
        Self {
            column,
            row: row_index.saturating_add(1),
        }
    }

    /// 0-based row index, or `None` for the invalid row 0.
    #[inline]
    pub const fn row_index(&self) -> Option<u32> {
        self.row.checked_sub(1)
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_name(self.column), self.row)
    }
}

impl FromStr for CellCoordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| Error::InvalidCellReference(s.to_string()))?;
        let (letters, digits) = s.split_at(split);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCellReference(s.to_string()));
        }

        let column = column_name_to_index(letters)
            .ok_or_else(|| Error::InvalidCellReference(s.to_string()))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidCellReference(s.to_string()))?;
        if row == 0 {
            return Err(Error::InvalidCellReference(s.to_string()));
        }

        Ok(Self { column, row })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_to_name() {
        assert_eq!(column_index_to_name(0), "A");
        assert_eq!(column_index_to_name(1), "B");
        assert_eq!(column_index_to_name(25), "Z");
        assert_eq!(column_index_to_name(26), "AA");
        assert_eq!(column_index_to_name(255), "IV");
        assert_eq!(column_index_to_name(702), "AAA");
    }

    #[test]
    fn test_column_name_to_index() {
        assert_eq!(column_name_to_index("A"), Some(0));
        assert_eq!(column_name_to_index("b"), Some(1));
        assert_eq!(column_name_to_index("AA"), Some(26));
        assert_eq!(column_name_to_index("IV"), Some(255));
        assert_eq!(column_name_to_index(""), None);
        assert_eq!(column_name_to_index("A1"), None);
    }

    #[test]
    fn test_parse_and_display() {
        let coord: CellCoordinate = "B7".parse().unwrap();
        assert_eq!(coord, CellCoordinate::new(1, 7));
        assert_eq!(coord.row_index(), Some(6));
        assert_eq!(coord.to_string(), "B7");
        assert_eq!(CellCoordinate::from_indices(2, 1).to_string(), "C2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "7", "B", "B0", "1B", "B7C", "B-1", "$B$7"] {
            assert!(
                matches!(bad.parse::<CellCoordinate>(), Err(Error::InvalidCellReference(_))),
                "{bad} should not parse"
            );
        }
    }
}
