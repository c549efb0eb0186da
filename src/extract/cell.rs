//! A1-style cell references

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid cell reference '{0}' (expected A1 notation such as J2)")]
pub struct CellRefError(pub String);

/// Zero-based cell coordinate parsed from A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn parse(reference: &str) -> Result<Self, CellRefError> {
        let err = || CellRefError(reference.to_string());
        let trimmed = reference.trim().trim_start_matches('$');
        let split = trimmed.find(|c: char| !c.is_ascii_alphabetic()).ok_or_else(err)?;
        let (letters, digits) = trimmed.split_at(split);
        let digits = digits.trim_start_matches('$');
        if letters.is_empty() || letters.len() > 3 || digits.is_empty() {
            return Err(err());
        }

        let mut col: u32 = 0;
        for ch in letters.chars() {
            col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        let row: u32 = digits.parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }
        Ok(Self { row: row - 1, col: col - 1 })
    }

    pub fn as_tuple(&self) -> (u32, u32) {
        (self.row, self.col)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.col + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let col: String = letters.iter().rev().collect();
        write!(f, "{}{}", col, self.row + 1)
    }
}
