//! Cell positions and the A1 address codec

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

const LETTERS: i64 = 26;

/// A cell position (e.g., "A1", "AA34")
///
/// Rows and columns are 0-based internally. A1 addresses use bijective base-26 column
/// letters (A=1 … Z=26, AA=27, …) and 1-based row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: i32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: i32,
}

impl Position {
    /// "No position" marker returned when an address cannot be decoded
    pub const NONE: Position = Position { row: -1, col: -1 };

    /// Create a new position
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether the position lies inside the addressable range
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Decode an A1-style address
    ///
    /// The address must be one or more uppercase letters followed by one or more decimal
    /// digits, with nothing before, between or after them. Anything else, including a
    /// position outside the addressable range, yields [`Position::NONE`].
    ///
    /// # Examples
    /// ```
    /// use cellgraph_core::Position;
    ///
    /// assert_eq!(Position::from_a1("A1"), Position::new(0, 0));
    /// assert_eq!(Position::from_a1("Z10"), Position::new(9, 25));
    /// assert_eq!(Position::from_a1("$A$1"), Position::NONE);
    /// assert_eq!(Position::from_a1("A0"), Position::NONE);
    /// ```
    pub fn from_a1(s: &str) -> Self {
        let bytes = s.as_bytes();

        let letters = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
        if letters == 0 {
            return Self::NONE;
        }

        let digits = bytes[letters..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 || letters + digits != bytes.len() {
            return Self::NONE;
        }

        let Some(col) = Self::letters_to_column(&s[..letters]) else {
            return Self::NONE;
        };

        let mut row: i64 = 0;
        for &b in &bytes[letters..] {
            row = row * 10 + i64::from(b - b'0');
            if row > i64::from(MAX_ROWS) {
                return Self::NONE;
            }
        }

        // Rows are 1-based in A1 notation
        if row == 0 {
            return Self::NONE;
        }

        let pos = Self::new(row as i32 - 1, col);
        if pos.is_valid() {
            pos
        } else {
            Self::NONE
        }
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    ///
    /// There is no letter for zero, so every step borrows one before dividing.
    pub fn column_to_letters(col: i32) -> String {
        let mut letters = Vec::new();
        let mut n = i64::from(col) + 1;

        while n > 0 {
            n -= 1;
            letters.push((n % LETTERS) as u8 + b'A');
            n /= LETTERS;
        }

        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Convert uppercase column letters to an index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Returns `None` for non-uppercase input or a column at or beyond [`MAX_COLS`].
    pub fn letters_to_column(letters: &str) -> Option<i32> {
        if letters.is_empty() {
            return None;
        }

        let mut col: i64 = 0;
        for b in letters.bytes() {
            if !b.is_ascii_uppercase() {
                return None;
            }
            col = col * LETTERS + i64::from(b - b'A' + 1);
            if col > i64::from(MAX_COLS) {
                return None;
            }
        }

        Some(col as i32 - 1)
    }

    /// Format as an A1-style string, or an empty string for an invalid position
    pub fn to_a1_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }

        let mut result = Self::column_to_letters(self.col);
        result.push_str(&(self.row + 1).to_string());
        result
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::from_a1(s) {
            Position::NONE => Err(Error::InvalidPosition(Position::NONE)),
            pos => Ok(pos),
        }
    }
}

/// Printable area of a sheet
///
/// One past the last occupied row and column. Either both dimensions are zero or both are
/// positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub rows: i32,
    pub cols: i32,
}

impl Size {
    /// Create a new size
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Check if the area holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows == 0 && self.cols == 0
    }

    /// Check if a position lies inside the area
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.rows && pos.col < self.cols
    }
}
