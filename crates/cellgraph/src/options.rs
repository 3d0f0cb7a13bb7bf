//! Sheet configuration

use cellgraph_core::{Position, MAX_COLS, MAX_ROWS};

/// Options for a [`Sheet`](crate::Sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetOptions {
    /// Number of addressable rows (default: [`MAX_ROWS`])
    ///
    /// Can narrow the global limit but never widen it.
    pub max_rows: i32,
    /// Number of addressable columns (default: [`MAX_COLS`])
    pub max_cols: i32,
}

impl SheetOptions {
    /// Check whether a position is addressable under these options
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_valid() && pos.row < self.max_rows && pos.col < self.max_cols
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            max_rows: MAX_ROWS,
            max_cols: MAX_COLS,
        }
    }
}
