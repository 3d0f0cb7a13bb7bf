//! Sheet: cell storage, lifecycle and the printable area
//!
//! Cells live in a dense row-major store that only grows. The printable size is tracked
//! separately and always matches the occupied (non-empty) region exactly.

use crate::cell::{Cell, Content};
use crate::options::SheetOptions;
use cellgraph_core::{Error, Position, Result, Size, Value};
use cellgraph_formula::CellLookup;
use std::fmt;

/// A single sheet of cells
#[derive(Debug, Default)]
pub struct Sheet {
    /// Row → column → slot; every row has the same length
    cells: Vec<Vec<Option<Cell>>>,
    /// Printable area
    size: Size,
    options: SheetOptions,
    /// Number of cache misses served so far
    evaluations: std::cell::Cell<u64>,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty sheet with the given options
    pub fn with_options(options: SheetOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Get the sheet options
    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    // === Cell Access ===

    /// Set a cell from raw text
    ///
    /// Text starting with `=` is parsed as a formula, text starting with `'` is kept
    /// literally, and the empty string clears the cell. Writing the exact text a cell
    /// already holds is a no-op and leaves every cached value in place.
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Example
    /// ```
    /// use cellgraph::{Position, Sheet, Value};
    ///
    /// let mut sheet = Sheet::new();
    /// sheet.set_cell(Position::from_a1("A1"), "2").unwrap();
    /// sheet.set_cell(Position::from_a1("B1"), "=A1*21").unwrap();
    ///
    /// let b1 = sheet.cell(Position::from_a1("B1")).unwrap().unwrap();
    /// assert_eq!(b1.value(), Value::Number(42.0));
    /// ```
    pub fn set_cell(&mut self, pos: Position, text: impl Into<String>) -> Result<()> {
        self.check_position(pos)?;
        let text = text.into();

        if !text.is_empty() && self.get(pos).is_some_and(|cell| cell.text() == text) {
            tracing::trace!("{pos} already holds {text:?}, skipping");
            return Ok(());
        }

        let content = Content::classify(text)?;
        if content.is_empty() {
            self.reset_cell(pos);
            return Ok(());
        }

        let references = content.references();
        if let Some(&outside) = references.iter().find(|p| !self.options.contains(**p)) {
            tracing::debug!("Rejected formula for {pos}: reference {outside} is out of range");
            return Err(Error::InvalidPosition(outside));
        }
        self.check_cycle(pos, &references)?;

        self.commit(pos, content);
        self.widen_bounds(pos);
        tracing::debug!("Set {pos}, printable size now {:?}", self.size);
        Ok(())
    }

    /// Get a cell
    ///
    /// Returns `Ok(None)` when the position is addressable but holds no cell.
    pub fn cell(&self, pos: Position) -> Result<Option<CellRef<'_>>> {
        self.check_position(pos)?;
        Ok(self.get(pos).map(|cell| CellRef {
            sheet: self,
            cell,
            position: pos,
        }))
    }

    /// Clear a cell
    ///
    /// A no-op outside the printable area. A cleared cell that other formulas still read
    /// stays addressable as an empty cell.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        self.check_position(pos)?;
        if !self.size.contains(pos) {
            return Ok(());
        }

        self.reset_cell(pos);
        Ok(())
    }

    /// Get the printable area
    pub fn printable_size(&self) -> Size {
        self.size
    }

    /// Number of cell values computed so far (cache misses)
    pub fn evaluation_count(&self) -> u64 {
        self.evaluations.get()
    }

    fn check_position(&self, pos: Position) -> Result<()> {
        if self.options.contains(pos) {
            Ok(())
        } else {
            Err(Error::InvalidPosition(pos))
        }
    }

    /// Drop any content at `pos` and shrink the printable area to fit
    fn reset_cell(&mut self, pos: Position) {
        if self.get(pos).map_or(true, |cell| cell.content().is_empty()) {
            return;
        }

        self.commit(pos, Content::Empty);
        self.recompute_bounds();
        tracing::debug!("Cleared {pos}, printable size now {:?}", self.size);
    }

    // === Storage ===

    pub(crate) fn get(&self, pos: Position) -> Option<&Cell> {
        if !pos.is_valid() {
            return None;
        }
        self.cells
            .get(pos.row as usize)?
            .get(pos.col as usize)?
            .as_ref()
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !pos.is_valid() {
            return None;
        }
        self.cells
            .get_mut(pos.row as usize)?
            .get_mut(pos.col as usize)?
            .as_mut()
    }

    /// Get the cell at `pos`, growing storage and creating an empty cell if needed
    pub(crate) fn ensure_cell(&mut self, pos: Position) -> &mut Cell {
        let (row, col) = (pos.row as usize, pos.col as usize);

        let width = self.cells.first().map_or(0, Vec::len);
        if col >= width {
            for cells in &mut self.cells {
                cells.resize_with(col + 1, || None);
            }
        }

        let width = width.max(col + 1);
        while self.cells.len() <= row {
            self.cells.push(std::iter::repeat_with(|| None).take(width).collect());
        }

        self.cells[row][col].get_or_insert_with(Cell::default)
    }

    /// Release the slot at `pos` if it is empty and nothing reads it
    pub(crate) fn release_if_unused(&mut self, pos: Position) {
        let unused = self.get(pos).is_some_and(Cell::is_unused);
        if unused {
            self.cells[pos.row as usize][pos.col as usize] = None;
            tracing::trace!("Released slot {pos}");
        }
    }

    /// Compute the value of the cell at `pos`, going through its cache
    ///
    /// Uncached dependencies are filled first, so evaluating a formula only ever reads
    /// cached values and never recurses into other cells.
    pub(crate) fn cell_value(&self, pos: Position, cell: &Cell) -> Value {
        if let Some(value) = cell.cached_value() {
            return value.clone();
        }
        self.fill_dependencies(pos);
        self.compute(cell)
    }

    /// Evaluate a cell whose dependencies are all cached
    pub(crate) fn compute(&self, cell: &Cell) -> Value {
        if let Some(value) = cell.cached_value() {
            return value.clone();
        }
        self.evaluations.set(self.evaluations.get() + 1);
        cell.value(self)
    }

    // === Bounds ===

    fn widen_bounds(&mut self, pos: Position) {
        self.size.rows = self.size.rows.max(pos.row + 1);
        self.size.cols = self.size.cols.max(pos.col + 1);
    }

    /// Rescan the current printable area for the last occupied row and column
    fn recompute_bounds(&mut self) {
        let occupied =
            |slot: &Option<Cell>| slot.as_ref().is_some_and(|cell| !cell.content().is_empty());
        let (rows, cols) = (self.size.rows as usize, self.size.cols as usize);

        let last_row = (0..rows)
            .rev()
            .find(|&r| self.cells[r][..cols].iter().any(occupied));
        let rows = last_row.map_or(0, |r| r + 1);

        let last_col = (0..cols)
            .rev()
            .find(|&c| self.cells[..rows].iter().any(|cells| occupied(&cells[c])));
        let cols = last_col.map_or(0, |c| c + 1);

        self.size = Size::new(rows as i32, cols as i32);
    }
}

impl CellLookup for Sheet {
    fn value_at(&self, pos: Position) -> Option<Value> {
        self.get(pos).map(|cell| self.cell_value(pos, cell))
    }
}

/// Read-only handle to a cell of a [`Sheet`]
#[derive(Clone, Copy)]
pub struct CellRef<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
    position: Position,
}

impl<'a> CellRef<'a> {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn content(&self) -> &'a Content {
        self.cell.content()
    }

    /// Current value, computed on first read after any upstream change
    pub fn value(&self) -> Value {
        self.sheet.cell_value(self.position, self.cell)
    }

    /// Raw text; formulas come back in canonical form
    pub fn text(&self) -> String {
        self.cell.text()
    }

    /// Cells this cell reads, ordered by (row, col)
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.cell.dependencies().iter().copied().collect()
    }

    /// Cells whose formulas read this cell, ordered by (row, col)
    pub fn dependents(&self) -> Vec<Position> {
        let mut dependents: Vec<_> = self.cell.dependents().iter().copied().collect();
        dependents.sort_unstable();
        dependents
    }

    pub fn is_empty(&self) -> bool {
        self.cell.content().is_empty()
    }

    /// Whether a value is memoized right now
    pub fn has_cached_value(&self) -> bool {
        self.cell.cached_value().is_some()
    }
}

impl fmt::Debug for CellRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRef")
            .field("position", &self.position)
            .field("content", self.cell.content())
            .finish()
    }
}
