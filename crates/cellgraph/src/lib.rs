//! # cellgraph
//!
//! A spreadsheet cell dependency graph with incremental evaluation.
//!
//! A [`Sheet`] stores cells addressed by [`Position`]. Cells hold literal text or a
//! formula over other cells. The sheet keeps the dependency graph between formula cells
//! acyclic, caches every computed value and invalidates exactly the cells affected by an
//! edit.
//!
//! ## Features
//!
//! - A1 addressing up to `XFD16384`
//! - Arithmetic formulas (`+ - * /`, unary minus, parentheses, cell references)
//! - Cycle rejection before any change is applied
//! - Lazy, memoized evaluation with transitive invalidation
//! - Printable-area tracking and tab-separated dumps
//!
//! ## Example
//!
//! ```rust
//! use cellgraph::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(Position::from_a1("A1"), "2").unwrap();
//! sheet.set_cell(Position::from_a1("A2"), "=A1*10").unwrap();
//!
//! let a2 = sheet.cell(Position::from_a1("A2")).unwrap().unwrap();
//! assert_eq!(a2.value(), Value::Number(20.0));
//!
//! // A formula reading itself, directly or not, is refused
//! assert_eq!(
//!     sheet.set_cell(Position::from_a1("A1"), "=A2"),
//!     Err(Error::CircularDependency(Position::from_a1("A1")))
//! );
//!
//! let mut out = Vec::new();
//! sheet.print_values(&mut out).unwrap();
//! assert_eq!(out, b"2\n20\n");
//! ```

pub mod cell;
mod graph;
pub mod options;
pub mod prelude;
mod print;
pub mod sheet;

pub use cell::Content;
pub use options::SheetOptions;
pub use sheet::{CellRef, Sheet};

// Re-export core types
pub use cellgraph_core::{
    ArithmeticError, ArithmeticErrorKind, Error, Position, Result, Size, Value, ESCAPE_SIGN,
    FORMULA_SIGN, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use cellgraph_formula::{CellLookup, Formula, FormulaError};
