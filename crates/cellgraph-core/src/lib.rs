//! # cellgraph-core
//!
//! Core data structures for the cellgraph spreadsheet engine.
//!
//! This crate provides the fundamental types shared by the formula evaluator and the sheet:
//! - [`Position`] and [`Size`] - Cell addressing (A1 notation ↔ row/col indices) and the printable area
//! - [`Value`] and [`ArithmeticError`] - What a cell evaluates to
//! - [`Error`] - Structural errors raised by mutating operations
//!
//! ## Example
//!
//! ```rust
//! use cellgraph_core::Position;
//!
//! let pos = Position::from_a1("AA34");
//! assert_eq!(pos, Position::new(33, 26));
//! assert_eq!(pos.to_string(), "AA34");
//!
//! assert_eq!(Position::from_a1("a1"), Position::NONE);
//! ```

pub mod error;
pub mod position;
pub mod value;

pub use error::{Error, Result};
pub use position::{Position, Size};
pub use value::{ArithmeticError, ArithmeticErrorKind, Value};

/// Maximum number of addressable rows
pub const MAX_ROWS: i32 = 16_384;

/// Maximum number of addressable columns
pub const MAX_COLS: i32 = 16_384;

/// Leading character that marks cell text as a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that forces cell text to be taken literally
pub const ESCAPE_SIGN: char = '\'';
