//! # cellgraph-formula
//!
//! Formula parser and evaluator for cellgraph.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Canonical re-rendering of a parsed formula
//! - Formula evaluation (AST → number or arithmetic error) against a [`CellLookup`]
//! - The list of cells a formula reads
//!
//! ## Example
//!
//! ```rust
//! use cellgraph_core::{Position, Value};
//! use cellgraph_formula::Formula;
//!
//! let formula = Formula::parse("(A1 + 2) * 3").unwrap();
//! assert_eq!(formula.expression(), "(A1+2)*3");
//! assert_eq!(formula.referenced_cells(), &[Position::new(0, 0)]);
//!
//! let lookup = |_: Position| Some(Value::Number(1.0));
//! assert_eq!(formula.evaluate(&lookup), Ok(9.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup};
pub use formula::Formula;
pub use parser::parse_formula;
