//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing
///
/// Evaluation never fails with this type: arithmetic problems are values
/// ([`cellgraph_core::ArithmeticError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reference to a cell outside the addressable range
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}
