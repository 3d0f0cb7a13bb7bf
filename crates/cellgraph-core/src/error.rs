//! Error types for cellgraph-core

use crate::Position;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors raised by sheet mutations
///
/// None of these leave the sheet partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Position outside the addressable range, or a malformed address
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// Formula text could not be parsed
    #[error("Formula syntax error: {0}")]
    FormulaSyntax(String),

    /// Committing the formula would close a dependency cycle
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(Position),
}

impl Error {
    /// Create a syntax error with a message
    pub fn syntax<S: Into<String>>(msg: S) -> Self {
        Error::FormulaSyntax(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CircularDependency(Position::new(0, 0));
        assert_eq!(
            err.to_string(),
            "Circular dependency detected involving cell A1"
        );

        let err = Error::syntax("unexpected ')'");
        assert_eq!(err.to_string(), "Formula syntax error: unexpected ')'");
    }
}
