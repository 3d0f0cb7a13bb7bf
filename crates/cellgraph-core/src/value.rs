//! Cell value types

use std::fmt;

/// Display token for any arithmetic error
pub const ARITHMETIC_ERROR_TOKEN: &str = "#ARITHM!";

/// What a cell evaluates to
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric value (empty cells evaluate to 0)
    Number(f64),

    /// String value
    Text(String),

    /// Error produced while evaluating a formula
    Error(ArithmeticError),
}

impl Value {
    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Get the error if this is one
    pub fn error(&self) -> Option<ArithmeticError> {
        match self {
            Value::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<ArithmeticError> for Value {
    fn from(e: ArithmeticError) -> Self {
        Value::Error(e)
    }
}

impl From<Result<f64, ArithmeticError>> for Value {
    fn from(result: Result<f64, ArithmeticError>) -> Self {
        match result {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

/// Why an evaluation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticErrorKind {
    /// Division by zero
    DivisionByZero,
    /// A referenced value could not be read as a number
    NotANumber,
    /// The result is not a finite number
    Overflow,
}

/// Error value produced by formula evaluation
///
/// Not a Rust error in the control-flow sense: it is cached, displayed and read by
/// dependent formulas like any other [`Value`]. Every kind displays as `#ARITHM!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArithmeticError {
    kind: ArithmeticErrorKind,
}

impl ArithmeticError {
    /// Create a new error of the given kind
    pub const fn new(kind: ArithmeticErrorKind) -> Self {
        Self { kind }
    }

    /// Get the kind of error
    pub fn kind(&self) -> ArithmeticErrorKind {
        self.kind
    }

    /// Get the display string
    pub fn as_str(&self) -> &'static str {
        ARITHMETIC_ERROR_TOKEN
    }
}

impl From<ArithmeticErrorKind> for ArithmeticError {
    fn from(kind: ArithmeticErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ArithmeticError {}
