//! Formula evaluator
//!
//! Evaluates formula ASTs to produce numbers.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use cellgraph_core::{ArithmeticError, ArithmeticErrorKind, Position, Value};

/// Read access to cell values during evaluation
pub trait CellLookup {
    /// Value of the cell at `pos`, or `None` when no cell exists there
    fn value_at(&self, pos: Position) -> Option<Value>;
}

impl<F> CellLookup for F
where
    F: Fn(Position) -> Option<Value>,
{
    fn value_at(&self, pos: Position) -> Option<Value> {
        self(pos)
    }
}

/// Evaluate a formula expression
///
/// Error values read from referenced cells propagate unchanged; the left operand of a binary
/// operator is evaluated first, so its error wins.
pub fn evaluate(expr: &FormulaExpr, lookup: &dyn CellLookup) -> Result<f64, ArithmeticError> {
    match expr {
        FormulaExpr::Number(n) => Ok(*n),

        FormulaExpr::CellRef(pos) => match lookup.value_at(*pos) {
            Some(value) => to_number(&value),
            None => Ok(0.0),
        },

        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate(operand, lookup)?;
            Ok(match op {
                UnaryOperator::Plus => value,
                UnaryOperator::Negate => -value,
            })
        }

        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, lookup),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    lookup: &dyn CellLookup,
) -> Result<f64, ArithmeticError> {
    let l = evaluate(left, lookup)?;
    let r = evaluate(right, lookup)?;

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 {
                return Err(ArithmeticErrorKind::DivisionByZero.into());
            }
            l / r
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(ArithmeticErrorKind::Overflow.into())
    }
}

/// Read a cell value as an operand
///
/// Text counts as a number only if the whole string is one; empty text is zero.
fn to_number(value: &Value) -> Result<f64, ArithmeticError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(*e),
        Value::Text(s) if s.is_empty() => Ok(0.0),
        Value::Text(s) => match s.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(ArithmeticErrorKind::NotANumber.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_formula;
    use std::collections::HashMap;

    fn eval_with(formula: &str, cells: &[(&str, Value)]) -> Result<f64, ArithmeticError> {
        let cells: HashMap<Position, Value> = cells
            .iter()
            .map(|(a1, v)| (Position::from_a1(a1), v.clone()))
            .collect();
        let lookup = |pos: Position| cells.get(&pos).cloned();
        let ast = parse_formula(formula).unwrap();
        evaluate(&ast, &lookup)
    }

    fn eval(formula: &str) -> Result<f64, ArithmeticError> {
        eval_with(formula, &[])
    }

    fn kind(result: Result<f64, ArithmeticError>) -> ArithmeticErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2"), Ok(3.0));
        assert_eq!(eval("5-3"), Ok(2.0));
        assert_eq!(eval("4*2.5"), Ok(10.0));
        assert_eq!(eval("10/4"), Ok(2.5));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2*3"), Ok(7.0));
        assert_eq!(eval("(1+2)*3"), Ok(9.0));
        assert_eq!(eval("8-4-2"), Ok(2.0));
        assert_eq!(eval("8/4/2"), Ok(1.0));
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("-5"), Ok(-5.0));
        assert_eq!(eval("--5"), Ok(5.0));
        assert_eq!(eval("+-5"), Ok(-5.0));
        assert_eq!(eval("-(2+3)*2"), Ok(-10.0));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(kind(eval("1/0")), ArithmeticErrorKind::DivisionByZero);
        assert_eq!(kind(eval("1/(2-2)")), ArithmeticErrorKind::DivisionByZero);
        assert_eq!(kind(eval("A1/B1")), ArithmeticErrorKind::DivisionByZero);
    }

    #[test]
    fn test_evaluate_overflow() {
        assert_eq!(kind(eval("1e308*10")), ArithmeticErrorKind::Overflow);
    }

    #[test]
    fn test_evaluate_cell_references() {
        let cells = [
            ("A1", Value::Number(10.0)),
            ("A2", Value::Text("20".into())),
            ("A3", Value::Text("".into())),
            ("A4", Value::Text("1.5e1".into())),
        ];
        assert_eq!(eval_with("A1+A2", &cells), Ok(30.0));
        assert_eq!(eval_with("A1+A3", &cells), Ok(10.0));
        assert_eq!(eval_with("A4", &cells), Ok(15.0));
        // Absent cells read as zero
        assert_eq!(eval_with("A1*0+Z99", &cells), Ok(0.0));
    }

    #[test]
    fn test_evaluate_non_numeric_text() {
        for text in ["meow", " 1", "1 ", "1+1", "inf", "NaN", "'5"] {
            let cells = [("A1", Value::Text(text.into()))];
            assert_eq!(
                kind(eval_with("A1+1", &cells)),
                ArithmeticErrorKind::NotANumber,
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_evaluate_error_propagation() {
        let err = ArithmeticError::new(ArithmeticErrorKind::DivisionByZero);
        let cells = [("A1", Value::Error(err)), ("B1", Value::Text("x".into()))];

        assert_eq!(eval_with("A1+1", &cells), Err(err));
        assert_eq!(eval_with("-A1", &cells), Err(err));
        // Left operand is evaluated first
        assert_eq!(eval_with("A1+B1", &cells), Err(err));
        assert_eq!(
            kind(eval_with("B1+A1", &cells)),
            ArithmeticErrorKind::NotANumber
        );
    }
}
