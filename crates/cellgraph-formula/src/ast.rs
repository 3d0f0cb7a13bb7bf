//! Formula Abstract Syntax Tree types

use cellgraph_core::Position;
use std::fmt;

/// Precedence of prefix operators, above every binary operator
const UNARY_PRECEDENCE: u8 = 3;
/// Precedence of literals and references
const ATOM_PRECEDENCE: u8 = 4;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Single cell reference
    CellRef(Position),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

impl FormulaExpr {
    /// Binding strength used to decide where the printer needs parentheses
    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) => ATOM_PRECEDENCE,
            FormulaExpr::UnaryOp { .. } => UNARY_PRECEDENCE,
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    /// Collect every referenced cell in order of appearance
    pub fn collect_references(&self, out: &mut Vec<Position>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(pos) => out.push(*pos),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_references(out),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &FormulaExpr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Canonical text form: no whitespace, parentheses only where the tree needs them.
impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(pos) => write!(f, "{}", pos),
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand, operand.precedence() < UNARY_PRECEDENCE)
            }
            FormulaExpr::BinaryOp { op, left, right } => {
                // Operators are left-associative, so a right operand of equal precedence
                // only reparses to the same tree when parenthesized.
                write_operand(f, left, left.precedence() < op.precedence())?;
                write!(f, "{}", op.symbol())?;
                write_operand(f, right, right.precedence() <= op.precedence())
            }
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl UnaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}
