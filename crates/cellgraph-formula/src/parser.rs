//! Formula parser
//!
//! A recursive descent parser for arithmetic formulas with proper operator precedence.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use cellgraph_core::Position;

/// Deepest parenthesis / prefix-operator nesting accepted
const MAX_NESTING: usize = 256;

/// Tallest expression tree accepted
const MAX_HEIGHT: usize = 1024;

/// A parsed subexpression and the height of its tree
type Parsed = (FormulaExpr, usize);

/// Parse formula expression text into an AST
///
/// The text is the expression only, without the leading `=` of the cell text.
///
/// # Example
/// ```rust
/// use cellgraph_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("(A1 + B2) / -C3").unwrap();
/// assert!(parse_formula("SUM(A1)").is_err());
/// ```
pub fn parse_formula(expression: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = FormulaParser::new(expression)?;
    let (expr, _) = parser.parse_expression()?;

    // Make sure we consumed all input
    if *parser.current_token() != Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected {:?} after expression",
            parser.current_token()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(String),

    Plus,
    Minus,
    Star,
    Slash,

    LeftParen,
    RightParen,

    Eof,
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
    nesting: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
            nesting: 0,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if c.is_ascii_digit() || c == '.' => return self.scan_number(),
            c if c.is_ascii_alphabetic() => return self.scan_reference(),
            other => {
                return Err(FormulaError::Parse(format!(
                    "Unexpected character '{}' at offset {}",
                    other, self.pos
                )))
            }
        };

        self.advance();
        Ok(token)
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        // Integer part
        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            self.skip_digits();
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) if num.is_finite() => Ok(Token::Number(num)),
            _ => Err(FormulaError::Parse(format!("Invalid number '{}'", num_str))),
        }
    }

    fn scan_reference(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        if !Self::is_cell_reference(text) {
            return Err(FormulaError::Parse(format!("Unknown identifier '{}'", text)));
        }

        Ok(Token::CellRef(text.to_string()))
    }

    /// Uppercase letters followed by digits and nothing else
    fn is_cell_reference(text: &str) -> bool {
        let letters = text.bytes().take_while(|b| b.is_ascii_uppercase()).count();
        let digits = text.bytes().skip(letters).take_while(|b| b.is_ascii_digit()).count();
        letters > 0 && digits > 0 && letters + digits == text.len()
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    /// Run a nested parse, refusing to go past [`MAX_NESTING`]
    fn nested(&mut self, parse: fn(&mut Self) -> FormulaResult<Parsed>) -> FormulaResult<Parsed> {
        if self.nesting >= MAX_NESTING {
            return Err(too_deep());
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: +, -
    // 4. Primary: numbers, cell references, parentheses

    fn parse_expression(&mut self) -> FormulaResult<Parsed> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut height) = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let (right, right_height) = self.parse_multiplicative()?;
            height = parent_height(height.max(right_height))?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok((left, height))
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut height) = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let (right, right_height) = self.parse_unary()?;
            height = parent_height(height.max(right_height))?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok((left, height))
    }

    fn parse_unary(&mut self) -> FormulaResult<Parsed> {
        let op = match self.current_token() {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume()?;
        let (operand, height) = self.nested(Self::parse_unary)?;
        let expr = FormulaExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        };
        Ok((expr, parent_height(height)?))
    }

    fn parse_primary(&mut self) -> FormulaResult<Parsed> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok((FormulaExpr::Number(n), 1))
            }

            Token::CellRef(ref_str) => {
                self.consume()?;
                Ok((self.parse_cell_reference(&ref_str)?, 1))
            }

            Token::LeftParen => {
                self.consume()?;
                let parsed = self.nested(Self::parse_expression)?;
                self.expect(&Token::RightParen)?;
                Ok(parsed)
            }

            token => Err(FormulaError::Parse(format!("Unexpected token: {:?}", token))),
        }
    }

    fn parse_cell_reference(&mut self, ref_str: &str) -> FormulaResult<FormulaExpr> {
        match Position::from_a1(ref_str) {
            Position::NONE => Err(FormulaError::InvalidReference(ref_str.to_string())),
            pos => Ok(FormulaExpr::CellRef(pos)),
        }
    }
}

fn too_deep() -> FormulaError {
    FormulaError::Parse("Formula nesting too deep".to_string())
}

/// Height of a node over a child of the given height
fn parent_height(child: usize) -> FormulaResult<usize> {
    if child >= MAX_HEIGHT {
        Err(too_deep())
    } else {
        Ok(child + 1)
    }
}
