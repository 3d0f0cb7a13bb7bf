//! Parsed formula handle

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::evaluator::{evaluate, CellLookup};
use crate::parser::parse_formula;
use cellgraph_core::{ArithmeticError, Position};

/// A parsed formula together with the cells it reads
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
    references: Vec<Position>,
}

impl Formula {
    /// Parse expression text (without the leading `=`)
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        let expr = parse_formula(expression)?;
        let mut references = Vec::new();
        expr.collect_references(&mut references);
        Ok(Self { expr, references })
    }

    /// Evaluate against the given cell values
    pub fn evaluate(&self, lookup: &dyn CellLookup) -> Result<f64, ArithmeticError> {
        evaluate(&self.expr, lookup)
    }

    /// Canonical expression text, without the leading `=`
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// Cells read by the formula, in order of appearance
    ///
    /// May contain duplicates.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }

    /// Get the parsed expression tree
    pub fn expr(&self) -> &FormulaExpr {
        &self.expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn canonical(text: &str) -> String {
        Formula::parse(text).unwrap().expression()
    }

    #[test]
    fn test_expression_strips_whitespace_and_redundant_parens() {
        assert_eq!(canonical(" 1 + 2 "), "1+2");
        assert_eq!(canonical("((A1))"), "A1");
        assert_eq!(canonical("(1*2)+3"), "1*2+3");
        assert_eq!(canonical("(1+2)-3"), "1+2-3");
        assert_eq!(canonical("1.50"), "1.5");
        assert_eq!(canonical("1e3"), "1000");
    }

    #[test]
    fn test_expression_keeps_required_parens() {
        assert_eq!(canonical("(1+2)*3"), "(1+2)*3");
        assert_eq!(canonical("1-(2+3)"), "1-(2+3)");
        assert_eq!(canonical("1-(2-3)"), "1-(2-3)");
        assert_eq!(canonical("1/(2*3)"), "1/(2*3)");
        assert_eq!(canonical("1+(2+3)"), "1+(2+3)");
        assert_eq!(canonical("-(A1+B1)"), "-(A1+B1)");
        assert_eq!(canonical("-(A1*B1)"), "-(A1*B1)");
        assert_eq!(canonical("-A1*B1"), "-A1*B1");
        assert_eq!(canonical("+(-1)"), "+-1");
    }

    #[test]
    fn test_referenced_cells() {
        let formula = Formula::parse("B2+A1*B2").unwrap();
        assert_eq!(
            formula.referenced_cells(),
            &[
                Position::new(1, 1),
                Position::new(0, 0),
                Position::new(1, 1)
            ]
        );

        assert!(Formula::parse("1+2").unwrap().referenced_cells().is_empty());
    }

    fn arb_expr() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            (0u32..1000).prop_map(|n| n.to_string()),
            "[A-C][1-3]",
        ];
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), "[-+*/]", inner.clone())
                    .prop_map(|(l, op, r)| format!("{l}{op}{r}")),
                inner.clone().prop_map(|e| format!("({e})")),
                inner.prop_map(|e| format!("-{e}")),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_text_reparses_to_same_tree(text in arb_expr()) {
            let formula = Formula::parse(&text).unwrap();
            let reparsed = Formula::parse(&formula.expression()).unwrap();
            prop_assert_eq!(reparsed.expr(), formula.expr());
            prop_assert_eq!(reparsed.expression(), formula.expression());
        }
    }
}
