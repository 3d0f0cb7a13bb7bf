//! Cell content and per-cell dependency state
//!
//! A cell never points at another cell. Both edge sets hold [`Position`]s that the
//! owning [`Sheet`](crate::Sheet) resolves on demand.
//!
//! Cells themselves stay inside the sheet; callers read them through
//! [`CellRef`](crate::CellRef) and change them only through the sheet, so the two edge sets
//! can't drift apart:
//!
//! ```compile_fail
//! let cell = cellgraph::cell::Cell::default();
//! ```

use ahash::AHashSet;
use cellgraph_core::{Error, Position, Result, Value, ESCAPE_SIGN, FORMULA_SIGN};
use cellgraph_formula::{CellLookup, Formula};
use std::cell::OnceCell;
use std::collections::BTreeSet;

/// What a cell holds
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    /// No content; evaluates to 0 and displays as ""
    #[default]
    Empty,

    /// Literal text, possibly starting with the escape marker
    Text(String),

    /// Parsed formula
    Formula(Formula),
}

impl Content {
    /// Classify raw cell text
    ///
    /// - `""` is [`Content::Empty`]
    /// - `=` followed by at least one character is a formula
    /// - anything else, including a lone `=`, is literal text
    pub fn classify(text: String) -> Result<Self> {
        if text.is_empty() {
            return Ok(Content::Empty);
        }

        match text.strip_prefix(FORMULA_SIGN) {
            Some(expression) if !expression.is_empty() => Formula::parse(expression)
                .map(Content::Formula)
                .map_err(|e| Error::syntax(e.to_string())),
            _ => Ok(Content::Text(text)),
        }
    }

    /// Check if this is [`Content::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Check if this is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, Content::Formula(_))
    }

    /// Raw text as the user would retype it
    pub fn text(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(s) => s.clone(),
            Content::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    /// Sorted, de-duplicated cells this content reads
    pub fn references(&self) -> BTreeSet<Position> {
        match self {
            Content::Formula(formula) => formula.referenced_cells().iter().copied().collect(),
            Content::Empty | Content::Text(_) => BTreeSet::new(),
        }
    }

    /// Compute the value, reading referenced cells through `lookup`
    pub fn evaluate(&self, lookup: &dyn CellLookup) -> Value {
        match self {
            Content::Empty => Value::Number(0.0),
            Content::Text(s) => Value::Text(s.strip_prefix(ESCAPE_SIGN).unwrap_or(s).to_string()),
            Content::Formula(formula) => formula.evaluate(lookup).into(),
        }
    }
}

/// One addressable unit of a sheet
#[derive(Debug, Default)]
pub(crate) struct Cell {
    content: Content,
    /// Memoized value, cleared whenever anything upstream changes
    cache: OnceCell<Value>,
    /// Cells this cell's formula reads (down-edges)
    dependencies: BTreeSet<Position>,
    /// Cells whose formulas read this cell (up-edges)
    dependents: AHashSet<Position>,
}

impl Cell {
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Cells this cell reads, ordered by (row, col)
    pub fn dependencies(&self) -> &BTreeSet<Position> {
        &self.dependencies
    }

    /// Cells that read this cell, in no particular order
    pub fn dependents(&self) -> &AHashSet<Position> {
        &self.dependents
    }

    pub fn cached_value(&self) -> Option<&Value> {
        self.cache.get()
    }

    /// Return the memoized value, computing it on a miss
    pub(crate) fn value(&self, lookup: &dyn CellLookup) -> Value {
        self.cache
            .get_or_init(|| self.content.evaluate(lookup))
            .clone()
    }

    /// Swap in new content and its down-edges, returning the previous down-edges
    ///
    /// Up-edges of other cells are the caller's business.
    pub(crate) fn replace_content(
        &mut self,
        content: Content,
        dependencies: BTreeSet<Position>,
    ) -> BTreeSet<Position> {
        self.content = content;
        std::mem::replace(&mut self.dependencies, dependencies)
    }

    pub(crate) fn add_dependent(&mut self, pos: Position) {
        self.dependents.insert(pos);
    }

    pub(crate) fn remove_dependent(&mut self, pos: Position) {
        self.dependents.remove(&pos);
    }

    pub(crate) fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Empty and nobody reads it, so the slot can go
    pub(crate) fn is_unused(&self) -> bool {
        self.content.is_empty() && self.dependents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_cells(_: Position) -> Option<Value> {
        None
    }

    #[test]
    fn test_classify() {
        assert_eq!(Content::classify(String::new()).unwrap(), Content::Empty);
        assert_eq!(
            Content::classify("hello".into()).unwrap(),
            Content::Text("hello".into())
        );
        assert_eq!(
            Content::classify("=".into()).unwrap(),
            Content::Text("=".into())
        );
        assert_eq!(
            Content::classify("'=1+1".into()).unwrap(),
            Content::Text("'=1+1".into())
        );
        assert!(Content::classify("=1+1".into()).unwrap().is_formula());
        assert!(matches!(
            Content::classify("=1+".into()),
            Err(Error::FormulaSyntax(_))
        ));
    }

    #[test]
    fn test_text() {
        assert_eq!(Content::Empty.text(), "");
        assert_eq!(Content::classify("'abc".into()).unwrap().text(), "'abc");
        assert_eq!(
            Content::classify("= (A1 + 2) ".into()).unwrap().text(),
            "=A1+2"
        );
    }

    #[test]
    fn test_evaluate_literals() {
        let lookup = no_cells;
        assert_eq!(Content::Empty.evaluate(&lookup), Value::Number(0.0));
        assert_eq!(
            Content::Text("12".into()).evaluate(&lookup),
            Value::Text("12".into())
        );
        assert_eq!(
            Content::Text("'=1+1".into()).evaluate(&lookup),
            Value::Text("=1+1".into())
        );
        // Only one marker is stripped
        assert_eq!(
            Content::Text("''x".into()).evaluate(&lookup),
            Value::Text("'x".into())
        );
        assert_eq!(
            Content::classify("=1+2".into()).unwrap().evaluate(&lookup),
            Value::Number(3.0)
        );
        assert!(Content::classify("=1/0".into())
            .unwrap()
            .evaluate(&lookup)
            .is_error());
    }

    #[test]
    fn test_references_sorted_and_unique() {
        let content = Content::classify("=B2+A1+B2+A10".into()).unwrap();
        let refs: Vec<_> = content.references().into_iter().collect();
        assert_eq!(
            refs,
            vec![
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(9, 0)
            ]
        );
        assert!(Content::Text("A1".into()).references().is_empty());
    }

    #[test]
    fn test_cell_memoizes_value() {
        let mut cell = Cell::default();
        let content = Content::classify("=2*3".into()).unwrap();
        let deps = content.references();
        cell.replace_content(content, deps);

        assert!(cell.cached_value().is_none());
        assert_eq!(cell.value(&no_cells), Value::Number(6.0));
        assert_eq!(cell.cached_value(), Some(&Value::Number(6.0)));

        cell.invalidate();
        assert!(cell.cached_value().is_none());
    }

    #[test]
    fn test_cell_is_unused() {
        let mut cell = Cell::default();
        assert!(cell.is_unused());

        cell.add_dependent(Position::new(0, 1));
        assert!(!cell.is_unused());

        cell.remove_dependent(Position::new(0, 1));
        assert!(cell.is_unused());
    }
}
