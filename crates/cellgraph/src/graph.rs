//! Dependency graph maintenance
//!
//! Edges are stored on both ends: a formula cell lists the cells it reads and every read
//! cell lists its readers. All edge changes go through [`Sheet::commit`] so both sides
//! always agree.

use crate::cell::Content;
use crate::sheet::Sheet;
use ahash::AHashSet;
use cellgraph_core::{Error, Position, Result};
use std::collections::BTreeSet;

impl Sheet {
    /// Check that making `root` read `references` keeps the graph acyclic
    ///
    /// Walks down-edges from every reference; reaching `root` means a cycle. Cells that
    /// don't exist yet have no edges.
    pub(crate) fn check_cycle(&self, root: Position, references: &BTreeSet<Position>) -> Result<()> {
        let mut visited: AHashSet<Position> = AHashSet::new();
        let mut stack: Vec<Position> = references.iter().copied().collect();

        while let Some(pos) = stack.pop() {
            if pos == root {
                tracing::debug!("Rejected formula for {root}: circular dependency");
                return Err(Error::CircularDependency(root));
            }
            if !visited.insert(pos) {
                continue;
            }
            if let Some(cell) = self.get(pos) {
                stack.extend(cell.dependencies().iter().copied());
            }
        }

        Ok(())
    }

    /// Store `content` at `pos` and rewire its edges
    ///
    /// The caller has already validated positions and acyclicity. Returns the number of
    /// cells whose cache was dropped.
    pub(crate) fn commit(&mut self, pos: Position, content: Content) -> usize {
        let dependencies = content.references();
        let old = self.ensure_cell(pos).replace_content(content, dependencies.clone());

        for &removed in old.difference(&dependencies) {
            if let Some(cell) = self.get_mut(removed) {
                cell.remove_dependent(pos);
            }
        }
        for &added in dependencies.difference(&old) {
            self.ensure_cell(added).add_dependent(pos);
        }

        let invalidated = self.invalidate(pos);
        tracing::trace!("Committed {pos}: {invalidated} cache(s) invalidated");

        for &removed in old.difference(&dependencies) {
            self.release_if_unused(removed);
        }
        self.release_if_unused(pos);

        invalidated
    }

    /// Drop the cache of `pos` and of everything that transitively reads it
    pub(crate) fn invalidate(&mut self, pos: Position) -> usize {
        let mut visited: AHashSet<Position> = AHashSet::new();
        let mut stack = vec![pos];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(cell) = self.get_mut(current) {
                cell.invalidate();
                stack.extend(cell.dependents().iter().copied());
            }
        }

        visited.len()
    }

    /// Compute and cache every uncached cell that `root` transitively reads
    ///
    /// Post-order walk over down-edges: a cell is computed only once all its own
    /// dependencies are cached, so the stack depth stays flat however long the chain.
    pub(crate) fn fill_dependencies(&self, root: Position) {
        let Some(cell) = self.get(root) else {
            return;
        };

        let mut visited: AHashSet<Position> = AHashSet::new();
        let mut stack: Vec<(Position, bool)> = cell
            .dependencies()
            .iter()
            .map(|&dep| (dep, false))
            .collect();

        while let Some((pos, expanded)) = stack.pop() {
            let Some(cell) = self.get(pos) else {
                continue;
            };
            if cell.cached_value().is_some() {
                continue;
            }
            if expanded {
                self.compute(cell);
                continue;
            }
            if !visited.insert(pos) {
                continue;
            }

            stack.push((pos, true));
            stack.extend(
                cell.dependencies()
                    .iter()
                    .filter(|&&dep| self.get(dep).is_some_and(|d| d.cached_value().is_none()))
                    .map(|&dep| (dep, false)),
            );
        }

        tracing::trace!("Filled {} dependency cache(s) of {root}", visited.len());
    }
}
