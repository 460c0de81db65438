use gridpath_core::Grid;

use crate::frontier::Frontier;

/// Depth-first search with an explicit stack.
///
/// A cell may be pushed several times through different parents before it
/// is popped; it is finalized (and its back-pointer fixed) on the first pop
/// and later copies are skipped. The path found is a valid one but not
/// necessarily the shortest.
#[derive(Debug, Default)]
pub(crate) struct Dfs {
    /// `(cell, parent)` pairs.
    stack: Vec<(usize, Option<usize>)>,
    nbuf: Vec<usize>,
}

impl Frontier for Dfs {
    fn seed(&mut self, _grid: &mut Grid, start: usize, _end: usize) {
        self.stack.push((start, None));
    }

    fn next(&mut self, grid: &mut Grid) -> Option<usize> {
        while let Some((idx, parent)) = self.stack.pop() {
            if grid.cell_at(idx).is_none_or(|c| c.visited) {
                continue;
            }
            let distance = match parent.and_then(|p| grid.cell_at(p)) {
                Some(p) => p.distance + 1,
                None => 0,
            };
            if let Some(c) = grid.cell_at_mut(idx) {
                c.visited = true;
                c.distance = distance;
                c.previous = parent;
            }
            return Some(idx);
        }
        None
    }

    fn expand(&mut self, grid: &mut Grid, ci: usize, _end: usize) {
        self.nbuf.clear();
        self.nbuf.extend(grid.neighbor_indices(ci));

        for &ni in &self.nbuf {
            if grid.cell_at(ni).is_some_and(|n| !n.visited) {
                self.stack.push((ni, Some(ci)));
            }
        }
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}
