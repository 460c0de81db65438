use std::collections::BinaryHeap;

use gridpath_core::Grid;

use crate::frontier::{Frontier, NodeRef};

/// Dijkstra with uniform edge weight 1.
///
/// Conceptually the whole unvisited set is the frontier and the minimum
/// `distance` cell is extracted each step; cells still at infinity can never
/// be extracted before a finite one, so only reached cells are kept in a
/// binary heap. Relaxing a cell pushes a fresh entry and outdated ones are
/// skipped on pop. Ties on distance go to the lower row-major index.
#[derive(Debug, Default)]
pub(crate) struct Dijkstra {
    open: BinaryHeap<NodeRef<u32>>,
    nbuf: Vec<usize>,
}

impl Frontier for Dijkstra {
    fn seed(&mut self, grid: &mut Grid, start: usize, _end: usize) {
        if let Some(c) = grid.cell_at_mut(start) {
            c.distance = 0;
            self.open.push(NodeRef { key: 0, idx: start });
        }
    }

    fn next(&mut self, grid: &mut Grid) -> Option<usize> {
        while let Some(NodeRef { key, idx }) = self.open.pop() {
            let Some(c) = grid.cell_at_mut(idx) else {
                continue;
            };
            if c.visited || key > c.distance {
                continue;
            }
            c.visited = true;
            return Some(idx);
        }
        None
    }

    fn expand(&mut self, grid: &mut Grid, ci: usize, _end: usize) {
        let Some(current) = grid.cell_at(ci) else {
            return;
        };
        let tentative = current.distance + 1;

        self.nbuf.clear();
        self.nbuf.extend(grid.neighbor_indices(ci));

        for &ni in &self.nbuf {
            let Some(n) = grid.cell_at_mut(ni) else {
                continue;
            };
            if n.visited || tentative >= n.distance {
                continue;
            }
            n.distance = tentative;
            n.previous = Some(ci);
            self.open.push(NodeRef {
                key: tentative,
                idx: ni,
            });
        }
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}
