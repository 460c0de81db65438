use std::collections::BinaryHeap;

use gridpath_core::{Grid, manhattan};

use crate::frontier::{Frontier, NodeRef};

/// A* with the Manhattan heuristic.
///
/// Manhattan distance never overestimates on a 4-connected uniform-cost
/// grid, so the first time the end is extracted its distance is optimal.
/// The open set may hold several entries for the same cell; entries of
/// already finalized cells are skipped on pop. Ties on `total_cost` prefer
/// the lower heuristic (deeper cell), then the lower row-major index.
#[derive(Debug, Default)]
pub(crate) struct AStar {
    open: BinaryHeap<NodeRef<(u32, u32)>>,
    nbuf: Vec<usize>,
}

impl Frontier for AStar {
    fn seed(&mut self, grid: &mut Grid, start: usize, end: usize) {
        let Some(goal) = grid.cell_at(end).map(|c| c.pos()) else {
            return;
        };
        if let Some(c) = grid.cell_at_mut(start) {
            c.distance = 0;
            c.heuristic = manhattan(c.pos(), goal);
            c.total_cost = c.heuristic;
            self.open.push(NodeRef {
                key: (c.total_cost, c.heuristic),
                idx: start,
            });
        }
    }

    fn next(&mut self, grid: &mut Grid) -> Option<usize> {
        while let Some(NodeRef { idx, .. }) = self.open.pop() {
            let Some(c) = grid.cell_at_mut(idx) else {
                continue;
            };
            if c.visited {
                continue;
            }
            c.visited = true;
            return Some(idx);
        }
        None
    }

    fn expand(&mut self, grid: &mut Grid, ci: usize, end: usize) {
        let (Some(current), Some(goal)) = (grid.cell_at(ci), grid.cell_at(end)) else {
            return;
        };
        let tentative = current.distance + 1;
        let goal = goal.pos();

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
            n.heuristic = manhattan(n.pos(), goal);
            n.total_cost = tentative.saturating_add(n.heuristic);
            n.previous = Some(ci);
            self.open.push(NodeRef {
                key: (n.total_cost, n.heuristic),
                idx: ni,
            });
        }
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}
