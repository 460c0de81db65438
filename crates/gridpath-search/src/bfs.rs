use std::collections::VecDeque;

use gridpath_core::Grid;

use crate::frontier::Frontier;

/// Breadth-first search.
///
/// Cells are flagged `visited` when enqueued, so each one enters the queue
/// at most once; the visitation event fires when it is dequeued. Level order
/// makes the first path to the end a shortest one.
#[derive(Debug, Default)]
pub(crate) struct Bfs {
    queue: VecDeque<usize>,
    nbuf: Vec<usize>,
}

impl Frontier for Bfs {
    fn seed(&mut self, grid: &mut Grid, start: usize, _end: usize) {
        if let Some(c) = grid.cell_at_mut(start) {
            c.distance = 0;
            c.visited = true;
            self.queue.push_back(start);
        }
    }

    fn next(&mut self, _grid: &mut Grid) -> Option<usize> {
        self.queue.pop_front()
    }

    fn expand(&mut self, grid: &mut Grid, ci: usize, _end: usize) {
        let Some(current) = grid.cell_at(ci) else {
            return;
        };
        let nd = current.distance + 1;

        self.nbuf.clear();
        self.nbuf.extend(grid.neighbor_indices(ci));

        for &ni in &self.nbuf {
            let Some(n) = grid.cell_at_mut(ni) else {
                continue;
            };
            if n.visited {
                continue;
            }
            n.visited = true;
            n.distance = nd;
            n.previous = Some(ci);
            self.queue.push_back(ni);
        }
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
