use gridpath_core::Grid;

/// The per-algorithm part of a search: what the frontier is and how cells
/// enter and leave it. The shared driver lives in [`Search`](crate::Search).
///
/// All methods work on the search's private copy of the grid.
pub(crate) trait Frontier {
    /// Put the start cell in the frontier.
    fn seed(&mut self, grid: &mut Grid, start: usize, end: usize);

    /// Take the next cell to finalize, skipping stale entries, and mark it
    /// visited. `None` once the frontier is exhausted.
    fn next(&mut self, grid: &mut Grid) -> Option<usize>;

    /// Offer the open neighbours of the freshly finalized cell `ci`.
    fn expand(&mut self, grid: &mut Grid, ci: usize, end: usize);

    /// Entries currently held, stale ones included.
    fn len(&self) -> usize;
}

/// Heap entry for the priority-based frontiers.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest key first.
/// The key is compared lexicographically and always ends with the cell's
/// row-major index, which makes the extraction order a deterministic total
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeRef<K: Ord> {
    pub(crate) key: K,
    pub(crate) idx: usize,
}

impl<K: Ord> Ord for NodeRef<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl<K: Ord> PartialOrd for NodeRef<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
