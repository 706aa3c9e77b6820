//! Index-keyed adjacency structure
//!
//! An owned `n x n` grid of optional linkages. Positions are only meaningful
//! for the node list the grid was built alongside and are never handed out
//! past the crate boundary.

use super::table_node::Linkage;

/// Position of a node in the sorted node list of one built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(index: usize) -> Self {
        NodeIndex(index)
    }

    pub(crate) fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Adjacency {
    size: usize,
    cells: Vec<Option<Linkage>>,
}

impl Adjacency {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    fn offset(&self, from: NodeIndex, to: NodeIndex) -> usize {
        debug_assert!(from.get() < self.size && to.get() < self.size);
        from.get() * self.size + to.get()
    }

    pub(crate) fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<&Linkage> {
        self.cells[self.offset(from, to)].as_ref()
    }

    /// Last writer wins.
    pub(crate) fn set(&mut self, from: NodeIndex, to: NodeIndex, linkage: Linkage) {
        let offset = self.offset(from, to);
        self.cells[offset] = Some(linkage);
    }

    /// Outgoing edges of `from`, in ascending target order.
    pub(crate) fn neighbors(
        &self,
        from: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, &Linkage)> + '_ {
        let start = from.get() * self.size;
        self.cells[start..start + self.size]
            .iter()
            .enumerate()
            .filter_map(|(to, cell)| cell.as_ref().map(|l| (NodeIndex::new(to), l)))
    }

    /// Incoming edges of `to`, in ascending source order.
    pub(crate) fn predecessors(&self, to: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.size)
            .map(NodeIndex::new)
            .filter(move |&from| self.get(from, to).is_some())
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
