use std::fmt;

use crate::graph_catalog::{Linkage, TableNode};

/// A simple join path through one built schema graph.
///
/// Holds `n >= 1` nodes and exactly `n - 1` linkages; `linkages[i]` joins
/// `nodes[i]` to `nodes[i + 1]`. No node appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'g> {
    nodes: Vec<&'g TableNode>,
    linkages: Vec<&'g Linkage>,
}

impl<'g> Path<'g> {
    pub(crate) fn new(nodes: Vec<&'g TableNode>, linkages: Vec<&'g Linkage>) -> Self {
        debug_assert!(!nodes.is_empty(), "a path has at least one node");
        debug_assert_eq!(linkages.len() + 1, nodes.len());
        Self { nodes, linkages }
    }

    pub fn nodes(&self) -> &[&'g TableNode] {
        &self.nodes
    }

    pub fn linkages(&self) -> &[&'g Linkage] {
        &self.linkages
    }

    /// Number of tables on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A single-table path; there is nothing to join.
    pub fn is_trivial(&self) -> bool {
        self.linkages.is_empty()
    }

    pub fn start(&self) -> &'g TableNode {
        self.nodes[0]
    }

    pub fn end(&self) -> &'g TableNode {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn table_names(&self) -> Vec<&'g str> {
        self.nodes.iter().map(|node| node.table_name()).collect()
    }

    /// `(from, linkage, to)` for every hop, in path order.
    pub fn hops(&self) -> impl Iterator<Item = (&'g TableNode, &'g Linkage, &'g TableNode)> + '_ {
        self.nodes
            .windows(2)
            .zip(self.linkages.iter())
            .map(|(pair, linkage)| (pair[0], *linkage, pair[1]))
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_names().join(" -> "))
    }
}
