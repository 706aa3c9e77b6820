//! Table name to node position lookup.
//!
//! The node list must already be sorted by table name (byte order); this is
//! a caller contract and is only checked in debug builds.

use super::adjacency::NodeIndex;
use super::table_node::TableNode;

/// Binary search for `table_name` in a name-sorted node list.
pub(crate) fn find_index(sorted_nodes: &[TableNode], table_name: &str) -> Option<NodeIndex> {
    debug_assert!(
        sorted_nodes
            .windows(2)
            .all(|w| w[0].table_name() <= w[1].table_name()),
        "node list must be sorted by table name"
    );

    sorted_nodes
        .binary_search_by(|node| node.table_name().cmp(table_name))
        .ok()
        .map(NodeIndex::new)
}
