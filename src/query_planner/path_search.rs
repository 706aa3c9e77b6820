//! Simple-path enumeration between two tables
//!
//! Breadth-first over partial paths, so complete paths come out shortest
//! first. Ties keep discovery order, which follows ascending target index
//! when expanding a node. A partial path never revisits a node it already
//! contains, so every emitted path is simple.
//!
//! A reverse reachability pass runs first: nodes that cannot reach the goal
//! are never entered. This does not change which paths are found or their
//! order, it only keeps unconnected searches cheap.

use std::collections::{HashSet, VecDeque};

use log::debug;

use super::path::Path;
use crate::graph_catalog::adjacency::{Adjacency, NodeIndex};
use crate::graph_catalog::{Linkage, TableNode};

#[derive(Debug, Clone)]
struct PartialPath<'g> {
    indices: Vec<NodeIndex>,
    linkages: Vec<&'g Linkage>,
    visited: HashSet<NodeIndex>,
}

impl<'g> PartialPath<'g> {
    fn start(index: NodeIndex) -> Self {
        Self {
            indices: vec![index],
            linkages: Vec::new(),
            visited: HashSet::from([index]),
        }
    }

    fn last(&self) -> NodeIndex {
        self.indices[self.indices.len() - 1]
    }

    fn extended(&self, next: NodeIndex, linkage: &'g Linkage) -> Self {
        let mut extended = self.clone();
        extended.indices.push(next);
        extended.linkages.push(linkage);
        extended.visited.insert(next);
        extended
    }

    fn into_path(self, nodes: &'g [TableNode]) -> Path<'g> {
        let path_nodes = self.indices.iter().map(|ix| &nodes[ix.get()]).collect();
        Path::new(path_nodes, self.linkages)
    }
}

/// Up to `limit` simple paths from `start` to `goal`, shortest first.
///
/// `start == goal` yields the single trivial path. No path is an empty
/// result, not an error.
pub(crate) fn find_paths<'g>(
    adjacency: &'g Adjacency,
    nodes: &'g [TableNode],
    start: NodeIndex,
    goal: NodeIndex,
    limit: usize,
) -> Vec<Path<'g>> {
    let mut found = Vec::new();
    if limit == 0 {
        return found;
    }

    let reaches_goal = reaches(adjacency, goal);
    if !reaches_goal[start.get()] {
        debug!(
            "No path from {} to {}",
            nodes[start.get()].table_name(),
            nodes[goal.get()].table_name()
        );
        return found;
    }

    let mut frontier = VecDeque::from([PartialPath::start(start)]);
    while let Some(partial) = frontier.pop_front() {
        let last = partial.last();
        if last == goal {
            found.push(partial.into_path(nodes));
            if found.len() >= limit {
                break;
            }
            continue;
        }

        for (next, linkage) in adjacency.neighbors(last) {
            if partial.visited.contains(&next) || !reaches_goal[next.get()] {
                continue;
            }
            frontier.push_back(partial.extended(next, linkage));
        }
    }

    debug!(
        "Found {} path(s) from {} to {} (limit {})",
        found.len(),
        nodes[start.get()].table_name(),
        nodes[goal.get()].table_name(),
        limit
    );

    found
}

/// `reaches[i]` is true when node `i` has a directed path to `goal`.
fn reaches(adjacency: &Adjacency, goal: NodeIndex) -> Vec<bool> {
    let mut reaches = vec![false; adjacency.size()];
    reaches[goal.get()] = true;

    let mut queue = VecDeque::from([goal]);
    while let Some(current) = queue.pop_front() {
        for previous in adjacency.predecessors(current) {
            if !reaches[previous.get()] {
                reaches[previous.get()] = true;
                queue.push_back(previous);
            }
        }
    }

    reaches
}
