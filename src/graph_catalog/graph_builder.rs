//! Graph construction from catalog constraint rows
//!
//! 1. Primary-key rows become nodes, sorted by table name (byte order).
//! 2. An `n x n` adjacency grid is allocated.
//! 3. Each foreign-key row sets `adjacency[from][to]`; undirected builds also
//!    set the mirrored reverse edge.
//!
//! The build is atomic: any error discards the partial graph.

use log::{debug, info};

use super::adjacency::Adjacency;
use super::errors::{Result, SchemaGraphError};
use super::index_lookup::find_index;
use super::table_node::{Linkage, TableNode};
use crate::catalog::CatalogRow;

#[derive(Debug, Clone)]
pub(crate) struct BuiltGraph {
    pub(crate) adjacency: Adjacency,
    pub(crate) nodes: Vec<TableNode>,
}

pub(crate) fn build_graph(rows: &[CatalogRow], directed: bool) -> Result<BuiltGraph> {
    let nodes = sorted_nodes(rows)?;
    let mut adjacency = Adjacency::new(nodes.len());

    for row in rows {
        let CatalogRow::ForeignKey {
            table,
            column,
            referenced_table,
            referenced_column,
        } = row
        else {
            continue;
        };

        let (Some(from), Some(to)) = (find_index(&nodes, table), find_index(&nodes, referenced_table))
        else {
            return Err(SchemaGraphError::UnresolvedReference {
                from_table: table.clone(),
                to_table: referenced_table.clone(),
            });
        };

        let linkage = Linkage::new(column.as_str(), referenced_column.as_str());
        debug!(
            "Linking {}.{} -> {}.{}",
            table, column, referenced_table, referenced_column
        );

        if !directed {
            adjacency.set(to, from, linkage.mirrored());
        }
        adjacency.set(from, to, linkage);
    }

    info!(
        "Built {} schema graph: {} tables, {} edges",
        if directed { "directed" } else { "undirected" },
        nodes.len(),
        adjacency.edge_count()
    );

    Ok(BuiltGraph { adjacency, nodes })
}

fn sorted_nodes(rows: &[CatalogRow]) -> Result<Vec<TableNode>> {
    let mut nodes: Vec<TableNode> = rows
        .iter()
        .filter_map(|row| match row {
            CatalogRow::PrimaryKey { table, column } => {
                Some(TableNode::new(table.as_str(), column.as_str()))
            }
            CatalogRow::ForeignKey { .. } => None,
        })
        .collect();

    nodes.sort_by(|a, b| a.table_name().cmp(b.table_name()));

    if let Some(pair) = nodes
        .windows(2)
        .find(|pair| pair[0].table_name() == pair[1].table_name())
    {
        return Err(SchemaGraphError::DuplicateTable {
            table: pair[0].table_name().to_string(),
        });
    }

    Ok(nodes)
}
