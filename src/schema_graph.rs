//! # Schema Graph
//!
//! The public entry point. A `SchemaGraph` is built once from a catalog
//! snapshot and is immutable afterwards; a schema change means building a
//! new one. Shared references can be used from concurrent tasks.
//!
//! ```ignore
//! let graph = SchemaGraph::from_catalog(&ExecutorCatalog::new(&db), "public", true).await?;
//! let owns = graph.belongs_to("orders", "5", "customers", "9", &db, 1).await?;
//! ```
//!
//! Table names passed in, and every name read from the catalog, end up in
//! SQL text as quoted identifiers. They must come from trusted sources. Key
//! values are always bound as parameters.
//!
//! When several join paths connect two tables, candidates are tried shortest
//! first and the first one reporting membership wins. Which path is the
//! "right" belongs-to relationship is schema specific; use
//! [`SchemaGraph::find_paths`] to inspect candidates and
//! [`SchemaGraph::belongs_to_via`] to pin one.

use std::collections::HashSet;

use log::{debug, info};

use crate::catalog::{CatalogAdapter, CatalogRow};
use crate::config::GraphConfig;
use crate::executor::{BelongsRow, QueryExecutor};
use crate::graph_catalog::adjacency::{Adjacency, NodeIndex};
use crate::graph_catalog::errors::{Result, SchemaGraphError};
use crate::graph_catalog::graph_builder::build_graph;
use crate::graph_catalog::index_lookup::find_index;
use crate::graph_catalog::{Linkage, TableNode};
use crate::query_planner::path_search::find_paths;
use crate::query_planner::Path;
use crate::sql_generator::{compile_belongs_query, CompiledQuery};

#[derive(Debug, Clone)]
pub struct SchemaGraph {
    schema_name: String,
    directed: bool,
    adjacency: Adjacency,
    nodes: Vec<TableNode>,
}

impl SchemaGraph {
    /// Build from the constraints the adapter lists for `schema_name`.
    ///
    /// Adapter failures surface as [`SchemaGraphError::Catalog`]; graph build
    /// failures are returned unchanged.
    pub async fn from_catalog<A>(
        adapter: &A,
        schema_name: impl Into<String>,
        directed: bool,
    ) -> Result<Self>
    where
        A: CatalogAdapter + ?Sized,
    {
        let schema_name = schema_name.into();
        let rows = adapter
            .list_constraints(&schema_name)
            .await
            .map_err(|source| SchemaGraphError::Catalog {
                schema: schema_name.clone(),
                source,
            })?;

        Self::from_rows(&rows, schema_name, directed)
    }

    pub async fn from_config<A>(adapter: &A, config: &GraphConfig) -> Result<Self>
    where
        A: CatalogAdapter + ?Sized,
    {
        Self::from_catalog(adapter, config.schema_name.as_str(), config.directed).await
    }

    /// Build synchronously from already fetched constraint rows.
    pub fn from_rows(
        rows: &[CatalogRow],
        schema_name: impl Into<String>,
        directed: bool,
    ) -> Result<Self> {
        let schema_name = schema_name.into();
        let built = build_graph(rows, directed)?;
        info!("Schema graph ready for schema {}", schema_name);

        Ok(Self {
            schema_name,
            directed,
            adjacency: built.adjacency,
            nodes: built.nodes,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Table names in ascending order.
    pub fn tables(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(TableNode::table_name)
    }

    pub fn table(&self, table_name: &str) -> Option<&TableNode> {
        find_index(&self.nodes, table_name).map(|ix| &self.nodes[ix.get()])
    }

    /// The direct edge from one table to another, if any.
    pub fn linkage(&self, from_table: &str, to_table: &str) -> Result<Option<&Linkage>> {
        let from = self.resolve(from_table)?;
        let to = self.resolve(to_table)?;
        Ok(self.adjacency.get(from, to))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Up to `limit` simple join paths, shortest first.
    ///
    /// Searching a table against itself yields the single trivial path.
    pub fn find_paths(&self, from_table: &str, to_table: &str, limit: usize) -> Result<Vec<Path<'_>>> {
        let start = self.resolve(from_table)?;
        let goal = self.resolve(to_table)?;
        Ok(find_paths(&self.adjacency, &self.nodes, start, goal, limit))
    }

    /// Compiled statements for the candidate paths, in the order
    /// [`SchemaGraph::belongs_to`] would run them. Trivial paths are skipped.
    pub fn compile_belongs_to(
        &self,
        from_table: &str,
        to_table: &str,
        path_limit: usize,
    ) -> Result<Vec<CompiledQuery>> {
        self.find_paths(from_table, to_table, path_limit)?
            .iter()
            .filter(|path| !path.is_trivial())
            .map(|path| {
                compile_belongs_query(path, &self.schema_name).map_err(SchemaGraphError::from)
            })
            .collect()
    }

    /// Does the `from_key` row of `from_table` reach the `to_key` row of
    /// `to_table` through a chain of foreign keys?
    ///
    /// Candidate statements run one at a time until one reports membership.
    /// Executor errors stop the search and are returned as
    /// [`SchemaGraphError::Execution`].
    pub async fn belongs_to<E>(
        &self,
        from_table: &str,
        from_key: &str,
        to_table: &str,
        to_key: &str,
        executor: &E,
        path_limit: usize,
    ) -> Result<bool>
    where
        E: QueryExecutor + ?Sized,
    {
        let candidates = self.compile_belongs_to(from_table, to_table, path_limit)?;
        if candidates.is_empty() {
            debug!("No join path from {} to {}", from_table, to_table);
            return Ok(false);
        }

        for (attempt, compiled) in candidates.iter().enumerate() {
            debug!(
                "Belongs-to candidate {}/{}:\n{}",
                attempt + 1,
                candidates.len(),
                compiled.sql
            );
            if self.run(compiled, from_key, to_key, executor).await? {
                info!(
                    "{} belongs to {} (candidate {})",
                    from_table,
                    to_table,
                    attempt + 1
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Resolve a caller-supplied table sequence into a path.
    ///
    /// Every consecutive pair must be joined by a direct edge and no table
    /// may repeat.
    pub fn explicit_path(&self, tables: &[&str]) -> Result<Path<'_>> {
        if tables.len() < 2 {
            return Err(SchemaGraphError::invalid_path(format!(
                "expected at least two tables, got {}",
                tables.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut indices = Vec::with_capacity(tables.len());
        for table in tables {
            let index = self.resolve(table)?;
            if !seen.insert(index) {
                return Err(SchemaGraphError::invalid_path(format!(
                    "table `{}` appears more than once",
                    table
                )));
            }
            indices.push(index);
        }

        let mut linkages = Vec::with_capacity(indices.len() - 1);
        for pair in indices.windows(2) {
            let linkage = self.adjacency.get(pair[0], pair[1]).ok_or_else(|| {
                SchemaGraphError::invalid_path(format!(
                    "no foreign key links `{}` to `{}`",
                    self.nodes[pair[0].get()].table_name(),
                    self.nodes[pair[1].get()].table_name()
                ))
            })?;
            linkages.push(linkage);
        }

        let nodes = indices.iter().map(|ix| &self.nodes[ix.get()]).collect();
        Ok(Path::new(nodes, linkages))
    }

    /// Belongs-to over a caller-chosen table sequence, skipping path search.
    ///
    /// `from_key` belongs to the first table, `to_key` to the last.
    pub async fn belongs_to_via<E>(
        &self,
        tables: &[&str],
        from_key: &str,
        to_key: &str,
        executor: &E,
    ) -> Result<bool>
    where
        E: QueryExecutor + ?Sized,
    {
        let path = self.explicit_path(tables)?;
        let compiled = compile_belongs_query(&path, &self.schema_name)?;
        debug!("Belongs-to via {}:\n{}", path, compiled.sql);
        self.run(&compiled, from_key, to_key, executor).await
    }

    async fn run<E>(
        &self,
        compiled: &CompiledQuery,
        from_key: &str,
        to_key: &str,
        executor: &E,
    ) -> Result<bool>
    where
        E: QueryExecutor + ?Sized,
    {
        let parameters = compiled.bind(from_key, to_key);
        let rows = executor
            .execute(&compiled.sql, &parameters)
            .await
            .map_err(|source| SchemaGraphError::Execution { source })?;

        Ok(BelongsRow::from_rows(&rows)?.belongs)
    }

    fn resolve(&self, table_name: &str) -> Result<NodeIndex> {
        find_index(&self.nodes, table_name)
            .ok_or_else(|| SchemaGraphError::unknown_table(table_name))
    }
}
