//! SchemaGraph - foreign-key join path inference for relational databases
//!
//! This crate answers "does record A belong to record B" by:
//! - Building a graph of tables and foreign/primary-key relationships from catalog metadata
//! - Searching that graph for simple join paths between two tables
//! - Compiling a path into a parameterized `COUNT(1) > 0` SQL statement
//! - Running the statement through an injected query executor
//!
//! Table, column and schema names are interpolated into SQL text as quoted
//! identifiers. They must come from the catalog or another trusted source.
//! Key values are always bound as positional parameters.

pub mod catalog;
pub mod config;
pub mod executor;
pub mod graph_catalog;
pub mod query_planner;
pub mod schema_graph;
pub mod sql_generator;

pub use catalog::{CatalogAdapter, CatalogRow, ExecutorCatalog, StaticCatalog};
pub use config::GraphConfig;
pub use executor::{BoxError, QueryExecutor};
pub use graph_catalog::errors::{Result, SchemaGraphError};
pub use graph_catalog::{Linkage, TableNode};
pub use query_planner::Path;
pub use schema_graph::SchemaGraph;
pub use sql_generator::{CompiledQuery, ParameterSlot};
