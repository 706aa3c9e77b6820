//! # Schema Graph Error Types
//!
//! Error handling for graph construction, table lookup, explicit path
//! validation and belongs-to evaluation.
//!
//! ## Error Categories
//!
//! - **Catalog Errors**: ambiguous primary keys, foreign keys pointing outside the node set
//! - **Lookup Errors**: table names absent from the built graph, malformed explicit paths
//! - **Collaborator Errors**: failures raised by the catalog adapter or query executor,
//!   carried unchanged as the error `source`
//!
//! Catalog and lookup errors indicate bad catalog data or programmer error and
//! are never retried. "No path between two tables" is not an error.

use thiserror::Error;

use crate::executor::BoxError;
use crate::sql_generator::errors::SqlGenerationError;

#[derive(Debug, Error)]
pub enum SchemaGraphError {
    #[error("Duplicate primary key rows for table `{table}`")]
    DuplicateTable { table: String },

    #[error("Could not resolve foreign key linkage between `{from_table}` and `{to_table}`: table is not a base table of the schema")]
    UnresolvedReference { from_table: String, to_table: String },

    #[error("Unknown table `{table}`")]
    UnknownTable { table: String },

    #[error("Invalid join path: {message}")]
    InvalidPath { message: String },

    #[error("Failed to list constraints for schema `{schema}`: {source}")]
    Catalog { schema: String, source: BoxError },

    #[error("Query execution failed: {source}")]
    Execution { source: BoxError },

    #[error("Malformed belongs-to result: {message}")]
    MalformedResult { message: String },

    #[error(transparent)]
    SqlGeneration(#[from] SqlGenerationError),
}

pub type Result<T> = std::result::Result<T, SchemaGraphError>;

impl SchemaGraphError {
    pub fn unknown_table(table: impl Into<String>) -> Self {
        SchemaGraphError::UnknownTable {
            table: table.into(),
        }
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        SchemaGraphError::InvalidPath {
            message: message.into(),
        }
    }
}
