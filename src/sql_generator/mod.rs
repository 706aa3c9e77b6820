//! SQL generation for belongs-to tests
//!
//! Identifiers (schema, table and column names) and key values travel on two
//! separate paths: identifiers are quoted into the statement text by the
//! helpers in [`identifiers`], key values only ever appear as positional
//! placeholders and are bound by the executor.

pub mod belongs_query;
pub mod errors;
pub mod identifiers;

pub use belongs_query::{compile_belongs_query, CompiledQuery, ParameterSlot};
pub use errors::SqlGenerationError;

/// Render a SQL fragment.
pub trait ToSql {
    fn to_sql(&self) -> String;
}
