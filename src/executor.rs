//! Query executor port
//!
//! The crate never opens database connections. Compiled statements and the
//! catalog query are handed to a `QueryExecutor` supplied by the caller, which
//! owns transport and cancellation.

use async_trait::async_trait;
use serde_json::Value;

use crate::graph_catalog::errors::{Result, SchemaGraphError};

/// Boxed error returned by external collaborators (executor, catalog adapter).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Runs one SQL statement with positional parameters (`$1`, `$2`, ...).
///
/// Rows come back as JSON objects keyed by column name.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(
        &self,
        statement: &str,
        parameters: &[String],
    ) -> std::result::Result<Vec<Value>, BoxError>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn execute(
        &self,
        statement: &str,
        parameters: &[String],
    ) -> std::result::Result<Vec<Value>, BoxError> {
        (**self).execute(statement, parameters).await
    }
}

/// The single-row result of a compiled belongs-to statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BelongsRow {
    pub belongs: bool,
}

impl BelongsRow {
    pub const COLUMN: &'static str = "belongs";

    /// Read the `belongs` flag from the first result row.
    ///
    /// An empty result set means "not found" rather than an error.
    pub fn from_rows(rows: &[Value]) -> Result<Self> {
        let Some(row) = rows.first() else {
            return Ok(Self { belongs: false });
        };

        let object = row.as_object().ok_or_else(|| SchemaGraphError::MalformedResult {
            message: format!("expected a row object, got `{}`", row),
        })?;

        let value = object
            .get(Self::COLUMN)
            .ok_or_else(|| SchemaGraphError::MalformedResult {
                message: format!("row has no `{}` column", Self::COLUMN),
            })?;

        let belongs = truthy(value).ok_or_else(|| SchemaGraphError::MalformedResult {
            message: format!("`{}` is not boolean-like: `{}`", Self::COLUMN, value),
        })?;

        Ok(Self { belongs })
    }
}

/// Drivers disagree on how booleans come back (`true`, `1`, `"t"`).
fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "t" | "true" | "1" | "y" | "yes" => Some(true),
            "f" | "false" | "0" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
