//! Catalog adapters
//!
//! A catalog adapter lists the primary- and foreign-key constraints of the
//! base tables in one schema. The graph builder treats its output as
//! authoritative: filtering out views and foreign schemas is the adapter's job.
//!
//! Two adapters ship with the crate:
//! - [`ExecutorCatalog`] runs [`CONSTRAINTS_QUERY`] (PostgreSQL `information_schema`)
//!   through any [`QueryExecutor`]
//! - [`StaticCatalog`] serves a fixed snapshot, e.g. loaded from JSON

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::executor::{BoxError, QueryExecutor};

/// One constraint row, tagged by `key_type`.
///
/// Field names follow the column names of [`CONSTRAINTS_QUERY`] so rows can be
/// deserialized straight from executor output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key_type")]
pub enum CatalogRow {
    #[serde(rename = "primary")]
    PrimaryKey {
        #[serde(rename = "table_name")]
        table: String,
        #[serde(rename = "column_name")]
        column: String,
    },
    #[serde(rename = "foreign")]
    ForeignKey {
        #[serde(rename = "table_name")]
        table: String,
        #[serde(rename = "column_name")]
        column: String,
        #[serde(rename = "foreign_table_name")]
        referenced_table: String,
        #[serde(rename = "foreign_column_name")]
        referenced_column: String,
    },
}

impl CatalogRow {
    pub fn primary_key(table: impl Into<String>, column: impl Into<String>) -> Self {
        CatalogRow::PrimaryKey {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn foreign_key(
        table: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        CatalogRow::ForeignKey {
            table: table.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }

    pub fn table(&self) -> &str {
        match self {
            CatalogRow::PrimaryKey { table, .. } | CatalogRow::ForeignKey { table, .. } => table,
        }
    }
}

#[async_trait]
pub trait CatalogAdapter: Send + Sync {
    /// Primary- and foreign-key rows for the base tables of `schema_name`.
    async fn list_constraints(&self, schema_name: &str) -> Result<Vec<CatalogRow>, BoxError>;
}

/// Primary and foreign keys of the base tables in schema `$1`.
///
/// Rows: `key_type` (`primary` | `foreign`), `table_name`, `column_name`,
/// `foreign_table_name`, `foreign_column_name` (NULL for primary keys).
pub const CONSTRAINTS_QUERY: &str = r#"WITH base_tables AS (
  SELECT table_name
  FROM information_schema.tables
  WHERE table_schema = $1
    AND table_type = 'BASE TABLE'
),
primary_keys AS (
  SELECT
    'primary' AS key_type,
    tc.table_name,
    kcu.column_name,
    NULL AS foreign_table_name,
    NULL AS foreign_column_name
  FROM information_schema.table_constraints AS tc
  JOIN information_schema.key_column_usage AS kcu
    ON tc.constraint_name = kcu.constraint_name
   AND tc.table_schema = kcu.table_schema
  WHERE tc.constraint_type = 'PRIMARY KEY'
    AND tc.table_schema = $1
),
foreign_keys AS (
  SELECT
    'foreign' AS key_type,
    tc.table_name,
    kcu.column_name,
    ccu.table_name AS foreign_table_name,
    ccu.column_name AS foreign_column_name
  FROM information_schema.table_constraints AS tc
  JOIN information_schema.key_column_usage AS kcu
    ON tc.constraint_name = kcu.constraint_name
   AND tc.table_schema = kcu.table_schema
  JOIN information_schema.constraint_column_usage AS ccu
    ON ccu.constraint_name = tc.constraint_name
   AND ccu.table_schema = tc.table_schema
  WHERE tc.constraint_type = 'FOREIGN KEY'
    AND tc.table_schema = $1
)
SELECT pk.*
FROM primary_keys pk
JOIN base_tables bt
  ON pk.table_name = bt.table_name
UNION ALL
SELECT fk.*
FROM foreign_keys fk
JOIN base_tables bt
  ON fk.table_name = bt.table_name"#;

/// Reads constraints by running [`CONSTRAINTS_QUERY`] through an executor.
pub struct ExecutorCatalog<E> {
    executor: E,
}

impl<E: QueryExecutor> ExecutorCatalog<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn into_inner(self) -> E {
        self.executor
    }
}

#[async_trait]
impl<E: QueryExecutor> CatalogAdapter for ExecutorCatalog<E> {
    async fn list_constraints(&self, schema_name: &str) -> Result<Vec<CatalogRow>, BoxError> {
        let rows = self
            .executor
            .execute(CONSTRAINTS_QUERY, &[schema_name.to_string()])
            .await?;

        debug!(
            "Catalog query returned {} constraint rows for schema {}",
            rows.len(),
            schema_name
        );

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(BoxError::from))
            .collect()
    }
}

/// A fixed constraint snapshot. The schema name passed to
/// [`CatalogAdapter::list_constraints`] is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    rows: Vec<CatalogRow>,
}

impl StaticCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    /// Parse a JSON array of constraint rows.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }
}

#[async_trait]
impl CatalogAdapter for StaticCatalog {
    async fn list_constraints(&self, _schema_name: &str) -> Result<Vec<CatalogRow>, BoxError> {
        Ok(self.rows.clone())
    }
}
