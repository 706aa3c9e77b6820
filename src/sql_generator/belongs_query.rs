//! Compiles a join path into a belongs-to statement:
//!
//! ```text
//! SELECT COUNT(1) > 0 as belongs
//! FROM "s"."A"
//! JOIN "s"."B" ON "s"."A"."a_fk" = "s"."B"."b_pk"
//! JOIN "s"."C" ON "s"."B"."b_fk" = "s"."C"."c_pk"
//! WHERE "A"."a_pk" = $1 AND "C"."c_pk" = $2
//! ```
//!
//! Output is a pure function of the path and schema name.

use super::errors::SqlGenerationError;
use super::identifiers::{qualified_column, qualified_table, table_column};
use super::ToSql;
use crate::executor::BelongsRow;
use crate::query_planner::Path;

/// Which key value a positional placeholder expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSlot {
    /// Primary key of the first table on the path.
    FromKey,
    /// Primary key of the last table on the path.
    ToKey,
}

/// Statement text plus the order in which key values must be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub parameters: Vec<ParameterSlot>,
}

impl CompiledQuery {
    /// Parameter values in placeholder order (`$1`, `$2`, ...).
    pub fn bind(&self, from_key: &str, to_key: &str) -> Vec<String> {
        self.parameters
            .iter()
            .map(|slot| match slot {
                ParameterSlot::FromKey => from_key.to_string(),
                ParameterSlot::ToKey => to_key.to_string(),
            })
            .collect()
    }
}

struct Join<'a> {
    schema: &'a str,
    from_table: &'a str,
    from_column: &'a str,
    to_table: &'a str,
    to_column: &'a str,
}

impl ToSql for Join<'_> {
    fn to_sql(&self) -> String {
        format!(
            "JOIN {} ON {} = {}",
            qualified_table(self.schema, self.to_table),
            qualified_column(self.schema, self.from_table, self.from_column),
            qualified_column(self.schema, self.to_table, self.to_column),
        )
    }
}

/// Equality of a table's key column with a placeholder.
struct KeyFilter<'a> {
    table: &'a str,
    column: &'a str,
    position: usize,
}

impl ToSql for KeyFilter<'_> {
    fn to_sql(&self) -> String {
        format!("{} = ${}", table_column(self.table, self.column), self.position)
    }
}

pub fn compile_belongs_query(
    path: &Path<'_>,
    schema: &str,
) -> Result<CompiledQuery, SqlGenerationError> {
    if path.is_trivial() {
        return Err(SqlGenerationError::TrivialPath {
            table: path.start().table_name().to_string(),
        });
    }

    let (start, end) = (path.start(), path.end());
    let parameters = vec![ParameterSlot::FromKey, ParameterSlot::ToKey];

    let mut lines = Vec::with_capacity(path.len() + 2);
    lines.push(format!("SELECT COUNT(1) > 0 as {}", BelongsRow::COLUMN));
    lines.push(format!("FROM {}", qualified_table(schema, start.table_name())));

    for (from, linkage, to) in path.hops() {
        let join = Join {
            schema,
            from_table: from.table_name(),
            from_column: linkage.from_column(),
            to_table: to.table_name(),
            to_column: linkage.to_column(),
        };
        lines.push(join.to_sql());
    }

    let filters: Vec<String> = parameters
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let node = match slot {
                ParameterSlot::FromKey => start,
                ParameterSlot::ToKey => end,
            };
            KeyFilter {
                table: node.table_name(),
                column: node.primary_key_column(),
                position: i + 1,
            }
            .to_sql()
        })
        .collect();
    lines.push(format!("WHERE {}", filters.join(" AND ")));

    Ok(CompiledQuery {
        sql: lines.join("\n"),
        parameters,
    })
}
