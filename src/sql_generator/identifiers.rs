//! PostgreSQL identifier quoting
//!
//! Every identifier is double-quoted so mixed-case and reserved-word names
//! survive. An embedded `"` is doubled, which is standard quoting and leaves
//! the identifier itself unchanged. Names are otherwise taken verbatim: they
//! must come from the catalog or another trusted source.

/// `orders` -> `"orders"`, `Order"Items` -> `"Order""Items"`
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"schema"."table"`
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(table))
}

/// `"schema"."table"."column"`
pub fn qualified_column(schema: &str, table: &str, column: &str) -> String {
    format!("{}.{}", qualified_table(schema, table), quote_identifier(column))
}

/// `"table"."column"`, resolved against a table named in FROM/JOIN.
pub fn table_column(table: &str, column: &str) -> String {
    format!("{}.{}", quote_identifier(table), quote_identifier(column))
}
