use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SqlGenerationError {
    #[error("Path through `{table}` has no joins; a single-table path cannot be compiled")]
    TrivialPath { table: String },
}
