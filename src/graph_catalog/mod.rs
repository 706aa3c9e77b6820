pub(crate) mod adjacency;
pub mod errors;
pub(crate) mod graph_builder;
pub(crate) mod index_lookup;
pub mod table_node;

// Re-export commonly used types
pub use errors::{Result, SchemaGraphError};
pub use table_node::{Linkage, TableNode};
