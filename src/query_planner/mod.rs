//! Join path planning over a built schema graph.

pub mod path;
pub(crate) mod path_search;

pub use path::Path;
