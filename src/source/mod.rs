// src/source/mod.rs
// =============================================================================
// Fetching a source: the request, the tree we build, and the recursive walk.
//
// Submodules:
// - types: SourceRequest, ContentNode (File | Dir), Source, reparenting
// - ids: pluggable id generation
// - fetch: the recursive fetch and the fetch_source entry point
// =============================================================================

mod fetch;
mod ids;
mod types;

pub use fetch::{fetch_source, fetch_source_tree};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use types::{reparent, ContentNode, DirNode, FileNode, Source, SourceRequest};
