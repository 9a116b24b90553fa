// src/normalize/mod.rs
// =============================================================================
// Turns a fetched tree into flat, id-keyed tables.
//
// The file/dir decision is read straight off the ContentNode variant, the
// same one the fetcher picked when it decoded the response, so the two can
// never disagree.
// =============================================================================

mod graph;

pub use graph::{
    normalize, DirEntity, Entities, EntityKind, EntityRef, NormalizedGraph, SourceEntity,
};
