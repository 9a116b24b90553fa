// src/lib.rs
// =============================================================================
// Library surface: resolve a GitHub URL, fetch the tree behind it, and
// flatten it into a NormalizedGraph.
//
// Typical use:
//   let client = GithubClient::new(ClientConfig::default());
//   let graph = fetch_source(&client, &RandomIds, request).await?;
// =============================================================================

pub mod error;
pub mod github;
pub mod normalize;
pub mod source;

pub use error::FetchError;
pub use github::{parse_github_url, ClientConfig, ContentsApi, GithubClient, ResolvedLocation};
pub use normalize::{normalize, EntityKind, EntityRef, NormalizedGraph};
pub use source::{fetch_source, fetch_source_tree, IdGenerator, RandomIds, SourceRequest};
