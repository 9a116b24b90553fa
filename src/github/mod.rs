// src/github/mod.rs
// =============================================================================
// Everything GitHub-specific lives here.
//
// Submodules:
// - location: parse a GitHub web URL into owner/repo/path/branch
// - contents: wire shapes of the contents API and endpoint building
// - client: the ContentsApi trait and its reqwest implementation
// =============================================================================

mod client;
mod contents;
mod location;

pub use client::{ClientConfig, ContentsApi, GithubClient};
pub use contents::{
    contents_endpoint, ContentObject, ContentsResponse, ListingEntry, FILE_TYPE,
    GITHUB_MEDIA_TYPE,
};
pub use location::{parse_github_url, ResolvedLocation, DEFAULT_BRANCH};
