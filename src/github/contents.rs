// src/github/contents.rs
// =============================================================================
// The shapes the GitHub contents API answers with, and how we address it.
//
// GET {api}/repos/{owner}/{repo}/contents[/{path}]?ref={branch} returns either:
//   - a JSON array: the directory listing at that path
//   - a JSON object with "type": a single file (or a symlink, submodule...)
//
// Rust concepts:
// - #[serde(untagged)]: serde tries each variant until one fits the JSON
// - url::Url::path_segments_mut: appends path pieces with proper escaping
// =============================================================================

use serde::Deserialize;
use url::Url;

use super::location::ResolvedLocation;
use crate::error::{FetchError, Result};

/// Media type asking GitHub for its structured JSON representation.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// The `type` value GitHub uses for regular files.
pub const FILE_TYPE: &str = "file";

/// One decoded response from the contents endpoint.
///
/// The array-vs-object decision is made here, once, from the wire shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    /// The path is a directory; one entry per child, in listing order
    Listing(Vec<ListingEntry>),
    /// The path is a single object; check `kind` before trusting it is a file
    Object(ContentObject),
}

/// A child as it appears in a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    /// Full path from the repository root, used to fetch the child
    pub path: String,
}

/// A single contents object.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Raw payload (base64 for files); absent for some object types
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentsResponse {
    /// Decodes a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Builds the contents endpoint for `path` in the resolved repository.
///
/// An empty path addresses the repository root (no trailing empty segment).
pub fn contents_endpoint(location: &ResolvedLocation, path: &str) -> Result<Url> {
    let mut endpoint = location.api_root.clone();
    {
        let mut segments = endpoint
            .path_segments_mut()
            .map_err(|_| FetchError::MalformedSourceUrl(location.api_root.to_string()))?;
        // Drop the empty segment left by the trailing slash on the API root
        segments.pop_if_empty();
        segments.extend([
            "repos",
            location.owner.as_str(),
            location.repo.as_str(),
            "contents",
        ]);
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
    }
    endpoint
        .query_pairs_mut()
        .append_pair("ref", &location.branch);
    Ok(endpoint)
}
