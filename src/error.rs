// src/error.rs
// =============================================================================
// Errors that can end a fetch.
//
// Every variant is terminal: nothing in this crate retries. If any single
// file or directory request fails, the whole fetch fails and no partial
// graph is returned.
//
// Rust concepts:
// - thiserror: derive Display and Error for an enum
// - #[from]: automatic conversion so `?` works on reqwest errors
// =============================================================================

use thiserror::Error;

/// Everything that can go wrong while resolving, fetching or decoding a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL does not look like a GitHub repository location.
    #[error("malformed source URL: {0}")]
    MalformedSourceUrl(String),

    /// GitHub answered with something other than 200 OK.
    #[error("expected HTTP 200 from {url}, received {status}")]
    UpstreamFetch { status: u16, url: String },

    /// The contents API returned an object whose `type` is not `file`
    /// (for example `symlink` or `submodule`).
    #[error("contents type not supported: '{0}'")]
    UnsupportedContentType(String),

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not a directory listing or a contents object.
    #[error("could not decode contents response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status for upstream failures, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::UpstreamFetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
