// src/github/location.rs
// =============================================================================
// Turns a GitHub web URL into the pieces the contents API needs.
//
// Supported formats:
//   - https://github.com/owner/repo                 (root, branch "master")
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/branch
//   - https://github.com/owner/repo/tree/branch/some/dir
//   - https://github.com/owner/repo/blob/branch/some/file.md
//   - https://ghe.example.com/owner/repo/...        (GitHub Enterprise)
//
// This is a pure function: no network, no side effects.
//
// Rust concepts:
// - url::Url: a parsed URL we can ask for host and path segments
// - Iterators: path_segments() yields each piece between slashes
// =============================================================================

use url::Url;

use crate::error::{FetchError, Result};

/// Branch used when the URL does not name one.
pub const DEFAULT_BRANCH: &str = "master";

const PUBLIC_HOST: &str = "github.com";
const PUBLIC_API_ROOT: &str = "https://api.github.com/";

/// Where a source lives, in contents API terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// API root, always ending in a slash (e.g. https://api.github.com/)
    pub api_root: Url,
    pub owner: String,
    pub repo: String,
    /// Path inside the repository; empty means the repository root
    pub path: String,
    pub branch: String,
}

/// Parses a GitHub URL into its API root, owner, repo, path and branch.
///
/// Example:
///   "https://github.com/rust-lang/rust/tree/master/src/doc"
///     -> api https://api.github.com/, owner "rust-lang", repo "rust",
///        path "src/doc", branch "master"
pub fn parse_github_url(url: &str) -> Result<ResolvedLocation> {
    let malformed = || FetchError::MalformedSourceUrl(url.to_string());

    let parsed = Url::parse(url.trim()).map_err(|_| malformed())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(malformed());
    }
    let host = parsed.host_str().ok_or_else(malformed)?;

    // Empty segments come from trailing or doubled slashes
    let segments: Vec<&str> = parsed
        .path_segments()
        .ok_or_else(malformed)?
        .filter(|s| !s.is_empty())
        .collect();

    let (owner, repo, rest) = match segments.as_slice() {
        [owner, repo, rest @ ..] => (*owner, *repo, rest),
        _ => return Err(malformed()),
    };
    let repo = repo.trim_end_matches(".git");
    if repo.is_empty() {
        return Err(malformed());
    }

    // After owner/repo we either have nothing, or tree|blob/<branch>[/path...]
    let (branch, path) = match rest {
        [] => (DEFAULT_BRANCH.to_string(), String::new()),
        [kind, branch, path @ ..] if *kind == "tree" || *kind == "blob" => {
            (branch.to_string(), path.join("/"))
        }
        _ => return Err(malformed()),
    };

    Ok(ResolvedLocation {
        api_root: api_root_for(&parsed, host)?,
        owner: owner.to_string(),
        repo: repo.to_string(),
        path,
        branch,
    })
}

// github.com has a dedicated API host; Enterprise installs serve it under /api/v3/
fn api_root_for(parsed: &Url, host: &str) -> Result<Url> {
    // Only the public host has a www. alias; Enterprise hosts are used as-is
    let root = if host.trim_start_matches("www.") == PUBLIC_HOST {
        PUBLIC_API_ROOT.to_string()
    } else {
        match parsed.port() {
            Some(port) => format!("{}://{}:{}/api/v3/", parsed.scheme(), host, port),
            None => format!("{}://{}/api/v3/", parsed.scheme(), host),
        }
    };
    Url::parse(&root).map_err(|_| FetchError::MalformedSourceUrl(parsed.to_string()))
}
