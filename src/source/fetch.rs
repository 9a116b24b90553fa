// src/source/fetch.rs
// =============================================================================
// Fetches a whole subtree from GitHub and normalizes it.
//
// How it works:
// 1. Parse the source URL into owner/repo/path/branch
// 2. Ask the contents API for the requested path
// 3. A listing means a directory: fetch every child at the same time, then
//    put them back in listing order
// 4. An object of type "file" is a leaf; any other type is an error
// 5. Reparent the root (a root directory disappears, a root file is wrapped)
// 6. Normalize into flat tables
//
// One request per node, siblings in parallel, so the wall-clock time grows
// with tree depth rather than with the number of files.
//
// Rust concepts:
// - BoxFuture: async fns can't call themselves directly, so the recursive
//   step returns a boxed future
// - try_join_all: run futures concurrently, keep their order, stop at the
//   first error
// - Borrowing: every child fetch borrows the same Walk, nothing is shared
//   mutably between them
// =============================================================================

use futures::future::{try_join_all, BoxFuture, FutureExt};
use tracing::{debug, info};

use super::ids::IdGenerator;
use super::types::{reparent, ContentNode, DirNode, FileNode, Source, SourceRequest};
use crate::error::{FetchError, Result};
use crate::github::{parse_github_url, ContentsApi, ContentsResponse, ResolvedLocation, FILE_TYPE};
use crate::normalize::{normalize, NormalizedGraph};

/// Fetches the tree behind `request.url` and returns it normalized.
///
/// Any failure anywhere in the tree fails the whole call; there is no
/// partial result.
pub async fn fetch_source(
    api: &dyn ContentsApi,
    ids: &dyn IdGenerator,
    request: SourceRequest,
) -> Result<NormalizedGraph> {
    let source = fetch_source_tree(api, ids, request).await?;
    let graph = normalize(vec![source]);

    info!(
        files = graph.entities.files.len(),
        dirs = graph.entities.dirs.len(),
        "fetched source"
    );
    Ok(graph)
}

/// Fetches the tree behind `request.url` without normalizing it.
pub async fn fetch_source_tree(
    api: &dyn ContentsApi,
    ids: &dyn IdGenerator,
    request: SourceRequest,
) -> Result<Source> {
    // Bad URLs fail here, before any request goes out
    let location = parse_github_url(&request.url)?;
    debug!(
        owner = %location.owner,
        repo = %location.repo,
        path = %location.path,
        branch = %location.branch,
        "resolved source url"
    );

    // Every recursive step borrows this; nothing in it is mutated
    let walk = Walk {
        api,
        ids,
        location: &location,
        access_token: &request.access_token,
    };
    // The root is named after the path; reparenting throws that name away
    let root = walk
        .fetch_node(location.path.clone(), location.path.clone())
        .await?;

    // Keep the caller's id if there is one
    let id = match &request.id {
        Some(id) => id.clone(),
        None => ids.next_id().to_string(),
    };
    Ok(Source {
        id,
        content: reparent(root),
        request,
    })
}

// Everything a recursive step needs, borrowed for the length of the fetch
struct Walk<'a> {
    api: &'a dyn ContentsApi,
    ids: &'a dyn IdGenerator,
    location: &'a ResolvedLocation,
    access_token: &'a str,
}

impl<'a> Walk<'a> {
    // Fetches one node and, for directories, everything below it
    //
    // Parameters:
    //   name: what the parent's listing called this node
    //   path: full path from the repository root, used for the request
    //
    // Returns a boxed future because the function calls itself
    fn fetch_node(&'a self, name: String, path: String) -> BoxFuture<'a, Result<ContentNode>> {
        async move {
            // One request per node; a non-200 comes back as an error here
            let response = self
                .api
                .get_contents(self.location, &path, self.access_token)
                .await?;

            match response {
                ContentsResponse::Listing(entries) => {
                    // Parent gets its id before its children
                    let id = self.ids.next_id();
                    debug!(path = %path, entries = entries.len(), "directory");
                    // Start every child fetch at once. try_join_all keeps the
                    // listing order and returns early on the first failure,
                    // dropping the siblings that are still running
                    let content = try_join_all(
                        entries
                            .into_iter()
                            .map(|entry| self.fetch_node(entry.name, entry.path)),
                    )
                    .await?;
                    Ok(ContentNode::Dir(DirNode { id, name, content }))
                }
                // A file is a leaf: keep its payload as-is, no decoding
                ContentsResponse::Object(object) if object.kind == FILE_TYPE => {
                    debug!(path = %path, "file");
                    Ok(ContentNode::File(FileNode {
                        id: self.ids.next_id(),
                        name: object.name,
                        content: object.content.unwrap_or_default(),
                    }))
                }
                // Symlinks, submodules and anything else we don't model
                ContentsResponse::Object(object) => {
                    Err(FetchError::UnsupportedContentType(object.kind))
                }
            }
        }
        .boxed()
    }
}
