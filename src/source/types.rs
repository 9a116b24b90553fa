// src/source/types.rs
// =============================================================================
// The nested tree we build while fetching, before it gets normalized.
//
// A node is either a File (content is a string) or a Dir (content is a list
// of nodes). That choice is made once, when the API response is decoded, and
// the enum variant carries it from then on.
//
// Rust concepts:
// - Enums with data: File and Dir hold different payloads
// - #[serde(untagged)]: a node serializes as its inner struct, so a file's
//   "content" is a string and a dir's "content" is an array
// - #[serde(flatten)]: keep unknown caller fields alongside known ones
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// What the caller asks us to fetch.
///
/// Any extra fields the caller sends are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRequest {
    /// Caller-chosen id for the source; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    /// Never written back out
    #[serde(default, skip_serializing)]
    pub access_token: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceRequest {
    pub fn new(
        url: impl Into<String>,
        access_token: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            url: url.into(),
            access_token: access_token.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A single file and its raw payload (base64 as GitHub sends it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub id: Uuid,
    pub name: String,
    pub content: String,
}

/// A directory and its children, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirNode {
    pub id: Uuid,
    pub name: String,
    pub content: Vec<ContentNode>,
}

/// One node of a fetched tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentNode {
    File(FileNode),
    Dir(DirNode),
}

impl ContentNode {
    pub fn id(&self) -> Uuid {
        match self {
            ContentNode::File(file) => file.id,
            ContentNode::Dir(dir) => dir.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ContentNode::File(file) => &file.name,
            ContentNode::Dir(dir) => &dir.name,
        }
    }
}

/// The root of one fetch: the caller's request plus whatever was found at
/// the requested path, already reparented.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: String,
    pub request: SourceRequest,
    pub content: Vec<ContentNode>,
}

/// Promotes the children of a root directory to be the source's children.
///
/// A directory root disappears (only its children survive); a file root
/// becomes a one-element list.
pub fn reparent(root: ContentNode) -> Vec<ContentNode> {
    match root {
        ContentNode::Dir(dir) => dir.content,
        file @ ContentNode::File(_) => vec![file],
    }
}
