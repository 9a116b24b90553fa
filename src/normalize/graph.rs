// src/normalize/graph.rs
// =============================================================================
// Folds fetched sources into flat tables keyed by id.
//
// Input:  a list of Sources, each holding a nested tree of files and dirs
// Output: NormalizedGraph
//   - result:            source ids, in input order
//   - entities.sources:  source id -> source, children as {type, id} refs
//   - entities.files:    file id   -> file
//   - entities.dirs:     dir id    -> dir, children as {type, id} refs
//
// After the fold no entity owns another one; structure is only ids.
//
// Rust concepts:
// - BTreeMap: sorted map, so JSON output is stable between runs
// - Moving values: nodes are moved into the tables, nothing is cloned
// - Recursion: a dir normalizes its children before inserting itself
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::source::{ContentNode, FileNode, Source};

/// Which table an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Files,
    Dirs,
}

impl EntityKind {
    /// Files hold a string payload, dirs hold a list of children.
    pub fn of(node: &ContentNode) -> Self {
        match node {
            ContentNode::File(_) => EntityKind::Files,
            ContentNode::Dir(_) => EntityKind::Dirs,
        }
    }
}

/// Points at an entity in one of the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: Uuid,
}

/// A directory with its children replaced by references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntity {
    pub id: Uuid,
    pub name: String,
    pub content: Vec<EntityRef>,
}

/// A source with its children replaced by references.
///
/// Carries every field of the request, access token included. Computed
/// fields win over caller fields with the same name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntity {
    pub id: String,
    pub url: String,
    pub access_token: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub content: Vec<EntityRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entities {
    pub sources: BTreeMap<String, SourceEntity>,
    pub files: BTreeMap<Uuid, FileNode>,
    pub dirs: BTreeMap<Uuid, DirEntity>,
}

/// The flattened result of one fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedGraph {
    pub result: Vec<String>,
    pub entities: Entities,
}

impl NormalizedGraph {
    pub fn source(&self, id: &str) -> Option<&SourceEntity> {
        self.entities.sources.get(id)
    }

    pub fn file(&self, id: &Uuid) -> Option<&FileNode> {
        self.entities.files.get(id)
    }

    pub fn dir(&self, id: &Uuid) -> Option<&DirEntity> {
        self.entities.dirs.get(id)
    }

    /// Name of whatever `reference` points at, if it is in the graph.
    pub fn name_of(&self, reference: &EntityRef) -> Option<&str> {
        match reference.kind {
            EntityKind::Files => self.file(&reference.id).map(|f| f.name.as_str()),
            EntityKind::Dirs => self.dir(&reference.id).map(|d| d.name.as_str()),
        }
    }
}

// Keys SourceEntity writes itself
const RESERVED_SOURCE_KEYS: &[&str] = &["id", "url", "accessToken", "name", "content"];

/// Flattens `sources` into a NormalizedGraph.
///
/// This is a one-way fold: the output cannot be fed back in.
pub fn normalize(sources: Vec<Source>) -> NormalizedGraph {
    let mut graph = NormalizedGraph::default();

    for source in sources {
        let content = source
            .content
            .into_iter()
            .map(|node| normalize_node(node, &mut graph.entities))
            .collect();

        // Caller fields can't shadow the ones we set, so each key appears once
        let mut extra = source.request.extra;
        for key in RESERVED_SOURCE_KEYS {
            extra.remove(*key);
        }

        graph.result.push(source.id.clone());
        graph.entities.sources.insert(
            source.id.clone(),
            SourceEntity {
                id: source.id,
                url: source.request.url,
                access_token: source.request.access_token,
                name: source.request.name,
                extra,
                content,
            },
        );
    }

    graph
}

fn normalize_node(node: ContentNode, entities: &mut Entities) -> EntityRef {
    let reference = EntityRef {
        kind: EntityKind::of(&node),
        id: node.id(),
    };

    match node {
        ContentNode::File(file) => {
            entities.files.insert(file.id, file);
        }
        ContentNode::Dir(dir) => {
            let content = dir
                .content
                .into_iter()
                .map(|child| normalize_node(child, entities))
                .collect();
            entities.dirs.insert(
                dir.id,
                DirEntity {
                    id: dir.id,
                    name: dir.name,
                    content,
                },
            );
        }
    }

    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DirNode, SourceRequest};

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn file(n: u128, name: &str) -> ContentNode {
        ContentNode::File(FileNode {
            id: id(n),
            name: name.to_string(),
            content: format!("payload-{}", n),
        })
    }

    fn dir(n: u128, name: &str, content: Vec<ContentNode>) -> ContentNode {
        ContentNode::Dir(DirNode {
            id: id(n),
            name: name.to_string(),
            content,
        })
    }

    fn source(content: Vec<ContentNode>) -> Source {
        Source {
            id: "src-1".to_string(),
            request: SourceRequest::new("https://github.com/o/r", "token", "docs"),
            content,
        }
    }

    #[test]
    fn test_dir_with_two_files() {
        let graph = normalize(vec![source(vec![dir(
            1,
            "guide",
            vec![file(2, "a.md"), file(3, "b.md")],
        )])]);

        assert_eq!(graph.entities.dirs.len(), 1);
        assert_eq!(graph.entities.files.len(), 2);

        let guide = graph.dir(&id(1)).unwrap();
        assert_eq!(
            guide.content,
            vec![
                EntityRef { kind: EntityKind::Files, id: id(2) },
                EntityRef { kind: EntityKind::Files, id: id(3) },
            ]
        );
        for file_id in graph.entities.files.keys() {
            assert!(!graph.entities.dirs.contains_key(file_id));
        }
    }

    #[test]
    fn test_empty_dir() {
        let graph = normalize(vec![source(vec![dir(1, "empty", vec![])])]);
        assert!(graph.dir(&id(1)).unwrap().content.is_empty());
        assert!(graph.entities.files.is_empty());
    }

    #[test]
    fn test_listing_order_is_kept() {
        let graph = normalize(vec![source(vec![dir(
            1,
            "d",
            vec![file(2, "b"), file(3, "a")],
        )])]);
        let names: Vec<_> = graph
            .dir(&id(1))
            .unwrap()
            .content
            .iter()
            .map(|r| graph.name_of(r).unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_nested_dirs_and_source_table() {
        let graph = normalize(vec![source(vec![
            file(1, "README.md"),
            dir(2, "src", vec![dir(3, "bin", vec![file(4, "main.rs")])]),
        ])]);

        assert_eq!(graph.result, vec!["src-1".to_string()]);
        let src = graph.source("src-1").unwrap();
        assert_eq!(src.name, "docs");
        assert_eq!(
            src.content,
            vec![
                EntityRef { kind: EntityKind::Files, id: id(1) },
                EntityRef { kind: EntityKind::Dirs, id: id(2) },
            ]
        );
        assert_eq!(
            graph.dir(&id(2)).unwrap().content,
            vec![EntityRef { kind: EntityKind::Dirs, id: id(3) }]
        );
        assert_eq!(graph.file(&id(4)).unwrap().content, "payload-4");
    }

    #[test]
    fn test_json_shape() {
        let graph = normalize(vec![source(vec![dir(1, "d", vec![file(2, "f")])])]);
        let value = serde_json::to_value(&graph).unwrap();

        assert_eq!(value["result"][0], "src-1");
        let dir_key = id(1).to_string();
        assert_eq!(value["entities"]["dirs"][&dir_key]["content"][0]["type"], "files");
        assert_eq!(value["entities"]["sources"]["src-1"]["accessToken"], "token");
    }

    #[test]
    fn test_source_carries_request_fields() {
        let json = r#"{"id": "s1", "url": "https://github.com/o/r", "accessToken": "tok",
                       "name": "n", "content": "caller", "color": "blue"}"#;
        let request: SourceRequest = serde_json::from_str(json).unwrap();
        let graph = normalize(vec![Source {
            id: "s1".to_string(),
            request,
            content: vec![file(1, "a.md")],
        }]);

        let src = graph.source("s1").unwrap();
        assert_eq!(src.access_token, "tok");
        assert!(!src.extra.contains_key("content"));
        assert_eq!(src.extra["color"], "blue");

        let text = serde_json::to_string(&graph).unwrap();
        assert_eq!(text.matches("\"content\":\"caller\"").count(), 0);

        let value: Value = serde_json::from_str(&text).unwrap();
        let out = &value["entities"]["sources"]["s1"];
        assert_eq!(out["accessToken"], "tok");
        assert_eq!(out["content"][0]["type"], "files");
        assert_eq!(out["color"], "blue");
    }
}
