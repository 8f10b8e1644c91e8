//! Loading and merging YAML/JSON source files.

use doctree::{doc, flatten, AutoMap, Document, Error, Node, Result};
use std::io::Write;
use std::path::PathBuf;
use tempfile::Builder;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp file");
    file
}

#[test]
fn from_file_reads_yaml() {
    let file = write_temp(".yml", "this: that\nlist: [1, 2, 3]\n");
    let node = Node::from_file(file.path()).unwrap();
    assert_eq!(node.dump(), flatten(&doc!({"this": "that", "list": [1, 2, 3]})));
}

#[test]
fn from_file_reads_json() {
    let file = write_temp(".json", r#"{"this": "that", "list": [1, 2, 3]}"#);
    let node = Node::from_file(file.path()).unwrap();
    assert_eq!(node.dump(), flatten(&doc!({"this": "that", "list": [1, 2, 3]})));
}

#[test]
fn from_file_rejects_unknown_extension() {
    let file = write_temp(".toml", "this = 'that'\n");
    let err = Node::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn from_file_propagates_parse_errors() {
    let file = write_temp(".json", "{not json");
    assert!(matches!(
        Node::from_file(file.path()).unwrap_err(),
        Error::Json(_)
    ));

    let file = write_temp(".yaml", "key: [unclosed");
    assert!(matches!(
        Node::from_file(file.path()).unwrap_err(),
        Error::Yaml(_)
    ));
}

#[test]
fn from_file_reports_missing_file() {
    let err = Node::from_file("definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn merge_file_replaces_top_level_keys_only() {
    let mut node = Node::from_mapping(doc!({
        "keep": 1,
        "this": "old",
        "nested": {"a": 1, "b": 2}
    }))
    .unwrap();

    let file = write_temp(".yaml", "this: that\nnested:\n  a: 99\n");
    node.merge_file(file.path()).unwrap();

    // shallow merge: "nested" was fully replaced, not deep-merged
    assert_eq!(
        node.dump(),
        flatten(&doc!({"keep": 1, "this": "that", "nested": {"a": 99}}))
    );
}

#[test]
fn merge_file_checks_extension_before_touching_state() {
    let mut node = Node::from_mapping(doc!({"keep": 1})).unwrap();
    let file = write_temp(".ini", "this=that\n");
    let err = node.merge_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert_eq!(node.dump(), flatten(&doc!({"keep": 1})));
}

#[test]
fn merge_file_requires_mapping_root() {
    let mut node = Node::new();
    node.set_root(doc!([1, 2, 3]));
    let file = write_temp(".yaml", "this: that\n");
    let err = node.merge_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::NotAMapping(_)));
}

#[test]
fn merge_file_rejects_non_mapping_document() {
    let mut node = Node::new();
    let file = write_temp(".yaml", "- just\n- a\n- list\n");
    let err = node.merge_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::NotAMapping(_)));
}

/// A document type that fills its root from a skeleton file during
/// declaration, the incremental-construction pattern used for file-backed
/// documents.
struct Skeleton {
    path: PathBuf,
}

impl Document for Skeleton {
    fn declare(&self, node: &mut Node) -> Result<()> {
        node.merge_file(&self.path)
    }
}

#[test]
fn skeleton_yaml_populates_root() {
    let file = write_temp(".yml", "this: that\nlist: [1, 2, 3]\n");
    let skeleton = Skeleton {
        path: file.path().to_path_buf(),
    };
    let node = Node::construct(&skeleton, AutoMap::new()).unwrap();
    assert_eq!(node.dump(), flatten(&doc!({"this": "that", "list": [1, 2, 3]})));
}

#[test]
fn skeleton_json_populates_root() {
    let file = write_temp(".json", r#"{"this": "that", "list": [1, 2, 3]}"#);
    let skeleton = Skeleton {
        path: file.path().to_path_buf(),
    };
    let node = Node::construct(&skeleton, AutoMap::new()).unwrap();
    assert_eq!(node.dump(), flatten(&doc!({"this": "that", "list": [1, 2, 3]})));
}
