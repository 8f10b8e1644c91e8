//! Multi-document YAML streams.

use doctree::{doc, flatten, Error, Node};
use std::io::Write;
use tempfile::Builder;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp file");
    file
}

#[test]
fn two_documents_in_file_order() {
    let file = write_temp(
        "name: doc1\nkeys:\n  a: b\nvalues: [1, 2, 3]\n\
         ---\n\
         name: doc2\nkeys:\n  c: d\nvalues: [4, 5, 6]\n",
    );
    let nodes = Node::from_multidoc(file.path()).unwrap();
    let dumps: Vec<_> = nodes.iter().map(Node::dump).collect();
    assert_eq!(
        dumps,
        vec![
            flatten(&doc!({"name": "doc1", "keys": {"a": "b"}, "values": [1, 2, 3]})),
            flatten(&doc!({"name": "doc2", "keys": {"c": "d"}, "values": [4, 5, 6]})),
        ]
    );
}

#[test]
fn single_document_stream() {
    let file = write_temp("only: one\n");
    let nodes = Node::from_multidoc(file.path()).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].dump(), flatten(&doc!({"only": "one"})));
}

#[test]
fn non_mapping_document_fails() {
    let file = write_temp("first: ok\n---\n- not\n- a\n- mapping\n");
    assert!(matches!(
        Node::from_multidoc(file.path()).unwrap_err(),
        Error::NotAMapping(_)
    ));
}
