//! The recursive flattening algorithm.
//!
//! [`flatten`] walks a heterogeneous graph of document nodes, auto-vivifying
//! maps, sequences and scalars and produces a single [`Tree`] of plain maps,
//! sequences and scalars. Nested nodes disappear from the output: each one
//! contributes its root value directly at the position where it was inserted.

use crate::map::AutoMap;
use crate::tree::Tree;
use crate::value::Value;

/// Recursively flattens a graph value into a plain [`Tree`].
///
/// Dispatch is exhaustive over [`Value`]:
///
/// - a nested node flattens to the flattened form of its root, so a
///   sequence-rooted node inlines as that sequence at its position and a
///   map-rooted node inlines as that mapping
/// - maps keep their keys in insertion order with every value flattened
/// - sequences keep their length and order with every element flattened
/// - scalars pass through unchanged
///
/// The function is total and purely functional: visited nodes are never
/// mutated and nothing is cached between calls. It terminates on any graph
/// constructible through this crate, since a node held behind `Rc` without
/// interior mutability cannot transitively contain itself.
///
/// # Examples
///
/// ```rust
/// use doctree::{doc, flatten, Node};
///
/// let inner = Node::from_mapping(doc!({"a": 1})).unwrap();
/// let graph = doc!({"wrapped": inner});
/// let tree = flatten(&graph);
/// assert_eq!(tree.to_string(), r#"{"wrapped":{"a":1}}"#);
/// ```
#[must_use]
pub fn flatten(value: &Value) -> Tree {
    match value {
        Value::Null => Tree::Null,
        Value::Bool(b) => Tree::Bool(*b),
        Value::Number(n) => Tree::Number(*n),
        Value::String(s) => Tree::String(s.clone()),
        Value::Sequence(items) => Tree::Sequence(items.iter().map(flatten).collect()),
        Value::Map(map) => Tree::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), flatten(value)))
                .collect(),
        ),
        Value::Node(node) => flatten(node.root()),
    }
}

impl From<Tree> for Value {
    /// Re-lifts a flattened tree into the graph domain.
    ///
    /// `flatten(&Value::from(tree))` returns a tree structurally equal to the
    /// input, which is the flattening-idempotence property.
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Null => Value::Null,
            Tree::Bool(b) => Value::Bool(b),
            Tree::Number(n) => Value::Number(n),
            Tree::String(s) => Value::String(s),
            Tree::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            Tree::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<AutoMap>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::Node;

    #[test]
    fn scalars_pass_through() {
        assert_eq!(flatten(&Value::Null), Tree::Null);
        assert_eq!(flatten(&Value::from(true)), Tree::Bool(true));
        assert_eq!(flatten(&Value::from(5)).as_i64(), Some(5));
        assert_eq!(flatten(&Value::from("x")).as_str(), Some("x"));
    }

    #[test]
    fn map_keys_keep_insertion_order() {
        let tree = flatten(&doc!({"z": 1, "a": 2}));
        let keys: Vec<_> = tree.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn node_in_map_contributes_its_root() {
        let inner = Node::from_mapping(doc!({"inside": true})).unwrap();
        let tree = flatten(&doc!({"child": inner}));
        assert_eq!(tree, flatten(&doc!({"child": {"inside": true}})));
    }

    #[test]
    fn sequence_rooted_node_inlines_as_sequence() {
        let mut seq_node = Node::new();
        seq_node.set_root(doc!([1, 2, 3]));
        let tree = flatten(&doc!({"xs": seq_node}));
        // the node disappears; its elements land at the insertion position
        assert_eq!(tree, flatten(&doc!({"xs": [1, 2, 3]})));
    }

    #[test]
    fn nodes_nested_in_sequences_flatten_in_order() {
        let a = Node::from_mapping(doc!({"a": 1, "b": 2})).unwrap();
        let b = Node::from_mapping(doc!({"c": 3, "d": 4})).unwrap();
        let tree = flatten(&doc!({"list_of_nodes": [a, b]}));
        assert_eq!(
            tree,
            flatten(&doc!({"list_of_nodes": [{"a": 1, "b": 2}, {"c": 3, "d": 4}]}))
        );
    }

    #[test]
    fn shared_node_flattens_at_every_position() {
        use std::rc::Rc;
        let shared = Rc::new(Node::from_mapping(doc!({"shared": true})).unwrap());
        let graph = doc!({"left": {"x": 1}, "right": {"y": 2}});
        let mut graph = match graph {
            Value::Map(map) => map,
            _ => unreachable!(),
        };
        graph.set_path(&["left", "doc"], Rc::clone(&shared));
        graph.set_path(&["right", "doc"], shared);
        let tree = flatten(&Value::Map(graph));
        assert_eq!(
            tree,
            flatten(&doc!({
                "left": {"x": 1, "doc": {"shared": true}},
                "right": {"y": 2, "doc": {"shared": true}}
            }))
        );
    }

    #[test]
    fn idempotent_on_flat_trees() {
        let tree = flatten(&doc!({"a": [1, {"b": null}], "c": "d"}));
        assert_eq!(flatten(&Value::from(tree.clone())), tree);
    }
}
