//! # doctree
//!
//! A toolkit for building hierarchical, dynamically-shaped documents and
//! flattening them into canonical map/sequence/scalar trees for
//! serialization, structural comparison and content hashing.
//!
//! ## Core Model
//!
//! - [`AutoMap`]: an insertion-ordered map where missing keys auto-vivify as
//!   empty nested maps, so arbitrarily deep paths can be written without
//!   declaring structure first
//! - [`Value`]: the graph-side value, a closed variant over scalars,
//!   sequences, maps and nested [`Node`] references
//! - [`Node`]: one unit of document construction, owning a root value and its
//!   constructor arguments; concrete document types implement the
//!   [`Document`] lifecycle hooks
//! - [`flatten`] / [`Node::dump`]: the recursive algorithm resolving a graph
//!   of nodes, maps and sequences into a plain [`Tree`]
//! - [`Tree::content_hash`]: a SHA-256 digest over the tree's canonical,
//!   insertion-ordered rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use doctree::{AutoMap, Document, Node, Result};
//!
//! struct Deployment;
//!
//! impl Document for Deployment {
//!     fn declare(&self, node: &mut Node) -> Result<()> {
//!         node.need("name", "every deployment needs a name")?;
//!         Ok(())
//!     }
//!
//!     fn populate(&self, node: &mut Node) -> Result<()> {
//!         let name = node.arg("name").cloned().unwrap_or_default();
//!         node.set("name", name)?;
//!         node.set_path(&["spec", "replicas"], 3)?;
//!         Ok(())
//!     }
//! }
//!
//! let node = Node::construct(&Deployment, AutoMap::from_iter([("name", "api")]))?;
//! let tree = node.dump();
//! assert_eq!(tree.to_string(), r#"{"name":"api","spec":{"replicas":3}}"#);
//! # Ok::<(), doctree::Error>(())
//! ```
//!
//! ## Nesting Documents
//!
//! A node's root may contain other nodes, directly or inside sequences and
//! maps. Flattening resolves each nested node to its own flattened root at
//! the position where it was inserted:
//!
//! ```rust
//! use doctree::{doc, Node};
//!
//! let a = Node::from_mapping(doc!({"a": 1, "b": 2}))?;
//! let b = Node::from_mapping(doc!({"c": 3, "d": 4}))?;
//!
//! let mut outer = Node::new();
//! outer.set("name", "testObj")?;
//! outer.set("list_of_nodes", doc!([a, b]))?;
//!
//! assert_eq!(
//!     outer.dump().to_string(),
//!     r#"{"name":"testObj","list_of_nodes":[{"a":1,"b":2},{"c":3,"d":4}]}"#
//! );
//! # Ok::<(), doctree::Error>(())
//! ```
//!
//! Graphs must be acyclic. The ownership model enforces this: nested nodes
//! are shared through `Rc` without interior mutability, so a cycle cannot be
//! constructed in the first place.
//!
//! ## Loading Documents
//!
//! Nodes can be created from YAML or JSON files (format chosen by file
//! extension), from multi-document YAML streams, or merged shallowly from a
//! file into an existing root. See [`Node::from_file`],
//! [`Node::from_multidoc`] and [`Node::merge_file`].
//!
//! ## Hashing
//!
//! [`Tree::content_hash`] digests the canonical rendering of a flattened
//! tree. The rendering iterates map keys in insertion order, never sorted, so
//! the hash is sensitive to construction order by design:
//!
//! ```rust
//! use doctree::{doc, Node};
//!
//! let node = Node::from_mapping(doc!({"a": "b", "c": "d"}))?;
//! assert_eq!(
//!     node.content_hash(),
//!     "b85c7da93e8790518898c280e15e3f1af5d46bf4aaa4407690f0f0a3b0316478"
//! );
//! # Ok::<(), doctree::Error>(())
//! ```

pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod node;
pub mod tree;
pub mod value;

pub use error::{Error, Result};
pub use flatten::flatten;
pub use map::AutoMap;
pub use node::{Document, Node};
pub use tree::Tree;
pub use value::{Kind, Number, Value};

#[cfg(test)]
mod tests {
    use super::*;

    struct Inventory;

    impl Document for Inventory {
        fn declare(&self, node: &mut Node) -> Result<()> {
            node.need_typed("name", "need a name string", Kind::String)?;
            node.optional("items", Vec::<Value>::new());
            Ok(())
        }

        fn populate(&self, node: &mut Node) -> Result<()> {
            let name = node.arg("name").cloned().unwrap_or_default();
            let items = node.arg("items").cloned().unwrap_or_default();
            node.set("name", name)?;
            node.set("items", items)?;
            Ok(())
        }
    }

    #[test]
    fn end_to_end_construct_dump_hash() {
        let args = AutoMap::from_iter([("name", doc!("store")), ("items", doc!([1, 2]))]);
        let node = Node::construct(&Inventory, args).unwrap();
        let tree = node.dump();
        assert_eq!(tree.to_string(), r#"{"name":"store","items":[1,2]}"#);
        assert_eq!(node.content_hash(), tree.content_hash());
    }

    #[test]
    fn dump_twice_is_deterministic() {
        let node = Node::from_mapping(doc!({"x": [1, {"y": "z"}]})).unwrap();
        assert_eq!(node.dump(), node.dump());
        assert_eq!(node.content_hash(), node.content_hash());
    }
}
