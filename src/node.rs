//! Document nodes and construction lifecycle.
//!
//! A [`Node`] owns a root value (initially an empty [`AutoMap`]) and a map of
//! constructor arguments. Concrete document types implement the [`Document`]
//! trait, whose two hooks run in a fixed order during
//! [`Node::construct`]: `declare` validates and defaults arguments, then
//! `populate` writes the document body into the root.
//!
//! ```rust
//! use doctree::{AutoMap, Document, Kind, Node, Result};
//!
//! struct Service;
//!
//! impl Document for Service {
//!     fn declare(&self, node: &mut Node) -> Result<()> {
//!         node.need_typed("name", "need a service name", Kind::String)?;
//!         node.optional("replicas", 1);
//!         Ok(())
//!     }
//!
//!     fn populate(&self, node: &mut Node) -> Result<()> {
//!         let name = node.arg("name").cloned().unwrap_or_default();
//!         let replicas = node.arg("replicas").cloned().unwrap_or_default();
//!         node.set("name", name)?;
//!         node.set("replicas", replicas)?;
//!         Ok(())
//!     }
//! }
//!
//! let node = Node::construct(&Service, AutoMap::from_iter([("name", "api")])).unwrap();
//! assert_eq!(node.dump().to_string(), r#"{"name":"api","replicas":1}"#);
//! ```
//!
//! Nodes can also be built directly from mappings, YAML/JSON files or
//! multi-document YAML streams, bypassing the hooks entirely.

use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::map::AutoMap;
use crate::tree::Tree;
use crate::value::{Kind, Value};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Lifecycle hooks for a concrete document type.
///
/// Construction is a fixed template: [`Node::construct`] stores the supplied
/// arguments, runs [`declare`](Document::declare), then runs
/// [`populate`](Document::populate). Both hooks default to no-ops, so a
/// document type only implements the stages it needs.
pub trait Document {
    /// Validates and defaults constructor arguments.
    ///
    /// Runs before [`populate`](Document::populate). Use
    /// [`Node::need`]/[`Node::need_typed`] for required arguments and
    /// [`Node::optional`]/[`Node::optional_typed`] for defaults.
    fn declare(&self, node: &mut Node) -> Result<()> {
        let _ = node;
        Ok(())
    }

    /// Writes the document body into the node's root.
    fn populate(&self, node: &mut Node) -> Result<()> {
        let _ = node;
        Ok(())
    }
}

/// One node in a document-construction graph.
///
/// Owns its root value and its constructor arguments exclusively. The root
/// may reference other nodes (directly or through nested sequences and maps);
/// [`Node::dump`] resolves that graph into a plain [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    root: Value,
    args: AutoMap,
}

enum FileFormat {
    Yaml,
    Json,
}

/// Chooses the parser from the path extension, case-insensitively.
///
/// Runs before any file I/O so an unsupported path fails without side
/// effects.
fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml" | "yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_value(path: &Path) -> Result<Value> {
    let format = detect_format(path)?;
    let text = fs::read_to_string(path)?;
    match format {
        FileFormat::Yaml => Ok(serde_yaml::from_str(&text)?),
        FileFormat::Json => Ok(serde_json::from_str(&text)?),
    }
}

fn check_kind(key: &str, value: &Value, expected: Kind) -> Result<()> {
    if expected.matches(value) {
        Ok(())
    } else {
        Err(Error::KindMismatch {
            key: key.to_string(),
            expected,
            found: value.kind(),
        })
    }
}

impl Node {
    /// Creates a bare node with an empty mapping root and no arguments.
    #[must_use]
    pub fn new() -> Self {
        Node {
            root: Value::Map(AutoMap::new()),
            args: AutoMap::new(),
        }
    }

    /// Constructs a node for a document type.
    ///
    /// Stores `args`, runs the document's `declare` hook, then its `populate`
    /// hook. A node is only returned if both hooks succeed; a failed
    /// construction leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Propagates whatever the hooks return, typically
    /// [`Error::MissingArgument`] or [`Error::KindMismatch`] from `declare`.
    pub fn construct<D: Document + ?Sized>(doc: &D, args: AutoMap) -> Result<Self> {
        let mut node = Node {
            root: Value::Map(AutoMap::new()),
            args,
        };
        doc.declare(&mut node)?;
        doc.populate(&mut node)?;
        Ok(node)
    }

    /// Merges `extra` into the stored arguments (top-level keys, later values
    /// replace earlier ones) and re-runs the document's `declare` hook only.
    ///
    /// This supports incremental declaration: a document type can pre-fill
    /// defaults and then delegate to another type's declaration.
    ///
    /// # Errors
    ///
    /// Propagates errors from the `declare` hook.
    pub fn reinitialize<D: Document + ?Sized>(&mut self, doc: &D, extra: AutoMap) -> Result<()> {
        for (key, value) in extra {
            self.args.insert(key, value);
        }
        doc.declare(self)
    }

    /// Creates a node whose root is `value`, bypassing the lifecycle hooks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAMapping`] if `value` is not a mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::{doc, Node};
    ///
    /// let node = Node::from_mapping(doc!({"this": "that"})).unwrap();
    /// assert_eq!(node.dump().to_string(), r#"{"this":"that"}"#);
    ///
    /// assert!(Node::from_mapping(doc!([1, 2, 3])).is_err());
    /// ```
    pub fn from_mapping(value: impl Into<Value>) -> Result<Self> {
        match value.into() {
            root @ Value::Map(_) => Ok(Node {
                root,
                args: AutoMap::new(),
            }),
            other => Err(Error::NotAMapping(other.kind())),
        }
    }

    /// Creates a node from a YAML or JSON file, choosing the parser by
    /// extension (`.yaml`/`.yml`/`.json`).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for any other extension (checked before
    /// the file is read), [`Error::Io`] on read failure,
    /// [`Error::Yaml`]/[`Error::Json`] on malformed content and
    /// [`Error::NotAMapping`] if the document is not a mapping.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_mapping(read_value(path.as_ref())?)
    }

    /// Creates a node from YAML text.
    ///
    /// # Errors
    ///
    /// [`Error::Yaml`] on malformed content, [`Error::NotAMapping`] if the
    /// document is not a mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_mapping(serde_yaml::from_str::<Value>(text)?)
    }

    /// Creates a node from JSON text.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] on malformed content, [`Error::NotAMapping`] if the
    /// document is not a mapping.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_mapping(serde_json::from_str::<Value>(text)?)
    }

    /// Creates one node per document of a multi-document YAML stream, in file
    /// order.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] on read failure, [`Error::Yaml`] on malformed content,
    /// [`Error::NotAMapping`] if any document is not a mapping.
    pub fn from_multidoc(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut nodes = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&text) {
            let value = Value::deserialize(document)?;
            nodes.push(Self::from_mapping(value)?);
        }
        Ok(nodes)
    }

    /// Shallow-merges a YAML or JSON file into the current root.
    ///
    /// Only top-level keys merge; a later value fully replaces an earlier one,
    /// with no deep merging. The extension is validated before anything is
    /// read, and both the incoming document and the current root must be
    /// mappings, so a failed merge never applies a partial update.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`], [`Error::Io`],
    /// [`Error::Yaml`]/[`Error::Json`] or [`Error::NotAMapping`].
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let incoming = match read_value(path.as_ref())? {
            Value::Map(map) => map,
            other => return Err(Error::NotAMapping(other.kind())),
        };
        let root = match &mut self.root {
            Value::Map(map) => map,
            other => return Err(Error::NotAMapping(other.kind())),
        };
        for (key, value) in incoming {
            root.insert(key, value);
        }
        Ok(())
    }

    /// Requires that `key` was supplied as a constructor argument.
    ///
    /// # Errors
    ///
    /// [`Error::MissingArgument`] carrying `msg` if the key is absent.
    pub fn need(&self, key: &str, msg: &str) -> Result<&Value> {
        self.args.get(key).ok_or_else(|| Error::MissingArgument {
            key: key.to_string(),
            msg: msg.to_string(),
        })
    }

    /// Requires that `key` was supplied and has the expected kind.
    ///
    /// # Errors
    ///
    /// [`Error::MissingArgument`] if the key is absent,
    /// [`Error::KindMismatch`] if the value has another kind.
    pub fn need_typed(&self, key: &str, msg: &str, expected: Kind) -> Result<&Value> {
        let value = self.need(key, msg)?;
        check_kind(key, value, expected)?;
        Ok(value)
    }

    /// Stores `default` under `key` if the argument was not supplied.
    pub fn optional(&mut self, key: &str, default: impl Into<Value>) {
        if !self.args.contains_key(key) {
            self.args.insert(key, default);
        }
    }

    /// Like [`optional`](Node::optional), with a kind check.
    ///
    /// A supplied value is checked against `expected`. An absent key stores
    /// `default`, which is checked first unless it is `Null` (a null default
    /// stands for "no value" and is exempt).
    ///
    /// # Errors
    ///
    /// [`Error::KindMismatch`] if the supplied value, or a non-null default,
    /// has another kind.
    pub fn optional_typed(
        &mut self,
        key: &str,
        default: impl Into<Value>,
        expected: Kind,
    ) -> Result<()> {
        match self.args.get(key) {
            Some(value) => check_kind(key, value, expected),
            None => {
                let default = default.into();
                if !default.is_null() {
                    check_kind(key, &default, expected)?;
                }
                self.args.insert(key, default);
                Ok(())
            }
        }
    }

    /// Returns the constructor argument stored under `key`, if any.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Returns the stored constructor arguments.
    #[must_use]
    pub fn args(&self) -> &AutoMap {
        &self.args
    }

    /// Returns the root value.
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the root value mutably.
    #[must_use]
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Replaces the root with any value: mapping, sequence or scalar.
    pub fn set_root(&mut self, value: impl Into<Value>) {
        self.root = value.into();
    }

    fn root_map_mut(&mut self) -> Result<&mut AutoMap> {
        match &mut self.root {
            Value::Map(map) => Ok(map),
            other => Err(Error::NotAMapping(other.kind())),
        }
    }

    /// Writes `key` into the root mapping.
    ///
    /// # Errors
    ///
    /// [`Error::NotAMapping`] if the root has been replaced with a
    /// non-mapping value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.root_map_mut()?.insert(key, value);
        Ok(())
    }

    /// Writes `value` at a deep path of the root mapping, auto-vivifying
    /// every missing intermediate level.
    ///
    /// # Errors
    ///
    /// [`Error::NotAMapping`] if the root has been replaced with a
    /// non-mapping value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::Node;
    ///
    /// let mut node = Node::new();
    /// node.set_path(&["nested", "first_key"], 2).unwrap();
    /// assert_eq!(node.dump().to_string(), r#"{"nested":{"first_key":2}}"#);
    /// ```
    pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) -> Result<()> {
        self.root_map_mut()?.set_path(path, value);
        Ok(())
    }

    /// Flattens the graph rooted at this node into a plain [`Tree`].
    #[must_use]
    pub fn dump(&self) -> Tree {
        flatten(&self.root)
    }

    /// Returns the lowercase hex SHA-256 digest of the canonical rendering of
    /// [`dump`](Node::dump).
    #[must_use]
    pub fn content_hash(&self) -> String {
        self.dump().content_hash()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dump())
    }
}
