//! Flattened document trees and canonical content hashing.
//!
//! [`Tree`] is the output side of the crate: a plain, acyclic structure of
//! maps, sequences and scalars produced by [`flatten`](crate::flatten). It is
//! statically free of node references and auto-vivifying maps, so it is the
//! one data contract with downstream consumers (YAML/JSON encoders, diffing
//! tools, the hashing routine).
//!
//! ## Canonical rendering
//!
//! The `Display` impl renders a tree as compact JSON-style text with map keys
//! in **insertion order**, never sorted. This is the canonical form hashed by
//! [`Tree::content_hash`]: two maps with the same entries inserted in a
//! different order render differently and therefore hash differently. That
//! order-sensitivity is deliberate; the hash covers the representation, not
//! just the logical content.
//!
//! ```rust
//! use doctree::{doc, flatten};
//!
//! let tree = flatten(&doc!({"a": "b", "c": "d"}));
//! assert_eq!(tree.to_string(), r#"{"a":"b","c":"d"}"#);
//! ```

use crate::value::Number;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};

/// A fully flattened document: plain maps, sequences and scalars only.
///
/// Produced by [`flatten`](crate::flatten) or [`Node::dump`](crate::Node::dump).
/// Maps preserve insertion order.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Tree>),
    Map(IndexMap<String, Tree>),
}

impl Tree {
    /// Returns `true` if the tree is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Tree::Null)
    }

    /// Returns `true` if the tree is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Tree::Map(_))
    }

    /// Returns `true` if the tree is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Tree::Sequence(_))
    }

    /// If the tree is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the tree is an integer or whole-number float, returns it as `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tree::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the tree is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Tree>> {
        match self {
            Tree::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the tree is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Tree>> {
        match self {
            Tree::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the lowercase hex SHA-256 digest of this tree's canonical
    /// rendering.
    ///
    /// The digest is deterministic for a fixed tree and sensitive to map key
    /// order (see the module docs).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::{doc, flatten};
    ///
    /// let tree = flatten(&doc!({"a": "b"}));
    /// assert_eq!(tree.content_hash(), tree.content_hash());
    /// assert_eq!(tree.content_hash().len(), 64);
    /// ```
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Tree {
    /// Renders the canonical form: compact JSON-style text, keys in insertion
    /// order, strings escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Null => f.write_str("null"),
            Tree::Bool(b) => write!(f, "{}", b),
            Tree::Number(n) => write!(f, "{}", n),
            Tree::String(s) => write_escaped(f, s),
            Tree::Sequence(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(']')
            }
            Tree::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, key)?;
                    f.write_char(':')?;
                    write!(f, "{}", value)?;
                }
                f.write_char('}')
            }
        }
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(b) => serializer.serialize_bool(*b),
            Tree::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Tree::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Tree::String(s) => serializer.serialize_str(s),
            Tree::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::Map(entries) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
