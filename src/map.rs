//! Auto-vivifying ordered map for document roots.
//!
//! This module provides [`AutoMap`], a wrapper around [`IndexMap`] that keeps
//! insertion order and supports writing arbitrarily deep key paths without
//! declaring intermediate structure first.
//!
//! ## Why IndexMap?
//!
//! Document output is order-sensitive: the canonical rendering used for
//! content hashing iterates keys in insertion order, never sorted. `IndexMap`
//! gives:
//!
//! - **Deterministic output**: keys render in a consistent order
//! - **Iteration order**: keys are iterated in insertion order
//! - **Predictability**: structural equality and hashing behave the same way
//!   across runs
//!
//! ## Auto-vivification
//!
//! [`AutoMap::get_or_create`] turns a read of a missing key into the creation
//! of an empty nested map at that key. The new map is inserted immediately
//! (read-creates-and-inserts), which is what makes chained deep writes work:
//!
//! ```rust
//! use doctree::{AutoMap, Value};
//!
//! let mut map = AutoMap::new();
//! map.set_path(&["a", "b", "c"], 1);
//! assert_eq!(map.get_path(&["a", "b", "c"]), Some(&Value::from(1)));
//! ```

use crate::flatten::flatten;
use crate::tree::Tree;
use crate::value::Value;
use indexmap::IndexMap;

/// An ordered, auto-vivifying map of string keys to document values.
///
/// Every mapping in a document graph is an `AutoMap`; there is no separate
/// "plain" mapping type on the construction side, so nested mappings assigned
/// through [`Value::from`] or deserialized from YAML/JSON are uniformly
/// navigable at every depth.
///
/// # Examples
///
/// ```rust
/// use doctree::{AutoMap, Value};
///
/// let mut map = AutoMap::new();
/// map.insert("first", 1);
/// map.insert("second", 2);
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoMap(IndexMap<String, Value>);

impl AutoMap {
    /// Creates an empty `AutoMap`.
    #[must_use]
    pub fn new() -> Self {
        AutoMap(IndexMap::new())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::AutoMap;
    ///
    /// let mut map = AutoMap::new();
    /// assert!(map.insert("key", 42).is_none());
    /// assert!(map.insert("key", 43).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// Pure read: never creates or inserts anything.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the value at `key`, inserting an empty nested map first if the
    /// key is absent.
    ///
    /// This is the auto-vivification primitive: a missing key comes into
    /// existence as an empty `AutoMap` the moment it is looked up, so deep
    /// paths can be written without declaring intermediate levels. The nested
    /// map is inserted immediately, even if the caller then discards the
    /// reference.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::AutoMap;
    ///
    /// let mut map = AutoMap::new();
    /// map.get_or_create("settings");
    /// assert!(map.get("settings").is_some_and(|v| v.is_map()));
    /// ```
    pub fn get_or_create(&mut self, key: impl Into<String>) -> &mut Value {
        self.0
            .entry(key.into())
            .or_insert_with(|| Value::Map(AutoMap::new()))
    }

    /// Writes `value` at the end of `path`, creating every missing
    /// intermediate level as an empty nested map.
    ///
    /// An intermediate level that already holds a non-map value is replaced by
    /// an empty map so the write can proceed; this keeps the operation total.
    /// An empty path is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doctree::{AutoMap, Value};
    ///
    /// let mut map = AutoMap::new();
    /// map.set_path(&["nested", "first_key"], 2);
    /// assert_eq!(map.get_path(&["nested", "first_key"]), Some(&Value::from(2)));
    /// ```
    pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut current = self;
        for segment in parents {
            let slot = current.get_or_create(*segment);
            if !slot.is_map() {
                *slot = Value::Map(AutoMap::new());
            }
            current = match slot {
                Value::Map(next) => next,
                _ => unreachable!("slot was just set to a map"),
            };
        }
        current.insert(*last, value);
    }

    /// Reads the value at `path` without creating anything.
    ///
    /// Returns `None` if any segment is absent or an intermediate segment is
    /// not a map. An empty path yields `None`.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut value = self.get(first)?;
        for segment in rest {
            value = value.as_map()?.get(segment)?;
        }
        Some(value)
    }

    /// Returns `true` if the map contains a value for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// Preserves the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Flattens this map into a plain [`Tree::Map`], resolving any nested
    /// document nodes along the way.
    #[must_use]
    pub fn to_tree(&self) -> Tree {
        Tree::Map(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), flatten(value)))
                .collect(),
        )
    }
}

impl IntoIterator for AutoMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AutoMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AutoMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AutoMap(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
