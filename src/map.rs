//! The [`Section`] type: one nesting level's key/value bindings.
//!
//! A `Section` wraps an [`IndexMap`] so that iteration follows the order in
//! which keys appeared in the source. Lookups are by exact, case-sensitive key;
//! order never affects mapping, it only keeps debug and JSON output stable.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kitty::{Section, Value};
//!
//! let mut section = Section::new();
//! section.insert("host".to_string(), Value::from("example.com"));
//! section.insert("port".to_string(), Value::from("8080"));
//!
//! assert_eq!(section.len(), 2);
//! assert_eq!(section.get("port").and_then(|v| v.as_scalar()), Some("8080"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// An ordered map of string keys to kitty values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section(IndexMap<String, Value>);

impl Section {
    /// Creates an empty `Section`.
    #[must_use]
    pub fn new() -> Self {
        Section(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Section(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous binding if there was one.
    ///
    /// The parser never overwrites; this is for building trees by hand.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value bound to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in source order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in source order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in source order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Looks up a dotted path such as `portal.web.ip` through nested sections.
    ///
    /// Lists are not traversed; a path through a `[[header]]` returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::Config;
    ///
    /// let config = Config::from_str("[portal]\n [web]\n  ip = 10.0.0.1\n").unwrap();
    /// let ip = config.sections().lookup("portal.web.ip");
    /// assert_eq!(ip.and_then(|v| v.as_scalar()), Some("10.0.0.1"));
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_section()?.get(part)?;
        }
        Some(current)
    }

    /// Lays `other` over `self`.
    ///
    /// Nested sections present on both sides merge recursively; every other
    /// binding in `other` replaces the one in `self`. Keys only in `self` are
    /// kept untouched.
    pub fn overlay(&mut self, other: Section) {
        for (key, value) in other {
            match value {
                Value::Nested(top) => match self.0.get_mut(&key) {
                    Some(Value::Nested(base)) => base.overlay(top),
                    _ => {
                        self.0.insert(key, Value::Nested(top));
                    }
                },
                value => {
                    self.0.insert(key, value);
                }
            }
        }
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IndexMap::<String, Value>::deserialize(deserializer).map(Section)
    }
}

impl From<HashMap<String, Value>> for Section {
    fn from(map: HashMap<String, Value>) -> Self {
        Section(map.into_iter().collect())
    }
}

impl From<Section> for HashMap<String, Value> {
    fn from(section: Section) -> Self {
        section.0.into_iter().collect()
    }
}

impl IntoIterator for Section {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Section {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Section(IndexMap::from_iter(iter))
    }
}
