//! Value model for decoded dict/list content.
//!
//! Values are built by the decoder and are read-only afterwards. Two kinds
//! of "nothing" are kept apart: [`Value::Absent`] means a container element
//! had no element children, while a lookup miss on a [`Mapping`] is
//! reported as `None`. Stored values are never `Absent`.
//!
//! The `Value` variants are public so callers can match on them and build
//! trees for [`crate::encoder`]. The decoder never places `Absent` inside a
//! `Mapping` or `Sequence`; a hand-built `Sequence` may, and the encoder
//! skips such items.

use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;
use serde::Serialize;

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Raw text of a leaf `<key>` or `<item>`, possibly empty.
    Text(String),
    /// A decoded `<dict>`.
    Mapping(Mapping),
    /// A decoded `<list>`.
    Sequence(Vec<Value>),
    /// A container with no element children.
    Absent,
}

impl Value {
    /// Returns true if this value is text
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true if this value is a mapping
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Returns true if this value is a sequence
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true if this value is absent
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the text if this is a text value, None otherwise
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the mapping if this is a mapping, None otherwise
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the items if this is a sequence, None otherwise
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets a text value as a boolean flag.
    ///
    /// Accepts `1`/`0` and `true`/`false` (case-insensitive), which is how
    /// servers write flags in dict content. Anything else is `None`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        let text = self.as_text()?.trim();
        if text == "1" || text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text == "0" || text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    /// Interprets a text value as a signed integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_text()?.trim().parse().ok()
    }
}

/// An insertion-ordered mapping from key names to values.
///
/// Keys are unique. When decoding meets a key twice, the later value
/// replaces the earlier one and the key keeps its first position. This is
/// an assumption about the producer, not something servers are known to
/// guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    pub(crate) fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserts a value, overwriting any previous value under the same key.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        debug_assert!(!value.is_absent());
        self.0.insert(key.into(), value);
    }

    /// Look up a key. A miss is `None`; stored values are never absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a key and return its text, if it holds text.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Look up a key and return its nested mapping, if it holds one.
    #[must_use]
    pub fn get_mapping(&self, key: &str) -> Option<&Mapping> {
        self.get(key).and_then(Value::as_mapping)
    }

    /// Look up a key and return its sequence items, if it holds a sequence.
    #[must_use]
    pub fn get_sequence(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_sequence)
    }

    /// Look up a key and interpret it as a flag. See [`Value::as_bool`].
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Look up a key and interpret it as an integer.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
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

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.0.keys()
    }
}

/// Collects entries in order. Later duplicates overwrite earlier ones and
/// `Absent` values are dropped, the same as decoding does.
impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            if !value.is_absent() {
                mapping.insert(key, value);
            }
        }
        mapping
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
