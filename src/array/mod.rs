//! The insertion-ordered key-value container.
//!
//! [`OrdArray`] is the sole state held by a concrete collection and the
//! universal interchange format every operation ultimately produces
//! (`to_array` snapshots one). It is a thin wrapper over
//! [`IndexMap`] preserving insertion order, with the two write primitives
//! the combination semantics are built on:
//!
//! - [`OrdArray::insert`]: overwrite in place when the key exists (the
//!   position of the first insertion is kept), append when it is new.
//! - [`OrdArray::push`]: append under the next sequential integer key.
//!
//! # Examples
//!
//! ```rust
//! use ordcol::array::OrdArray;
//! use ordcol::value::{Key, Value};
//!
//! let mut array = OrdArray::new();
//! array.push(Value::from("a"));
//! array.insert(Key::from("x"), Value::from("b"));
//! array.push(Value::from("c"));
//!
//! let keys: Vec<Key> = array.keys().cloned().collect();
//! assert_eq!(keys, vec![Key::from(0), Key::from("x"), Key::from(1)]);
//! ```

use indexmap::IndexMap;

use crate::value::{Key, Value};

/// An insertion-ordered mapping from [`Key`] to [`Value`].
///
/// Keys are unique; inserting an existing key overwrites the value while
/// keeping the position of the original insertion. Equality is strict and
/// order-sensitive: two arrays are equal when they hold equal entries in
/// the same order.
#[derive(Clone, Debug, Default)]
pub struct OrdArray {
    entries: IndexMap<Key, Value>,
}

impl OrdArray {
    /// Creates an empty container.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty container with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the container holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if an entry exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key` to `value`.
    ///
    /// If the key already exists its value is overwritten in place; the
    /// entry keeps the position of its first insertion. A new key is
    /// appended at the end.
    pub fn insert(&mut self, key: Key, value: Value) {
        self.entries.insert(key, value);
    }

    /// Appends `value` under the next sequential integer key.
    ///
    /// The next key is one past the largest integer key present, with a
    /// floor of zero; string keys do not participate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::array::OrdArray;
    /// use ordcol::value::{Key, Value};
    ///
    /// let mut array = OrdArray::new();
    /// array.insert(Key::from(5), Value::from("a"));
    /// array.push(Value::from("b"));
    ///
    /// assert_eq!(array.get(&Key::from(6)), Some(&Value::from("b")));
    /// ```
    pub fn push(&mut self, value: Value) {
        let key = Key::Int(self.next_int_key());
        self.entries.insert(key, value);
    }

    /// The integer key [`OrdArray::push`] would assign next.
    #[must_use]
    pub fn next_int_key(&self) -> i64 {
        self.entries
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map_or(0, |largest| if largest < 0 { 0 } else { largest + 1 })
    }

    /// Iterates over `(key, value)` entries in insertion order.
    pub fn entries(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns the first entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.get_index(0)
    }

    /// Returns the last entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.len().checked_sub(1).and_then(|index| self.entries.get_index(index))
    }

    /// Returns the values under fresh sequential integer keys `0..n-1`.
    ///
    /// This is the reindexing primitive behind every operation that
    /// discards keys.
    #[must_use]
    pub fn reindexed(&self) -> Self {
        self.values().cloned().collect()
    }
}

impl PartialEq for OrdArray {
    /// Order-sensitive strict equality over entries.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .zip(other.entries())
                .all(|((left_key, left_value), (right_key, right_value))| {
                    left_key == right_key && left_value == right_value
                })
    }
}

impl FromIterator<(Key, Value)> for OrdArray {
    /// Collects keyed entries in order; a repeated key overwrites in place.
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(pairs: I) -> Self {
        let mut array = Self::new();
        for (key, value) in pairs {
            array.insert(key, value);
        }
        array
    }
}

impl FromIterator<Value> for OrdArray {
    /// Collects bare values under sequential integer keys.
    fn from_iter<I: IntoIterator<Item = Value>>(values: I) -> Self {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }
}

impl From<Vec<Value>> for OrdArray {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a OrdArray {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for OrdArray {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
