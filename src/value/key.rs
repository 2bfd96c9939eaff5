//! Integer-or-string keys for ordered containers.

use std::fmt;

/// A key in an ordered key-value container.
///
/// Keys are either integers or strings, mirroring the two key shapes the
/// combination operations distinguish: integer keys are renumbered by
/// reindexing operations and by `merge`, string keys are preserved.
///
/// The derived ordering ranks all integer keys before all string keys,
/// integers numerically and strings lexicographically; it is used only as
/// a tie-breaker when comparing whole containers.
///
/// # Examples
///
/// ```rust
/// use ordcol::value::Key;
///
/// let index = Key::from(3);
/// let name = Key::from("title");
///
/// assert!(index.is_int());
/// assert!(name.is_str());
/// assert_eq!(name.to_string(), "title");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Returns `true` if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns `true` if this is a string key.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns the integer key, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            Self::Str(_) => None,
        }
    }

    /// Returns the string key, if this is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(index) => write!(formatter, "{index}"),
            Self::Str(name) => formatter.write_str(name),
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Int(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Int(i64::from(index))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Str(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Key;
    use rstest::rstest;

    #[rstest]
    fn test_key_accessors() {
        assert_eq!(Key::from(7).as_int(), Some(7));
        assert_eq!(Key::from(7).as_str(), None);
        assert_eq!(Key::from("name").as_str(), Some("name"));
        assert_eq!(Key::from("name").as_int(), None);
    }

    #[rstest]
    fn test_key_ordering_ranks_ints_before_strings() {
        assert!(Key::from(99) < Key::from("a"));
        assert!(Key::from(1) < Key::from(2));
        assert!(Key::from("a") < Key::from("b"));
    }

    #[rstest]
    fn test_key_display() {
        assert_eq!(Key::from(3).to_string(), "3");
        assert_eq!(Key::from("title").to_string(), "title");
    }
}
