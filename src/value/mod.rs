//! Dynamic values held by ordered containers.
//!
//! Collections in this crate are heterogeneous: an entry's value may be a
//! scalar, a nested container, or a user-defined object. [`Value`] is the
//! pure-data representation of that universe, and [`Object`] is the
//! duck-typed capability contract that `pick` and `invoke` rely on.
//!
//! Three relations over values are defined here, each as an explicit,
//! enumerated rule rather than implicit coercion:
//!
//! - **strict equality** ([`Value::strict_eq`], also `PartialEq`):
//!   exact-type-and-value equality,
//! - **loose equality** ([`Value::loose_eq`]): numeric cross-type
//!   comparison plus truthiness rules,
//! - **total ordering** ([`Value::compare`]): the three-way comparison
//!   used by sorting and `min`/`max`.

mod key;

pub use key::Key;

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::array::OrdArray;
use crate::error::Result;

// =============================================================================
// Object Contract
// =============================================================================

/// A duck-typed value with named members and zero-argument methods.
///
/// `pick` reads members through [`Object::member`]; `invoke` calls methods
/// through [`Object::call`]. Implementations decide which names they
/// answer; unknown names are reported as `None` / an error and abort the
/// surrounding transformation.
///
/// # Examples
///
/// ```rust
/// use ordcol::prelude::*;
///
/// struct Track {
///     title: String,
/// }
///
/// impl Object for Track {
///     fn type_name(&self) -> &'static str {
///         "Track"
///     }
///
///     fn member(&self, name: &str) -> Option<Value> {
///         (name == "title").then(|| Value::from(self.title.clone()))
///     }
///
///     fn call(&self, method: &str) -> ordcol::Result<Value> {
///         match method {
///             "title_len" => Ok(Value::from(self.title.len() as i64)),
///             _ => Err(Error::UnknownMethod {
///                 method: method.to_owned(),
///                 type_name: "Track".to_owned(),
///             }),
///         }
///     }
/// }
///
/// let track = Value::object(Track { title: "Aja".to_owned() });
/// assert_eq!(track.type_name(), "Track");
/// ```
pub trait Object {
    /// A short name for the concrete type, used in error messages.
    fn type_name(&self) -> &'static str {
        "object"
    }

    /// Reads the named member, or `None` if the object has no such member.
    fn member(&self, name: &str) -> Option<Value>;

    /// Calls the named zero-argument method.
    ///
    /// # Errors
    ///
    /// Implementations should return [`Error::UnknownMethod`] for names
    /// they do not answer.
    ///
    /// [`Error::UnknownMethod`]: crate::error::Error::UnknownMethod
    fn call(&self, method: &str) -> Result<Value>;
}

// =============================================================================
// Value Definition
// =============================================================================

/// A dynamically typed value.
///
/// Cloning is cheap for scalars and shares the underlying object for the
/// `Object` variant; `Array` clones the container (copy-on-write happens at
/// whole-container granularity in the collection layer).
///
/// # Thread Safety
///
/// Objects are shared through `Rc`, so values are NOT thread-safe. The
/// whole collection core is a single-threaded, synchronous model.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A nested ordered container.
    Array(OrdArray),
    /// A user-defined object with named members and methods.
    Object(Rc<dyn Object>),
}

impl Value {
    /// Wraps an [`Object`] implementation into a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::prelude::*;
    ///
    /// struct Unit;
    ///
    /// impl Object for Unit {
    ///     fn member(&self, _name: &str) -> Option<Value> {
    ///         None
    ///     }
    ///
    ///     fn call(&self, method: &str) -> ordcol::Result<Value> {
    ///         Err(Error::UnknownMethod {
    ///             method: method.to_owned(),
    ///             type_name: "object".to_owned(),
    ///         })
    ///     }
    /// }
    ///
    /// let value = Value::object(Unit);
    /// assert!(value.as_object().is_some());
    /// ```
    pub fn object<O: Object + 'static>(object: O) -> Self {
        Self::Object(Rc::new(object))
    }

    /// A short name for the value's type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(object) => object.type_name(),
        }
    }

    /// Returns `true` if this is `Null`.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the nested container, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_array(&self) -> Option<&OrdArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the object, if this is one.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Rc<dyn Object>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    // =========================================================================
    // Truthiness
    // =========================================================================

    /// Returns `true` if the value is "empty-like".
    ///
    /// The empty-like values are exactly: `Null`, `false`, `0`, `0.0`, the
    /// empty string, and the empty container. Objects are never
    /// empty-like. This is the enumerated truthiness rule behind the
    /// default `filter` predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::value::Value;
    ///
    /// assert!(Value::Null.is_empty_like());
    /// assert!(Value::from(0).is_empty_like());
    /// assert!(Value::from("").is_empty_like());
    /// assert!(!Value::from("0").is_empty_like());
    /// assert!(!Value::from(1).is_empty_like());
    /// ```
    #[must_use]
    pub fn is_empty_like(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(flag) => !flag,
            Self::Int(number) => *number == 0,
            Self::Float(number) => *number == 0.0,
            Self::Str(text) => text.is_empty(),
            Self::Array(array) => array.is_empty(),
            Self::Object(_) => false,
        }
    }

    /// The complement of [`Value::is_empty_like`].
    #[inline]
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !self.is_empty_like()
    }

    // =========================================================================
    // Equality
    // =========================================================================

    /// Exact-type-and-value equality.
    ///
    /// `Int` never equals `Float`, strings never equal numbers, objects
    /// compare by identity, arrays compare entry-wise (keys and values, in
    /// order), and `NaN` is not equal to itself. This is the relation
    /// strict [`unique`](crate::collection::Collection::unique) uses, and
    /// it backs the `PartialEq` impl.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::value::Value;
    ///
    /// assert!(Value::from(1).strict_eq(&Value::from(1)));
    /// assert!(!Value::from(1).strict_eq(&Value::from("1")));
    /// assert!(!Value::from(1).strict_eq(&Value::from(1.0)));
    /// ```
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => {
                Rc::as_ptr(left).cast::<()>() == Rc::as_ptr(right).cast::<()>()
            }
            _ => false,
        }
    }

    /// Loose, coercive equality.
    ///
    /// The enumerated rules, applied in order:
    ///
    /// 1. `Null` loosely equals `Null` and every empty-like value.
    /// 2. A `Bool` loosely equals any value with the same truthiness.
    /// 3. If both sides coerce to numbers (`Int`, `Float`, or a numeric
    ///    string), they compare numerically.
    /// 4. Everything else falls back to strict equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::value::Value;
    ///
    /// assert!(Value::from(1).loose_eq(&Value::from("1")));
    /// assert!(Value::from(1).loose_eq(&Value::from(1.0)));
    /// assert!(Value::Null.loose_eq(&Value::from("")));
    /// assert!(!Value::from("abc").loose_eq(&Value::from(0)));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, value) | (value, Self::Null) => value.is_empty_like(),
            (Self::Bool(flag), value) | (value, Self::Bool(flag)) => *flag == value.is_truthy(),
            _ => match (self.numeric_value(), other.numeric_value()) {
                (Some(left), Some(right)) => left == right,
                _ => self.strict_eq(other),
            },
        }
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Three-way comparison defining a total order over values.
    ///
    /// Values that both coerce to numbers compare numerically, strings
    /// lexicographically, booleans false-before-true, arrays by length and
    /// then entry-wise; otherwise values order by a fixed type rank
    /// (null < bool < numbers < string < array < object). Objects are
    /// unordered among themselves and report `Equal`, so a stable sort
    /// keeps their relative positions.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Some(left), Some(right)) = (self.numeric_value(), other.numeric_value()) {
            return left.partial_cmp(&right).unwrap_or(Ordering::Equal);
        }
        match (self, other) {
            (Self::Null, Self::Null) | (Self::Object(_), Self::Object(_)) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Str(left), Self::Str(right)) => left.cmp(right),
            (Self::Array(left), Self::Array(right)) => {
                left.len().cmp(&right.len()).then_with(|| {
                    for ((left_key, left_value), (right_key, right_value)) in
                        left.entries().zip(right.entries())
                    {
                        let ordering = left_value
                            .compare(right_value)
                            .then_with(|| left_key.cmp(right_key));
                        if ordering != Ordering::Equal {
                            return ordering;
                        }
                    }
                    Ordering::Equal
                })
            }
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    const fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Str(_) => 3,
            Self::Array(_) => 4,
            Self::Object(_) => 5,
        }
    }

    // =========================================================================
    // Numeric Coercion
    // =========================================================================

    /// The numeric reading of the value, if it has one.
    ///
    /// `Int` and `Float` read as themselves; a string reads as a number
    /// when it parses as one. Everything else has no numeric reading.
    fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            Self::Str(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Coerces the value to a number for `sum`/`product` accumulation.
    ///
    /// `Bool` reads as 0/1, `Null` and non-numeric values as 0; numeric
    /// strings parse as integers when they can, floats otherwise.
    /// Aggregates never fail, so there is no error path here.
    pub(crate) fn to_number(&self) -> Number {
        match self {
            Self::Int(number) => Number::Int(*number),
            Self::Float(number) => Number::Float(*number),
            Self::Bool(flag) => Number::Int(i64::from(*flag)),
            Self::Str(text) => text.trim().parse::<i64>().map_or_else(
                |_| {
                    text.trim()
                        .parse::<f64>()
                        .map_or(Number::Int(0), Number::Float)
                },
                Number::Int,
            ),
            Self::Null | Self::Array(_) | Self::Object(_) => Number::Int(0),
        }
    }
}

// =============================================================================
// Numeric Accumulator
// =============================================================================

/// Integer-preserving numeric accumulator for `sum` and `product`.
///
/// Integer arithmetic stays integral until it would overflow, at which
/// point the accumulator promotes to a float.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub(crate) fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_add(right)
                .map_or_else(|| Self::Float(left as f64 + right as f64), Self::Int),
            (left, right) => Self::Float(left.as_f64() + right.as_f64()),
        }
    }

    pub(crate) fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_mul(right)
                .map_or_else(|| Self::Float(left as f64 * right as f64), Self::Int),
            (left, right) => Self::Float(left.as_f64() * right.as_f64()),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Int(number) => number as f64,
            Self::Float(number) => number,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        match self {
            Self::Int(number) => Value::Int(number),
            Self::Float(number) => Value::Float(number),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl PartialEq for Value {
    /// Strict equality; see [`Value::strict_eq`].
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("Null"),
            Self::Bool(flag) => formatter.debug_tuple("Bool").field(flag).finish(),
            Self::Int(number) => formatter.debug_tuple("Int").field(number).finish(),
            Self::Float(number) => formatter.debug_tuple("Float").field(number).finish(),
            Self::Str(text) => formatter.debug_tuple("Str").field(text).finish(),
            Self::Array(array) => formatter.debug_tuple("Array").field(array).finish(),
            Self::Object(object) => formatter
                .debug_tuple("Object")
                .field(&object.type_name())
                .finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<OrdArray> for Value {
    fn from(array: OrdArray) -> Self {
        Self::Array(array)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::Array(OrdArray::from(values))
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(index) => Self::Int(index),
            Key::Str(name) => Self::Str(name),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::{Key, Value};
    use rstest::rstest;
    use std::cmp::Ordering;

    #[rstest]
    #[case(Value::Null, true)]
    #[case(Value::from(false), true)]
    #[case(Value::from(0), true)]
    #[case(Value::from(0.0), true)]
    #[case(Value::from(""), true)]
    #[case(Value::from(Vec::new()), true)]
    #[case(Value::from(true), false)]
    #[case(Value::from(-1), false)]
    #[case(Value::from("0"), false)]
    #[case(Value::from(vec![Value::Null]), false)]
    fn test_empty_like_rule(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_empty_like(), expected);
    }

    #[rstest]
    fn test_strict_eq_distinguishes_types() {
        assert!(Value::from(1).strict_eq(&Value::from(1)));
        assert!(!Value::from(1).strict_eq(&Value::from("1")));
        assert!(!Value::from(1).strict_eq(&Value::from(1.0)));
        assert!(!Value::from(f64::NAN).strict_eq(&Value::from(f64::NAN)));
    }

    #[rstest]
    fn test_loose_eq_coerces_numbers() {
        assert!(Value::from(1).loose_eq(&Value::from("1")));
        assert!(Value::from(1).loose_eq(&Value::from(1.0)));
        assert!(Value::from("1").loose_eq(&Value::from("01")));
        assert!(!Value::from("abc").loose_eq(&Value::from(0)));
    }

    #[rstest]
    fn test_loose_eq_null_and_bool_rules() {
        assert!(Value::Null.loose_eq(&Value::from(0)));
        assert!(Value::Null.loose_eq(&Value::from("")));
        assert!(!Value::Null.loose_eq(&Value::from("0")));
        assert!(Value::from(true).loose_eq(&Value::from("yes")));
        assert!(Value::from(false).loose_eq(&Value::from(0)));
    }

    #[rstest]
    fn test_compare_orders_numbers_and_strings() {
        assert_eq!(Value::from(1).compare(&Value::from(2)), Ordering::Less);
        assert_eq!(Value::from(2.5).compare(&Value::from(2)), Ordering::Greater);
        assert_eq!(Value::from("a").compare(&Value::from("b")), Ordering::Less);
        assert_eq!(Value::Null.compare(&Value::from("")), Ordering::Less);
    }

    #[rstest]
    fn test_key_converts_to_value() {
        assert_eq!(Value::from(Key::from(3)), Value::from(3));
        assert_eq!(Value::from(Key::from("x")), Value::from("x"));
    }
}
