//! The concrete eager collection.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::callbacks;
use super::{
    Collection, Comparator, Creator, Enumerable, KeySelector, MapCallback, Metric, ValuePredicate,
};
use crate::array::OrdArray;
use crate::collection::CollectionView;
use crate::error::Result;
use crate::value::{Key, Number, Value};

/// An immutable collection over an ordered key-value container.
///
/// Every transformation applies immediately and returns a *new* instance;
/// the receiver is never mutated, so a shared base can safely be the
/// starting point of many derived collections. New instances are built
/// through a late-bound [`Creator`] carried by each collection, which
/// keeps customized collections closed under transformation.
///
/// Content equality is established only through [`ArrayCollection::to_array`];
/// the type deliberately does not implement `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use ordcol::prelude::*;
///
/// let collection = ArrayCollection::from_values([
///     Value::from(1),
///     Value::from(2),
///     Value::from(3),
/// ]);
///
/// let doubled = collection.map(callbacks::mapper(|value, _key| {
///     Value::from(value.as_int().unwrap_or(0) * 2)
/// }));
///
/// assert_eq!(
///     doubled.to_array(),
///     OrdArray::from(vec![Value::from(2), Value::from(4), Value::from(6)])
/// );
/// // The original is untouched.
/// assert_eq!(collection.count(), 3);
/// ```
#[derive(Clone)]
pub struct ArrayCollection {
    elements: OrdArray,
    creator: Creator,
}

impl ArrayCollection {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::from_array(OrdArray::new())
    }

    /// Creates a collection owning the given container.
    ///
    /// This is the default [`Creator`]; collections built here produce
    /// further collections the same way.
    #[must_use]
    pub fn from_array(elements: OrdArray) -> Self {
        Self {
            elements,
            creator: Rc::new(Self::from_array),
        }
    }

    /// Creates a collection from bare values, keyed sequentially from
    /// zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::prelude::*;
    ///
    /// let collection = ArrayCollection::from_values([Value::from("a"), Value::from("b")]);
    /// assert_eq!(collection.count(), 2);
    /// ```
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self::from_array(values.into_iter().collect())
    }

    /// Creates a collection from keyed pairs, in order.
    pub fn from_pairs<I: IntoIterator<Item = (Key, Value)>>(pairs: I) -> Self {
        Self::from_array(pairs.into_iter().collect())
    }

    /// Creates a collection with a custom late-bound creator.
    ///
    /// The creator is carried into every derived collection, so a
    /// customized collection stays customized under transformation.
    #[must_use]
    pub fn with_creator(elements: OrdArray, creator: Creator) -> Self {
        Self { elements, creator }
    }

    /// The late-bound factory this collection builds derived collections
    /// with, as a first-class callback.
    #[must_use]
    pub fn creator(&self) -> Creator {
        self.creator.clone()
    }

    /// Builds a derived collection through the carried creator.
    ///
    /// The creator is propagated into the result, keeping derived
    /// collections closed under further transformation.
    #[must_use]
    pub fn create(&self, elements: OrdArray) -> Self {
        let mut produced = (self.creator)(elements);
        produced.creator = self.creator.clone();
        produced
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Snapshots the collection as a plain ordered container.
    #[must_use]
    pub fn to_array(&self) -> OrdArray {
        self.elements.clone()
    }

    /// Borrows the underlying container.
    #[must_use]
    pub fn as_array(&self) -> &OrdArray {
        &self.elements
    }

    /// Opens a lazy view over this collection.
    ///
    /// Transformation calls on the view append to a pending list instead
    /// of executing; terminal reads force the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::prelude::*;
    ///
    /// let collection = ArrayCollection::from_values([Value::from(1), Value::from(2)]);
    /// let view = collection.view().reverse().take(1);
    ///
    /// let forced = view.force().unwrap();
    /// assert_eq!(forced.first(), Some(Value::from(2)));
    /// ```
    #[must_use]
    pub fn view(&self) -> CollectionView {
        CollectionView::new(self.clone())
    }

    // =========================================================================
    // Apply
    // =========================================================================

    /// Runs an arbitrary whole-container transform and rewraps the result
    /// through the carried creator.
    ///
    /// The derived operations (`flat_map`, `index_by`, `flatten`, ...) are
    /// all compositions of a [`callbacks`] factory with this method.
    pub fn apply<F: FnOnce(&OrdArray) -> OrdArray>(&self, transform: F) -> Self {
        self.create(transform(&self.elements))
    }

    /// Like [`ArrayCollection::apply`], for transforms that can fail.
    ///
    /// # Errors
    ///
    /// Propagates the transform's error unchanged.
    pub fn try_apply<F: FnOnce(&OrdArray) -> Result<OrdArray>>(&self, transform: F) -> Result<Self> {
        Ok(self.create(transform(&self.elements)?))
    }

    // =========================================================================
    // Partition and Grouping
    // =========================================================================

    /// Splits the entries into those satisfying the predicate and those
    /// not satisfying it.
    ///
    /// The two parts are disjoint and together hold every original entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::prelude::*;
    ///
    /// let collection = ArrayCollection::from_values([
    ///     Value::from(1),
    ///     Value::from(2),
    ///     Value::from(3),
    /// ]);
    /// let (odd, even) = collection.partition(callbacks::predicate(|value, _key| {
    ///     value.as_int().is_some_and(|number| number % 2 == 1)
    /// }));
    ///
    /// assert_eq!(odd.count(), 2);
    /// assert_eq!(even.count(), 1);
    /// ```
    #[must_use]
    pub fn partition(&self, predicate: ValuePredicate) -> (Self, Self) {
        (
            self.filter(Some(predicate.clone())),
            self.filter_not(Some(predicate)),
        )
    }

    /// Partitions entries into buckets keyed by `selector(value)`.
    ///
    /// Each bucket is a collection built via the supplied creator and
    /// preserves the original per-entry keys; bucket order follows first
    /// appearance.
    #[must_use]
    pub fn group_by(&self, selector: &KeySelector, creator: &Creator) -> IndexMap<Key, Self> {
        let mut buckets: IndexMap<Key, OrdArray> = IndexMap::new();
        for (key, value) in &self.elements {
            buckets
                .entry(selector(value))
                .or_insert_with(OrdArray::new)
                .insert(key.clone(), value.clone());
        }
        buckets
            .into_iter()
            .map(|(group, elements)| (group, creator(elements)))
            .collect()
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// The smallest value by [`Value::compare`], or `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<Value> {
        self.best(std::cmp::Ordering::Less)
    }

    /// The largest value by [`Value::compare`], or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<Value> {
        self.best(std::cmp::Ordering::Greater)
    }

    fn best(&self, wanted: std::cmp::Ordering) -> Option<Value> {
        let mut best: Option<&Value> = None;
        for value in self.elements.values() {
            match best {
                Some(current) if value.compare(current) != wanted => {}
                _ => best = Some(value),
            }
        }
        best.cloned()
    }

    /// The sum of the values' numeric readings, or `None` when empty.
    ///
    /// Integer sums stay integral until they would overflow, then promote
    /// to a float. Non-numeric values contribute zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcol::prelude::*;
    ///
    /// let empty = ArrayCollection::new();
    /// assert_eq!(empty.sum(), None);
    ///
    /// let numbers =
    ///     ArrayCollection::from_values([Value::from(3), Value::from(1), Value::from(2)]);
    /// assert_eq!(numbers.sum(), Some(Value::from(6)));
    /// assert_eq!(numbers.max(), Some(Value::from(3)));
    /// ```
    #[must_use]
    pub fn sum(&self) -> Option<Value> {
        self.accumulate(Number::Int(0), Number::add)
    }

    /// The product of the values' numeric readings, or `None` when empty.
    #[must_use]
    pub fn product(&self) -> Option<Value> {
        self.accumulate(Number::Int(1), Number::mul)
    }

    fn accumulate(&self, initial: Number, combine: fn(Number, Number) -> Number) -> Option<Value> {
        if self.elements.is_empty() {
            return None;
        }
        let mut accumulator = initial;
        for value in self.elements.values() {
            accumulator = combine(accumulator, value.to_number());
        }
        Some(accumulator.into_value())
    }
}

impl Default for ArrayCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArrayCollection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ArrayCollection")
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Enumerable Implementation
// =============================================================================

impl Enumerable for ArrayCollection {
    fn count(&self) -> usize {
        self.elements.len()
    }

    fn first(&self) -> Option<Value> {
        self.elements.first().map(|(_, value)| value.clone())
    }

    fn last(&self) -> Option<Value> {
        self.elements.last().map(|(_, value)| value.clone())
    }

    fn find<P: FnMut(&Value, &Key) -> bool>(&self, mut predicate: P) -> Option<Value> {
        self.elements
            .entries()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value.clone())
    }

    fn exists<P: FnMut(&Value, &Key) -> bool>(&self, mut predicate: P) -> bool {
        self.elements
            .entries()
            .any(|(key, value)| predicate(value, key))
    }

    fn for_all<P: FnMut(&Value, &Key) -> bool>(&self, mut predicate: P) -> bool {
        self.elements
            .entries()
            .all(|(key, value)| predicate(value, key))
    }

    fn count_all<P: FnMut(&Value, &Key) -> bool>(&self, mut predicate: P) -> usize {
        self.elements
            .entries()
            .filter(|(key, value)| predicate(value, key))
            .count()
    }

    fn reduce<F: FnMut(Value, &Value, &Key) -> Value>(
        &self,
        mut callback: F,
        initial: Value,
    ) -> Value {
        let mut accumulator = initial;
        for (key, value) in &self.elements {
            accumulator = callback(accumulator, value, key);
        }
        accumulator
    }

    fn each<F: FnMut(&Value, &Key)>(&self, mut callback: F) {
        for (key, value) in &self.elements {
            callback(value, key);
        }
    }

    fn tap<F: FnOnce(&Self)>(&self, callback: F) -> Self {
        callback(self);
        self.clone()
    }
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl Collection for ArrayCollection {
    fn take(&self, count: i64) -> Self {
        if count <= 0 {
            return self.create(OrdArray::new());
        }
        let wanted = usize::try_from(count).unwrap_or(usize::MAX);
        self.apply(|array| {
            array
                .entries()
                .take(wanted)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    fn filter(&self, predicate: Option<ValuePredicate>) -> Self {
        let predicate = predicate.unwrap_or_else(callbacks::not_empty_like);
        self.apply(move |array| {
            array
                .entries()
                .filter(|(key, value)| predicate(value, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    fn filter_not(&self, predicate: Option<ValuePredicate>) -> Self {
        let predicate = predicate.unwrap_or_else(callbacks::not_empty_like);
        self.apply(move |array| {
            array
                .entries()
                .filter(|(key, value)| !predicate(value, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    fn map(&self, callback: MapCallback) -> Self {
        // The key sequence is zipped with the value traversal through an
        // explicit index, so the value-key pairing never depends on a
        // shared enumeration cursor.
        self.apply(move |array| {
            let keys: Vec<Key> = array.keys().cloned().collect();
            let mut result = OrdArray::with_capacity(keys.len());
            for (index, value) in array.values().enumerate() {
                let key = &keys[index];
                result.insert(key.clone(), callback(value, key));
            }
            result
        })
    }

    fn rest(&self) -> Self {
        self.apply(|array| array.values().skip(1).cloned().collect())
    }

    fn reverse(&self) -> Self {
        self.apply(|array| array.values().rev().cloned().collect())
    }

    fn concatenate(&self, other: &ArrayCollection) -> Self {
        let tail = other.to_array();
        self.apply(move |array| array.values().chain(tail.values()).cloned().collect())
    }

    fn union(&self, other: &ArrayCollection) -> Self {
        let overlay = other.to_array();
        self.apply(move |array| {
            let mut result = OrdArray::with_capacity(array.len() + overlay.len());
            for (key, value) in &overlay {
                result.insert(key.clone(), value.clone());
            }
            for (key, value) in array {
                if !result.contains_key(key) {
                    result.insert(key.clone(), value.clone());
                }
            }
            result
        })
    }

    fn merge(&self, other: &ArrayCollection) -> Self {
        let tail = other.to_array();
        self.apply(move |array| {
            let mut result = OrdArray::with_capacity(array.len() + tail.len());
            for (key, value) in array.entries().chain(tail.entries()) {
                match key {
                    Key::Int(_) => result.push(value.clone()),
                    Key::Str(_) => result.insert(key.clone(), value.clone()),
                }
            }
            result
        })
    }

    fn add(&self, value: Value, key: Option<Key>) -> Self {
        self.apply(move |array| {
            let mut result = array.clone();
            match key {
                Some(key) => result.insert(key, value),
                None => result.push(value),
            }
            result
        })
    }

    fn flat_map(&self, callback: MapCallback) -> Self {
        self.apply(callbacks::flat_map(callback))
    }

    fn index_by(&self, selector: KeySelector) -> Self {
        self.apply(callbacks::index_by(selector))
    }

    fn pick(&self, key: &Key) -> Result<Self> {
        self.try_apply(callbacks::pick(key.clone()))
    }

    fn invoke(&self, method: &str) -> Result<Self> {
        self.try_apply(callbacks::invoke(method.to_owned()))
    }

    fn flatten(&self) -> Self {
        self.apply(callbacks::flatten())
    }

    fn unique(&self, strict: bool) -> Self {
        self.apply(callbacks::unique(strict))
    }

    fn sort_with(&self, comparator: Comparator) -> Self {
        self.apply(callbacks::sort_with(comparator))
    }

    fn sort_by(&self, metric: Metric) -> Self {
        self.apply(callbacks::sort_by(metric))
    }

    fn values(&self) -> Self {
        self.apply(callbacks::values())
    }

    fn keys(&self) -> Self {
        self.apply(callbacks::keys())
    }
}
