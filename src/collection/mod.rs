//! Collections: the eager concrete collection, the lazy view, and the
//! capability contracts they satisfy.
//!
//! Two contracts define the boundary consumed by surrounding code:
//!
//! - [`Enumerable`] — terminal reads (`count`, `first`, `reduce`, ...).
//!   On a lazy view these force the pending chain first, so the view's
//!   mirrors of them return `Result`.
//! - [`Collection`] — the transformations. On [`ArrayCollection`] each
//!   call executes immediately and returns a new eager collection; on
//!   [`CollectionView`] each call appends to the pending list in O(1) and
//!   returns a new unforced view.
//!
//! Transformation callbacks are type-erased `Rc<dyn Fn ...>` values so the
//! view can record them in its pending list; the [`callbacks`] module
//! provides factories for them.

pub mod callbacks;

mod eager;
mod view;

pub use eager::ArrayCollection;
pub use view::CollectionView;

use std::cmp::Ordering;
use std::rc::Rc;

use crate::array::OrdArray;
use crate::error::Result;
use crate::value::{Key, Value};

// =============================================================================
// Callback Types
// =============================================================================

/// A predicate over an entry, `(value, key) -> bool`.
pub type ValuePredicate = Rc<dyn Fn(&Value, &Key) -> bool>;

/// An entry transformation, `(value, key) -> value`.
pub type MapCallback = Rc<dyn Fn(&Value, &Key) -> Value>;

/// Derives a key from a value, for `index_by` and `group_by`.
pub type KeySelector = Rc<dyn Fn(&Value) -> Key>;

/// A three-way comparator over values, for `sort_with`.
pub type Comparator = Rc<dyn Fn(&Value, &Value) -> Ordering>;

/// Derives the sort metric of a value, for `sort_by`.
pub type Metric = Rc<dyn Fn(&Value) -> Value>;

/// The late-bound factory producing concrete collections from containers.
///
/// Carried by every collection instance and exposed through
/// [`ArrayCollection::creator`], so that generic operations (`group_by`,
/// `partition`, view forcing) can produce correctly-configured results
/// without hardcoding a constructor.
pub type Creator = Rc<dyn Fn(OrdArray) -> ArrayCollection>;

// =============================================================================
// Enumerable Contract
// =============================================================================

/// Terminal, read-only operations over a collection.
///
/// All of these are terminal with respect to a lazy view: the view forces
/// its pending chain before answering, which is why
/// [`CollectionView`] mirrors this surface with `Result`-returning
/// methods instead of implementing the trait.
pub trait Enumerable: Sized {
    /// Returns the number of entries.
    fn count(&self) -> usize;

    /// Returns `true` if the collection holds no entries.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the first value, if any.
    fn first(&self) -> Option<Value>;

    /// Returns the last value, if any.
    fn last(&self) -> Option<Value>;

    /// Returns the first value satisfying the predicate.
    fn find<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> Option<Value>;

    /// Returns `true` if any entry satisfies the predicate.
    fn exists<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> bool;

    /// Returns `true` if every entry satisfies the predicate.
    ///
    /// Vacuously `true` on an empty collection.
    fn for_all<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> bool;

    /// Counts the entries satisfying the predicate.
    fn count_all<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> usize;

    /// Folds the entries in order, threading an accumulator.
    fn reduce<F: FnMut(Value, &Value, &Key) -> Value>(&self, callback: F, initial: Value) -> Value;

    /// Calls the callback for every entry, in order.
    fn each<F: FnMut(&Value, &Key)>(&self, callback: F);

    /// Calls the callback with the whole collection, then returns the
    /// collection for further chaining.
    fn tap<F: FnOnce(&Self)>(&self, callback: F) -> Self;
}

// =============================================================================
// Collection Contract
// =============================================================================

/// The transformation operations a collection supports.
///
/// Every method returns a new collection; the receiver is never mutated.
/// The combination operands are concrete [`ArrayCollection`]s, which makes
/// operand type mismatches unrepresentable at the call boundary.
///
/// `pick` and `invoke` return `Result` because a per-value lookup can
/// fail; on a lazy view the call itself always succeeds (it only appends
/// to the pending list) and any failure surfaces at force time.
pub trait Collection: Sized {
    /// Keeps the first `count` entries in order, keys preserved.
    ///
    /// A zero or negative count yields an empty collection.
    fn take(&self, count: i64) -> Self;

    /// Keeps entries where the predicate holds, keys preserved.
    ///
    /// Without a predicate, keeps the entries whose values are not
    /// empty-like (see [`Value::is_empty_like`]).
    fn filter(&self, predicate: Option<ValuePredicate>) -> Self;

    /// Keeps entries where the predicate does not hold; the exact
    /// complement of [`Collection::filter`], including the defaults.
    fn filter_not(&self, predicate: Option<ValuePredicate>) -> Self;

    /// Applies the callback to every entry, keys preserved.
    fn map(&self, callback: MapCallback) -> Self;

    /// Drops the first entry and reindexes the remainder from zero.
    fn rest(&self) -> Self;

    /// Reverses entry order and reindexes from zero.
    fn reverse(&self) -> Self;

    /// Appends the other collection's values after this one's, dropping
    /// the keys of both sides and reindexing from zero.
    fn concatenate(&self, other: &ArrayCollection) -> Self;

    /// Layers the other collection over this one, keys preserved from
    /// both sides; the other's value wins on key collision and the
    /// combined key order starts from the other side.
    fn union(&self, other: &ArrayCollection) -> Self;

    /// Merges this collection with the other: integer keys from both
    /// sides are renumbered sequentially across the whole combined
    /// sequence, string keys are preserved and the other's value
    /// overwrites in place on collision.
    fn merge(&self, other: &ArrayCollection) -> Self;

    /// Appends a value, either under the next sequential integer key or
    /// under the given key (overwriting in place if it exists).
    fn add(&self, value: Value, key: Option<Key>) -> Self;

    /// Maps every entry and splices array results positionally; the
    /// result is reindexed from zero.
    fn flat_map(&self, callback: MapCallback) -> Self;

    /// Rekeys every entry by `selector(value)`; later entries overwrite
    /// earlier ones on key collision.
    fn index_by(&self, selector: KeySelector) -> Self;

    /// Extracts the named key or member from each value, keys preserved.
    ///
    /// # Errors
    ///
    /// A value lacking the key/member, or one that is neither an array
    /// nor an object, aborts the whole transformation.
    fn pick(&self, key: &Key) -> Result<Self>;

    /// Calls the named zero-argument method on each value, keys
    /// preserved.
    ///
    /// # Errors
    ///
    /// A non-object value or an unknown method aborts the whole
    /// transformation.
    fn invoke(&self, method: &str) -> Result<Self>;

    /// Splices one level of nested arrays positionally; other values pass
    /// through. The result is reindexed from zero.
    fn flatten(&self) -> Self;

    /// Removes duplicate values. Strict mode compares with exact
    /// type-and-value equality and preserves first occurrences with their
    /// keys; loose mode compares coercively and reindexes.
    fn unique(&self, strict: bool) -> Self;

    /// Reorders values by a three-way comparator; the result is reindexed
    /// from zero. The sort is stable.
    fn sort_with(&self, comparator: Comparator) -> Self;

    /// Reorders values by ascending `metric(value)`; the result is
    /// reindexed from zero. The sort is stable.
    fn sort_by(&self, metric: Metric) -> Self;

    /// The values alone, reindexed from zero.
    fn values(&self) -> Self;

    /// The keys alone, as values, reindexed from zero.
    fn keys(&self) -> Self;
}
