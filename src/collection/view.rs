//! Lazy views: deferred transformation chains over a base collection.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{
    ArrayCollection, Collection, Comparator, Creator, Enumerable, KeySelector, MapCallback, Metric,
    ValuePredicate,
};
use crate::array::OrdArray;
use crate::error::Result;
use crate::value::{Key, Value};

// =============================================================================
// Pending Operations
// =============================================================================

/// A recorded transformation call: the operation name plus its arguments.
enum PendingOp {
    Take(i64),
    Filter(Option<ValuePredicate>),
    FilterNot(Option<ValuePredicate>),
    Map(MapCallback),
    Rest,
    Reverse,
    Concatenate(ArrayCollection),
    Union(ArrayCollection),
    Merge(ArrayCollection),
    Add(Value, Option<Key>),
    FlatMap(MapCallback),
    IndexBy(KeySelector),
    Pick(Key),
    Invoke(String),
    Flatten,
    Unique(bool),
    SortWith(Comparator),
    SortBy(Metric),
    Values,
    Keys,
}

impl PendingOp {
    /// Applies this operation exactly as the eager collection would.
    ///
    /// Forcing is a fold of this over the recorded chain, which is what
    /// makes a forced view observably identical to eager evaluation.
    fn apply_to(&self, base: &ArrayCollection) -> Result<ArrayCollection> {
        Ok(match self {
            Self::Take(count) => base.take(*count),
            Self::Filter(predicate) => base.filter(predicate.clone()),
            Self::FilterNot(predicate) => base.filter_not(predicate.clone()),
            Self::Map(callback) => base.map(callback.clone()),
            Self::Rest => base.rest(),
            Self::Reverse => base.reverse(),
            Self::Concatenate(other) => base.concatenate(other),
            Self::Union(other) => base.union(other),
            Self::Merge(other) => base.merge(other),
            Self::Add(value, key) => base.add(value.clone(), key.clone()),
            Self::FlatMap(callback) => base.flat_map(callback.clone()),
            Self::IndexBy(selector) => base.index_by(selector.clone()),
            Self::Pick(key) => base.pick(key)?,
            Self::Invoke(method) => base.invoke(method)?,
            Self::Flatten => base.flatten(),
            Self::Unique(strict) => base.unique(*strict),
            Self::SortWith(comparator) => base.sort_with(comparator.clone()),
            Self::SortBy(metric) => base.sort_by(metric.clone()),
            Self::Values => base.values(),
            Self::Keys => base.keys(),
        })
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Take(_) => "take",
            Self::Filter(_) => "filter",
            Self::FilterNot(_) => "filter_not",
            Self::Map(_) => "map",
            Self::Rest => "rest",
            Self::Reverse => "reverse",
            Self::Concatenate(_) => "concatenate",
            Self::Union(_) => "union",
            Self::Merge(_) => "merge",
            Self::Add(..) => "add",
            Self::FlatMap(_) => "flat_map",
            Self::IndexBy(_) => "index_by",
            Self::Pick(_) => "pick",
            Self::Invoke(_) => "invoke",
            Self::Flatten => "flatten",
            Self::Unique(_) => "unique",
            Self::SortWith(_) => "sort_with",
            Self::SortBy(_) => "sort_by",
            Self::Values => "values",
            Self::Keys => "keys",
        }
    }
}

/// One node in the immutable pending-operation list, newest first.
///
/// Views derived from a common prefix share their tail.
struct PendingNode {
    op: PendingOp,
    prev: Option<Rc<PendingNode>>,
}

// =============================================================================
// CollectionView Definition
// =============================================================================

/// A lazy view over a base collection.
///
/// Transformation calls append a pending `(operation, arguments)` node in
/// O(1) and return a new unforced view; nothing is materialized until a
/// terminal read or an explicit [`CollectionView::force`] replays the
/// chain, in order, against the base. Forcing does not mutate the view:
/// forcing twice independently recomputes the full chain each time, so
/// retain the forced result if you need it more than once.
///
/// Terminal reads return `Result` because a recorded `pick` or `invoke`
/// can only fail once its operand values are observed, which happens at
/// force time.
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
/// let view = collection
///     .view()
///     .map(callbacks::mapper(|value, _key| {
///         Value::from(value.as_int().unwrap_or(0) * 2)
///     }))
///     .reverse();
///
/// // Nothing has run yet; the chain replays on the terminal call.
/// assert_eq!(view.count().unwrap(), 3);
/// assert_eq!(view.first().unwrap(), Some(Value::from(6)));
/// ```
#[derive(Clone)]
pub struct CollectionView {
    base: ArrayCollection,
    pending: Option<Rc<PendingNode>>,
    creator: Creator,
}

impl CollectionView {
    /// Opens a fresh view with an empty pending list over `base`.
    #[must_use]
    pub fn new(base: ArrayCollection) -> Self {
        Self {
            creator: base.creator(),
            base,
            pending: None,
        }
    }

    /// The late-bound factory forced results are produced with.
    #[must_use]
    pub fn creator(&self) -> Creator {
        self.creator.clone()
    }

    /// The number of recorded, not-yet-applied operations.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        let mut count = 0;
        let mut node = self.pending.as_deref();
        while let Some(current) = node {
            count += 1;
            node = current.prev.as_deref();
        }
        count
    }

    fn with_op(&self, op: PendingOp) -> Self {
        Self {
            base: self.base.clone(),
            pending: Some(Rc::new(PendingNode {
                op,
                prev: self.pending.clone(),
            })),
            creator: self.creator.clone(),
        }
    }

    // =========================================================================
    // Forcing
    // =========================================================================

    /// Materializes the view: replays every recorded operation, oldest
    /// first, against the base collection.
    ///
    /// # Errors
    ///
    /// Returns the error of the first recorded `pick`/`invoke` whose
    /// lookup fails; operations recorded after it are not applied.
    pub fn force(&self) -> Result<ArrayCollection> {
        let mut ops: Vec<&PendingOp> = Vec::with_capacity(self.pending_count());
        let mut node = self.pending.as_deref();
        while let Some(current) = node {
            ops.push(&current.op);
            node = current.prev.as_deref();
        }

        let mut current = self.base.clone();
        for op in ops.into_iter().rev() {
            current = op.apply_to(&current)?;
        }
        Ok(current)
    }

    // =========================================================================
    // Terminal Reads
    // =========================================================================

    /// Forces the view and returns the number of entries.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure; see [`CollectionView::force`].
    pub fn count(&self) -> Result<usize> {
        Ok(self.force()?.count())
    }

    /// Forces the view and returns whether it is empty.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.force()?.is_empty())
    }

    /// Forces the view and returns the first value.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn first(&self) -> Result<Option<Value>> {
        Ok(self.force()?.first())
    }

    /// Forces the view and returns the last value.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn last(&self) -> Result<Option<Value>> {
        Ok(self.force()?.last())
    }

    /// Forces the view and returns the first value satisfying the
    /// predicate.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn find<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> Result<Option<Value>> {
        Ok(self.force()?.find(predicate))
    }

    /// Forces the view and returns whether any entry satisfies the
    /// predicate.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn exists<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> Result<bool> {
        Ok(self.force()?.exists(predicate))
    }

    /// Forces the view and returns whether every entry satisfies the
    /// predicate.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn for_all<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> Result<bool> {
        Ok(self.force()?.for_all(predicate))
    }

    /// Forces the view and counts the entries satisfying the predicate.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn count_all<P: FnMut(&Value, &Key) -> bool>(&self, predicate: P) -> Result<usize> {
        Ok(self.force()?.count_all(predicate))
    }

    /// Forces the view and folds the entries in order.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn reduce<F: FnMut(Value, &Value, &Key) -> Value>(
        &self,
        callback: F,
        initial: Value,
    ) -> Result<Value> {
        Ok(self.force()?.reduce(callback, initial))
    }

    /// Forces the view and calls the callback for every entry.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn each<F: FnMut(&Value, &Key)>(&self, callback: F) -> Result<()> {
        self.force()?.each(callback);
        Ok(())
    }

    /// Forces the view, calls the callback with the concrete collection,
    /// and returns that collection.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn tap<F: FnOnce(&ArrayCollection)>(&self, callback: F) -> Result<ArrayCollection> {
        let forced = self.force()?;
        callback(&forced);
        Ok(forced)
    }

    /// Forces the view and snapshots the result as a plain container.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn to_array(&self) -> Result<OrdArray> {
        Ok(self.force()?.to_array())
    }

    /// Forces the view and splits the result with
    /// [`ArrayCollection::partition`].
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn partition(&self, predicate: ValuePredicate) -> Result<(ArrayCollection, ArrayCollection)> {
        Ok(self.force()?.partition(predicate))
    }

    /// Forces the view and groups the result with
    /// [`ArrayCollection::group_by`], building buckets through this
    /// view's creator.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn group_by(&self, selector: &KeySelector) -> Result<IndexMap<Key, ArrayCollection>> {
        Ok(self.force()?.group_by(selector, &self.creator))
    }

    /// Forces the view and returns the smallest value.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn min(&self) -> Result<Option<Value>> {
        Ok(self.force()?.min())
    }

    /// Forces the view and returns the largest value.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn max(&self) -> Result<Option<Value>> {
        Ok(self.force()?.max())
    }

    /// Forces the view and sums the values.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn sum(&self) -> Result<Option<Value>> {
        Ok(self.force()?.sum())
    }

    /// Forces the view and multiplies the values.
    ///
    /// # Errors
    ///
    /// Propagates a forcing failure.
    pub fn product(&self) -> Result<Option<Value>> {
        Ok(self.force()?.product())
    }
}

impl fmt::Debug for CollectionView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::with_capacity(self.pending_count());
        let mut node = self.pending.as_deref();
        while let Some(current) = node {
            names.push(current.op.name());
            node = current.prev.as_deref();
        }
        names.reverse();
        formatter
            .debug_struct("CollectionView")
            .field("base", &self.base)
            .field("pending", &names)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Collection Implementation (deferred)
// =============================================================================

impl Collection for CollectionView {
    fn take(&self, count: i64) -> Self {
        self.with_op(PendingOp::Take(count))
    }

    fn filter(&self, predicate: Option<ValuePredicate>) -> Self {
        self.with_op(PendingOp::Filter(predicate))
    }

    fn filter_not(&self, predicate: Option<ValuePredicate>) -> Self {
        self.with_op(PendingOp::FilterNot(predicate))
    }

    fn map(&self, callback: MapCallback) -> Self {
        self.with_op(PendingOp::Map(callback))
    }

    fn rest(&self) -> Self {
        self.with_op(PendingOp::Rest)
    }

    fn reverse(&self) -> Self {
        self.with_op(PendingOp::Reverse)
    }

    fn concatenate(&self, other: &ArrayCollection) -> Self {
        self.with_op(PendingOp::Concatenate(other.clone()))
    }

    fn union(&self, other: &ArrayCollection) -> Self {
        self.with_op(PendingOp::Union(other.clone()))
    }

    fn merge(&self, other: &ArrayCollection) -> Self {
        self.with_op(PendingOp::Merge(other.clone()))
    }

    fn add(&self, value: Value, key: Option<Key>) -> Self {
        self.with_op(PendingOp::Add(value, key))
    }

    fn flat_map(&self, callback: MapCallback) -> Self {
        self.with_op(PendingOp::FlatMap(callback))
    }

    fn index_by(&self, selector: KeySelector) -> Self {
        self.with_op(PendingOp::IndexBy(selector))
    }

    fn pick(&self, key: &Key) -> Result<Self> {
        Ok(self.with_op(PendingOp::Pick(key.clone())))
    }

    fn invoke(&self, method: &str) -> Result<Self> {
        Ok(self.with_op(PendingOp::Invoke(method.to_owned())))
    }

    fn flatten(&self) -> Self {
        self.with_op(PendingOp::Flatten)
    }

    fn unique(&self, strict: bool) -> Self {
        self.with_op(PendingOp::Unique(strict))
    }

    fn sort_with(&self, comparator: Comparator) -> Self {
        self.with_op(PendingOp::SortWith(comparator))
    }

    fn sort_by(&self, metric: Metric) -> Self {
        self.with_op(PendingOp::SortBy(metric))
    }

    fn values(&self) -> Self {
        self.with_op(PendingOp::Values)
    }

    fn keys(&self) -> Self {
        self.with_op(PendingOp::Keys)
    }
}
