//! Stateless factories for whole-container transforms.
//!
//! Each factory takes an operation's parameters and returns a closure
//! consumable by [`ArrayCollection::apply`] or
//! [`ArrayCollection::try_apply`]. The factories hold no shared state and
//! are referentially transparent; the returned closures are safe to reuse
//! across collections.
//!
//! [`ArrayCollection::apply`]: super::ArrayCollection::apply
//! [`ArrayCollection::try_apply`]: super::ArrayCollection::try_apply

use std::rc::Rc;

use super::{Comparator, KeySelector, MapCallback, Metric, ValuePredicate};
use crate::array::OrdArray;
use crate::error::{Error, Result};
use crate::value::{Key, Value};

/// Wraps a closure into a storable [`ValuePredicate`].
pub fn predicate<P: Fn(&Value, &Key) -> bool + 'static>(callback: P) -> ValuePredicate {
    Rc::new(callback)
}

/// Wraps a closure into a storable [`MapCallback`].
pub fn mapper<F: Fn(&Value, &Key) -> Value + 'static>(callback: F) -> MapCallback {
    Rc::new(callback)
}

/// Wraps a closure into a storable [`KeySelector`].
pub fn selector<F: Fn(&Value) -> Key + 'static>(callback: F) -> KeySelector {
    Rc::new(callback)
}

/// Wraps a closure into a storable [`Comparator`].
pub fn comparator<F: Fn(&Value, &Value) -> std::cmp::Ordering + 'static>(
    callback: F,
) -> Comparator {
    Rc::new(callback)
}

/// Wraps a closure into a storable [`Metric`].
pub fn metric<F: Fn(&Value) -> Value + 'static>(callback: F) -> Metric {
    Rc::new(callback)
}

/// The default `filter` predicate: keeps values that are not empty-like.
#[must_use]
pub fn not_empty_like() -> ValuePredicate {
    Rc::new(|value, _key| value.is_truthy())
}

/// A comparator ordering values by ascending `metric(value)`.
#[must_use]
pub fn ascending(metric: Metric) -> Comparator {
    Rc::new(move |left, right| metric(left).compare(&metric(right)))
}

/// Transform for `flat_map`: map every entry, splicing array results.
pub fn flat_map(callback: MapCallback) -> impl Fn(&OrdArray) -> OrdArray {
    move |array| {
        let mut result = OrdArray::new();
        for (key, value) in array {
            match callback(value, key) {
                Value::Array(nested) => {
                    for element in nested.values() {
                        result.push(element.clone());
                    }
                }
                mapped => result.push(mapped),
            }
        }
        result
    }
}

/// Transform for `index_by`: rekey every entry by `selector(value)`.
pub fn index_by(selector: KeySelector) -> impl Fn(&OrdArray) -> OrdArray {
    move |array| {
        let mut result = OrdArray::with_capacity(array.len());
        for value in array.values() {
            result.insert(selector(value), value.clone());
        }
        result
    }
}

/// Fallible transform for `pick`: extract `key` from every value.
pub fn pick(key: Key) -> impl Fn(&OrdArray) -> Result<OrdArray> {
    move |array| {
        let mut result = OrdArray::with_capacity(array.len());
        for (at, value) in array {
            let picked = match value {
                Value::Array(nested) => {
                    nested.get(&key).cloned().ok_or_else(|| Error::MissingKey {
                        key: key.clone(),
                        at: at.clone(),
                    })?
                }
                Value::Object(object) => match &key {
                    Key::Str(member) => {
                        object.member(member).ok_or_else(|| Error::MissingMember {
                            member: member.clone(),
                            type_name: object.type_name(),
                            at: at.clone(),
                        })?
                    }
                    Key::Int(_) => {
                        return Err(Error::NotIndexable {
                            key: key.clone(),
                            type_name: object.type_name(),
                            at: at.clone(),
                        });
                    }
                },
                other => {
                    return Err(Error::NotIndexable {
                        key: key.clone(),
                        type_name: other.type_name(),
                        at: at.clone(),
                    });
                }
            };
            result.insert(at.clone(), picked);
        }
        Ok(result)
    }
}

/// Fallible transform for `invoke`: call `method` on every object value.
pub fn invoke(method: String) -> impl Fn(&OrdArray) -> Result<OrdArray> {
    move |array| {
        let mut result = OrdArray::with_capacity(array.len());
        for (at, value) in array {
            let Value::Object(object) = value else {
                return Err(Error::NotInvokable {
                    method: method.clone(),
                    type_name: value.type_name(),
                    at: at.clone(),
                });
            };
            result.insert(at.clone(), object.call(&method)?);
        }
        Ok(result)
    }
}

/// Transform for `flatten`: splice one level of nested arrays.
pub fn flatten() -> impl Fn(&OrdArray) -> OrdArray {
    |array| {
        let mut result = OrdArray::new();
        for value in array.values() {
            match value {
                Value::Array(nested) => {
                    for element in nested.values() {
                        result.push(element.clone());
                    }
                }
                other => result.push(other.clone()),
            }
        }
        result
    }
}

/// Transform for `unique`: drop values already seen.
///
/// Strict mode keeps first occurrences under their original keys; loose
/// mode reindexes.
pub fn unique(strict: bool) -> impl Fn(&OrdArray) -> OrdArray {
    move |array| {
        let mut seen: Vec<Value> = Vec::new();
        let mut result = OrdArray::new();
        for (key, value) in array {
            let duplicate = seen.iter().any(|kept| {
                if strict {
                    kept.strict_eq(value)
                } else {
                    kept.loose_eq(value)
                }
            });
            if !duplicate {
                seen.push(value.clone());
                if strict {
                    result.insert(key.clone(), value.clone());
                } else {
                    result.push(value.clone());
                }
            }
        }
        result
    }
}

/// Transform for `sort_with`: reorder values by a comparator, reindexed.
///
/// The underlying sort is stable, so equal values keep their relative
/// order.
pub fn sort_with(comparator: Comparator) -> impl Fn(&OrdArray) -> OrdArray {
    move |array| {
        let mut values: Vec<Value> = array.values().cloned().collect();
        values.sort_by(|left, right| comparator(left, right));
        values.into_iter().collect()
    }
}

/// Transform for `sort_by`: reorder values by ascending metric, reindexed.
pub fn sort_by(metric: Metric) -> impl Fn(&OrdArray) -> OrdArray {
    sort_with(ascending(metric))
}

/// Transform for `values`: the values alone, reindexed.
pub fn values() -> impl Fn(&OrdArray) -> OrdArray {
    OrdArray::reindexed
}

/// Transform for `keys`: the keys alone as values, reindexed.
pub fn keys() -> impl Fn(&OrdArray) -> OrdArray {
    |array| array.keys().cloned().map(Value::from).collect()
}
