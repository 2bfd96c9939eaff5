//! Error types for collection transformations.
//!
//! Failure is minimal by design: the collection core is pure in-memory data,
//! and the only representable failures are per-value lookup failures raised
//! by [`pick`](crate::collection::Collection::pick) and
//! [`invoke`](crate::collection::Collection::invoke). Aggregates on empty
//! collections return `None`, and out-of-range `take` counts yield empty
//! collections; neither is an error.
//!
//! A lookup failure aborts the whole transformation. On an eager collection
//! it surfaces immediately; on a lazy view it surfaces when the view is
//! forced, because that is the first point at which the offending value is
//! observed.

use thiserror::Error;

use crate::value::Key;

/// Errors raised by collection transformations.
///
/// Every variant carries the key of the entry whose value caused the
/// failure (`at`), so a caller can locate the offending element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `pick` found an array value without the requested entry.
    #[error("no entry `{key}` in array value at key `{at}`")]
    MissingKey {
        /// The key that was being picked.
        key: Key,
        /// The key of the entry whose array value lacked it.
        at: Key,
    },

    /// `pick` found an object value without the requested member.
    #[error("no member `{member}` on {type_name} value at key `{at}`")]
    MissingMember {
        /// The member name that was being picked.
        member: String,
        /// Type name reported by the object.
        type_name: &'static str,
        /// The key of the entry whose object value lacked the member.
        at: Key,
    },

    /// `pick` was applied to a value that is neither indexable nor an
    /// object with named members.
    #[error("cannot pick `{key}` from {type_name} value at key `{at}`")]
    NotIndexable {
        /// The key that was being picked.
        key: Key,
        /// Type name of the offending value.
        type_name: &'static str,
        /// The key of the offending entry.
        at: Key,
    },

    /// `invoke` was applied to a value that is not an object.
    #[error("cannot invoke `{method}` on {type_name} value at key `{at}`")]
    NotInvokable {
        /// The method that was being invoked.
        method: String,
        /// Type name of the offending value.
        type_name: &'static str,
        /// The key of the offending entry.
        at: Key,
    },

    /// An object rejected a method name passed to `invoke`.
    ///
    /// Produced by [`Object::call`](crate::value::Object::call)
    /// implementations.
    #[error("object of type {type_name} has no method `{method}`")]
    UnknownMethod {
        /// The rejected method name.
        method: String,
        /// Type name reported by the object.
        type_name: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
