//! # ordcol
//!
//! Immutable, functional collections over an insertion-ordered key-value
//! container, with lazy transformation views.
//!
//! ## Overview
//!
//! Two pieces make up the core:
//!
//! - [`ArrayCollection`](collection::ArrayCollection): the eager concrete
//!   collection. Every transformation executes immediately and returns a
//!   new collection; the receiver is never mutated. The combination
//!   operations (`concatenate`, `union`, `merge`) each follow a distinct
//!   key-handling rule.
//! - [`CollectionView`](collection::CollectionView): a lazy view that
//!   records transformation calls in a pending list and replays them only
//!   when a terminal read (or an explicit `force`) demands a concrete
//!   result. A forced view is observably identical to building the same
//!   chain eagerly, operation by operation.
//!
//! Entries pair a [`Key`](value::Key) (integer or string) with a
//! dynamically typed [`Value`](value::Value); the
//! [`OrdArray`](array::OrdArray) container preserves insertion order and
//! is the universal interchange format (`to_array`).
//!
//! ## Example
//!
//! ```rust
//! use ordcol::prelude::*;
//!
//! let numbers = ArrayCollection::from_values([
//!     Value::from(1),
//!     Value::from(2),
//!     Value::from(3),
//! ]);
//!
//! // Eager: each call executes immediately.
//! let doubled = numbers.map(callbacks::mapper(|value, _key| {
//!     Value::from(value.as_int().unwrap_or(0) * 2)
//! }));
//! assert_eq!(doubled.sum(), Some(Value::from(12)));
//!
//! // Lazy: calls append to a pending list; the terminal read forces.
//! let view = numbers.view().reverse().take(2);
//! assert_eq!(view.sum().unwrap(), Some(Value::from(5)));
//! ```
//!
//! ## Thread Safety
//!
//! The core is a single-threaded, synchronous model: callbacks and
//! objects are shared through `Rc`. Collections are never mutated after
//! construction, so sharing a base collection between many derived
//! pipelines is safe within one thread.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the collection types, the capability traits, the value
/// model, and the callback factories.
///
/// # Usage
///
/// ```rust
/// use ordcol::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array::*;
    pub use crate::collection::*;
    pub use crate::error::*;
    pub use crate::value::*;
}

pub mod array;
pub mod collection;
pub mod error;
pub mod value;

pub use error::{Error, Result};
