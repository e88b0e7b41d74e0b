//! # ordset
//!
//! A mutable set that remembers insertion order, with set algebra, recursive
//! flattening of nested sets, and partitioning into subsets.
//!
//! ## Overview
//!
//! - **Set**: [`Set`] keeps unique elements in the order they were first
//!   added, with O(1) membership, insertion, and removal. A set can be
//!   frozen, after which every mutation fails with [`SetError::FrozenState`].
//! - **Algebra**: union, difference, intersection, symmetric difference,
//!   subset/superset comparisons, and the `|`, `+`, `-`, `&`, `^` operators.
//! - **Sources**: bulk operations accept any [`Enumerable`] source; sources
//!   that cannot be iterated are rejected with
//!   [`ArgumentError::NotEnumerable`].
//! - **Nested sets**: sets held by reference ([`SharedSet`], [`Member`])
//!   can be flattened with [`Set::flatten`]; reference cycles are detected.
//! - **Partitioning**: [`Set::classify`], [`Set::divide_by_key`], and
//!   [`Set::divide_by_relation`] (strongly connected components).
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Set`] and [`OrderedMap`]
//! - `indexmap`: use `indexmap::IndexMap` as a set's storage
//! - `fxhash`: default hasher is `rustc_hash::FxBuildHasher`
//! - `ahash`: default hasher is `ahash::RandomState`
//! - `full`: `serde` and `indexmap`
//!
//! ## Example
//!
//! ```rust
//! use ordset::prelude::*;
//!
//! let mut set: Set<i32> = [3, 1, 2].into();
//! set.add(1)?.add(4)?;
//! assert_eq!(set.to_vec(), vec![3, 1, 2, 4]);
//!
//! let evens = set.divide_by_key(|value| value % 2 == 0);
//! assert_eq!(evens.len(), 2);
//! assert_eq!(set.to_string(), "#<Set: {3, 1, 2, 4}>");
//! # Ok::<(), SetError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ArgumentError, FrozenStateError, SetError};
    pub use crate::nested::{Member, Nested, SharedSet};
    pub use crate::set::Set;
    pub use crate::source::{Enumerable, IterSource, SetLike};
}

pub mod error;
pub mod nested;
pub mod set;
pub mod source;
pub mod storage;

mod flatten;
mod partition;

pub use error::{ArgumentError, FrozenStateError, SetError};
pub use nested::{Member, Nested, SharedSet};
pub use set::Set;
pub use source::{Entries, Enumerable, IterSource, SetLike};
pub use storage::OrderedMap;
