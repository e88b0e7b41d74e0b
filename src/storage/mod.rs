//! Backing storage for [`Set`](crate::Set).
//!
//! A set never touches a concrete container directly; it talks to its
//! storage through the narrow [`Storage`] interface. The default storage is
//! [`OrderedMap`], an insertion-ordered hash map used here with `()` values.
//!
//! # Hasher selection
//!
//! [`DefaultHashBuilder`] is chosen at compile time:
//!
//! | Feature  | Hasher                         |
//! |----------|--------------------------------|
//! | `fxhash` | `rustc_hash::FxBuildHasher`    |
//! | `ahash`  | `ahash::RandomState`           |
//! | (none)   | `std::hash::RandomState`       |
//!
//! When both features are enabled, `fxhash` wins.

use std::borrow::Borrow;
use std::hash::Hash;

mod ordered_map;

#[cfg(feature = "indexmap")]
mod index_map;

pub use ordered_map::OrderedMap;
pub use ordered_map::OrderedMapIntoIterator;
pub use ordered_map::OrderedMapIterator;
pub use ordered_map::OrderedMapKeys;

// =============================================================================
// Hasher Configuration
// =============================================================================

/// The hash builder used when none is specified.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hash builder used when none is specified.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hash builder used when none is specified.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::hash::RandomState;

// =============================================================================
// Storage Trait
// =============================================================================

/// The narrow interface a [`Set`](crate::Set) needs from its backing map.
///
/// Implementations must keep keys unique and iterate them in insertion order
/// of first insertion. Re-inserting a present key must not move it.
///
/// # Examples
///
/// ```rust
/// use ordset::storage::{OrderedMap, Storage};
///
/// let mut storage: OrderedMap<i32> = Storage::with_capacity(4);
/// assert!(Storage::insert(&mut storage, 3));
/// assert!(Storage::insert(&mut storage, 1));
/// assert!(!Storage::insert(&mut storage, 3));
///
/// let keys: Vec<i32> = Storage::iter(&storage).copied().collect();
/// assert_eq!(keys, vec![3, 1]);
/// ```
pub trait Storage<T>: Clone + Default {
    /// Ordered iterator over the stored elements.
    type Iter<'a>: Iterator<Item = &'a T> + ExactSizeIterator + Clone
    where
        Self: 'a,
        T: 'a;

    /// Display name of sets backed by this storage.
    const TYPE_NAME: &'static str = "Set";

    /// Creates empty storage with room for at least `capacity` elements.
    fn with_capacity(capacity: usize) -> Self;

    /// Returns the number of stored elements.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `element` is stored.
    fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Stores `element`, returning `false` if it was already present.
    fn insert(&mut self, element: T) -> bool;

    /// Removes `element`, returning `false` if it was absent.
    fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Resets the storage to empty.
    fn clear(&mut self);

    /// Inserts every element of `other`, in `other`'s order.
    fn merge(&mut self, other: &Self);

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// Every element is visited exactly once, in order, even though elements
    /// are removed during the walk.
    fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&T) -> bool;

    /// Iterates the stored elements in insertion order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Consumes the storage, returning the elements in insertion order.
    fn into_vec(self) -> Vec<T>;

    /// Content equality between two storages of the same type.
    fn content_eq(&self, other: &Self) -> bool
    where
        T: Hash + Eq,
    {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}
