//! Mutable, insertion-ordered set.
//!
//! This module provides [`Set`], a collection of unique elements stored as
//! the keys of a backing [`Storage`].
//!
//! # Overview
//!
//! - Iteration follows insertion order of first addition; re-adding a
//!   present element does not move it.
//! - `contains`, `add`, `delete`, `len` are O(1) on the default storage.
//! - A set can be frozen. Every mutating method checks the frozen flag
//!   before doing anything else and fails with
//!   [`SetError::FrozenState`] without touching the contents.
//!
//! # Examples
//!
//! ```rust
//! use ordset::Set;
//!
//! let mut set: Set<&str> = Set::new();
//! set.add("b")?.add("a")?.add("b")?;
//! assert_eq!(set.to_vec(), vec!["b", "a"]);
//!
//! assert!(set.insert("c")?);
//! assert!(!set.insert("c")?);
//!
//! set.freeze();
//! assert!(set.add("d").unwrap_err().is_frozen_error());
//! # Ok::<(), ordset::SetError>(())
//! ```
//!
//! # Set-to-Set merges
//!
//! [`Set::merge_set`] (and the `|`/`+` operators) copy the other set's
//! storage in bulk through [`Storage::merge`] rather than adding element
//! by element. The resulting contents and order are identical to repeated
//! [`Set::add`] calls.

use std::borrow::Borrow;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::marker::PhantomData;

use crate::error::{FrozenStateError, SetError};
use crate::source::{Entries, Enumerable, SetLike, entries};
use crate::storage::{OrderedMap, Storage};

mod algebra;
mod display;

/// Ordered iterator over the elements of a [`Set`].
pub type Iter<'a, T, M> = <M as Storage<T>>::Iter<'a>;

// =============================================================================
// Set Definition
// =============================================================================

/// A mutable set that remembers insertion order.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Clone`, `Hash`, and `Eq`.
/// * `M` - The backing storage, [`OrderedMap`] by default.
///
/// # Examples
///
/// ```rust
/// use ordset::Set;
///
/// let set: Set<i32> = [3, 1, 3, 2].into_iter().collect();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.to_vec(), vec![3, 1, 2]);
/// ```
pub struct Set<T, M = OrderedMap<T>> {
    storage: M,
    frozen: bool,
    marker: PhantomData<T>,
}

impl<T, M> Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(M::default())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(M::with_capacity(capacity))
    }

    /// Wraps an existing storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    /// use ordset::storage::OrderedMap;
    ///
    /// let mut storage: OrderedMap<i32> = OrderedMap::new();
    /// storage.insert(7, ());
    /// let set = Set::with_storage(storage);
    /// assert!(set.contains(&7));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_storage(storage: M) -> Self {
        Self {
            storage,
            frozen: false,
            marker: PhantomData,
        }
    }

    /// Builds a set from any [`Enumerable`] source.
    ///
    /// The initial capacity comes from the source's size hint when it has one.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if the source cannot be iterated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = Set::from_source(&vec![1, 2, 2, 3])?;
    /// assert_eq!(set.len(), 3);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn from_source<E>(source: &E) -> Result<Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        Self::from_source_with(source, std::convert::identity)
    }

    /// Builds a set from `source`, passing every element through `transform`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if the source cannot be iterated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = Set::from_source_with(&[1, 2, 3, 4], |value: i32| value % 2)?;
    /// assert_eq!(set.to_vec(), vec![1, 0]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn from_source_with<U, E, F>(source: &E, mut transform: F) -> Result<Self, SetError>
    where
        E: Enumerable<U> + ?Sized,
        F: FnMut(U) -> T,
    {
        let elements = entries(source)?;
        let mut set = Self::with_capacity(source.size_hint().unwrap_or(0));
        for element in elements {
            set.storage.insert(transform(element));
        }
        Ok(set)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns `true` if `element` is a member.
    #[inline]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.contains(element)
    }

    /// Iterates the elements in insertion order.
    ///
    /// The iterator is sized to the set's length when created and can be
    /// cloned to restart the traversal.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, M> {
        self.storage.iter()
    }

    /// Returns the elements in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Returns the backing storage.
    #[inline]
    pub const fn storage(&self) -> &M {
        &self.storage
    }

    /// Returns `true` once [`Set::freeze`] has been called.
    #[inline]
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes the set. Every later mutating call fails.
    pub const fn freeze(&mut self) -> &mut Self {
        self.frozen = true;
        self
    }

    /// Returns an unfrozen shallow copy of the set.
    ///
    /// Unlike [`Clone::clone`], the copy never inherits the frozen flag.
    #[must_use]
    pub fn dup(&self) -> Self {
        Self::with_storage(self.storage.clone())
    }

    /// Copies the set into a new one, passing every element through
    /// `transform`.
    pub fn to_set_with<U, F>(&self, mut transform: F) -> Set<U>
    where
        U: Hash + Eq + Clone,
        F: FnMut(&T) -> U,
    {
        let mut set = Set::with_capacity(self.len());
        for element in self {
            set.insert_unchecked(transform(element));
        }
        set
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds `element` unless it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn add(&mut self, element: T) -> Result<&mut Self, SetError> {
        self.ensure_mutable()?;
        self.storage.insert(element);
        Ok(self)
    }

    /// Adds `element`, returning `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn insert(&mut self, element: T) -> Result<bool, SetError> {
        self.ensure_mutable()?;
        Ok(self.storage.insert(element))
    }

    /// Removes `element` if present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn delete<Q>(&mut self, element: &Q) -> Result<&mut Self, SetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_mutable()?;
        self.storage.remove(element);
        Ok(self)
    }

    /// Removes `element`, returning `false` if it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn remove<Q>(&mut self, element: &Q) -> Result<bool, SetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_mutable()?;
        Ok(self.storage.remove(element))
    }

    /// Removes every element by resetting the backing storage.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn clear(&mut self) -> Result<&mut Self, SetError> {
        self.ensure_mutable()?;
        self.storage.clear();
        Ok(self)
    }

    /// Adds every element of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen, or
    /// [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `source` cannot be iterated. Either way nothing is added.
    pub fn merge<E>(&mut self, source: &E) -> Result<&mut Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        self.ensure_mutable()?;
        for element in entries(source)? {
            self.storage.insert(element);
        }
        Ok(self)
    }

    /// Adds every element of `other` with a single bulk storage merge.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn merge_set(&mut self, other: &Self) -> Result<&mut Self, SetError> {
        self.ensure_mutable()?;
        self.storage.merge(&other.storage);
        Ok(self)
    }

    /// Removes every element of `source` that is present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen, or
    /// [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `source` cannot be iterated.
    pub fn subtract<E>(&mut self, source: &E) -> Result<&mut Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        self.ensure_mutable()?;
        for element in entries(source)? {
            self.storage.remove(&element);
        }
        Ok(self)
    }

    /// Replaces the contents with the elements of `source`.
    ///
    /// The source is resolved before the set is cleared, so a rejected source
    /// leaves the set untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen, or
    /// [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `source` cannot be iterated.
    pub fn replace<E>(&mut self, source: &E) -> Result<&mut Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        self.ensure_mutable()?;
        let elements = entries(source)?;
        self.storage.clear();
        for element in elements {
            self.storage.insert(element);
        }
        Ok(self)
    }

    /// Replaces every element with `transform(element)`.
    ///
    /// The current elements are snapshotted, the set is cleared, and the
    /// transformed values are re-added in snapshot order. Transformed values
    /// that coincide collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let mut set: Set<i32> = [1, 2, 3, 4].into_iter().collect();
    /// set.map_in_place(|value| value / 2)?;
    /// assert_eq!(set.to_vec(), vec![0, 1, 2]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn map_in_place<F>(&mut self, mut transform: F) -> Result<&mut Self, SetError>
    where
        F: FnMut(T) -> T,
    {
        self.ensure_mutable()?;
        let snapshot = std::mem::take(&mut self.storage).into_vec();
        self.storage = M::with_capacity(snapshot.len());
        for element in snapshot {
            self.storage.insert(transform(element));
        }
        Ok(self)
    }

    /// Removes every element for which `predicate` returns `true`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn delete_if<F>(&mut self, mut predicate: F) -> Result<&mut Self, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        self.ensure_mutable()?;
        self.storage.retain(|element| !predicate(element));
        Ok(self)
    }

    /// Removes every element for which `predicate` returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn keep_if<F>(&mut self, predicate: F) -> Result<&mut Self, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        self.ensure_mutable()?;
        self.storage.retain(predicate);
        Ok(self)
    }

    /// Like [`Set::keep_if`], but reports whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let mut set: Set<i32> = (1..=6).collect();
    /// assert!(set.filter_in_place(|value| value % 2 == 0)?);
    /// assert!(!set.filter_in_place(|value| value % 2 == 0)?);
    /// assert_eq!(set.to_vec(), vec![2, 4, 6]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn filter_in_place<F>(&mut self, predicate: F) -> Result<bool, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.len();
        self.keep_if(predicate)?;
        Ok(self.len() != before)
    }

    /// Like [`Set::delete_if`], but reports whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen.
    pub fn reject_in_place<F>(&mut self, predicate: F) -> Result<bool, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.len();
        self.delete_if(predicate)?;
        Ok(self.len() != before)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Fails if the set is frozen.
    pub(crate) const fn ensure_mutable(&self) -> Result<(), SetError> {
        if self.frozen {
            return Err(SetError::FrozenState(FrozenStateError {
                type_name: M::TYPE_NAME,
            }));
        }
        Ok(())
    }

    /// Adds without the frozen check. Only for sets the crate just built.
    pub(crate) fn insert_unchecked(&mut self, element: T) -> bool {
        self.storage.insert(element)
    }

    pub(crate) fn storage_mut(&mut self) -> &mut M {
        &mut self.storage
    }

    /// Address-based identity, stable for as long as the set does not move.
    pub(crate) fn identity(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }
}

// =============================================================================
// Enumerable / SetLike
// =============================================================================

impl<T, M> Enumerable<T> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn each_entry(&self) -> Option<Entries<'_, T>> {
        Some(Box::new(self.iter().cloned()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T, M> SetLike<T> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Elements<'a>
        = Iter<'a, T, M>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        self.storage.len()
    }

    fn contains(&self, element: &T) -> bool {
        self.storage.contains(element)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.storage.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, M> Default for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the contents and the frozen flag. See [`Set::dup`] for an
/// unfrozen copy.
impl<T, M: Clone> Clone for Set<T, M> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            frozen: self.frozen,
            marker: PhantomData,
        }
    }
}

impl<T, M> FromIterator<T> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for element in iter {
            set.storage.insert(element);
        }
        set
    }
}

impl<T, M, const N: usize> From<[T; N]> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, M> From<Vec<T>> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, M> IntoIterator for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_vec().into_iter()
    }
}

impl<'a, T, M> IntoIterator for &'a Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sets are equal when they have the same elements, in any order.
impl<T, M, N> PartialEq<Set<T, N>> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
    N: Storage<T>,
{
    fn eq(&self, other: &Set<T, N>) -> bool {
        if std::ptr::addr_eq(std::ptr::from_ref(self), std::ptr::from_ref(other)) {
            return true;
        }
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T, M> Eq for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
}

/// Content hash, independent of insertion order and consistent with `Eq`.
impl<T, M> Hash for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let digest = self.iter().fold(0_u64, |digest, element| {
            let mut hasher = DefaultHasher::new();
            element.hash(&mut hasher);
            digest.wrapping_add(hasher.finish())
        });
        state.write_usize(self.len());
        state.write_u64(digest);
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, M> serde::Serialize for Set<T, M>
where
    T: serde::Serialize + Hash + Eq + Clone,
    M: Storage<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct SetVisitor<T, M> {
    marker: PhantomData<Set<T, M>>,
}

#[cfg(feature = "serde")]
impl<'de, T, M> serde::de::Visitor<'de> for SetVisitor<T, M>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
    M: Storage<T>,
{
    type Value = Set<T, M>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = Set::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            set.insert_unchecked(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, M> serde::Deserialize<'de> for Set<T, M>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
    M: Storage<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor {
            marker: PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentError;
    use rstest::rstest;

    struct Opaque;

    impl Enumerable<i32> for Opaque {}

    fn frozen(elements: &[i32]) -> Set<i32> {
        let mut set: Set<i32> = elements.iter().copied().collect();
        set.freeze();
        set
    }

    #[rstest]
    fn test_add_is_chainable_and_idempotent() {
        let mut set: Set<i32> = Set::new();
        set.add(1).unwrap().add(2).unwrap().add(1).unwrap();
        assert_eq!(set.to_vec(), vec![1, 2]);
    }

    #[rstest]
    fn test_insert_reports_noop() {
        let mut set: Set<i32> = Set::new();
        assert_eq!(set.insert(5), Ok(true));
        assert_eq!(set.insert(5), Ok(false));
    }

    #[rstest]
    fn test_remove_reports_noop() {
        let mut set: Set<i32> = [1].into();
        assert_eq!(set.remove(&2), Ok(false));
        assert_eq!(set.remove(&1), Ok(true));
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_borrowed_lookup() {
        let mut set: Set<String> = Set::new();
        set.add("alpha".to_string()).unwrap();
        assert!(set.contains("alpha"));
        set.delete("alpha").unwrap();
        assert!(!set.contains("alpha"));
    }

    #[rstest]
    fn test_readd_does_not_move_element() {
        let mut set: Set<i32> = [1, 2, 3].into();
        set.add(1).unwrap();
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_frozen_rejects_every_mutation() {
        let mut set = frozen(&[1, 2, 3]);
        let expected = Err(SetError::FrozenState(FrozenStateError { type_name: "Set" }));

        assert_eq!(set.add(4).map(|_| ()), expected);
        assert_eq!(set.insert(4).map(|_| ()), expected);
        assert_eq!(set.delete(&1).map(|_| ()), expected);
        assert_eq!(set.remove(&1).map(|_| ()), expected);
        assert_eq!(set.clear().map(|_| ()), expected);
        assert_eq!(set.merge(&[9]).map(|_| ()), expected);
        assert_eq!(set.subtract(&[1]).map(|_| ()), expected);
        assert_eq!(set.replace(&[9]).map(|_| ()), expected);
        assert_eq!(set.map_in_place(|value| value + 1).map(|_| ()), expected);
        assert_eq!(set.delete_if(|_| true).map(|_| ()), expected);
        assert_eq!(set.keep_if(|_| false).map(|_| ()), expected);
        assert_eq!(set.filter_in_place(|_| false).map(|_| ()), expected);
        assert_eq!(set.reject_in_place(|_| true).map(|_| ()), expected);

        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_frozen_allows_reads() {
        let set = frozen(&[1, 2]);
        assert!(set.contains(&1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.union(&[3]).unwrap().len(), 3);
    }

    #[rstest]
    fn test_clone_keeps_frozen_dup_does_not() {
        let set = frozen(&[1]);
        assert!(set.clone().is_frozen());
        assert!(!set.dup().is_frozen());
        assert_eq!(set.dup(), set);
    }

    #[rstest]
    fn test_replace_rejects_non_enumerable_before_clearing() {
        let mut set: Set<i32> = [1, 2].into();
        assert_eq!(
            set.replace(&Opaque).map(|_| ()),
            Err(SetError::Argument(ArgumentError::NotEnumerable))
        );
        assert_eq!(set.to_vec(), vec![1, 2]);
    }

    #[rstest]
    fn test_merge_and_subtract_reject_non_enumerable() {
        let mut set: Set<i32> = [1].into();
        assert!(set.merge(&Opaque).unwrap_err().is_argument_error());
        assert!(set.subtract(&Opaque).unwrap_err().is_argument_error());
        assert_eq!(set.to_vec(), vec![1]);
    }

    #[rstest]
    fn test_replace_swaps_contents() {
        let mut set: Set<i32> = [1, 2].into();
        set.replace(&vec![3, 4, 3]).unwrap();
        assert_eq!(set.to_vec(), vec![3, 4]);
    }

    #[rstest]
    fn test_merge_set_keeps_other_order() {
        let mut left: Set<i32> = [1, 2].into();
        let right: Set<i32> = [4, 2, 3].into();
        left.merge_set(&right).unwrap();
        assert_eq!(left.to_vec(), vec![1, 2, 4, 3]);
    }

    #[rstest]
    fn test_map_in_place_collapses_and_keeps_snapshot_order() {
        let mut set: Set<i32> = [3, 1, 2].into();
        set.map_in_place(|value| value % 2).unwrap();
        assert_eq!(set.to_vec(), vec![1, 0]);
    }

    #[rstest]
    #[case(vec![1, 2, 3, 4], vec![1, 3])]
    #[case(vec![2, 4], vec![])]
    #[case(vec![], vec![])]
    fn test_delete_if(#[case] elements: Vec<i32>, #[case] expected: Vec<i32>) {
        let mut set: Set<i32> = elements.into();
        set.delete_if(|value| value % 2 == 0).unwrap();
        assert_eq!(set.to_vec(), expected);
    }

    #[rstest]
    fn test_delete_if_visits_every_element_once() {
        let mut set: Set<i32> = (0..10).collect();
        let mut visited = Vec::new();
        set.delete_if(|value| {
            visited.push(*value);
            true
        })
        .unwrap();
        assert_eq!(visited, (0..10).collect::<Vec<_>>());
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_reject_in_place_reports_change() {
        let mut set: Set<i32> = [1, 2, 3].into();
        assert_eq!(set.reject_in_place(|value| *value > 5), Ok(false));
        assert_eq!(set.reject_in_place(|value| *value > 2), Ok(true));
        assert_eq!(set.to_vec(), vec![1, 2]);
    }

    #[rstest]
    fn test_from_source_with_transform() {
        let set: Set<String> =
            Set::from_source_with(&[1, 2, 3], |value: i32| format!("#{value}")).unwrap();
        assert_eq!(set.to_vec(), vec!["#1", "#2", "#3"]);
    }

    #[rstest]
    fn test_from_source_rejects_opaque() {
        assert_eq!(
            Set::<i32>::from_source(&Opaque).err(),
            Some(SetError::Argument(ArgumentError::NotEnumerable))
        );
    }

    #[rstest]
    fn test_to_set_with() {
        let set: Set<i32> = [1, 2, 3].into();
        let strings = set.to_set_with(|value| value.to_string());
        assert_eq!(strings.to_vec(), vec!["1", "2", "3"]);
    }

    #[rstest]
    fn test_iter_is_restartable_and_sized() {
        let set: Set<i32> = [1, 2, 3].into();
        let iter = set.iter();
        assert_eq!(iter.len(), 3);
        let first: Vec<i32> = iter.clone().copied().collect();
        let second: Vec<i32> = iter.copied().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_equality_ignores_order() {
        let left: Set<i32> = [1, 2, 3].into();
        let right: Set<i32> = [3, 2, 1].into();
        assert_eq!(left, right);
        assert_ne!(left, Set::<i32>::from([1, 2]));
    }

    #[rstest]
    fn test_hash_ignores_order() {
        fn hash_of(set: &Set<i32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            set.hash(&mut hasher);
            hasher.finish()
        }

        let left: Set<i32> = [1, 2, 3].into();
        let right: Set<i32> = [3, 1, 2].into();
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[rstest]
    fn test_sets_as_elements_collapse_by_content() {
        let mut outer: Set<Set<i32>> = Set::new();
        outer.add(Set::from([1, 2])).unwrap();
        outer.add(Set::from([2, 1])).unwrap();
        assert_eq!(outer.len(), 1);
    }
}
