//! Insertion-ordered hash map.
//!
//! This module provides [`OrderedMap`], the default backing store for
//! [`Set`](crate::Set).
//!
//! # Overview
//!
//! Entries live in a slot vector in insertion order; a hash index maps each
//! key to its slot. Removing an entry leaves a tombstone behind, so removal
//! is O(1) and never shifts the remaining entries. Tombstones are compacted
//! away once they outnumber live entries.
//!
//! | Operation      | Complexity         |
//! |----------------|--------------------|
//! | `get`          | O(1) average       |
//! | `insert`       | O(1) amortized     |
//! | `remove`       | O(1) amortized     |
//! | `clear`        | O(n) drop, O(1) reset |
//! | `iter`         | O(n + tombstones)  |
//!
//! # Examples
//!
//! ```rust
//! use ordset::storage::OrderedMap;
//!
//! let mut map: OrderedMap<&str, i32> = OrderedMap::new();
//! map.insert("one", 1);
//! map.insert("two", 2);
//! map.insert("three", 3);
//! map.remove("two");
//!
//! let keys: Vec<&str> = map.keys().copied().collect();
//! assert_eq!(keys, vec!["one", "three"]);
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::{DefaultHashBuilder, Storage};

/// Number of tombstones tolerated before compaction is considered.
const COMPACTION_THRESHOLD: usize = 32;

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A hash map that iterates its entries in insertion order.
///
/// Re-inserting an existing key replaces its value but keeps its position.
///
/// # Examples
///
/// ```rust
/// use ordset::storage::OrderedMap;
///
/// let mut map: OrderedMap<char, usize> = OrderedMap::new();
/// map.insert('b', 1);
/// map.insert('a', 2);
/// map.insert('b', 3);
///
/// let entries: Vec<(char, usize)> = map.iter().map(|(key, value)| (*key, *value)).collect();
/// assert_eq!(entries, vec![('b', 3), ('a', 2)]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V = (), S = DefaultHashBuilder> {
    index: HashMap<K, usize, S>,
    slots: Vec<Option<(K, V)>>,
}

impl<K, V> OrderedMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map using `hash_builder` to hash keys.
    #[inline]
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            index: HashMap::with_hasher(hash_builder),
            slots: Vec::new(),
        }
    }

    /// Creates an empty map with the given capacity and hash builder.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the map's hash builder.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    /// Iterates entries in insertion order.
    #[must_use]
    pub fn iter(&self) -> OrderedMapIterator<'_, K, V> {
        OrderedMapIterator {
            slots: self.slots.iter(),
            remaining: self.len(),
        }
    }

    /// Iterates keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> OrderedMapKeys<'_, K, V> {
        OrderedMapKeys { inner: self.iter() }
    }

    /// Iterates values in key insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Consumes the map, returning its keys in insertion order.
    pub fn into_keys(self) -> impl Iterator<Item = K> {
        self.into_iter().map(|(key, _)| key)
    }

    /// Consumes the map, returning its values in key insertion order.
    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.into_iter().map(|(_, value)| value)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Returns a reference to the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        self.slots[position].as_ref().map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        self.slots[position].as_mut().map(|(_, value)| value)
    }

    /// Returns `true` if the map has an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns the previous value if the key was present; the key keeps its
    /// original position in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&position) => self.slots[position]
                .as_mut()
                .map(|(_, slot_value)| std::mem::replace(slot_value, value)),
            None => {
                self.push(key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => self.push(key, default()),
        };
        match &mut self.slots[position] {
            Some((_, value)) => value,
            None => unreachable!("indexed slot must be live"),
        }
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.index.remove(key)?;
        let (_, value) = self.slots[position].take()?;
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        self.compact_if_sparse();
        Some(value)
    }

    /// Keeps only the entries for which `predicate` returns `true`.
    ///
    /// Entries are visited once each, in order. Removing an entry does not
    /// disturb the position of the ones after it.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        for slot in &mut self.slots {
            let keep = match slot {
                Some((key, value)) => predicate(key, value),
                None => continue,
            };
            if !keep && let Some((key, _)) = slot.take() {
                self.index.remove(&key);
            }
        }
        self.compact_if_sparse();
    }

    /// Copies every entry of `other` into `self`, in `other`'s order.
    pub fn merge(&mut self, other: &Self)
    where
        V: Clone,
    {
        self.reserve(other.len());
        for (key, value) in other {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.slots.reserve(additional);
    }

    fn push(&mut self, key: K, value: V) -> usize {
        let position = self.slots.len();
        self.index.insert(key.clone(), position);
        self.slots.push(Some((key, value)));
        position
    }

    fn compact_if_sparse(&mut self) {
        let tombstones = self.slots.len() - self.index.len();
        if tombstones > COMPACTION_THRESHOLD && tombstones > self.index.len() {
            self.compact();
        }
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (position, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot
                && let Some(indexed) = self.index.get_mut(key)
            {
                *indexed = position;
            }
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`].
pub struct OrderedMapIterator<'a, K, V> {
    slots: std::slice::Iter<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<K, V> Clone for OrderedMapIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for OrderedMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.slots.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An iterator over the keys of an [`OrderedMap`].
pub struct OrderedMapKeys<'a, K, V> {
    inner: OrderedMapIterator<'a, K, V>,
}

impl<K, V> Clone for OrderedMapKeys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for OrderedMapKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for OrderedMapKeys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over the entries of an [`OrderedMap`].
pub struct OrderedMapIntoIterator<K, V> {
    slots: std::vec::IntoIter<Option<(K, V)>>,
    remaining: usize,
}

impl<K, V> Iterator for OrderedMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = OrderedMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        OrderedMapIntoIterator {
            slots: self.slots.into_iter(),
            remaining,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = OrderedMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Maps are equal when they hold the same entries, regardless of order.
impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Eq,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Storage Implementation
// =============================================================================

impl<T, S> Storage<T> for OrderedMap<T, (), S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
{
    type Iter<'a>
        = OrderedMapKeys<'a, T, ()>
    where
        Self: 'a,
        T: 'a;

    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.contains_key(element)
    }

    fn insert(&mut self, element: T) -> bool {
        if self.contains_key(&element) {
            return false;
        }
        self.push(element, ());
        true
    }

    fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::remove(self, element).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn merge(&mut self, other: &Self) {
        Self::merge(self, other);
    }

    fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        Self::retain(self, |element, ()| predicate(element));
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.keys()
    }

    fn into_vec(self) -> Vec<T> {
        self.into_keys().collect()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for OrderedMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V, S> {
    marker: std::marker::PhantomData<OrderedMap<K, V, S>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::de::Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = OrderedMap::with_capacity_and_hasher(
            access.size_hint().unwrap_or(0),
            S::default(),
        );
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for OrderedMap<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keys_of(map: &OrderedMap<i32, i32>) -> Vec<i32> {
        map.keys().copied().collect()
    }

    #[rstest]
    fn test_remove_leaves_order_of_survivors() {
        let mut map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key * 10)).collect();
        assert_eq!(map.remove(&3), Some(30));
        assert_eq!(map.remove(&3), None);
        assert_eq!(keys_of(&map), vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
    }

    #[rstest]
    fn test_trailing_tombstones_are_popped() {
        let mut map: OrderedMap<i32, i32> = (0..4).map(|key| (key, key)).collect();
        map.remove(&3);
        map.remove(&2);
        assert_eq!(map.slots.len(), 2);
    }

    #[rstest]
    fn test_compaction_reindexes_survivors() {
        let mut map: OrderedMap<i32, i32> = (0..200).map(|key| (key, key)).collect();
        for key in 0..150 {
            map.remove(&key);
        }
        assert!(map.slots.len() < 200);
        assert_eq!(map.len(), 50);
        for key in 150..200 {
            assert_eq!(map.get(&key), Some(&key));
        }
        assert_eq!(keys_of(&map), (150..200).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_reinsert_keeps_position() {
        let mut map: OrderedMap<i32, i32> = OrderedMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        assert_eq!(map.insert(1, 100), Some(1));
        assert_eq!(keys_of(&map), vec![1, 2]);
        assert_eq!(map.get(&1), Some(&100));
    }

    #[rstest]
    fn test_reinsert_after_remove_moves_to_end() {
        let mut map: OrderedMap<i32, i32> = OrderedMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.remove(&1);
        map.insert(1, 1);
        assert_eq!(keys_of(&map), vec![2, 1]);
    }

    #[rstest]
    fn test_retain_visits_each_entry_once() {
        let mut map: OrderedMap<i32, i32> = (0..6).map(|key| (key, 0)).collect();
        let mut visited = Vec::new();
        map.retain(|key, _| {
            visited.push(*key);
            key % 2 == 0
        });
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(keys_of(&map), vec![0, 2, 4]);
    }

    #[rstest]
    fn test_get_or_insert_with() {
        let mut map: OrderedMap<&str, Vec<i32>> = OrderedMap::new();
        map.get_or_insert_with("odd", Vec::new).push(1);
        map.get_or_insert_with("even", Vec::new).push(2);
        map.get_or_insert_with("odd", Vec::new).push(3);
        assert_eq!(map.get("odd"), Some(&vec![1, 3]));
        assert_eq!(map.get("even"), Some(&vec![2]));
    }

    #[rstest]
    fn test_iterator_is_exact_size() {
        let mut map: OrderedMap<i32, i32> = (0..5).map(|key| (key, key)).collect();
        map.remove(&1);
        let mut iter = map.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[rstest]
    fn test_equality_ignores_order() {
        let left: OrderedMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
        let right: OrderedMap<i32, i32> = [(2, 2), (1, 1)].into_iter().collect();
        let different: OrderedMap<i32, i32> = [(2, 2), (1, 3)].into_iter().collect();
        assert_eq!(left, right);
        assert_ne!(left, different);
    }
}
