//! [`Storage`] backed by [`indexmap::IndexMap`].
//!
//! Removal uses `shift_remove`, which keeps insertion order at O(n) cost
//! per removal. Useful when a set has to share a container type with code
//! that already works with `indexmap`.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use super::Storage;

impl<T, S> Storage<T> for IndexMap<T, (), S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
{
    type Iter<'a>
        = indexmap::map::Keys<'a, T, ()>
    where
        Self: 'a,
        T: 'a;

    const TYPE_NAME: &'static str = "IndexSet";

    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.contains_key(element)
    }

    fn insert(&mut self, element: T) -> bool {
        self.insert_full(element, ()).1.is_none()
    }

    fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shift_remove(element).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn merge(&mut self, other: &Self) {
        self.reserve(other.len());
        for element in other.keys() {
            self.entry(element.clone()).or_insert(());
        }
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
