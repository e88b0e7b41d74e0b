//! Partitioning a set into subsets.
//!
//! Two ways to divide a set:
//!
//! - **By key**: elements with the same derived key share a subset
//!   ([`Set::classify`], [`Set::divide_by_key`]).
//! - **By relation**: the relation is evaluated on every ordered pair of
//!   elements, self-pairs included, and read as a directed graph. Each
//!   strongly connected component of that graph becomes one subset
//!   ([`Set::divide_by_relation`]). For a symmetric relation this is the
//!   set of connected groups.
//!
//! # Examples
//!
//! ```rust
//! use ordset::Set;
//!
//! let numbers: Set<i32> = [1, 3, 4, 6, 9, 10, 11].into();
//! let groups = numbers.divide_by_relation(|i, j| (i - j).abs() == 1);
//!
//! assert_eq!(groups.len(), 4);
//! assert!(groups.contains(&Set::<i32>::from([9, 10, 11])));
//! assert!(groups.contains(&Set::<i32>::from([1])));
//! ```

use std::hash::Hash;

use crate::set::Set;
use crate::storage::{OrderedMap, Storage};

mod scc;

use scc::RelationGraph;

impl<T, M> Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    /// Groups the elements by `key`.
    ///
    /// Keys appear in the order their first element appears; each subset
    /// keeps the set's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let words: Set<&str> = ["apple", "bob", "avocado", "cat"].into();
    /// let classes = words.classify(|word| word.len());
    ///
    /// let lengths: Vec<usize> = classes.keys().copied().collect();
    /// assert_eq!(lengths, vec![5, 3, 7]);
    /// assert_eq!(classes.get(&3).map(Set::to_vec), Some(vec!["bob", "cat"]));
    /// ```
    pub fn classify<K, F>(&self, mut key: F) -> OrderedMap<K, Self>
    where
        K: Hash + Eq + Clone,
        F: FnMut(&T) -> K,
    {
        let mut classes: OrderedMap<K, Self> = OrderedMap::new();
        for element in self {
            classes
                .get_or_insert_with(key(element), Self::new)
                .insert_unchecked(element.clone());
        }
        classes
    }

    /// Partitions the set into the classes of [`Set::classify`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let numbers: Set<i32> = [1, 2, 3, 4].into();
    /// let parity = numbers.divide_by_key(|value| value % 2);
    ///
    /// assert_eq!(parity.to_vec(), vec![Set::<i32>::from([1, 3]), Set::from([2, 4])]);
    /// ```
    pub fn divide_by_key<K, F>(&self, key: F) -> Set<Self>
    where
        K: Hash + Eq + Clone,
        F: FnMut(&T) -> K,
    {
        self.classify(key).into_values().collect()
    }

    /// Partitions the set into the strongly connected components of
    /// `related`.
    ///
    /// `related(a, b)` is called once for every ordered pair, so the cost is
    /// quadratic in the size of the set. Subsets are emitted in the order the
    /// component search completes them, starting from the first element.
    pub fn divide_by_relation<F>(&self, related: F) -> Set<Self>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let nodes: Vec<&T> = self.iter().collect();
        RelationGraph::from_relation(&nodes, related)
            .strongly_connected_components()
            .into_iter()
            .map(|component| component.into_iter().map(|index| nodes[index].clone()).collect())
            .collect()
    }
}
