//! Set algebra, comparisons, and operator overloads.

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::{Add, BitAnd, BitOr, BitXor, Sub};

use super::Set;
use crate::error::SetError;
use crate::source::{Enumerable, SetLike, entries};
use crate::storage::Storage;

// =============================================================================
// Non-mutating Algebra
// =============================================================================

impl<T, M> Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    /// Returns a new set holding the elements of `self` followed by the new
    /// elements of `other`.
    ///
    /// The result is never frozen, whatever the state of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `other` cannot be iterated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = [1, 2].into();
    /// assert_eq!(set.union(&[2, 3])?.to_vec(), vec![1, 2, 3]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn union<E>(&self, other: &E) -> Result<Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        let mut result = self.dup();
        result.merge(other)?;
        Ok(result)
    }

    /// Returns the elements of `self` that are not in `other`, in `self`'s
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `other` cannot be iterated.
    pub fn difference<E>(&self, other: &E) -> Result<Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        let mut result = self.dup();
        result.subtract(other)?;
        Ok(result)
    }

    /// Returns the elements common to both, in `other`'s order.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `other` cannot be iterated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = [1, 3, 5].into();
    /// assert_eq!(set.intersection(&[5, 4, 1])?.to_vec(), vec![5, 1]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn intersection<E>(&self, other: &E) -> Result<Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        let mut result = Self::new();
        for element in entries(other)? {
            if self.contains(&element) {
                result.insert_unchecked(element);
            }
        }
        Ok(result)
    }

    /// Returns the elements in exactly one of the two.
    ///
    /// The result starts from `other`'s elements; each element of `self` is
    /// then removed if present or appended if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotEnumerable`](crate::ArgumentError::NotEnumerable)
    /// if `other` cannot be iterated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = [1, 2, 3].into();
    /// assert_eq!(set.symmetric_difference(&[4, 3])?.to_vec(), vec![4, 1, 2]);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn symmetric_difference<E>(&self, other: &E) -> Result<Self, SetError>
    where
        E: Enumerable<T> + ?Sized,
    {
        let mut result = Self::from_source(other)?;
        result.toggle_all(self);
        Ok(result)
    }

    fn toggle_all(&mut self, other: &Self) {
        for element in other {
            if !self.storage.remove(element) {
                self.storage.insert(element.clone());
            }
        }
    }

    // =========================================================================
    // Comparisons
    // =========================================================================

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        self.len() >= other.len() && other.elements().all(|element| self.contains(element))
    }

    /// Returns `true` if `self` is a superset of `other` and strictly larger.
    pub fn is_proper_superset<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        self.len() > other.len() && other.elements().all(|element| self.contains(element))
    }

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashSet;
    /// use ordset::Set;
    ///
    /// let set: Set<i32> = [1, 2].into();
    /// let other: HashSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(set.is_subset(&other));
    /// assert!(set.is_proper_subset(&other));
    /// ```
    pub fn is_subset<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if `self` is a subset of `other` and strictly smaller.
    pub fn is_proper_subset<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        self.len() < other.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if the two share at least one element.
    ///
    /// Walks whichever side is smaller.
    pub fn intersects<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        if self.len() < other.len() {
            self.iter().any(|element| other.contains(element))
        } else {
            other.elements().any(|element| self.contains(element))
        }
    }

    /// Returns `true` if the two share no element.
    pub fn is_disjoint<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        !self.intersects(other)
    }
}

/// Orders sets by inclusion. Sets where neither contains the other are
/// incomparable.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use ordset::Set;
///
/// let small: Set<i32> = [1].into();
/// let large: Set<i32> = [1, 2].into();
/// let other: Set<i32> = [3].into();
///
/// assert_eq!(small.partial_cmp(&large), Some(Ordering::Less));
/// assert_eq!(large.partial_cmp(&small), Some(Ordering::Greater));
/// assert_eq!(small.partial_cmp(&other), None);
/// ```
impl<T, M, N> PartialOrd<Set<T, N>> for Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
    N: Storage<T>,
{
    fn partial_cmp(&self, other: &Set<T, N>) -> Option<Ordering> {
        match self.len().cmp(&other.len()) {
            Ordering::Less => self.is_subset(other).then_some(Ordering::Less),
            Ordering::Greater => self.is_superset(other).then_some(Ordering::Greater),
            Ordering::Equal => (self == other).then_some(Ordering::Equal),
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

impl<T, M> BitOr<&Set<T, M>> for &Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Output = Set<T, M>;

    fn bitor(self, rhs: &Set<T, M>) -> Set<T, M> {
        let mut result = self.dup();
        result.storage.merge(&rhs.storage);
        result
    }
}

impl<T, M> Add<&Set<T, M>> for &Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Output = Set<T, M>;

    fn add(self, rhs: &Set<T, M>) -> Set<T, M> {
        self | rhs
    }
}

impl<T, M> Sub<&Set<T, M>> for &Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Output = Set<T, M>;

    fn sub(self, rhs: &Set<T, M>) -> Set<T, M> {
        let mut result = self.dup();
        result.storage.retain(|element| !rhs.contains(element));
        result
    }
}

impl<T, M> BitAnd<&Set<T, M>> for &Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Output = Set<T, M>;

    fn bitand(self, rhs: &Set<T, M>) -> Set<T, M> {
        let mut result = Set::new();
        for element in rhs.iter().filter(|element| self.contains(*element)) {
            result.insert_unchecked(element.clone());
        }
        result
    }
}

impl<T, M> BitXor<&Set<T, M>> for &Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    type Output = Set<T, M>;

    fn bitxor(self, rhs: &Set<T, M>) -> Set<T, M> {
        let mut result = rhs.dup();
        result.toggle_all(self);
        result
    }
}
