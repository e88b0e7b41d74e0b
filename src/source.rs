//! Element sources and set-like operands.
//!
//! Bulk operations ([`Set::merge`](crate::Set::merge),
//! [`Set::subtract`](crate::Set::subtract), [`Set::replace`](crate::Set::replace),
//! construction, and the non-mutating algebra) accept anything implementing
//! [`Enumerable`]. A source advertises up to two iteration entry points; the
//! preferred bulk entry point is tried first, then the generic per-element
//! one. A source offering neither is rejected with
//! [`ArgumentError::NotEnumerable`].
//!
//! Comparisons ([`Set::is_subset`](crate::Set::is_subset) and friends) need
//! O(1) membership on the operand and therefore take a [`SetLike`].

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::error::ArgumentError;

/// A boxed iterator yielding owned elements.
pub type Entries<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

// =============================================================================
// Enumerable
// =============================================================================

/// A source of elements.
///
/// Both entry points are optional. Implementors override whichever they can
/// serve; [`Enumerable::each_entry`] is preferred when both are present.
///
/// # Examples
///
/// ```rust
/// use ordset::{Entries, Enumerable, Set};
///
/// struct Countdown(u32);
///
/// impl Enumerable<u32> for Countdown {
///     fn each(&self) -> Option<Entries<'_, u32>> {
///         Some(Box::new((1..=self.0).rev()))
///     }
/// }
///
/// let set: Set<u32> = Set::from_source(&Countdown(3)).unwrap();
/// assert_eq!(set.to_vec(), vec![3, 2, 1]);
/// ```
pub trait Enumerable<T> {
    /// Preferred bulk iteration entry point.
    fn each_entry(&self) -> Option<Entries<'_, T>> {
        None
    }

    /// Generic per-element iteration entry point.
    fn each(&self) -> Option<Entries<'_, T>> {
        None
    }

    /// Number of elements the source will yield, if known up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// Resolves the iteration entry point of `source`.
///
/// # Errors
///
/// Returns [`ArgumentError::NotEnumerable`] when `source` offers neither
/// entry point.
pub fn entries<T, E>(source: &E) -> Result<Entries<'_, T>, ArgumentError>
where
    E: Enumerable<T> + ?Sized,
{
    source
        .each_entry()
        .or_else(|| source.each())
        .ok_or(ArgumentError::NotEnumerable)
}

impl<T: Clone> Enumerable<T> for [T] {
    fn each(&self) -> Option<Entries<'_, T>> {
        Some(Box::new(self.iter().cloned()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Clone, const N: usize> Enumerable<T> for [T; N] {
    fn each(&self) -> Option<Entries<'_, T>> {
        self.as_slice().each()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(N)
    }
}

impl<T: Clone> Enumerable<T> for Vec<T> {
    fn each(&self) -> Option<Entries<'_, T>> {
        self.as_slice().each()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Clone, S> Enumerable<T> for HashSet<T, S> {
    fn each(&self) -> Option<Entries<'_, T>> {
        Some(Box::new(self.iter().cloned()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Clone> Enumerable<T> for BTreeSet<T> {
    fn each(&self) -> Option<Entries<'_, T>> {
        Some(Box::new(self.iter().cloned()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Adapts any cloneable iterable into an [`Enumerable`].
///
/// The iterable is cloned on every traversal, so ranges and slice iterators
/// can be enumerated repeatedly.
///
/// # Examples
///
/// ```rust
/// use ordset::{IterSource, Set};
///
/// let set: Set<i32> = Set::from_source(&IterSource(1..4)).unwrap();
/// assert_eq!(set.to_vec(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IterSource<I>(pub I);

impl<I> Enumerable<I::Item> for IterSource<I>
where
    I: IntoIterator + Clone,
{
    fn each(&self) -> Option<Entries<'_, I::Item>> {
        Some(Box::new(self.0.clone().into_iter()))
    }
}

// =============================================================================
// SetLike
// =============================================================================

/// An operand with set semantics: a size and O(1) membership.
pub trait SetLike<T> {
    /// Iterator over the operand's elements.
    type Elements<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test.
    fn contains(&self, element: &T) -> bool;

    /// Iterates the elements.
    fn elements(&self) -> Self::Elements<'_>;
}

impl<T, S> SetLike<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Elements<'a>
        = std::collections::hash_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}

impl<T: Ord> SetLike<T> for BTreeSet<T> {
    type Elements<'a>
        = std::collections::btree_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}
