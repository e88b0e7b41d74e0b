//! Recursive flattening of nested sets.
//!
//! Flattening walks every element; plain elements are copied and nested sets
//! (see [`Nested`]) are expanded in place, recursively. The set identities
//! currently being expanded are tracked for the duration of one call, so a
//! set that is reached again through itself is reported as
//! [`ArgumentError::RecursiveSet`] instead of recursing forever. The same
//! nested set may appear several times on different branches.

use std::collections::HashSet;

use crate::error::{ArgumentError, SetError};
use crate::nested::Nested;
use crate::set::Set;
use crate::storage::Storage;

impl<T, M> Set<T, M>
where
    T: Nested,
    M: Storage<T>,
{
    /// Returns a new set with every nested set recursively replaced by its
    /// elements.
    ///
    /// # Errors
    ///
    /// - [`ArgumentError::RecursiveSet`] if a set contains itself, directly
    ///   or through other nested sets.
    /// - [`SetError::Borrowed`] if a nested set is mutably borrowed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{Member, Set, SharedSet};
    ///
    /// let inner: SharedSet<Member<i32>> =
    ///     SharedSet::new(Set::from([Member::Item(1), Member::Item(2)]));
    /// let outer: Set<Member<i32>> = Set::from([Member::Set(inner), Member::Item(3)]);
    ///
    /// let flat = outer.flatten()?;
    /// let expected: Set<Member<i32>> = [1, 2, 3].into_iter().map(Member::Item).collect();
    /// assert_eq!(flat, expected);
    /// # Ok::<(), ordset::SetError>(())
    /// ```
    pub fn flatten(&self) -> Result<Self, SetError> {
        let mut destination = Self::with_capacity(self.len());
        let mut expanding = HashSet::from([self.identity()]);
        flatten_into(self, &mut destination, &mut expanding)?;
        Ok(destination)
    }

    /// Flattens the set in place.
    ///
    /// Returns `false` without doing any work when no element is a nested
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::FrozenState`] if the set is frozen, and otherwise
    /// the errors of [`Set::flatten`]. The set is unchanged on error.
    pub fn flatten_in_place(&mut self) -> Result<bool, SetError> {
        self.ensure_mutable()?;
        if !self.iter().any(|element| element.nested().is_some()) {
            return Ok(false);
        }
        let mut flattened = self.flatten()?;
        std::mem::swap(self.storage_mut(), flattened.storage_mut());
        Ok(true)
    }
}

fn flatten_into<T, N, M>(
    source: &Set<T, N>,
    destination: &mut Set<T, M>,
    expanding: &mut HashSet<usize>,
) -> Result<(), SetError>
where
    T: Nested,
    N: Storage<T>,
    M: Storage<T>,
{
    for element in source {
        let Some(shared) = element.nested() else {
            destination.insert_unchecked(element.clone());
            continue;
        };
        let identity = shared.identity();
        if !expanding.insert(identity) {
            return Err(ArgumentError::RecursiveSet.into());
        }
        let nested = shared.try_borrow()?;
        flatten_into(&nested, destination, expanding)?;
        expanding.remove(&identity);
    }
    Ok(())
}
