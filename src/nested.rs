//! Sets held by reference.
//!
//! An owned [`Set`] cannot contain itself, so sets that are members of other
//! sets "by reference" are wrapped in a [`SharedSet`]: a shared, mutable
//! handle whose equality and hash are the identity of the underlying set,
//! not its contents. Two handles are equal only if they point at the same
//! set.
//!
//! Element types expose their nested sets through [`Nested`], which is what
//! [`Set::flatten`] descends into. [`Member`] is a ready-made element type
//! that is either a plain item or a shared set of members.
//!
//! # Examples
//!
//! ```rust
//! use ordset::{Member, Set, SharedSet};
//!
//! let inner: SharedSet<Member<i32>> =
//!     SharedSet::new(Set::from([Member::Item(1), Member::Item(2)]));
//! let mut outer: Set<Member<i32>> = Set::new();
//! outer.add(Member::Set(inner.clone()))?.add(Member::Item(3))?;
//!
//! // Mutating through one handle is visible through every other.
//! inner.borrow_mut().add(Member::Item(4))?;
//! assert_eq!(outer.flatten()?.len(), 4);
//! # Ok::<(), ordset::SetError>(())
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::SetError;
use crate::set::Set;
use crate::storage::{OrderedMap, Storage};

// =============================================================================
// SharedSet
// =============================================================================

/// A shared handle to a [`Set`], compared and hashed by identity.
///
/// Handles are single-threaded (`!Send`, `!Sync`).
pub struct SharedSet<T, M = OrderedMap<T>> {
    inner: Rc<RefCell<Set<T, M>>>,
}

impl<T, M> SharedSet<T, M> {
    /// Wraps `set` in a new shared handle.
    #[inline]
    #[must_use]
    pub fn new(set: Set<T, M>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(set)),
        }
    }

    /// Borrows the set.
    ///
    /// # Panics
    ///
    /// Panics if the set is currently mutably borrowed. See
    /// [`SharedSet::try_borrow`] for the non-panicking variant.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Set<T, M>> {
        self.inner.borrow()
    }

    /// Mutably borrows the set.
    ///
    /// # Panics
    ///
    /// Panics if the set is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Set<T, M>> {
        self.inner.borrow_mut()
    }

    /// Borrows the set, failing if it is mutably borrowed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Borrowed`] if the set is mutably borrowed.
    pub fn try_borrow(&self) -> Result<Ref<'_, Set<T, M>>, SetError> {
        self.inner.try_borrow().map_err(|_| SetError::Borrowed)
    }

    /// Mutably borrows the set, failing if it is borrowed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Borrowed`] if the set is borrowed.
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, Set<T, M>>, SetError> {
        self.inner.try_borrow_mut().map_err(|_| SetError::Borrowed)
    }

    /// Address of the underlying set. Equal for every handle to the same set.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> usize {
        self.inner.as_ptr().addr()
    }

    /// Returns `true` if both handles point at the same set.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T, M> Clone for SharedSet<T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, M> PartialEq for SharedSet<T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T, M> Eq for SharedSet<T, M> {}

impl<T, M> Hash for SharedSet<T, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.identity());
    }
}

impl<T, M> From<Set<T, M>> for SharedSet<T, M> {
    fn from(set: Set<T, M>) -> Self {
        Self::new(set)
    }
}

impl<T, M> fmt::Display for SharedSet<T, M>
where
    T: Hash + Eq + Clone + fmt::Display,
    M: Storage<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(set) => fmt::Display::fmt(&*set, formatter),
            Err(_) => write!(formatter, "#<{}: (borrowed)>", M::TYPE_NAME),
        }
    }
}

impl<T, M> fmt::Debug for SharedSet<T, M>
where
    T: Hash + Eq + Clone + fmt::Debug,
    M: Storage<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(set) => fmt::Debug::fmt(&*set, formatter),
            Err(_) => write!(formatter, "#<{}: (borrowed)>", M::TYPE_NAME),
        }
    }
}

// =============================================================================
// Nested
// =============================================================================

/// An element type that may itself be a set held by reference.
pub trait Nested: Hash + Eq + Clone {
    /// Storage of the nested sets.
    type Storage: Storage<Self>;

    /// Returns the nested set, if this element is one.
    fn nested(&self) -> Option<&SharedSet<Self, Self::Storage>>;
}

// =============================================================================
// Member
// =============================================================================

/// An element of a set that can hold plain items and other sets.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Member<T> {
    /// A plain element.
    Item(T),
    /// A set held by reference.
    Set(SharedSet<Member<T>>),
}

impl<T> Member<T> {
    /// Returns the plain element, if this is one.
    #[must_use]
    pub const fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Set(_) => None,
        }
    }
}

impl<T> From<T> for Member<T> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}

impl<T> Nested for Member<T>
where
    T: Hash + Eq + Clone,
{
    type Storage = OrderedMap<Self>;

    fn nested(&self) -> Option<&SharedSet<Self, Self::Storage>> {
        match self {
            Self::Item(_) => None,
            Self::Set(shared) => Some(shared),
        }
    }
}

impl<T> fmt::Display for Member<T>
where
    T: Hash + Eq + Clone + fmt::Display,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => fmt::Display::fmt(item, formatter),
            Self::Set(shared) => fmt::Display::fmt(shared, formatter),
        }
    }
}

impl<T> fmt::Debug for Member<T>
where
    T: Hash + Eq + Clone + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => fmt::Debug::fmt(item, formatter),
            Self::Set(shared) => fmt::Debug::fmt(shared, formatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use static_assertions::assert_not_impl_any;

    assert_not_impl_any!(SharedSet<i32>: Send, Sync);

    fn items(values: &[i32]) -> Set<Member<i32>> {
        values.iter().copied().map(Member::Item).collect()
    }

    #[rstest]
    fn test_equality_is_identity() {
        let first = SharedSet::new(items(&[1]));
        let second = SharedSet::new(items(&[1]));
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
        assert_eq!(first.identity(), first.clone().identity());
    }

    #[rstest]
    fn test_content_equal_shared_sets_do_not_collapse() {
        let mut outer: Set<Member<i32>> = Set::new();
        outer
            .add(Member::Set(SharedSet::new(items(&[1]))))
            .unwrap()
            .add(Member::Set(SharedSet::new(items(&[1]))))
            .unwrap();
        assert_eq!(outer.len(), 2);
    }

    #[rstest]
    fn test_identity_matches_inner_set_address() {
        let shared = SharedSet::new(items(&[1]));
        let address = std::ptr::from_ref(&*shared.borrow()).addr();
        assert_eq!(shared.identity(), address);
    }

    #[rstest]
    fn test_try_borrow_reports_conflict() {
        let shared = SharedSet::new(items(&[1]));
        let _writer = shared.borrow_mut();
        assert_eq!(shared.try_borrow().err(), Some(SetError::Borrowed));
        assert_eq!(shared.to_string(), "#<Set: (borrowed)>");
    }

    #[rstest]
    fn test_self_containing_set_renders_placeholder() {
        let shared = SharedSet::new(items(&[1]));
        shared
            .borrow_mut()
            .add(Member::Set(shared.clone()))
            .unwrap();
        assert_eq!(shared.to_string(), "#<Set: {1, #<Set: {...}>}>");

        // Break the cycle so the test does not leak.
        shared.borrow_mut().clear().unwrap();
    }

    #[rstest]
    fn test_member_from_item() {
        let member: Member<&str> = "a".into();
        assert_eq!(member.as_item(), Some(&"a"));
        assert!(member.nested().is_none());
    }
}
