//! Human-readable rendering.
//!
//! A set renders as `#<Set: {e1, e2}>`, with the prefix taken from
//! [`Storage::TYPE_NAME`]. A set reached again while it is already being
//! rendered on the current thread renders as `#<Set: {...}>`.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;

use super::Set;
use crate::storage::Storage;

thread_local! {
    static RENDERING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a set identity as being rendered until dropped.
pub(crate) struct RenderGuard {
    identity: usize,
}

impl RenderGuard {
    /// Returns `None` if `identity` is already being rendered on this thread.
    pub(crate) fn enter(identity: usize) -> Option<Self> {
        RENDERING.with_borrow_mut(|stack| {
            if stack.contains(&identity) {
                None
            } else {
                stack.push(identity);
                Some(Self { identity })
            }
        })
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        RENDERING.with_borrow_mut(|stack| {
            if let Some(position) = stack.iter().rposition(|entry| *entry == self.identity) {
                stack.remove(position);
            }
        });
    }
}

impl<T, M> Set<T, M>
where
    T: Hash + Eq + Clone,
    M: Storage<T>,
{
    fn render<F>(&self, formatter: &mut fmt::Formatter<'_>, mut element: F) -> fmt::Result
    where
        F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        let Some(_guard) = RenderGuard::enter(self.identity()) else {
            return write!(formatter, "#<{}: {{...}}>", M::TYPE_NAME);
        };
        write!(formatter, "#<{}: {{", M::TYPE_NAME)?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            element(value, formatter)?;
        }
        formatter.write_str("}>")
    }
}

impl<T, M> fmt::Display for Set<T, M>
where
    T: Hash + Eq + Clone + fmt::Display,
    M: Storage<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(formatter, |value, formatter| fmt::Display::fmt(value, formatter))
    }
}

impl<T, M> fmt::Debug for Set<T, M>
where
    T: Hash + Eq + Clone + fmt::Debug,
    M: Storage<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(formatter, |value, formatter| fmt::Debug::fmt(value, formatter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], "#<Set: {}>")]
    #[case(vec![1], "#<Set: {1}>")]
    #[case(vec![3, 1, 2], "#<Set: {3, 1, 2}>")]
    fn test_display(#[case] elements: Vec<i32>, #[case] expected: &str) {
        let set: Set<i32> = elements.into();
        assert_eq!(set.to_string(), expected);
    }

    #[rstest]
    fn test_debug_uses_element_debug() {
        let set: Set<&str> = ["a", "b"].into();
        assert_eq!(format!("{set:?}"), r#"#<Set: {"a", "b"}>"#);
    }

    #[rstest]
    fn test_nested_owned_sets_render_recursively() {
        let mut outer: Set<Set<i32>> = Set::new();
        outer.add(Set::from([1, 2])).unwrap();
        outer.add(Set::new()).unwrap();
        assert_eq!(outer.to_string(), "#<Set: {#<Set: {1, 2}>, #<Set: {}>}>");
    }

    #[rstest]
    fn test_guard_releases_identity() {
        let first = RenderGuard::enter(42);
        assert!(first.is_some());
        assert!(RenderGuard::enter(42).is_none());
        drop(first);
        assert!(RenderGuard::enter(42).is_some());
    }
}
