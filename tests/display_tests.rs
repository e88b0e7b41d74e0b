//! Integration tests for Display and Debug renderings.

use ordset::{Member, Set, SharedSet};

// =============================================================================
// Flat Sets
// =============================================================================

#[test]
fn test_empty_set_display() {
    let set: Set<i32> = Set::new();
    assert_eq!(format!("{}", set), "#<Set: {}>");
}

#[test]
fn test_display_follows_insertion_order() {
    let set: Set<&str> = ["pear", "apple"].into();
    assert_eq!(format!("{}", set), "#<Set: {pear, apple}>");
}

#[test]
fn test_debug_quotes_strings() {
    let set: Set<String> = ["x".to_string()].into();
    assert_eq!(format!("{:?}", set), "#<Set: {\"x\"}>");
}

#[test]
fn test_frozen_set_renders_the_same() {
    let mut set: Set<i32> = [1].into();
    set.freeze();
    assert_eq!(format!("{}", set), "#<Set: {1}>");
}

// =============================================================================
// Nested Sets
// =============================================================================

#[test]
fn test_nested_shared_set_display() {
    let inner: SharedSet<Member<i32>> =
        SharedSet::new(Set::from([Member::Item(1), Member::Item(2)]));
    let outer: Set<Member<i32>> = Set::from([Member::Item(0), Member::Set(inner)]);
    assert_eq!(format!("{}", outer), "#<Set: {0, #<Set: {1, 2}>}>");
}

#[test]
fn test_same_set_twice_is_not_a_cycle() {
    let inner: SharedSet<Member<i32>> = SharedSet::new(Set::from([Member::Item(1)]));
    let middle: SharedSet<Member<i32>> = SharedSet::new(Set::from([Member::Set(inner.clone())]));
    let outer: Set<Member<i32>> = Set::from([Member::Set(inner), Member::Set(middle)]);
    assert_eq!(
        format!("{}", outer),
        "#<Set: {#<Set: {1}>, #<Set: {#<Set: {1}>}>}>"
    );
}

#[test]
fn test_indirect_cycle_renders_placeholder() {
    let first: SharedSet<Member<&str>> = SharedSet::new(Set::from([Member::Item("a")]));
    let second: SharedSet<Member<&str>> = SharedSet::new(Set::from([Member::Set(first.clone())]));
    first.borrow_mut().add(Member::Set(second.clone())).unwrap();

    assert_eq!(
        format!("{}", first),
        "#<Set: {a, #<Set: {#<Set: {...}>}>}>"
    );

    first.borrow_mut().clear().unwrap();
}

#[test]
fn test_rendering_state_is_released_after_cycle() {
    let shared: SharedSet<Member<i32>> = SharedSet::new(Set::from([Member::Item(1)]));
    shared.borrow_mut().add(Member::Set(shared.clone())).unwrap();
    let first = format!("{}", shared);
    let second = format!("{}", shared);
    assert_eq!(first, second);

    shared.borrow_mut().clear().unwrap();
}

#[test]
fn test_mutably_borrowed_nested_set_renders_marker() {
    let inner: SharedSet<Member<i32>> = SharedSet::new(Set::from([Member::Item(1)]));
    let outer: Set<Member<i32>> = Set::from([Member::Set(inner.clone())]);
    let _writer = inner.borrow_mut();
    assert_eq!(format!("{}", outer), "#<Set: {#<Set: (borrowed)>}>");
}
