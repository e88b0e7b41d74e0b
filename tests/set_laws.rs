//! Property-based tests for Set laws.
//!
//! These tests verify the algebraic and ordering properties of `Set`.

use ordset::Set;
use proptest::prelude::*;

fn elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-20..20_i32, 0..40)
}

// =============================================================================
// Union Superset Law
// Description: a ∪ b ⊇ a and a ∪ b ⊇ b
// =============================================================================

proptest! {
    #[test]
    fn prop_union_is_superset_of_operands(left in elements(), right in elements()) {
        let a: Set<i32> = left.into();
        let b: Set<i32> = right.into();
        let union = a.union(&b).unwrap();

        prop_assert!(union.is_superset(&a));
        prop_assert!(union.is_superset(&b));
    }
}

// =============================================================================
// Intersection Subset Law
// Description: a ∩ b ⊆ a and a ∩ b ⊆ b
// =============================================================================

proptest! {
    #[test]
    fn prop_intersection_is_subset_of_operands(left in elements(), right in elements()) {
        let a: Set<i32> = left.into();
        let b: Set<i32> = right.into();
        let intersection = a.intersection(&b).unwrap();

        prop_assert!(intersection.is_subset(&a));
        prop_assert!(intersection.is_subset(&b));
    }
}

// =============================================================================
// Symmetric Difference Law
// Description: a ⊕ b = (a ∪ b) - (a ∩ b)
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric_difference_law(left in elements(), right in elements()) {
        let a: Set<i32> = left.into();
        let b: Set<i32> = right.into();

        let symmetric = a.symmetric_difference(&b).unwrap();
        let expected = a
            .union(&b)
            .unwrap()
            .difference(&a.intersection(&b).unwrap())
            .unwrap();

        prop_assert_eq!(symmetric, expected);
    }
}

// =============================================================================
// Idempotence Laws
// Description: adding twice equals adding once; a ∪ a = a; a ∩ a = a
// =============================================================================

proptest! {
    #[test]
    fn prop_add_idempotent(values in elements(), element: i32) {
        let mut once: Set<i32> = values.clone().into();
        once.add(element).unwrap();
        let mut twice: Set<i32> = values.into();
        twice.add(element).unwrap().add(element).unwrap();

        prop_assert_eq!(once.to_vec(), twice.to_vec());
    }

    #[test]
    fn prop_union_and_intersection_with_self(values in elements()) {
        let a: Set<i32> = values.into();

        prop_assert_eq!(a.union(&a).unwrap().to_vec(), a.to_vec());
        prop_assert_eq!(a.intersection(&a).unwrap().to_vec(), a.to_vec());
    }
}

// =============================================================================
// Add-Delete Restoration Law
// Description: adding then deleting a fresh element restores content and order
// =============================================================================

proptest! {
    #[test]
    fn prop_add_then_delete_restores_order(values in elements(), fresh in 100..200_i32) {
        let mut set: Set<i32> = values.into();
        let before = set.to_vec();

        set.add(fresh).unwrap().delete(&fresh).unwrap();

        prop_assert_eq!(set.to_vec(), before);
    }
}

// =============================================================================
// Round Trip Law
// Description: to_vec of a set built from elements is those elements, deduplicated
// =============================================================================

proptest! {
    #[test]
    fn prop_round_trip_collapses_duplicates(values in elements()) {
        let set: Set<i32> = values.clone().into();

        let mut expected = Vec::new();
        for value in values {
            if !expected.contains(&value) {
                expected.push(value);
            }
        }

        prop_assert_eq!(set.to_vec(), expected);
    }
}

// =============================================================================
// Antisymmetry Law
// Description: a ⊆ b and a ⊇ b iff a = b
// =============================================================================

proptest! {
    #[test]
    fn prop_subset_and_superset_iff_equal(left in elements(), right in elements()) {
        let a: Set<i32> = left.into();
        let b: Set<i32> = right.into();

        prop_assert_eq!(a.is_subset(&b) && a.is_superset(&b), a == b);
    }
}

// =============================================================================
// Operator Agreement Law
// Description: operators produce the same content as the fallible methods
// =============================================================================

proptest! {
    #[test]
    fn prop_operators_agree_with_methods(left in elements(), right in elements()) {
        let a: Set<i32> = left.into();
        let b: Set<i32> = right.into();

        prop_assert_eq!((&a | &b).to_vec(), a.union(&b).unwrap().to_vec());
        prop_assert_eq!((&a - &b).to_vec(), a.difference(&b).unwrap().to_vec());
        prop_assert_eq!((&a & &b).to_vec(), a.intersection(&b).unwrap().to_vec());
        prop_assert_eq!((&a ^ &b).to_vec(), a.symmetric_difference(&b).unwrap().to_vec());
    }
}

// =============================================================================
// Frozen Read Law
// Description: reads on a frozen set match reads before freezing
// =============================================================================

proptest! {
    #[test]
    fn prop_frozen_reads_unchanged(values in elements(), probe: i32) {
        let mut set: Set<i32> = values.into();
        let contents = set.to_vec();
        let contained = set.contains(&probe);

        set.freeze();

        prop_assert!(set.add(probe).is_err());
        prop_assert_eq!(set.to_vec(), contents);
        prop_assert_eq!(set.contains(&probe), contained);
    }
}
