//! Property-based checks tying the predicates to the gap analysis.
//!
//! Adding the missing pairs of a property must repair it (in one step for
//! reflexivity and symmetry, monotonically for transitivity), and conflict
//! sets must be empty exactly when the property holds.

use proptest::prelude::*;

use crate::test_utils::{relation_over_universe, suite_proptest_config};

use super::*;

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn adding_missing_pairs_makes_reflexive((universe, relation) in relation_over_universe(6)) {
        let missing = Property::Reflexive.missing_pairs(&relation, &universe);
        let repaired = relation.with_pairs(missing);
        prop_assert!(Property::Reflexive.holds(&repaired, &universe));
    }

    #[test]
    fn adding_missing_pairs_makes_symmetric((universe, relation) in relation_over_universe(6)) {
        let missing = Property::Symmetric.missing_pairs(&relation, &universe);
        let repaired = relation.with_pairs(missing);
        prop_assert!(Property::Symmetric.holds(&repaired, &universe));
    }

    #[test]
    fn transitive_repair_makes_monotone_progress((universe, relation) in relation_over_universe(6)) {
        let missing = Property::Transitive.missing_pairs(&relation, &universe);
        prop_assert_eq!(missing.is_empty(), Property::Transitive.holds(&relation, &universe));

        let stepped = relation.with_pairs(missing.iter().cloned());
        prop_assert_eq!(stepped.len(), relation.len() + missing.len());
        prop_assert!(relation.iter().all(|(a, b)| stepped.contains(a, b)));

        let closed = transitive_closure(&relation, &universe);
        prop_assert!(Property::Transitive.holds(&closed, &universe));
        prop_assert!(closed.len() >= stepped.len());
    }

    #[test]
    fn irreflexive_conflicts_match_the_predicate((universe, relation) in relation_over_universe(6)) {
        let conflicts = Property::Irreflexive.conflicting_pairs(&relation);
        prop_assert_eq!(conflicts.is_empty(), Property::Irreflexive.holds(&relation, &universe));
    }

    #[test]
    fn antisymmetric_conflicts_match_the_predicate((universe, relation) in relation_over_universe(6)) {
        let conflicts = Property::Antisymmetric.conflicting_pairs(&relation);
        prop_assert_eq!(conflicts.is_empty(), Property::Antisymmetric.holds(&relation, &universe));
        prop_assert!(conflicts.iter().all(|(a, b)| relation.contains(a, b) && relation.contains(b, a)));
    }

    #[test]
    fn composites_agree_with_their_parts((universe, relation) in relation_over_universe(5)) {
        let reflexive = Property::Reflexive.holds(&relation, &universe);
        let symmetric = Property::Symmetric.holds(&relation, &universe);
        let transitive = Property::Transitive.holds(&relation, &universe);
        let antisymmetric = Property::Antisymmetric.holds(&relation, &universe);
        prop_assert_eq!(
            Property::Equivalence.holds(&relation, &universe),
            reflexive && symmetric && transitive
        );
        prop_assert_eq!(
            Property::Order.holds(&relation, &universe),
            reflexive && antisymmetric && transitive
        );
        prop_assert_eq!(
            Property::PartialOrder.holds(&relation, &universe),
            Property::Order.holds(&relation, &universe)
        );
        if Property::TotalOrder.holds(&relation, &universe) {
            prop_assert!(Property::Order.holds(&relation, &universe));
        }
    }
}
