//! Property-based checks for the rejection sampler.
//!
//! Arbitrary specifications may be infeasible, so budget exhaustion is an
//! accepted outcome; whenever a relation *is* accepted it must honour every
//! token and both cardinality bounds.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

use super::*;
use crate::{
    property::Property,
    registry::{PropertySpec, PropertyToken},
    test_utils::suite_proptest_config,
};

const PROPTEST_BUDGET: usize = 2_000;

fn token_strategy() -> impl Strategy<Value = PropertyToken> {
    (prop::sample::select(Property::ALL.to_vec()), any::<bool>())
        .prop_map(|(property, negated)| PropertyToken::new(property, negated))
}

fn spec_strategy() -> impl Strategy<Value = PropertySpec> {
    prop::collection::vec(token_strategy(), 0..=3)
        .prop_map(|tokens| tokens.into_iter().collect())
}

fn bounds_strategy() -> impl Strategy<Value = (Option<usize>, Option<usize>)> {
    (prop::option::of(0_usize..=9), prop::option::of(0_usize..=9)).prop_map(|(min, max)| {
        match (min, max) {
            (Some(lower), Some(upper)) if lower > upper => (Some(upper), Some(lower)),
            other => other,
        }
    })
}

fn budget() -> NonZeroUsize {
    NonZeroUsize::new(PROPTEST_BUDGET).unwrap_or(NonZeroUsize::MIN)
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn accepted_relations_honour_spec_and_bounds(
        size in 0_usize..=3,
        spec in spec_strategy(),
        (min, max) in bounds_strategy(),
        seed in any::<u64>(),
    ) {
        let universe = Universe::<u8>::range(size).unwrap_or_else(|_| Universe::empty());
        let bounds = TargetBounds::new(min, max).unwrap_or_default();
        let sampler = RejectionSampler::new(&universe, budget())
            .with_bounds(bounds)
            .with_predicates(spec.bind(&universe));

        match sampler.sample(&mut SmallRng::seed_from_u64(seed)) {
            Ok(sample) => {
                let relation = &sample.relation;
                for token in spec.tokens() {
                    let holds = token.property().holds(relation, &universe);
                    prop_assert_eq!(holds, !token.negated(), "token {} violated", token);
                }
                prop_assert!(bounds.admits(relation.len()));
                prop_assert!(relation.iter().all(|(a, b)| universe.contains(a) && universe.contains(b)));
                prop_assert!(sample.stats.total() < PROPTEST_BUDGET);
            }
            Err(RelgenError::RejectionBudgetExceeded { size_rejections, property_rejections, .. }) => {
                prop_assert_eq!(size_rejections + property_rejections, PROPTEST_BUDGET);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed(
        size in 0_usize..=3,
        spec in spec_strategy(),
        seed in any::<u64>(),
    ) {
        let universe = Universe::<u8>::range(size).unwrap_or_else(|_| Universe::empty());
        let sampler = RejectionSampler::new(&universe, budget())
            .with_predicates(spec.bind(&universe));

        let first = sampler.sample(&mut SmallRng::seed_from_u64(seed));
        let second = sampler.sample(&mut SmallRng::seed_from_u64(seed));
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.stats, b.stats);
                prop_assert_eq!(a.relation.pairs(), b.relation.pairs());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "identical seeds diverged"),
        }
    }
}
