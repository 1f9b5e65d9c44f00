//! Shared test utilities for `relgen-core`.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use relgen_test_support::proptest_profile::ProptestRunProfile;

use crate::relation::{Relation, Universe};

/// Builds a standard proptest configuration from the shared run profile.
///
/// Keeps property suites aligned on the same `RELGEN_PBT_CASES`
/// interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Generates a universe `0..n` with `n <= max_size` together with an
/// arbitrary relation over it.
pub(crate) fn relation_over_universe(
    max_size: usize,
) -> impl Strategy<Value = (Universe<u8>, Relation<u8>)> {
    (0..=max_size).prop_flat_map(|size| {
        prop::collection::vec(any::<bool>(), size * size).prop_map(move |mask| {
            let universe = Universe::<u8>::range(size).unwrap_or_else(|_| Universe::empty());
            let relation = universe
                .candidate_pairs()
                .unwrap_or_default()
                .into_iter()
                .zip(mask)
                .filter_map(|(pair, keep)| keep.then_some(pair))
                .collect();
            (universe, relation)
        })
    })
}

/// Seeds reused by the sampler and builder tests.
pub(crate) const TEST_SEEDS: [u64; 4] = [0, 7, 42, 999];
