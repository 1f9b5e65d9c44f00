//! Seeded relation fixtures for the benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use relgen_core::{Relation, Universe, erdos::erdos_renyi};

use crate::{error::BenchSetupError, params::RelationBenchParams};

/// Element type used by every benchmark fixture.
pub type BenchElement = i64;

/// Draws an Erdős–Rényi relation over `0..universe_size`.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when the universe cannot be built or the
/// density is not a probability.
pub fn random_relation(
    params: &RelationBenchParams,
    seed: u64,
) -> Result<(Universe<BenchElement>, Relation<BenchElement>), BenchSetupError> {
    let universe = Universe::range(params.universe_size)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let relation = erdos_renyi(&universe, params.density, &mut rng)?;
    Ok((universe, relation))
}

/// The total order `≤` over `0..universe_size`, the worst case for the
/// transitivity check since every pair composes.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when the universe cannot be built.
pub fn total_order(
    universe_size: usize,
) -> Result<(Universe<BenchElement>, Relation<BenchElement>), BenchSetupError> {
    let universe = Universe::range(universe_size)?;
    let relation = universe
        .iter()
        .flat_map(|a| {
            universe
                .iter()
                .filter(move |b| a <= *b)
                .map(move |b| (*a, *b))
        })
        .collect();
    Ok((universe, relation))
}
