//! Unconstrained random generators.
//!
//! Erdős–Rényi style generators include every candidate pair independently
//! with a fixed probability. They are much cheaper than rejection sampling
//! and are useful as seeds for tests or as baselines in benchmarks.

use rand::{Rng, seq::index};
use tracing::instrument;

use crate::{
    error::{RelgenError, Result},
    relation::{Element, FromIndex, Relation, Universe},
    sampler::draw_subset,
};

/// Largest universe size drawn when [`random_universe`] is not given one.
pub const DEFAULT_MAX_UNIVERSE_SIZE: usize = 10;

/// Draws a sorted universe of distinct elements.
///
/// `size` defaults to a uniform draw from `1..=10`. `superset` defaults to
/// the elements `1..size * 10`.
///
/// # Errors
/// Returns [`RelgenError::UniverseSampleTooLarge`] when `size` exceeds the
/// number of distinct superset elements and
/// [`RelgenError::ElementRangeOverflow`] when the default superset does not
/// fit in `T`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use relgen_core::erdos::random_universe;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let universe = random_universe::<u32, _>(Some(4), None, &mut rng)?;
/// assert_eq!(universe.len(), 4);
/// assert!(universe.iter().all(|x| (1..40).contains(x)));
/// assert!(universe.elements().windows(2).all(|w| w[0] < w[1]));
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
pub fn random_universe<T, R>(
    size: Option<usize>,
    superset: Option<&[T]>,
    rng: &mut R,
) -> Result<Universe<T>>
where
    T: Element + FromIndex,
    R: Rng,
{
    let requested = size.unwrap_or_else(|| rng.gen_range(1..=DEFAULT_MAX_UNIVERSE_SIZE));
    let pool = match superset {
        Some(elements) => Universe::new(elements.iter().cloned()),
        None => default_superset(requested)?,
    };
    sample_universe(&pool, requested, rng)
}

/// Draws `size` distinct elements of `pool` and returns them sorted.
///
/// # Errors
/// Returns [`RelgenError::UniverseSampleTooLarge`] when `size > |pool|`.
pub fn sample_universe<T: Element, R: Rng>(
    pool: &Universe<T>,
    size: usize,
    rng: &mut R,
) -> Result<Universe<T>> {
    if size > pool.len() {
        return Err(RelgenError::UniverseSampleTooLarge {
            requested: size,
            available: pool.len(),
        });
    }
    let elements = pool.elements();
    let chosen = index::sample(rng, elements.len(), size)
        .into_iter()
        .filter_map(|position| elements.get(position).cloned());
    Ok(Universe::new(chosen).sorted())
}

fn default_superset<T: Element + FromIndex>(size: usize) -> Result<Universe<T>> {
    let upper = size
        .checked_mul(10)
        .ok_or(RelgenError::ElementRangeOverflow { size })?;
    (1..upper)
        .map(T::from_index)
        .collect::<Option<Universe<T>>>()
        .ok_or(RelgenError::ElementRangeOverflow { size: upper })
}

fn check_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(RelgenError::InvalidProbability { probability })
    }
}

/// Includes each of the `|universe|²` pairs independently with probability
/// `p`.
///
/// # Errors
/// Returns [`RelgenError::InvalidProbability`] when `p` is NaN or outside
/// `[0, 1]`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use relgen_core::{Universe, erdos::erdos_renyi};
///
/// let universe = Universe::new([1, 2, 3]);
/// let mut rng = SmallRng::seed_from_u64(1);
/// assert_eq!(erdos_renyi(&universe, 1.0, &mut rng)?.len(), 9);
/// assert!(erdos_renyi(&universe, 0.0, &mut rng)?.is_empty());
/// assert!(erdos_renyi(&universe, 1.5, &mut rng).is_err());
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
#[instrument(name = "core.erdos_renyi", err, skip(universe, rng), fields(universe = universe.len()))]
pub fn erdos_renyi<T: Element, R: Rng>(
    universe: &Universe<T>,
    p: f64,
    rng: &mut R,
) -> Result<Relation<T>> {
    check_probability(p)?;
    let mut pairs = Vec::new();
    for a in universe {
        for b in universe {
            if rng.gen_bool(p) {
                pairs.push((a.clone(), b.clone()));
            }
        }
    }
    Ok(Relation::from_pairs(pairs))
}

/// Includes every `(x, x)` and each off-diagonal pair independently with
/// probability `p`. The result is always reflexive.
///
/// # Errors
/// Returns [`RelgenError::InvalidProbability`] when `p` is NaN or outside
/// `[0, 1]`.
#[instrument(
    name = "core.reflexive_erdos_renyi",
    err,
    skip(universe, rng),
    fields(universe = universe.len())
)]
pub fn reflexive_erdos_renyi<T: Element, R: Rng>(
    universe: &Universe<T>,
    p: f64,
    rng: &mut R,
) -> Result<Relation<T>> {
    check_probability(p)?;
    let mut pairs: Vec<_> = universe.iter().map(|x| (x.clone(), x.clone())).collect();
    for a in universe {
        for b in universe {
            if a != b && rng.gen_bool(p) {
                pairs.push((a.clone(), b.clone()));
            }
        }
    }
    Ok(Relation::from_pairs(pairs))
}

/// Includes each unordered pair `{a, b}` (taken in universe order, diagonal
/// included) with probability `p` and mirrors it. The result is always
/// symmetric.
///
/// # Errors
/// Returns [`RelgenError::InvalidProbability`] when `p` is NaN or outside
/// `[0, 1]`.
#[instrument(
    name = "core.symmetric_erdos_renyi",
    err,
    skip(universe, rng),
    fields(universe = universe.len())
)]
pub fn symmetric_erdos_renyi<T: Element, R: Rng>(
    universe: &Universe<T>,
    p: f64,
    rng: &mut R,
) -> Result<Relation<T>> {
    check_probability(p)?;
    let elements = universe.elements();
    let mut chosen = Vec::new();
    for (i, a) in elements.iter().enumerate() {
        for b in elements.iter().skip(i) {
            if rng.gen_bool(p) {
                chosen.push((a.clone(), b.clone()));
            }
        }
    }
    let mirrored: Vec<_> = chosen
        .iter()
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (b.clone(), a.clone()))
        .collect();
    Ok(Relation::from_pairs(chosen.into_iter().chain(mirrored)))
}

/// One unconstrained draw: a size uniform in `0..=|universe|²`, then a
/// uniform subset of that size.
///
/// # Errors
/// Returns [`RelgenError::UniverseTooLarge`] when the candidate pairs cannot
/// be enumerated.
pub fn uniform_relation<T: Element, R: Rng>(
    universe: &Universe<T>,
    rng: &mut R,
) -> Result<Relation<T>> {
    let candidates = universe.candidate_pairs()?;
    let size = rng.gen_range(0..=candidates.len());
    Ok(draw_subset(&candidates, size, rng))
}
