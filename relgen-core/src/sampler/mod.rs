//! Rejection sampling of random relations.
//!
//! The sampler draws a cardinality uniformly from `0..=|universe|²`, rejects
//! it outright when it falls outside the configured [`TargetBounds`], and
//! otherwise draws a uniform subset of the candidate pairs of exactly that
//! size. The subset is accepted once every predicate passes. Each rejection
//! counts against a mandatory budget so infeasible constraints terminate.
//!
//! Accepted relations are uniform only among relations of the same
//! cardinality that satisfy the predicates; the sampler makes no claim of
//! uniformity over the constrained set as a whole.

mod bounds;
#[cfg(test)]
mod proptests;

use std::{fmt, num::NonZeroUsize};

use rand::{Rng, seq::index};
use tracing::{debug, instrument, trace, warn};

use crate::{
    error::{RelgenError, Result},
    registry::RelationPredicate,
    relation::{Element, Pair, Relation, Universe},
};

pub use bounds::TargetBounds;

/// Rejection budget applied when callers do not choose one.
pub const DEFAULT_MAX_REJECTIONS: usize = 100_000;

/// Counts of rejected draws, split by cause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RejectionStats {
    /// Draws whose cardinality fell outside the target bounds.
    pub size_rejections: usize,
    /// Draws that failed at least one predicate.
    pub property_rejections: usize,
}

impl RejectionStats {
    /// Total number of rejected draws.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.size_rejections.saturating_add(self.property_rejections)
    }
}

/// A relation accepted by [`RejectionSampler::sample`] together with the
/// rejections it took to find it.
#[derive(Clone, Debug)]
pub struct Sample<T> {
    /// The accepted relation, in draw order.
    pub relation: Relation<T>,
    /// Rejections recorded before acceptance.
    pub stats: RejectionStats,
}

impl<T: Element> PartialEq for Sample<T> {
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation && self.stats == other.stats
    }
}

impl<T: Element> Eq for Sample<T> {}

/// Draws random relations over a universe until one satisfies the size
/// bounds and every predicate.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use rand::{SeedableRng, rngs::SmallRng};
/// use relgen_core::{PropertySpec, RejectionSampler, TargetBounds, Universe};
///
/// let universe = Universe::new([1, 2, 3]);
/// let spec = PropertySpec::parse("reflexive")?;
/// let budget = NonZeroUsize::new(10_000).expect("non-zero budget");
/// let sampler = RejectionSampler::new(&universe, budget)
///     .with_bounds(TargetBounds::new(Some(3), Some(6))?)
///     .with_predicates(spec.bind(&universe));
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let sample = sampler.sample(&mut rng)?;
/// assert!((3..=6).contains(&sample.relation.len()));
/// assert!(universe.iter().all(|x| sample.relation.contains(x, x)));
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
pub struct RejectionSampler<'a, T> {
    universe: &'a Universe<T>,
    bounds: TargetBounds,
    predicates: Vec<Box<dyn RelationPredicate<T> + 'a>>,
    max_rejections: NonZeroUsize,
}

impl<'a, T: Element> RejectionSampler<'a, T> {
    /// Creates an unconstrained sampler over `universe` that gives up after
    /// `max_rejections` rejected draws.
    #[must_use]
    pub fn new(universe: &'a Universe<T>, max_rejections: NonZeroUsize) -> Self {
        Self {
            universe,
            bounds: TargetBounds::unbounded(),
            predicates: Vec::new(),
            max_rejections,
        }
    }

    /// Restricts the cardinality of accepted relations.
    #[must_use]
    pub fn with_bounds(mut self, bounds: TargetBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Appends a predicate; predicates run in insertion order.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl RelationPredicate<T> + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Appends every predicate yielded by `predicates`.
    #[must_use]
    pub fn with_predicates<P>(mut self, predicates: impl IntoIterator<Item = P>) -> Self
    where
        P: RelationPredicate<T> + 'a,
    {
        self.predicates.extend(
            predicates
                .into_iter()
                .map(|predicate| Box::new(predicate) as Box<dyn RelationPredicate<T> + 'a>),
        );
        self
    }

    /// The universe relations are drawn over.
    #[must_use]
    pub const fn universe(&self) -> &'a Universe<T> {
        self.universe
    }

    /// The configured size bounds.
    #[must_use]
    pub const fn bounds(&self) -> TargetBounds {
        self.bounds
    }

    /// Number of configured predicates.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// The rejection budget.
    #[must_use]
    pub const fn max_rejections(&self) -> NonZeroUsize {
        self.max_rejections
    }

    /// Draws relations until one is accepted.
    ///
    /// Identical inputs and an identically seeded `rng` reproduce the same
    /// sequence of draws, rejections and the same accepted relation.
    ///
    /// # Errors
    /// Returns [`RelgenError::UniverseTooLarge`] when the candidate pairs
    /// cannot be enumerated and [`RelgenError::RejectionBudgetExceeded`] when
    /// the budget runs out before a draw is accepted.
    #[instrument(
        name = "core.sample",
        err,
        skip(self, rng),
        fields(
            universe = self.universe.len(),
            min = ?self.bounds.min(),
            max = ?self.bounds.max(),
            predicates = self.predicates.len(),
            budget = %self.max_rejections,
        ),
    )]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<Sample<T>> {
        let candidates = self.universe.candidate_pairs()?;
        let mut stats = RejectionStats::default();
        loop {
            if stats.total() >= self.max_rejections.get() {
                warn!(
                    size_rejections = stats.size_rejections,
                    property_rejections = stats.property_rejections,
                    "rejection budget exhausted"
                );
                return Err(RelgenError::RejectionBudgetExceeded {
                    budget: self.max_rejections,
                    size_rejections: stats.size_rejections,
                    property_rejections: stats.property_rejections,
                });
            }

            let size = rng.gen_range(0..=candidates.len());
            if !self.bounds.admits(size) {
                stats.size_rejections += 1;
                trace!(size, rejections = stats.total(), "rejected by size");
                continue;
            }

            let relation = draw_subset(&candidates, size, rng);
            match self.first_failure(&relation) {
                None => {
                    debug!(
                        size,
                        size_rejections = stats.size_rejections,
                        property_rejections = stats.property_rejections,
                        "relation accepted"
                    );
                    return Ok(Sample { relation, stats });
                }
                Some(predicate) => {
                    stats.property_rejections += 1;
                    trace!(
                        size,
                        predicate = %predicate,
                        rejections = stats.total(),
                        "rejected by property"
                    );
                }
            }
        }
    }

    /// Label of the first predicate `relation` fails, evaluating in order.
    fn first_failure(&self, relation: &Relation<T>) -> Option<String> {
        self.predicates
            .iter()
            .find(|predicate| !predicate.accepts(relation))
            .map(|predicate| predicate.label())
    }
}

impl<T: Element> fmt::Debug for RejectionSampler<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RejectionSampler")
            .field("universe_len", &self.universe.elements().len())
            .field("bounds", &self.bounds)
            .field(
                "predicates",
                &self
                    .predicates
                    .iter()
                    .map(|predicate| predicate.label())
                    .collect::<Vec<_>>(),
            )
            .field("max_rejections", &self.max_rejections)
            .finish()
    }
}

/// Uniform subset of `candidates` with exactly `size` pairs, drawn without
/// replacement and kept in draw order.
pub(crate) fn draw_subset<T: Element, R: Rng>(
    candidates: &[Pair<T>],
    size: usize,
    rng: &mut R,
) -> Relation<T> {
    index::sample(rng, candidates.len(), size)
        .into_iter()
        .filter_map(|position| candidates.get(position).cloned())
        .collect()
}
