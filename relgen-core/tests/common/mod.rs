use relgen_core::{Relation, Universe};

/// The universe `{1, 2, 3}` used by most scenarios.
#[must_use]
pub fn three() -> Universe<i64> {
    Universe::new([1, 2, 3])
}

/// The chain `1 ≤ 2 ≤ 3` as a reflexive total order.
#[must_use]
pub fn chain() -> Relation<i64> {
    Relation::from_pairs([(1, 1), (2, 2), (3, 3), (1, 2), (2, 3), (1, 3)])
}
