//! Boolean checks for the algebraic properties of a relation.
//!
//! Reflexivity and irreflexivity range over the universe, while the
//! remaining checks range over the relation's own pairs. Pairs mentioning
//! elements outside the universe therefore still take part in the symmetry,
//! antisymmetry and transitivity checks.

use crate::relation::{Element, Relation, Universe};

pub(crate) fn is_reflexive<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    universe.iter().all(|x| relation.contains(x, x))
}

pub(crate) fn is_symmetric<T: Element>(relation: &Relation<T>) -> bool {
    relation.iter().all(|(a, b)| relation.contains(b, a))
}

pub(crate) fn is_transitive<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    relation.iter().all(|(a, b)| {
        universe
            .iter()
            .filter(|c| relation.contains(b, c))
            .all(|c| relation.contains(a, c))
    })
}

/// Shared by asymmetry and antisymmetry: both forbid `(a, b)` and `(b, a)`
/// together for `a != b` and place no constraint on the diagonal.
pub(crate) fn is_antisymmetric<T: Element>(relation: &Relation<T>) -> bool {
    relation
        .iter()
        .filter(|(a, b)| a != b)
        .all(|(a, b)| !relation.contains(b, a))
}

pub(crate) fn is_irreflexive<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    universe.iter().all(|x| !relation.contains(x, x))
}

pub(crate) fn is_equivalence<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    is_reflexive(relation, universe) && is_symmetric(relation) && is_transitive(relation, universe)
}

pub(crate) fn is_order<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    is_reflexive(relation, universe)
        && is_antisymmetric(relation)
        && is_transitive(relation, universe)
}

pub(crate) fn is_total_order<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> bool {
    is_order(relation, universe) && incomparable_pairs(relation, universe).next().is_none()
}

/// Distinct universe pairs `(x, y)`, `x` listed before `y`, related in
/// neither direction.
pub(crate) fn incomparable_pairs<'a, T: Element>(
    relation: &'a Relation<T>,
    universe: &'a Universe<T>,
) -> impl Iterator<Item = (&'a T, &'a T)> + 'a {
    universe
        .iter()
        .enumerate()
        .flat_map(move |(position, x)| {
            universe
                .iter()
                .skip(position + 1)
                .map(move |y| (x, y))
        })
        .filter(move |(x, y)| !relation.contains(x, y) && !relation.contains(y, x))
}
