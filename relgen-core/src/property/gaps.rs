//! Gap analysis: the pairs that explain why a relation fails a property.
//!
//! "Missing" pairs would have to be added for the property to hold;
//! "conflicting" pairs are present and violate it. Every function here is
//! read-only with respect to its inputs.

use crate::relation::{Element, PairSet, Relation, Universe};

use super::predicates::incomparable_pairs;

pub(crate) fn missing_for_reflexive<T: Element>(
    relation: &Relation<T>,
    universe: &Universe<T>,
) -> PairSet<T> {
    universe
        .iter()
        .filter(|x| !relation.contains(x, x))
        .map(|x| (x.clone(), x.clone()))
        .collect()
}

pub(crate) fn missing_for_symmetric<T: Element>(relation: &Relation<T>) -> PairSet<T> {
    relation
        .iter()
        .filter(|(a, b)| !relation.contains(b, a))
        .map(|(a, b)| (b.clone(), a.clone()))
        .collect()
}

/// One composition step: `(a, c)` for every `(a, b), (b, c)` with `c` in the
/// universe and `(a, c)` absent. Adding the result need not make the
/// relation transitive; see [`transitive_closure`].
pub(crate) fn missing_for_transitive<T: Element>(
    relation: &Relation<T>,
    universe: &Universe<T>,
) -> PairSet<T> {
    let mut missing = PairSet::new();
    for (a, b) in relation {
        for c in universe {
            if relation.contains(b, c) && !relation.contains(a, c) {
                missing.insert((a.clone(), c.clone()));
            }
        }
    }
    missing
}

/// Reversed conflict pairs: `(b, a)` for every conflicting `(a, b)`.
pub(crate) fn missing_for_antisymmetric<T: Element>(relation: &Relation<T>) -> PairSet<T> {
    conflicts_for_antisymmetry(relation)
        .into_iter()
        .map(|(a, b)| (b, a))
        .collect()
}

pub(crate) fn missing_for_totality<T: Element>(
    relation: &Relation<T>,
    universe: &Universe<T>,
) -> PairSet<T> {
    incomparable_pairs(relation, universe)
        .map(|(x, y)| (x.clone(), y.clone()))
        .collect()
}

pub(crate) fn conflicts_for_antisymmetry<T: Element>(relation: &Relation<T>) -> PairSet<T> {
    relation
        .iter()
        .filter(|(a, b)| a != b && relation.contains(b, a))
        .cloned()
        .collect()
}

pub(crate) fn conflicts_for_irreflexivity<T: Element>(relation: &Relation<T>) -> PairSet<T> {
    relation.iter().filter(|(a, b)| a == b).cloned().collect()
}

/// Repeatedly adds [`missing_for_transitive`] pairs until none remain.
///
/// Terminates because every round adds at least one pair drawn from the
/// finite set of pairs over the relation's elements and the universe.
///
/// # Examples
/// ```
/// use relgen_core::{Property, Relation, Universe, check_property, transitive_closure};
///
/// let universe = Universe::new([1, 2, 3, 4]);
/// let chain = Relation::from_pairs([(1, 2), (2, 3), (3, 4)]);
/// let closed = transitive_closure(&chain, &universe);
/// assert!(check_property(&closed, &universe, Property::Transitive));
/// assert!(closed.contains(&1, &4));
/// ```
#[must_use]
pub fn transitive_closure<T: Element>(relation: &Relation<T>, universe: &Universe<T>) -> Relation<T> {
    let mut closed = relation.clone();
    loop {
        let missing = missing_for_transitive(&closed, universe);
        if missing.is_empty() {
            return closed;
        }
        closed = closed.with_pairs(missing);
    }
}
