//! Algebraic properties of binary relations.
//!
//! [`Property`] is the closed set of properties the library understands.
//! Each variant knows how to check itself against a relation and a universe
//! and how to explain a failure through missing or conflicting pairs.

mod gaps;
mod predicates;
#[cfg(test)]
mod proptests;

use std::{fmt, str::FromStr};

use crate::{
    error::RelgenError,
    relation::{Element, PairSet, Relation, Universe},
};

pub use gaps::transitive_closure;

/// A property a binary relation may satisfy.
///
/// # Examples
/// ```
/// use relgen_core::Property;
///
/// let property: Property = " Reflexive ".parse()?;
/// assert_eq!(property, Property::Reflexive);
/// assert_eq!(property.to_string(), "reflexive");
/// assert!("dense".parse::<Property>().is_err());
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Property {
    /// Every universe element is related to itself.
    Reflexive,
    /// `(a, b)` implies `(b, a)`.
    Symmetric,
    /// `(a, b)` and `(b, c)` imply `(a, c)`.
    Transitive,
    /// No distinct `a`, `b` with both `(a, b)` and `(b, a)`.
    ///
    /// Evaluated exactly like [`Property::Antisymmetric`]; pairs `(x, x)`
    /// are allowed.
    Asymmetric,
    /// No distinct `a`, `b` with both `(a, b)` and `(b, a)`.
    Antisymmetric,
    /// No universe element is related to itself.
    Irreflexive,
    /// Reflexive, symmetric and transitive.
    Equivalence,
    /// Reflexive, antisymmetric and transitive.
    Order,
    /// Alias of [`Property::Order`].
    PartialOrder,
    /// An order in which every two distinct elements are comparable.
    TotalOrder,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Reflexive,
        Self::Symmetric,
        Self::Transitive,
        Self::Asymmetric,
        Self::Antisymmetric,
        Self::Irreflexive,
        Self::Equivalence,
        Self::Order,
        Self::PartialOrder,
        Self::TotalOrder,
    ];

    /// Canonical lowercase name used in property specifications.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reflexive => "reflexive",
            Self::Symmetric => "symmetric",
            Self::Transitive => "transitive",
            Self::Asymmetric => "asymmetric",
            Self::Antisymmetric => "antisymmetric",
            Self::Irreflexive => "irreflexive",
            Self::Equivalence => "equivalence",
            Self::Order => "order",
            Self::PartialOrder => "partial_order",
            Self::TotalOrder => "total_order",
        }
    }

    /// Checks whether `relation` has this property over `universe`.
    #[must_use]
    pub fn holds<T: Element>(self, relation: &Relation<T>, universe: &Universe<T>) -> bool {
        match self {
            Self::Reflexive => predicates::is_reflexive(relation, universe),
            Self::Symmetric => predicates::is_symmetric(relation),
            Self::Transitive => predicates::is_transitive(relation, universe),
            Self::Asymmetric | Self::Antisymmetric => predicates::is_antisymmetric(relation),
            Self::Irreflexive => predicates::is_irreflexive(relation, universe),
            Self::Equivalence => predicates::is_equivalence(relation, universe),
            Self::Order | Self::PartialOrder => predicates::is_order(relation, universe),
            Self::TotalOrder => predicates::is_total_order(relation, universe),
        }
    }

    /// Pairs that would have to be added for this property to hold.
    ///
    /// For asymmetry and antisymmetry no addition can help; the result lists
    /// the reverse of each conflicting pair instead. Irreflexivity never
    /// misses pairs. Composite properties return the union of their parts.
    /// Transitive gaps cover a single composition step only.
    #[must_use]
    pub fn missing_pairs<T: Element>(
        self,
        relation: &Relation<T>,
        universe: &Universe<T>,
    ) -> PairSet<T> {
        match self {
            Self::Reflexive => gaps::missing_for_reflexive(relation, universe),
            Self::Symmetric => gaps::missing_for_symmetric(relation),
            Self::Transitive => gaps::missing_for_transitive(relation, universe),
            Self::Asymmetric | Self::Antisymmetric => gaps::missing_for_antisymmetric(relation),
            Self::Irreflexive => PairSet::new(),
            Self::Equivalence => {
                let mut missing = gaps::missing_for_reflexive(relation, universe);
                missing.extend(gaps::missing_for_symmetric(relation));
                missing.extend(gaps::missing_for_transitive(relation, universe));
                missing
            }
            Self::Order | Self::PartialOrder => {
                let mut missing = gaps::missing_for_reflexive(relation, universe);
                missing.extend(gaps::missing_for_transitive(relation, universe));
                missing
            }
            Self::TotalOrder => {
                let mut missing = Self::Order.missing_pairs(relation, universe);
                missing.extend(gaps::missing_for_totality(relation, universe));
                missing
            }
        }
    }

    /// Pairs present in `relation` that violate this property.
    ///
    /// Only asymmetry, antisymmetry, irreflexivity and the order properties
    /// can be violated by a present pair; every other property yields an
    /// empty set.
    #[must_use]
    pub fn conflicting_pairs<T: Element>(self, relation: &Relation<T>) -> PairSet<T> {
        match self {
            Self::Asymmetric
            | Self::Antisymmetric
            | Self::Order
            | Self::PartialOrder
            | Self::TotalOrder => gaps::conflicts_for_antisymmetry(relation),
            Self::Irreflexive => gaps::conflicts_for_irreflexivity(relation),
            Self::Reflexive | Self::Symmetric | Self::Transitive | Self::Equivalence => {
                PairSet::new()
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = RelgenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim().to_lowercase();
        let property = match name.as_str() {
            "reflexive" => Self::Reflexive,
            "symmetric" => Self::Symmetric,
            "transitive" => Self::Transitive,
            "asymmetric" => Self::Asymmetric,
            "antisymmetric" => Self::Antisymmetric,
            "irreflexive" => Self::Irreflexive,
            "equivalence" => Self::Equivalence,
            "order" => Self::Order,
            "partial_order" | "partial order" => Self::PartialOrder,
            "total_order" | "total order" => Self::TotalOrder,
            _ => return Err(RelgenError::UnknownProperty { name }),
        };
        Ok(property)
    }
}

/// Checks whether `relation` has `property` over `universe`.
///
/// # Examples
/// ```
/// use relgen_core::{Property, Relation, Universe, check_property};
///
/// let universe = Universe::new([1, 2]);
/// let relation = Relation::from_pairs([(1, 1), (2, 2), (1, 2)]);
/// assert!(check_property(&relation, &universe, Property::Order));
/// assert!(!check_property(&relation, &universe, Property::Symmetric));
/// ```
#[must_use]
pub fn check_property<T: Element>(
    relation: &Relation<T>,
    universe: &Universe<T>,
    property: Property,
) -> bool {
    property.holds(relation, universe)
}

/// Pairs that would have to be added to `relation` for `property` to hold.
///
/// # Examples
/// ```
/// use relgen_core::{Property, Relation, Universe, find_missing};
///
/// let universe = Universe::new([1, 2]);
/// let relation = Relation::from_pairs([(1, 2)]);
/// let missing = find_missing(&relation, &universe, Property::Reflexive);
/// assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec![(1, 1), (2, 2)]);
/// ```
#[must_use]
pub fn find_missing<T: Element>(
    relation: &Relation<T>,
    universe: &Universe<T>,
    property: Property,
) -> PairSet<T> {
    property.missing_pairs(relation, universe)
}

/// Pairs already in `relation` that violate `property`.
///
/// # Examples
/// ```
/// use relgen_core::{Property, Relation, find_conflicts};
///
/// let relation = Relation::from_pairs([(1, 2), (2, 1), (3, 3)]);
/// let conflicts = find_conflicts(&relation, Property::Antisymmetric);
/// assert_eq!(conflicts.len(), 2);
/// assert_eq!(find_conflicts(&relation, Property::Irreflexive).len(), 1);
/// ```
#[must_use]
pub fn find_conflicts<T: Element>(relation: &Relation<T>, property: Property) -> PairSet<T> {
    property.conflicting_pairs(relation)
}
