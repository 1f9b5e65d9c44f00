//! Human-readable property reports.
//!
//! [`PropertyReport`] evaluates the core properties of a relation, collects
//! gap sets for the ones that fail and renders everything through
//! [`fmt::Display`].

use std::fmt;

use crate::{
    property::Property,
    relation::{Element, PairSet, Relation, Universe},
};

/// Properties listed in a report, in display order.
pub const REPORTED_PROPERTIES: [Property; 8] = [
    Property::Reflexive,
    Property::Symmetric,
    Property::Transitive,
    Property::Asymmetric,
    Property::Antisymmetric,
    Property::Irreflexive,
    Property::Equivalence,
    Property::Order,
];

/// Properties with a missing-pairs section and their section labels.
const MISSING_CHECKED: [(Property, &str); 3] = [
    (Property::Reflexive, "reflexive"),
    (Property::Symmetric, "symmetric"),
    (Property::Transitive, "transitive"),
];

/// Properties with a conflicting-pairs section and their section labels.
const CONFLICTS_CHECKED: [(Property, &str); 3] = [
    (Property::Asymmetric, "asymmetry"),
    (Property::Antisymmetric, "antisymmetry"),
    (Property::Irreflexive, "irreflexivity"),
];

/// Selects the optional gap sections of a [`PropertyReport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// List pairs missing for failed reflexivity, symmetry or transitivity.
    pub include_missing: bool,
    /// List pairs conflicting with failed asymmetry, antisymmetry or
    /// irreflexivity.
    pub include_conflicts: bool,
}

/// Whether one property holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyStatus {
    /// The evaluated property.
    pub property: Property,
    /// `true` when the property holds.
    pub holds: bool,
}

/// Gap pairs explaining why a property fails.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PairGap<T> {
    /// The failing property.
    pub property: Property,
    /// Missing or conflicting pairs, depending on the section.
    pub pairs: PairSet<T>,
}

/// Property summary of a relation over a universe.
///
/// # Examples
/// ```
/// use relgen_core::{Property, PropertyReport, Relation, ReportOptions, Universe};
///
/// let universe = Universe::new([1, 2]);
/// let relation = Relation::from_pairs([(1, 1), (1, 2)]);
/// let options = ReportOptions { include_missing: true, include_conflicts: false };
/// let report = PropertyReport::analyse(&relation, &universe, options);
///
/// assert_eq!(report.holds(Property::Reflexive), Some(false));
/// let text = report.to_string();
/// assert!(text.starts_with("Relation Properties:\n"));
/// assert!(text.contains("    Missing pairs to be reflexive: {(2, 2)}"));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyReport<T> {
    universe: Universe<T>,
    relation: Relation<T>,
    statuses: Vec<PropertyStatus>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    missing: Option<Vec<PairGap<T>>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    conflicts: Option<Vec<PairGap<T>>>,
}

impl<T: Element> PropertyReport<T> {
    /// Evaluates every reported property of `relation` over `universe`.
    #[must_use]
    pub fn analyse(relation: &Relation<T>, universe: &Universe<T>, options: ReportOptions) -> Self {
        let statuses: Vec<_> = REPORTED_PROPERTIES
            .iter()
            .map(|&property| PropertyStatus {
                property,
                holds: property.holds(relation, universe),
            })
            .collect();
        let fails = |property: Property| {
            statuses
                .iter()
                .any(|status| status.property == property && !status.holds)
        };

        let missing = options.include_missing.then(|| {
            MISSING_CHECKED
                .iter()
                .map(|&(property, _)| property)
                .filter(|&property| fails(property))
                .map(|property| PairGap {
                    property,
                    pairs: property.missing_pairs(relation, universe),
                })
                .collect()
        });
        let conflicts = options.include_conflicts.then(|| {
            CONFLICTS_CHECKED
                .iter()
                .map(|&(property, _)| property)
                .filter(|&property| fails(property))
                .map(|property| PairGap {
                    property,
                    pairs: property.conflicting_pairs(relation),
                })
                .collect()
        });

        Self {
            universe: universe.clone(),
            relation: relation.clone(),
            statuses,
            missing,
            conflicts,
        }
    }

    /// Whether `property` holds, or `None` when it is not part of the report.
    #[must_use]
    pub fn holds(&self, property: Property) -> Option<bool> {
        self.statuses
            .iter()
            .find(|status| status.property == property)
            .map(|status| status.holds)
    }

    /// Statuses in display order.
    #[must_use]
    pub fn statuses(&self) -> &[PropertyStatus] {
        &self.statuses
    }

    /// Missing-pair gaps, when requested.
    #[must_use]
    pub fn missing(&self) -> Option<&[PairGap<T>]> {
        self.missing.as_deref()
    }

    /// Conflicting-pair gaps, when requested.
    #[must_use]
    pub fn conflicts(&self) -> Option<&[PairGap<T>]> {
        self.conflicts.as_deref()
    }

    /// The analysed universe.
    #[must_use]
    pub const fn universe(&self) -> &Universe<T> {
        &self.universe
    }

    /// The analysed relation.
    #[must_use]
    pub const fn relation(&self) -> &Relation<T> {
        &self.relation
    }
}

impl<T: Element> PartialEq for PropertyReport<T> {
    fn eq(&self, other: &Self) -> bool {
        self.universe == other.universe
            && self.relation == other.relation
            && self.statuses == other.statuses
            && self.missing == other.missing
            && self.conflicts == other.conflicts
    }
}

impl<T: Element> Eq for PropertyReport<T> {}

const fn status_label(property: Property) -> &'static str {
    match property {
        Property::Reflexive => "Reflexive",
        Property::Symmetric => "Symmetric",
        Property::Transitive => "Transitive",
        Property::Asymmetric => "Asymmetric",
        Property::Antisymmetric => "Antisymmetric",
        Property::Irreflexive => "Irreflexive",
        Property::Equivalence => "Equivalence Relation",
        Property::Order | Property::PartialOrder => "Partial/Total Order Relation",
        Property::TotalOrder => "Total Order Relation",
    }
}

/// Label of `property` in a gap section, falling back to its canonical name
/// for properties the section does not list.
fn section_label(section: &[(Property, &'static str)], property: Property) -> &'static str {
    section
        .iter()
        .find(|(listed, _)| *listed == property)
        .map_or(property.name(), |&(_, label)| label)
}

impl<T: Element> fmt::Display for PropertyReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Relation Properties:")?;
        writeln!(f, "  Universe: {:?}", self.universe.elements())?;
        writeln!(f, "  Relation: {:?}", self.relation.pairs())?;
        writeln!(f, "  Properties:")?;
        for status in &self.statuses {
            let verdict = if status.holds { "Yes" } else { "No" };
            writeln!(f, "    {}: {verdict}", status_label(status.property))?;
        }
        if let Some(missing) = &self.missing {
            writeln!(f)?;
            for gap in missing {
                writeln!(
                    f,
                    "    Missing pairs to be {}: {:?}",
                    section_label(&MISSING_CHECKED, gap.property),
                    gap.pairs
                )?;
            }
        }
        if let Some(conflicts) = &self.conflicts {
            writeln!(f)?;
            for gap in conflicts {
                writeln!(
                    f,
                    "    Conflicting pairs for {}: {:?}",
                    section_label(&CONFLICTS_CHECKED, gap.property),
                    gap.pairs
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn universe() -> Universe<i32> {
        Universe::new([1, 2, 3])
    }

    #[test]
    fn renders_status_lines_in_order() {
        let relation = Relation::from_pairs([(1, 1), (2, 2), (3, 3)]);
        let report = PropertyReport::analyse(&relation, &universe(), ReportOptions::default());
        let expected = "\
Relation Properties:
  Universe: [1, 2, 3]
  Relation: [(1, 1), (2, 2), (3, 3)]
  Properties:
    Reflexive: Yes
    Symmetric: Yes
    Transitive: Yes
    Asymmetric: Yes
    Antisymmetric: Yes
    Irreflexive: No
    Equivalence Relation: Yes
    Partial/Total Order Relation: Yes
";
        assert_eq!(report.to_string(), expected);
        assert!(report.missing().is_none());
        assert!(report.conflicts().is_none());
    }

    #[test]
    fn lists_missing_pairs_only_for_failing_properties() {
        let relation = Relation::from_pairs([(1, 2), (2, 3)]);
        let options = ReportOptions {
            include_missing: true,
            include_conflicts: false,
        };
        let report = PropertyReport::analyse(&relation, &universe(), options);
        let text = report.to_string();
        assert!(text.contains("    Missing pairs to be reflexive: {(1, 1), (2, 2), (3, 3)}\n"));
        assert!(text.contains("    Missing pairs to be symmetric: {(2, 1), (3, 2)}\n"));
        assert!(text.contains("    Missing pairs to be transitive: {(1, 3)}\n"));
        assert_eq!(report.missing().map(<[_]>::len), Some(3));
    }

    #[test]
    fn lists_conflicts_when_the_property_fails() {
        let relation = Relation::from_pairs([(1, 2), (2, 1), (3, 3)]);
        let options = ReportOptions {
            include_missing: false,
            include_conflicts: true,
        };
        let report = PropertyReport::analyse(&relation, &universe(), options);
        let text = report.to_string();
        assert!(text.contains("    Conflicting pairs for asymmetry: {(1, 2), (2, 1)}\n"));
        assert!(text.contains("    Conflicting pairs for antisymmetry: {(1, 2), (2, 1)}\n"));
        assert!(text.contains("    Conflicting pairs for irreflexivity: {(3, 3)}\n"));
    }

    #[rstest]
    #[case(ReportOptions { include_missing: true, include_conflicts: false })]
    #[case(ReportOptions { include_missing: false, include_conflicts: true })]
    fn requested_sections_may_be_empty(#[case] options: ReportOptions) {
        let report = PropertyReport::analyse(&Relation::<i32>::empty(), &Universe::empty(), options);
        let text = report.to_string();
        assert!(!text.contains("Missing pairs"));
        assert!(!text.contains("Conflicting pairs"));
        assert!(text.ends_with("Partial/Total Order Relation: Yes\n\n"));
    }

    #[rstest]
    #[case(&MISSING_CHECKED, Property::Reflexive, "reflexive")]
    #[case(&MISSING_CHECKED, Property::Transitive, "transitive")]
    #[case(&MISSING_CHECKED, Property::Irreflexive, "irreflexive")]
    #[case(&CONFLICTS_CHECKED, Property::Antisymmetric, "antisymmetry")]
    #[case(&CONFLICTS_CHECKED, Property::Irreflexive, "irreflexivity")]
    #[case(&CONFLICTS_CHECKED, Property::Reflexive, "reflexive")]
    fn section_labels_never_borrow_another_property(
        #[case] section: &[(Property, &'static str)],
        #[case] property: Property,
        #[case] expected: &str,
    ) {
        assert_eq!(section_label(section, property), expected);
    }

    #[test]
    fn reports_compare_by_content() {
        let universe = universe();
        let options = ReportOptions {
            include_missing: true,
            include_conflicts: true,
        };
        let forward = PropertyReport::analyse(&Relation::from_pairs([(1, 2), (2, 1)]), &universe, options);
        let reversed = PropertyReport::analyse(&Relation::from_pairs([(2, 1), (1, 2)]), &universe, options);
        let other = PropertyReport::analyse(&Relation::from_pairs([(1, 2)]), &universe, options);
        assert_eq!(forward, reversed);
        assert_ne!(forward, other);
    }

    #[test]
    fn holds_answers_only_reported_properties() {
        let report = PropertyReport::analyse(
            &Relation::<i32>::empty(),
            &Universe::empty(),
            ReportOptions::default(),
        );
        assert_eq!(report.holds(Property::Irreflexive), Some(true));
        assert_eq!(report.holds(Property::TotalOrder), None);
        assert_eq!(report.statuses().len(), REPORTED_PROPERTIES.len());
    }
}
