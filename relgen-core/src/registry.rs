//! Property specifications and the predicates they bind to.
//!
//! A specification such as `"reflexive, !symmetric"` parses into an ordered
//! list of [`PropertyToken`]s. Binding the specification to a universe yields
//! one [`BoundPredicate`] per token; all of them borrow the same universe.

use std::{fmt, str::FromStr};

use crate::{
    error::{RelgenError, Result},
    property::Property,
    relation::{Element, Relation, Universe},
};

/// A unary check over a relation, used by the rejection sampler.
///
/// Implemented by [`BoundPredicate`] and [`FnPredicate`], so callers can mix
/// property checks with custom constraints.
///
/// # Examples
/// ```
/// use relgen_core::{FnPredicate, Relation, RelationPredicate};
///
/// let small = FnPredicate::new("at most one pair", |relation: &Relation<u8>| relation.len() <= 1);
/// assert!(small.accepts(&Relation::from_pairs([(0, 0)])));
/// assert_eq!(RelationPredicate::<u8>::label(&small), "at most one pair");
/// ```
pub trait RelationPredicate<T> {
    /// Returns `true` when `relation` passes the check.
    fn accepts(&self, relation: &Relation<T>) -> bool;

    /// Human-readable description used in diagnostics.
    fn label(&self) -> String;
}

/// One entry of a [`PropertySpec`]: a property, possibly negated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyToken {
    property: Property,
    negated: bool,
}

impl PropertyToken {
    /// Creates a token for `property`, negated when `negated` is `true`.
    #[must_use]
    pub const fn new(property: Property, negated: bool) -> Self {
        Self { property, negated }
    }

    /// The referenced property.
    #[must_use]
    pub const fn property(self) -> Property {
        self.property
    }

    /// Whether the property must fail rather than hold.
    #[must_use]
    pub const fn negated(self) -> bool {
        self.negated
    }

    /// Evaluates the token against `relation` over `universe`.
    #[must_use]
    pub fn is_satisfied_by<T: Element>(self, relation: &Relation<T>, universe: &Universe<T>) -> bool {
        self.property.holds(relation, universe) != self.negated
    }
}

impl fmt::Display for PropertyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        f.write_str(self.property.name())
    }
}

/// Parsed, universe-independent property specification.
///
/// Grammar: `spec := token (',' token)*`, `token := ['!'] name`. Names are
/// case-insensitive and surrounding whitespace is ignored. A blank string is
/// the empty specification.
///
/// # Examples
/// ```
/// use relgen_core::{Property, PropertySpec};
///
/// let spec: PropertySpec = "Reflexive, !symmetric".parse()?;
/// let tokens = spec.tokens();
/// assert_eq!(tokens[0].property(), Property::Reflexive);
/// assert!(tokens[1].negated());
/// assert_eq!(spec.to_string(), "reflexive, !symmetric");
/// assert!(PropertySpec::parse("").map(|spec| spec.is_empty())?);
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertySpec {
    tokens: Vec<PropertyToken>,
}

impl PropertySpec {
    /// Parses a comma-separated property specification.
    ///
    /// # Errors
    /// Returns [`RelgenError::EmptyPropertyToken`] when a non-blank
    /// specification contains an empty token and
    /// [`RelgenError::UnknownProperty`] when a name is not recognised.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let tokens = raw
            .split(',')
            .enumerate()
            .map(|(position, token)| parse_token(position, token))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    /// The tokens in specification order.
    #[must_use]
    pub fn tokens(&self) -> &[PropertyToken] {
        &self.tokens
    }

    /// Returns `true` when the specification imposes no constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Binds every token to `universe`, preserving order.
    #[must_use]
    pub fn bind<'u, T: Element>(&self, universe: &'u Universe<T>) -> Vec<BoundPredicate<'u, T>> {
        self.tokens
            .iter()
            .map(|&token| BoundPredicate { token, universe })
            .collect()
    }

    /// Returns `true` when `relation` satisfies every token.
    #[must_use]
    pub fn is_satisfied_by<T: Element>(&self, relation: &Relation<T>, universe: &Universe<T>) -> bool {
        self.tokens
            .iter()
            .all(|token| token.is_satisfied_by(relation, universe))
    }
}

fn parse_token(position: usize, raw: &str) -> Result<PropertyToken> {
    let normalised = raw.trim().to_lowercase();
    let (negated, name) = match normalised.strip_prefix('!') {
        Some(rest) => (true, rest.trim()),
        None => (false, normalised.as_str()),
    };
    if name.is_empty() {
        return Err(RelgenError::EmptyPropertyToken { position });
    }
    Ok(PropertyToken::new(name.parse()?, negated))
}

impl FromStr for PropertySpec {
    type Err = RelgenError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

impl fmt::Display for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl FromIterator<PropertyToken> for PropertySpec {
    fn from_iter<I: IntoIterator<Item = PropertyToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// A [`PropertyToken`] bound to the universe it is evaluated over.
#[derive(Clone, Debug)]
pub struct BoundPredicate<'u, T> {
    token: PropertyToken,
    universe: &'u Universe<T>,
}

impl<'u, T: Element> BoundPredicate<'u, T> {
    /// Binds `token` to `universe`.
    #[must_use]
    pub const fn new(token: PropertyToken, universe: &'u Universe<T>) -> Self {
        Self { token, universe }
    }

    /// The bound token.
    #[must_use]
    pub const fn token(&self) -> PropertyToken {
        self.token
    }

    /// The universe the predicate is evaluated over.
    #[must_use]
    pub const fn universe(&self) -> &'u Universe<T> {
        self.universe
    }
}

impl<T: Element> RelationPredicate<T> for BoundPredicate<'_, T> {
    fn accepts(&self, relation: &Relation<T>) -> bool {
        self.token.is_satisfied_by(relation, self.universe)
    }

    fn label(&self) -> String {
        self.token.to_string()
    }
}

/// Adapts a closure into a [`RelationPredicate`].
pub struct FnPredicate<F> {
    label: String,
    check: F,
}

impl<F> FnPredicate<F> {
    /// Wraps `check` under the diagnostic `label`.
    pub fn new(label: impl Into<String>, check: F) -> Self {
        Self {
            label: label.into(),
            check,
        }
    }
}

impl<T, F> RelationPredicate<T> for FnPredicate<F>
where
    F: Fn(&Relation<T>) -> bool,
{
    fn accepts(&self, relation: &Relation<T>) -> bool {
        (self.check)(relation)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
