//! Universe and relation containers.
//!
//! A [`Universe`] is a finite list of unique elements and a [`Relation`] is a
//! set of ordered pairs over it. Both keep the insertion order of their
//! contents so draws stay reproducible, while the relation also maintains a
//! successor index for constant-time membership tests.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
    slice,
};

use crate::error::{RelgenError, Result};

/// Element type accepted by universes and relations.
///
/// Blanket-implemented for every type that is cloneable, hashable, totally
/// ordered and debuggable.
pub trait Element: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Element for T {}

/// An ordered pair `(a, b)`.
pub type Pair<T> = (T, T);

/// Ordered set of pairs returned by gap analysis.
pub type PairSet<T> = BTreeSet<Pair<T>>;

/// Builds an element from its position in a plain `0..n` range.
pub trait FromIndex: Sized {
    /// Returns the element for `index`, or `None` when the type cannot
    /// represent it.
    fn from_index(index: usize) -> Option<Self>;
}

macro_rules! impl_from_index {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromIndex for $ty {
                fn from_index(index: usize) -> Option<Self> {
                    Self::try_from(index).ok()
                }
            }
        )+
    };
}

impl_from_index!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl FromIndex for String {
    fn from_index(index: usize) -> Option<Self> {
        Some(index.to_string())
    }
}

/// Finite set of unique elements over which relations are defined.
///
/// # Examples
/// ```
/// use relgen_core::Universe;
///
/// let universe = Universe::new([3, 1, 3, 2]);
/// assert_eq!(universe.elements(), &[3, 1, 2]);
/// assert_eq!(universe.candidate_count(), Some(9));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Universe<T> {
    elements: Vec<T>,
}

impl<T: Element> Universe<T> {
    /// Builds a universe, dropping repeated elements after their first
    /// occurrence.
    #[must_use]
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut seen = HashSet::new();
        let elements = elements
            .into_iter()
            .filter(|element| seen.insert(element.clone()))
            .collect();
        Self { elements }
    }

    /// Returns a universe with no elements.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Returns the elements in their stored order.
    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the universe has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` when `element` belongs to the universe.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Iterates over the elements in stored order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Size of the candidate pair set `|universe|²`, or `None` on overflow.
    #[must_use]
    pub fn candidate_count(&self) -> Option<usize> {
        self.len().checked_mul(self.len())
    }

    /// Materialises `universe × universe` in row-major order.
    ///
    /// # Errors
    /// Returns [`RelgenError::UniverseTooLarge`] when `|universe|²` overflows.
    pub fn candidate_pairs(&self) -> Result<Vec<Pair<T>>> {
        let count = self
            .candidate_count()
            .ok_or(RelgenError::UniverseTooLarge { size: self.len() })?;
        let mut pairs = Vec::with_capacity(count);
        for a in &self.elements {
            for b in &self.elements {
                pairs.push((a.clone(), b.clone()));
            }
        }
        Ok(pairs)
    }

    /// Returns the universe with its elements in ascending order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.elements.sort();
        self
    }
}

impl<T: Element + FromIndex> Universe<T> {
    /// Builds the plain numeric universe `0..size`.
    ///
    /// # Errors
    /// Returns [`RelgenError::ElementRangeOverflow`] when an index does not
    /// fit in `T`.
    ///
    /// # Examples
    /// ```
    /// use relgen_core::Universe;
    ///
    /// let universe = Universe::<u8>::range(3)?;
    /// assert_eq!(universe.elements(), &[0, 1, 2]);
    /// assert!(Universe::<u8>::range(300).is_err());
    /// # Ok::<(), relgen_core::RelgenError>(())
    /// ```
    pub fn range(size: usize) -> Result<Self> {
        let elements = (0..size)
            .map(T::from_index)
            .collect::<Option<Vec<_>>>()
            .ok_or(RelgenError::ElementRangeOverflow { size })?;
        Ok(Self { elements })
    }
}

impl<T: Element> FromIterator<T> for Universe<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a Universe<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// A finite binary relation: a set of ordered pairs.
///
/// Pairs keep the order in which they were first inserted; equality ignores
/// that order and compares the relations as sets.
///
/// # Examples
/// ```
/// use relgen_core::Relation;
///
/// let relation = Relation::from_pairs([(1, 2), (2, 3), (1, 2)]);
/// assert_eq!(relation.len(), 2);
/// assert!(relation.contains(&1, &2));
/// assert!(!relation.contains(&2, &1));
/// assert_eq!(relation, Relation::from_pairs([(2, 3), (1, 2)]));
/// ```
#[derive(Clone, Debug)]
pub struct Relation<T> {
    pairs: Vec<Pair<T>>,
    successors: HashMap<T, HashSet<T>>,
}

impl<T: Element> Relation<T> {
    /// Builds a relation from pairs, ignoring duplicates.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair<T>>) -> Self {
        let mut relation = Self::empty();
        for pair in pairs {
            relation.insert(pair);
        }
        relation
    }

    /// Returns the empty relation.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pairs: Vec::new(),
            successors: HashMap::new(),
        }
    }

    fn insert(&mut self, (a, b): Pair<T>) -> bool {
        let targets = self.successors.entry(a.clone()).or_default();
        if !targets.insert(b.clone()) {
            return false;
        }
        self.pairs.push((a, b));
        true
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when the relation has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns `true` when `(a, b)` belongs to the relation.
    #[must_use]
    pub fn contains(&self, a: &T, b: &T) -> bool {
        self.successors
            .get(a)
            .is_some_and(|targets| targets.contains(b))
    }

    /// Returns the pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[Pair<T>] {
        &self.pairs
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Pair<T>> {
        self.pairs.iter()
    }

    /// Consumes the relation, returning its pairs in insertion order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<Pair<T>> {
        self.pairs
    }

    /// Returns the relation with its pairs sorted lexicographically.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.pairs.sort();
        self
    }

    /// Returns a new relation holding these pairs followed by `extra`.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn with_pairs(&self, extra: impl IntoIterator<Item = Pair<T>>) -> Self {
        let mut relation = self.clone();
        for pair in extra {
            relation.insert(pair);
        }
        relation
    }

    /// Returns the sorted set of elements that occur in any pair.
    ///
    /// # Examples
    /// ```
    /// use relgen_core::Relation;
    ///
    /// let relation = Relation::from_pairs([(3, 1), (2, 3)]);
    /// assert_eq!(relation.universe().elements(), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn universe(&self) -> Universe<T> {
        let elements: BTreeSet<&T> = self.pairs.iter().flat_map(|(a, b)| [a, b]).collect();
        Universe {
            elements: elements.into_iter().cloned().collect(),
        }
    }
}

impl<T: Element> Default for Relation<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> PartialEq for Relation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.successors == other.successors
    }
}

impl<T: Element> Eq for Relation<T> {}

impl<T: Element> FromIterator<Pair<T>> for Relation<T> {
    fn from_iter<I: IntoIterator<Item = Pair<T>>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a, T> IntoIterator for &'a Relation<T> {
    type Item = &'a Pair<T>;
    type IntoIter = slice::Iter<'a, Pair<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Relation<T> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.pairs)
    }
}
