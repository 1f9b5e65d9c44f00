//! Cardinality bounds for accepted relations.

use crate::error::{RelgenError, Result};

/// Inclusive lower and upper bounds on the number of pairs in an accepted
/// relation. A missing bound is unconstrained.
///
/// # Examples
/// ```
/// use relgen_core::TargetBounds;
///
/// let bounds = TargetBounds::around(10, 0.2)?;
/// assert_eq!((bounds.min(), bounds.max()), (Some(8), Some(12)));
/// assert!(bounds.admits(8) && bounds.admits(12));
/// assert!(!bounds.admits(13));
/// # Ok::<(), relgen_core::RelgenError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetBounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl TargetBounds {
    /// Bounds that admit every cardinality.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Explicit bounds.
    ///
    /// # Errors
    /// Returns [`RelgenError::InvalidTargetBounds`] when `min > max`.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self> {
        if let (Some(lower), Some(upper)) = (min, max) {
            if lower > upper {
                return Err(RelgenError::InvalidTargetBounds {
                    min: lower,
                    max: upper,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Bounds admitting exactly `target` pairs.
    #[must_use]
    pub const fn exact(target: usize) -> Self {
        Self {
            min: Some(target),
            max: Some(target),
        }
    }

    /// Bounds admitting `target` pairs within a relative tolerance:
    /// `⌊target·(1 − epsilon)⌋` (clamped at zero) to `⌊target·(1 + epsilon)⌋`.
    ///
    /// # Errors
    /// Returns [`RelgenError::InvalidEpsilon`] when `epsilon` is negative or
    /// not finite.
    pub fn around(target: usize, epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(RelgenError::InvalidEpsilon { epsilon });
        }
        let (min, max) = tolerance_window(target, epsilon);
        Ok(Self {
            min: Some(min),
            max: Some(max),
        })
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn min(&self) -> Option<usize> {
        self.min
    }

    /// Upper bound, if any.
    #[must_use]
    pub const fn max(&self) -> Option<usize> {
        self.max
    }

    /// Returns `true` when `size` lies within the bounds.
    #[must_use]
    pub const fn admits(&self, size: usize) -> bool {
        let above_min = match self.min {
            Some(min) => size >= min,
            None => true,
        };
        let below_max = match self.max {
            Some(max) => size <= max,
            None => true,
        };
        above_min && below_max
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "tolerance is relative; float-to-int casts saturate"
)]
fn tolerance_window(target: usize, epsilon: f64) -> (usize, usize) {
    if epsilon == 0.0 {
        return (target, target);
    }
    let scaled = target as f64;
    let lower = (scaled * (1.0 - epsilon)).floor().max(0.0) as usize;
    let upper = (scaled * (1.0 + epsilon)).floor() as usize;
    (lower, upper)
}
