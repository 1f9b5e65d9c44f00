//! Error types for the relgen core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::{fmt, num::NonZeroUsize};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while configuring or running relation generation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RelgenError {
    /// Neither an explicit universe, a universe size nor a superset was given.
    #[error("no universe configured: supply a universe, a universe size or a superset")]
    MissingUniverse,
    /// A property specification named a property that does not exist.
    #[error("unknown property `{name}`")]
    UnknownProperty {
        /// The unrecognised property name after trimming and lowercasing.
        name: String,
    },
    /// A property specification contained an empty token, e.g. `"a,,b"`.
    #[error("property specification has an empty token at position {position}")]
    EmptyPropertyToken {
        /// Zero-based index of the empty token.
        position: usize,
    },
    /// The target size tolerance was negative or not finite.
    #[error("epsilon must be finite and non-negative (got {epsilon})")]
    InvalidEpsilon {
        /// The rejected tolerance.
        epsilon: f64,
    },
    /// Minimum target size exceeded the maximum target size.
    #[error("min_target_size ({min}) exceeds max_target_size ({max})")]
    InvalidTargetBounds {
        /// Requested lower bound.
        min: usize,
        /// Requested upper bound.
        max: usize,
    },
    /// The rejection budget must allow at least one rejection.
    #[error("max_rejections must be at least 1 (got {got})")]
    InvalidRejectionBudget {
        /// The invalid budget supplied by the caller.
        got: usize,
    },
    /// An edge probability was outside `[0, 1]`.
    #[error("probability must lie within [0, 1] (got {probability})")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },
    /// The candidate pair count `|universe|²` does not fit in `usize`.
    #[error("universe of {size} elements is too large to enumerate its pairs")]
    UniverseTooLarge {
        /// Number of universe elements.
        size: usize,
    },
    /// A plain numeric universe cannot be represented by the element type.
    #[error("cannot build a range universe of {size} elements for this element type")]
    ElementRangeOverflow {
        /// Requested universe size.
        size: usize,
    },
    /// A random universe sample asked for more elements than the superset has.
    #[error("cannot sample {requested} elements from a superset of {available}")]
    UniverseSampleTooLarge {
        /// Requested universe size.
        requested: usize,
        /// Number of elements available in the superset.
        available: usize,
    },
    /// The sampler exhausted its retry budget without accepting a relation.
    #[error(
        "rejection budget of {budget} exhausted ({size_rejections} size rejections, {property_rejections} property rejections)"
    )]
    RejectionBudgetExceeded {
        /// Budget configured for the sampler.
        budget: NonZeroUsize,
        /// Draws rejected because their cardinality fell outside the bounds.
        size_rejections: usize,
        /// Draws rejected because a property predicate failed.
        property_rejections: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`RelgenError`] variants.
    enum RelgenErrorCode for RelgenError {
        /// No universe could be determined.
        MissingUniverse => MissingUniverse => "RELGEN_MISSING_UNIVERSE",
        /// A property name was not recognised.
        UnknownProperty => UnknownProperty { .. } => "RELGEN_UNKNOWN_PROPERTY",
        /// A property specification contained an empty token.
        EmptyPropertyToken => EmptyPropertyToken { .. } => "RELGEN_EMPTY_PROPERTY_TOKEN",
        /// The target size tolerance was invalid.
        InvalidEpsilon => InvalidEpsilon { .. } => "RELGEN_INVALID_EPSILON",
        /// The target size bounds were inverted.
        InvalidTargetBounds => InvalidTargetBounds { .. } => "RELGEN_INVALID_TARGET_BOUNDS",
        /// The rejection budget was zero.
        InvalidRejectionBudget => InvalidRejectionBudget { .. } => "RELGEN_INVALID_REJECTION_BUDGET",
        /// An edge probability was out of range.
        InvalidProbability => InvalidProbability { .. } => "RELGEN_INVALID_PROBABILITY",
        /// The universe was too large to enumerate.
        UniverseTooLarge => UniverseTooLarge { .. } => "RELGEN_UNIVERSE_TOO_LARGE",
        /// The element type cannot represent a range universe.
        ElementRangeOverflow => ElementRangeOverflow { .. } => "RELGEN_ELEMENT_RANGE_OVERFLOW",
        /// The superset was too small for the requested sample.
        UniverseSampleTooLarge => UniverseSampleTooLarge { .. } => "RELGEN_UNIVERSE_SAMPLE_TOO_LARGE",
        /// The sampler ran out of retries.
        RejectionBudgetExceeded => RejectionBudgetExceeded { .. } => "RELGEN_REJECTION_BUDGET_EXCEEDED",
    }
}

impl RelgenError {
    /// Returns `true` for errors caused by invalid configuration, as opposed
    /// to constraints the sampler failed to satisfy within its budget.
    ///
    /// # Examples
    /// ```
    /// use relgen_core::RelgenError;
    ///
    /// assert!(RelgenError::MissingUniverse.is_configuration());
    /// ```
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::RejectionBudgetExceeded { .. })
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RelgenError>;
