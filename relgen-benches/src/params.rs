//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

/// Parameters for a property-analysis benchmark run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationBenchParams {
    /// Number of elements in the universe.
    pub universe_size: usize,
    /// Probability that each ordered pair is present.
    pub density: f64,
}

impl fmt::Display for RelationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={}", self.universe_size, self.density)
    }
}

/// Parameters for a rejection-sampling benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplerBenchParams {
    /// Number of elements in the universe.
    pub universe_size: usize,
    /// Property specification handed to the builder.
    pub properties: &'static str,
}

impl fmt::Display for SamplerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.properties.is_empty() {
            "any"
        } else {
            self.properties
        };
        write!(f, "n={},{label}", self.universe_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn relation_params_render_size_and_density() {
        let params = RelationBenchParams {
            universe_size: 16,
            density: 0.25,
        };
        assert_eq!(params.to_string(), "n=16,p=0.25");
    }

    #[rstest]
    #[case::unconstrained("", "n=3,any")]
    #[case::constrained("reflexive,!symmetric", "n=3,reflexive,!symmetric")]
    fn sampler_params_label_the_spec(#[case] properties: &'static str, #[case] expected: &str) {
        let params = SamplerBenchParams {
            universe_size: 3,
            properties,
        };
        assert_eq!(params.to_string(), expected);
    }
}
