//! Benchmark support crate for relgen.
//!
//! Provides seeded relation fixtures and parameter types shared by the
//! Criterion benchmarks for property checking and rejection sampling.

pub mod error;
pub mod fixtures;
pub mod params;
