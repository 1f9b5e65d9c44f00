//! Shared test utilities used across relgen crates.

pub mod proptest_profile;
pub mod tracing;
