//! Benchmark setup error type.

use relgen_core::RelgenError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building a universe or relation fixture failed.
    #[error("fixture construction failed: {0}")]
    Core(#[from] RelgenError),
}
