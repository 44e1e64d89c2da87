//! Error types for the health checker.

use thiserror::Error;

/// Errors raised while setting up a prober.
///
/// Individual probe attempts never fail with this type; transport
/// errors during a probe are retried and end in a DOWN classification.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("max_attempts must be at least 1")]
    NoAttempts,
}
