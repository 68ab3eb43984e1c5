//! Error types for the view engine.
//!
//! Only configuration is fallible. Runtime anomalies (degenerate
//! measurements, out-of-range scroll targets, re-entrant passes) are local
//! recoveries and are logged instead of surfaced.

use thiserror::Error;

/// Errors that can occur while configuring the engine.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Grid span of zero lanes.
    #[error("layout span must be at least 1")]
    ZeroSpan,

    /// Estimated extent must be positive.
    #[error("estimated extent must be positive, got {0}")]
    InvalidEstimatedExtent(f32),

    /// Spacing values must be non-negative and finite.
    #[error("invalid spacing: {0}")]
    InvalidSpacing(f32),

    /// Overscan must be non-negative and finite.
    #[error("invalid overscan: {0}")]
    InvalidOverscan(f32),
}

/// Result type for view-engine configuration.
pub type ViewResult<T> = Result<T, ViewError>;
