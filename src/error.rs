//! Closed error taxonomy for the growth engine.
//!
//! The engine operates entirely on in-memory state. There are no retries and no
//! partial failures: a single driver iteration either completes or the error is
//! fatal and propagated to the caller.

use thiserror::Error;

/// Errors the growth engine can produce.
#[derive(Error, Debug)]
pub enum GrowthError {
  /// A parameter supplied to [`crate::config::GrowthConfig`] is out of range.
  #[error("invalid config: {0}")]
  InvalidConfig(String),

  /// Construction was attempted from an empty triangle list.
  #[error("seed mesh is empty")]
  EmptySeed,

  /// An internal mesh invariant was violated. This is always a bug, never a
  /// user condition.
  #[error("invariant violation in {operation}: {detail}")]
  InvariantViolation {
    /// The operation that detected the violation (e.g. "division", "force_step").
    operation: &'static str,
    /// Human-readable detail naming what was expected.
    detail: String,
  },
}

impl GrowthError {
  /// Construct an invariant violation error.
  pub fn invariant(operation: &'static str, detail: impl Into<String>) -> Self {
    Self::InvariantViolation {
      operation,
      detail: detail.into(),
    }
  }
}
