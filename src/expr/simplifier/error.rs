
use crate::expr::calculus::DerivativeError;

use thiserror::Error;

/// An error that occurred during the simplification process.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimplifierError {
  #[error("Malformed derivative: {0}")]
  MalformedDerivative(#[from] DerivativeError),
  #[error("'{function}' produced a non-finite result")]
  NonFiniteResult { function: String },
}
