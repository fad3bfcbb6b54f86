
use crate::expr::calculus::{DerivativeError, RiddersConfigError, UndefinedDerivative};
use crate::expr::var::TryFromStringError;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Derivative(#[from] DerivativeError),
  #[error("Undefined derivative: {0}")]
  Undefined(#[from] UndefinedDerivative),
  #[error("Invalid differentiation settings: {0}")]
  InvalidConfig(#[from] RiddersConfigError),
  #[error("{0}")]
  InvalidVariableName(#[from] TryFromStringError),
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::var::Var;

  #[test]
  fn test_conversions() {
    let err = Error::from(UndefinedDerivative::ConvergenceFailure);
    assert_eq!(err.to_string(), "Undefined derivative: Numerical differentiation did not reach the required accuracy");
    let err = Error::from(DerivativeError::WrongArity { actual: 2 });
    assert_eq!(err.to_string(), "Expected 3 operands to 'diff', got 2");
    let err = Error::from(Var::try_from(String::from("1x")).unwrap_err());
    assert!(matches!(err, Error::InvalidVariableName(_)));
  }
}
