
//! Calculus on expressions: the derivative-at-a-point node and the
//! numerical engine behind it.

mod derivative;
mod precision;
mod ridders;

pub use derivative::{Derivative, BorrowedDerivative, DerivativeError};
pub use precision::{Precision, PrecisionConfig, WorkingFloat};
pub use ridders::{
  RiddersDifferentiator, RiddersConfig, RiddersConfigError, DifferentiationResult,
  UndefinedDerivative, round_to_error, TABLE_SIZE, MAX_STEP_RETRIES,
};

use crate::error::Error;
use crate::expr::Expr;
use crate::expr::approximation::{Approximator, Scope};

/// Evaluates a `diff` expression, reporting why it is undefined
/// when it is.
///
/// The calculation mode is validated first and its precision selects
/// the working float.
pub fn evaluate_derivative(expr: &Expr, approximator: &Approximator) -> Result<f64, Error> {
  approximator.mode().validate()?;
  let derivative = BorrowedDerivative::parse(expr)?;
  let value = match approximator.mode().precision {
    Precision::Reduced => derivative.approximate::<f32>(approximator, &Scope::Empty)?.widen(),
    Precision::Full => derivative.approximate::<f64>(approximator, &Scope::Empty)?,
  };
  Ok(value)
}
