
//! Well-known mathematical constants understood by the evaluator.

use super::Var;

use num::Float;
use num::traits::FloatConst;

/// Names of the constants resolved by [`constant_value`].
pub const CONSTANT_NAMES: [&str; 2] = ["pi", "e"];

/// The value of the well-known constant named by `var`, if any.
/// Caller-supplied bindings always take precedence over these.
pub fn constant_value<T: Float + FloatConst>(var: &Var) -> Option<T> {
  match var.as_str() {
    "pi" => Some(T::PI()),
    "e" => Some(T::E()),
    _ => None,
  }
}
