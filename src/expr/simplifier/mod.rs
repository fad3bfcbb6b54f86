
//! Reduction of expression trees.
//!
//! Reduction is deliberately minimal: undefined values propagate,
//! unary involutions cancel, and exact arithmetic on literals is
//! folded. Derivative nodes are validated and otherwise left for
//! numerical approximation.

mod base;
pub mod error;
pub mod folding;
pub mod involution;

pub use base::{Simplifier, SimplifierContext};
pub use error::SimplifierError;

use folding::ConstantFolder;
use involution::InvolutionSimplifier;
use crate::expr::Expr;
use crate::expr::calculus::Derivative;

use tracing::warn;

/// The [`Simplifier`] behind [`reduce`]. It dispatches derivative
/// nodes to [`Derivative::shallow_reduce`] and applies
/// [`default_shallow_reduce`] to everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReducer;

impl Simplifier for DefaultReducer {
  fn simplify_expr_part(&self, expr: Expr, ctx: &mut SimplifierContext) -> Expr {
    match expr {
      Expr::Call(name, args) if name == Derivative::FUNCTION_NAME => {
        match Derivative::try_from(Expr::Call(name, args)) {
          Ok(derivative) => derivative.shallow_reduce(ctx),
          Err(err) => {
            warn!(%err, "malformed derivative during reduction");
            ctx.errors.push(SimplifierError::from(err));
            Expr::undefined()
          }
        }
      }
      expr => default_shallow_reduce(expr, ctx),
    }
  }
}

/// The generic reduction of a single node whose children are already
/// reduced.
pub fn default_shallow_reduce(expr: Expr, ctx: &mut SimplifierContext) -> Expr {
  if expr.children().iter().any(Expr::is_undefined) {
    return Expr::undefined();
  }
  let expr = InvolutionSimplifier.simplify_expr_part(expr, ctx);
  ConstantFolder.simplify_expr_part(expr, ctx)
}

/// Reduces `expr` bottom-up. If `replace_symbols` is true, free
/// occurrences of context variables are first replaced by their
/// values.
pub fn reduce(expr: Expr, ctx: &mut SimplifierContext, replace_symbols: bool) -> Expr {
  let expr = if replace_symbols {
    let variables = ctx.variables;
    expr.map_free_vars(|v| match variables.get(&v) {
      Some(value) => Expr::from(*value),
      None => Expr::from(v),
    })
  } else {
    expr
  };
  DefaultReducer.simplify_expr(expr, ctx)
}

#[cfg(test)]
pub(crate) mod test_utils {
  use super::*;
  use crate::errorlist::ErrorList;
  use crate::expr::function::library::builtin_functions;
  use crate::expr::var::table::VarTable;
  use crate::mode::calculation::CalculationMode;

  pub fn run_simplifier(simplifier: &dyn Simplifier, expr: Expr) -> (Expr, Vec<SimplifierError>) {
    let functions = builtin_functions();
    let variables = VarTable::new();
    let mode = CalculationMode::default();
    let mut errors = ErrorList::new();
    let mut ctx = SimplifierContext::new(&functions, &variables, &mode, &mut errors);
    let result = simplifier.simplify_expr(expr, &mut ctx);
    (result, errors.into_vec())
  }

  pub fn run_simplifier_no_errors(simplifier: &dyn Simplifier, expr: Expr) -> Expr {
    let (result, errors) = run_simplifier(simplifier, expr);
    assert!(errors.is_empty(), "Expected no errors, got {errors:?}");
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::test_utils::{run_simplifier, run_simplifier_no_errors};
  use crate::assert_strict_eq;
  use crate::errorlist::ErrorList;
  use crate::expr::calculus::DerivativeError;
  use crate::expr::function::library::builtin_functions;
  use crate::expr::var::Var;
  use crate::expr::var::table::VarTable;
  use crate::mode::calculation::CalculationMode;

  fn var(name: &str) -> Expr {
    Expr::var(name).unwrap()
  }

  #[test]
  fn test_folds_nested_arithmetic() {
    let expr = Expr::call("*", vec![
      Expr::call("+", vec![Expr::from(1), Expr::from(2)]),
      Expr::call("negate", vec![Expr::call("negate", vec![Expr::from(4)])]),
    ]);
    assert_strict_eq!(run_simplifier_no_errors(&DefaultReducer, expr), Expr::from(12));
  }

  #[test]
  fn test_undefined_propagates() {
    let expr = Expr::call("sin", vec![Expr::call("+", vec![var("x"), Expr::undefined()])]);
    assert_strict_eq!(run_simplifier_no_errors(&DefaultReducer, expr), Expr::undefined());
  }

  #[test]
  fn test_derivative_kept_with_reduced_operands() {
    let expr = Expr::call("diff", vec![
      Expr::call("^", vec![var("x"), Expr::call("+", vec![Expr::from(1), Expr::from(1)])]),
      var("x"),
      Expr::call("*", vec![Expr::from(3), Expr::from(1)]),
    ]);
    let expected = Expr::call("diff", vec![
      Expr::call("^", vec![var("x"), Expr::from(2)]),
      var("x"),
      Expr::from(3),
    ]);
    assert_strict_eq!(run_simplifier_no_errors(&DefaultReducer, expr), expected);
  }

  #[test]
  fn test_malformed_derivative() {
    let expr = Expr::call("+", vec![
      Expr::from(1),
      Expr::call("diff", vec![var("x"), Expr::from(2), Expr::from(0)]),
    ]);
    let (result, errors) = run_simplifier(&DefaultReducer, expr);
    assert_strict_eq!(result, Expr::undefined());
    assert_eq!(errors, vec![
      SimplifierError::MalformedDerivative(DerivativeError::InvalidOperand { operand: Expr::from(2) }),
    ]);
  }

  #[test]
  fn test_reduce_replaces_free_symbols() {
    let functions = builtin_functions();
    let variables: VarTable<f64> = [(Var::new("x").unwrap(), 2.0), (Var::new("a").unwrap(), 5.0)].into_iter().collect();
    let mode = CalculationMode::default();
    let mut errors = ErrorList::new();
    let mut ctx = SimplifierContext::new(&functions, &variables, &mode, &mut errors);
    let expr = Expr::call("+", vec![
      Expr::call("diff", vec![Expr::call("*", vec![var("x"), var("a")]), var("x"), var("x")]),
      var("x"),
    ]);
    let expected = Expr::call("+", vec![
      Expr::call("diff", vec![Expr::call("*", vec![var("x"), Expr::from(5)]), var("x"), Expr::from(2)]),
      Expr::from(2),
    ]);
    assert_strict_eq!(reduce(expr.clone(), &mut ctx, true), expected);
    assert_strict_eq!(reduce(expr.clone(), &mut ctx, false), expr);
    assert!(errors.is_empty());
  }
}
