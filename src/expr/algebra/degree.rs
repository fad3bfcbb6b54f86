
//! Conservative polynomial degree inference.
//!
//! A degree of `None` means "unknown": the expression might not be a
//! polynomial in the variable, or its degree cannot be bounded
//! without further simplification.

use crate::expr::Expr;
use crate::expr::atom::Atom;
use crate::expr::calculus::{BorrowedDerivative, Derivative};
use crate::expr::function::library::NEGATE_FUNCTION_NAME;
use crate::expr::var::Var;

use tracing::warn;

/// The degree of `expr` as a polynomial in `var`.
pub fn polynomial_degree(expr: &Expr, var: &Var) -> Option<u32> {
  match expr {
    Expr::Atom(Atom::Number(_)) => Some(0),
    Expr::Atom(Atom::Var(v)) => Some(variable_degree(v, var)),
    Expr::Atom(Atom::Undefined) => None,
    Expr::Call(name, args) => call_degree(name, args, var),
  }
}

/// The degree of the lone variable `v` in `var`.
pub fn variable_degree(v: &Var, var: &Var) -> u32 {
  if v == var { 1 } else { 0 }
}

fn call_degree(name: &str, args: &[Expr], var: &Var) -> Option<u32> {
  match (name, args) {
    (name, _) if name == Derivative::FUNCTION_NAME => {
      match BorrowedDerivative::from_operands(args) {
        Ok(derivative) => derivative.polynomial_degree(var),
        Err(err) => {
          warn!(%err, "malformed derivative during degree query");
          None
        }
      }
    }
    ("+" | "-", _) => {
      args.iter().try_fold(0, |acc, arg| polynomial_degree(arg, var).map(|d| acc.max(d)))
    }
    (NEGATE_FUNCTION_NAME, [arg]) => polynomial_degree(arg, var),
    ("*", _) => {
      args.iter().try_fold(0u32, |acc, arg| acc.checked_add(polynomial_degree(arg, var)?))
    }
    ("/", [numerator, denominator]) => {
      if polynomial_degree(denominator, var)? == 0 {
        polynomial_degree(numerator, var)
      } else {
        None
      }
    }
    ("^", [base, exponent]) => power_degree(base, exponent, var),
    _ => {
      let independent = args.iter().all(|arg| polynomial_degree(arg, var) == Some(0));
      if independent { Some(0) } else { None }
    }
  }
}

fn power_degree(base: &Expr, exponent: &Expr, var: &Var) -> Option<u32> {
  let base_degree = polynomial_degree(base, var)?;
  if base_degree == 0 && polynomial_degree(exponent, var)? == 0 {
    return Some(0);
  }
  match exponent {
    Expr::Atom(Atom::Number(n)) if *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX) => {
      base_degree.checked_mul(*n as u32)
    }
    _ => None,
  }
}
