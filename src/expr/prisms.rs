
//! Prisms for narrowing an [`Expr`] to the atom it wraps.

use super::Expr;
use super::atom::Atom;
use super::var::Var;
use crate::util::prism::Prism;

/// Prism which downcasts an [`Expr`] to a contained real number.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprToNumber;

/// Prism which downcasts an [`Expr`] to a contained [`Var`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprToVar;

impl Prism<Expr, f64> for ExprToNumber {
  fn narrow_type(&self, input: Expr) -> Result<f64, Expr> {
    match input {
      Expr::Atom(Atom::Number(n)) => Ok(n),
      input => Err(input),
    }
  }

  fn widen_type(&self, input: f64) -> Expr {
    Expr::from(input)
  }
}

impl Prism<Expr, Var> for ExprToVar {
  fn narrow_type(&self, input: Expr) -> Result<Var, Expr> {
    match input {
      Expr::Atom(Atom::Var(v)) => Ok(v),
      input => Err(input),
    }
  }

  fn widen_type(&self, input: Var) -> Expr {
    Expr::from(input)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::prism::OnVec;

  #[test]
  fn test_expr_to_var() {
    let x = Var::new("x").unwrap();
    assert_eq!(ExprToVar.narrow_type(Expr::from(x.clone())), Ok(x.clone()));
    assert_eq!(ExprToVar.narrow_type(Expr::from(2)), Err(Expr::from(2)));
    assert_eq!(ExprToVar.widen_type(x.clone()), Expr::from(x));
  }

  #[test]
  fn test_all_numbers() {
    let prism = OnVec::new(ExprToNumber);
    assert_eq!(prism.narrow_type(vec![Expr::from(1), Expr::from(2.5)]), Ok(vec![1.0, 2.5]));
    let mixed = vec![Expr::from(1), Expr::var("y").unwrap()];
    assert_eq!(prism.narrow_type(mixed.clone()), Err(mixed));
  }
}
