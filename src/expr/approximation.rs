
//! Numerical approximation of expressions in a chosen working
//! precision.

use super::Expr;
use super::atom::Atom;
use super::calculus::{BorrowedDerivative, Derivative, Precision, WorkingFloat};
use super::function::table::FunctionTable;
use super::var::Var;
use super::var::constants::constant_value;
use super::var::table::VarTable;
use crate::mode::calculation::CalculationMode;

use tracing::warn;

/// A chain of symbol bindings, innermost first. Bindings shadow the
/// variables of the surrounding context.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'s, T> {
  Empty,
  Bound {
    var: &'s Var,
    value: T,
    parent: &'s Scope<'s, T>,
  },
}

/// Evaluates expressions to plain floating-point values. Anything
/// without a real value, including every non-finite intermediate
/// result, evaluates to NaN.
#[derive(Debug, Clone, Copy)]
pub struct Approximator<'a> {
  functions: &'a FunctionTable,
  variables: &'a VarTable<f64>,
  mode: &'a CalculationMode,
}

impl<'s, T: Copy> Scope<'s, T> {
  pub fn lookup(&self, target: &Var) -> Option<T> {
    let mut scope = self;
    while let Scope::Bound { var, value, parent } = scope {
      if *var == target {
        return Some(*value);
      }
      scope = *parent;
    }
    None
  }

  pub fn bind(&'s self, var: &'s Var, value: T) -> Scope<'s, T> {
    Scope::Bound { var, value, parent: self }
  }
}

impl<T> Default for Scope<'_, T> {
  fn default() -> Self {
    Scope::Empty
  }
}

impl<'a> Approximator<'a> {
  pub fn new(functions: &'a FunctionTable, variables: &'a VarTable<f64>, mode: &'a CalculationMode) -> Self {
    Self { functions, variables, mode }
  }

  pub fn mode(&self) -> &'a CalculationMode {
    self.mode
  }

  /// Evaluates `expr` in the precision selected by the calculation
  /// mode.
  pub fn evaluate(&self, expr: &Expr) -> f64 {
    match self.mode.precision {
      Precision::Reduced => self.approximate::<f32>(expr).widen(),
      Precision::Full => self.approximate::<f64>(expr),
    }
  }

  pub fn approximate<T: WorkingFloat>(&self, expr: &Expr) -> T {
    self.approximate_in(expr, &Scope::Empty)
  }

  pub fn approximate_in<T: WorkingFloat>(&self, expr: &Expr, scope: &Scope<T>) -> T {
    let value = match expr {
      Expr::Atom(Atom::Number(n)) => T::narrow(*n),
      Expr::Atom(Atom::Var(v)) => self.lookup_var(v, scope),
      Expr::Atom(Atom::Undefined) => T::nan(),
      Expr::Call(name, args) if name == Derivative::FUNCTION_NAME => {
        match BorrowedDerivative::from_operands(args) {
          Ok(derivative) => derivative.approximate(self, scope).unwrap_or_else(|_| T::nan()),
          Err(err) => {
            warn!(%err, "malformed derivative during approximation");
            T::nan()
          }
        }
      }
      Expr::Call(name, args) => {
        let Some(function) = self.functions.get(name) else {
          return T::nan();
        };
        let args: Vec<T> = args.iter().map(|arg| self.approximate_in(arg, scope)).collect();
        function.apply(&args, self.mode.angle_unit)
      }
    };
    if value.is_finite() { value } else { T::nan() }
  }

  fn lookup_var<T: WorkingFloat>(&self, var: &Var, scope: &Scope<T>) -> T {
    if let Some(value) = scope.lookup(var) {
      return value;
    }
    if let Some(value) = self.variables.get(var) {
      return T::narrow(*value);
    }
    constant_value(var).unwrap_or_else(T::nan)
  }
}
