
//! The derivative-at-a-point node, `diff(f, x, a)`.
//!
//! No symbolic differentiation rules are applied. Reduction leaves
//! the node in place and its value is obtained numerically, by
//! Ridders' method, at approximation time.

use super::precision::WorkingFloat;
use super::ridders::{RiddersDifferentiator, UndefinedDerivative};
use crate::display::{self, SerializationSettings};
use crate::expr::Expr;
use crate::expr::algebra::degree::{polynomial_degree, variable_degree};
use crate::expr::approximation::{Approximator, Scope};
use crate::expr::atom::Atom;
use crate::expr::predicates::contains_non_real_literal;
use crate::expr::prisms::ExprToVar;
use crate::expr::simplifier::{self, SimplifierContext, default_shallow_reduce};
use crate::expr::var::Var;
use crate::util::prism::Prism;

use thiserror::Error;
use tracing::debug;

/// The derivative of `function` with respect to `variable`, evaluated
/// at `point`.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivative {
  function: Expr,
  variable: Var,
  point: Expr,
}

/// A borrowed view of the three operands of a `diff` node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorrowedDerivative<'a> {
  function: &'a Expr,
  variable: &'a Var,
  point: &'a Expr,
}

/// A `diff` node that violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DerivativeError {
  #[error("Expected a call to '{name}'", name = Derivative::FUNCTION_NAME)]
  NotADerivative,
  #[error("Expected {expected} operands to '{name}', got {actual}", expected = Derivative::NUMBER_OF_OPERANDS, name = Derivative::FUNCTION_NAME)]
  WrongArity { actual: usize },
  #[error("Expected a variable to differentiate with respect to, got '{operand}'")]
  InvalidOperand { operand: Expr },
}

impl Derivative {
  /// Operator token, shared by serialization and layout.
  pub const FUNCTION_NAME: &'static str = "diff";
  pub const NUMBER_OF_OPERANDS: usize = 3;

  pub const FUNCTION_INDEX: usize = 0;
  pub const VARIABLE_INDEX: usize = 1;
  pub const POINT_INDEX: usize = 2;

  pub fn new(function: Expr, variable: Var, point: Expr) -> Self {
    Self { function, variable, point }
  }

  pub fn function(&self) -> &Expr {
    &self.function
  }

  pub fn variable(&self) -> &Var {
    &self.variable
  }

  pub fn point(&self) -> &Expr {
    &self.point
  }

  pub fn number_of_operands(&self) -> usize {
    Self::NUMBER_OF_OPERANDS
  }

  pub fn into_parts(self) -> (Expr, Var, Expr) {
    (self.function, self.variable, self.point)
  }

  pub fn borrowed(&self) -> BorrowedDerivative<'_> {
    BorrowedDerivative {
      function: &self.function,
      variable: &self.variable,
      point: &self.point,
    }
  }

  /// If `name` and `args` form a well-shaped `diff` call, the symbol
  /// it binds.
  pub fn bound_variable<'a>(name: &str, args: &'a [Expr]) -> Option<&'a Var> {
    if name != Self::FUNCTION_NAME {
      return None;
    }
    BorrowedDerivative::from_operands(args).ok().map(|d| d.variable)
  }

  /// The degree of this node in `var`. See
  /// [`BorrowedDerivative::polynomial_degree`].
  pub fn polynomial_degree(&self, var: &Var) -> Option<u32> {
    self.borrowed().polynomial_degree(var)
  }

  /// Approximates the node at the boundary of the expression tree,
  /// where every failure is reported as NaN.
  pub fn evaluate<T: WorkingFloat>(&self, approximator: &Approximator) -> T {
    self.borrowed().approximate(approximator, &Scope::Empty)
      .unwrap_or_else(|reason| {
        debug!(%reason, "derivative is undefined");
        T::nan()
      })
  }

  /// Reduces the whole subtree rooted at this node.
  pub fn reduce(self, ctx: &mut SimplifierContext, replace_symbols: bool) -> Expr {
    simplifier::reduce(Expr::from(self), ctx, replace_symbols)
  }

  /// Reduces this node alone, assuming its operands are already
  /// reduced.
  ///
  /// After the default reduction, a node that still has a complex or
  /// matrix operand becomes undefined. Otherwise the node is kept as
  /// is and left to numerical approximation.
  pub fn shallow_reduce(self, ctx: &mut SimplifierContext) -> Expr {
    let expr = default_shallow_reduce(Expr::from(self), ctx);
    if expr.is_undefined() {
      return expr;
    }
    if expr.children().iter().any(contains_non_real_literal) {
      debug!(reason = %UndefinedDerivative::UnsupportedOperandKind, "derivative reduced to undefined");
      return Expr::undefined();
    }
    expr
  }

  /// Replaces the unknown placeholder in the operands with `symbol`.
  /// Inside the function, this only happens when the node does not
  /// bind the unknown itself.
  pub fn replace_unknown(self, symbol: &Var) -> Derivative {
    let expr = Expr::from(self.clone()).replace_unknown(symbol);
    // Substitution never touches the bound symbol, so the shape
    // survives.
    Derivative::try_from(expr).unwrap_or(self)
  }

  pub fn serialize(&self, settings: &SerializationSettings) -> String {
    let mut out = String::new();
    display::write_prefix(&display::PlainText, &mut out, Self::FUNCTION_NAME, &self.operands(), settings);
    out
  }

  pub fn layout(&self, settings: &SerializationSettings) -> String {
    let mut out = String::new();
    display::write_prefix(&display::layout::Html, &mut out, Self::FUNCTION_NAME, &self.operands(), settings);
    out
  }

  fn operands(&self) -> [Expr; 3] {
    [self.function.clone(), Expr::from(self.variable.clone()), self.point.clone()]
  }
}

impl<'a> BorrowedDerivative<'a> {
  /// Views `expr` as a derivative node.
  pub fn parse(expr: &'a Expr) -> Result<Self, DerivativeError> {
    match expr {
      Expr::Call(name, args) if name == Derivative::FUNCTION_NAME => Self::from_operands(args),
      _ => Err(DerivativeError::NotADerivative),
    }
  }

  /// Views the arguments of a `diff` call as a derivative node,
  /// checking the operand count and that the bound operand is a
  /// symbol.
  pub fn from_operands(args: &'a [Expr]) -> Result<Self, DerivativeError> {
    let [function, variable, point] = args else {
      return Err(DerivativeError::WrongArity { actual: args.len() });
    };
    let Expr::Atom(Atom::Var(variable)) = variable else {
      return Err(DerivativeError::InvalidOperand { operand: variable.clone() });
    };
    Ok(Self { function, variable, point })
  }

  pub fn function(&self) -> &'a Expr {
    self.function
  }

  pub fn variable(&self) -> &'a Var {
    self.variable
  }

  pub fn point(&self) -> &'a Expr {
    self.point
  }

  /// The node has degree 0 in `var` when none of its operands depend
  /// on `var`. Otherwise the degree is unknown, since it cannot be
  /// bounded without differentiating symbolically.
  pub fn polynomial_degree(&self, var: &Var) -> Option<u32> {
    let independent =
      polynomial_degree(self.function, var) == Some(0) &&
      variable_degree(self.variable, var) == 0 &&
      polynomial_degree(self.point, var) == Some(0);
    if independent {
      Some(0)
    } else {
      None
    }
  }

  /// Approximates the derivative in working precision `T`.
  ///
  /// The point is evaluated in `scope`; the function is evaluated in
  /// `scope` extended with the bound symbol.
  pub fn approximate<T: WorkingFloat>(
    &self,
    approximator: &Approximator,
    scope: &Scope<T>,
  ) -> Result<T, UndefinedDerivative> {
    if contains_non_real_literal(self.function) || contains_non_real_literal(self.point) {
      return Err(UndefinedDerivative::UnsupportedOperandKind);
    }
    let abscissa: T = approximator.approximate_in(self.point, scope);
    if abscissa.is_nan() {
      return Err(UndefinedDerivative::NonNumericInput);
    }
    let differentiator = RiddersDifferentiator::new(approximator.mode().differentiation, T::PRECISION.config());
    let function = |x: T| approximator.approximate_in(self.function, &scope.bind(self.variable, x));
    let result = differentiator.differentiate(function, abscissa)?;
    Ok(result.value)
  }
}

impl From<Derivative> for Expr {
  fn from(derivative: Derivative) -> Expr {
    let (function, variable, point) = derivative.into_parts();
    Expr::call(Derivative::FUNCTION_NAME, vec![function, Expr::from(variable), point])
  }
}

impl TryFrom<Expr> for Derivative {
  type Error = DerivativeError;

  fn try_from(expr: Expr) -> Result<Self, Self::Error> {
    let args = match expr {
      Expr::Call(name, args) if name == Derivative::FUNCTION_NAME => args,
      _ => return Err(DerivativeError::NotADerivative),
    };
    let [function, variable, point] = match <[Expr; 3]>::try_from(args) {
      Ok(operands) => operands,
      Err(args) => return Err(DerivativeError::WrongArity { actual: args.len() }),
    };
    let variable = ExprToVar.narrow_type(variable)
      .map_err(|operand| DerivativeError::InvalidOperand { operand })?;
    Ok(Derivative::new(function, variable, point))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;
  use crate::errorlist::ErrorList;
  use crate::expr::function::library::builtin_functions;
  use crate::expr::function::table::FunctionTable;
  use crate::expr::var::table::VarTable;
  use crate::mode::calculation::CalculationMode;
  use crate::util::angles::AngleUnit;
  use approx::assert_abs_diff_eq;

  fn var(name: &str) -> Var {
    Var::new(name).unwrap()
  }

  fn var_expr(name: &str) -> Expr {
    Expr::from(var(name))
  }

  fn pow(base: Expr, exponent: Expr) -> Expr {
    Expr::call("^", vec![base, exponent])
  }

  struct Host {
    functions: FunctionTable,
    variables: VarTable<f64>,
    mode: CalculationMode,
  }

  impl Host {
    fn new() -> Self {
      Host { functions: builtin_functions(), variables: VarTable::new(), mode: CalculationMode::default() }
    }

    fn approximator(&self) -> Approximator<'_> {
      Approximator::new(&self.functions, &self.variables, &self.mode)
    }
  }

  #[test]
  fn test_operand_count_is_fixed() {
    let d = Derivative::new(var_expr("x"), var("x"), Expr::from(1));
    assert_eq!(d.number_of_operands(), 3);
  }

  #[test]
  fn test_try_from_rejects_non_symbol_operand() {
    let expr = Expr::call("diff", vec![var_expr("x"), Expr::from(2), Expr::from(1)]);
    assert_eq!(Derivative::try_from(expr), Err(DerivativeError::InvalidOperand { operand: Expr::from(2) }));
  }

  #[test]
  fn test_try_from_rejects_wrong_arity() {
    let expr = Expr::call("diff", vec![var_expr("x"), var_expr("x")]);
    assert_eq!(Derivative::try_from(expr), Err(DerivativeError::WrongArity { actual: 2 }));
    let expr = Expr::call("sin", vec![var_expr("x")]);
    assert_eq!(Derivative::try_from(expr), Err(DerivativeError::NotADerivative));
  }

  #[test]
  fn test_round_trip_through_expr() {
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), Expr::from(3));
    let expr = Expr::from(d.clone());
    assert_eq!(Derivative::try_from(expr), Ok(d));
  }

  #[test]
  fn test_degree_in_unrelated_symbol_is_zero() {
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), Expr::from(3));
    assert_eq!(d.polynomial_degree(&var("y")), Some(0));
  }

  #[test]
  fn test_degree_in_bound_symbol_is_unknown() {
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), Expr::from(3));
    assert_eq!(d.polynomial_degree(&var("x")), None);
  }

  #[test]
  fn test_degree_with_dependent_operand_is_unknown() {
    let d = Derivative::new(Expr::call("*", vec![var_expr("x"), var_expr("y")]), var("x"), Expr::from(3));
    assert_eq!(d.polynomial_degree(&var("y")), None);
    let d = Derivative::new(var_expr("x"), var("x"), var_expr("y"));
    assert_eq!(d.polynomial_degree(&var("y")), None);
  }

  #[test]
  fn test_evaluate_cube() {
    let host = Host::new();
    let d = Derivative::new(pow(var_expr("s"), Expr::from(3)), var("s"), Expr::from(2));
    assert_abs_diff_eq!(d.evaluate::<f64>(&host.approximator()), 12.0, epsilon = 1e-8);
    assert_abs_diff_eq!(d.evaluate::<f32>(&host.approximator()), 12.0, epsilon = 1e-2);
  }

  #[test]
  fn test_evaluate_exp_at_zero() {
    let host = Host::new();
    let d = Derivative::new(Expr::call("exp", vec![var_expr("s")]), var("s"), Expr::from(0));
    assert_abs_diff_eq!(d.evaluate::<f64>(&host.approximator()), 1.0, epsilon = 1e-8);
  }

  #[test]
  fn test_evaluate_reciprocal_at_pole_is_undefined() {
    let host = Host::new();
    let d = Derivative::new(Expr::call("/", vec![Expr::from(1), var_expr("s")]), var("s"), Expr::from(0));
    assert!(d.evaluate::<f64>(&host.approximator()).is_nan());
    assert_eq!(
      d.borrowed().approximate::<f64>(&host.approximator(), &Scope::Empty),
      Err(UndefinedDerivative::NonNumericInput),
    );
  }

  #[test]
  fn test_evaluate_with_undefined_point() {
    let host = Host::new();
    let d = Derivative::new(var_expr("s"), var("s"), Expr::call("sqrt", vec![Expr::from(-1)]));
    assert!(d.evaluate::<f64>(&host.approximator()).is_nan());
    let d = Derivative::new(var_expr("s"), var("s"), var_expr("unbound"));
    assert!(d.evaluate::<f64>(&host.approximator()).is_nan());
  }

  #[test]
  fn test_evaluate_in_degrees() {
    let mut host = Host::new();
    host.mode.angle_unit = AngleUnit::Degrees;
    let d = Derivative::new(Expr::call("sin", vec![var_expr("t")]), var("t"), Expr::from(0));
    assert_abs_diff_eq!(d.evaluate::<f64>(&host.approximator()), std::f64::consts::PI / 180.0, epsilon = 1e-8);
  }

  #[test]
  fn test_point_uses_context_but_function_binds_symbol() {
    let mut host = Host::new();
    host.variables.insert(var("x"), 100.0);
    host.variables.insert(var("a"), 3.0);
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), var_expr("a"));
    assert_abs_diff_eq!(d.evaluate::<f64>(&host.approximator()), 6.0, epsilon = 1e-8);
  }

  #[test]
  fn test_evaluate_rejects_out_of_range_settings() {
    let d = Derivative::new(Expr::call("sin", vec![var_expr("s")]), var("s"), Expr::from(1));
    for json in [
      r#"{ "differentiation": { "step_reduction_factor": 0.5 } }"#,
      r#"{ "differentiation": { "step_reduction_factor": 1.0 } }"#,
      r#"{ "differentiation": { "min_initial_step": -1000.0 } }"#,
    ] {
      let mut host = Host::new();
      host.mode = serde_json::from_str(json).unwrap();
      assert!(host.mode.validate().is_err());
      assert!(d.evaluate::<f64>(&host.approximator()).is_nan());
      assert_eq!(
        d.borrowed().approximate::<f64>(&host.approximator(), &Scope::Empty),
        Err(UndefinedDerivative::InvalidConfig),
      );
      assert!(host.approximator().evaluate(&Expr::from(d.clone())).is_nan());
    }
  }

  #[test]
  fn test_complex_operand_is_unsupported() {
    let host = Host::new();
    let complex = Expr::call("complex", vec![Expr::from(1), Expr::from(2)]);
    let d = Derivative::new(Expr::call("*", vec![complex, var_expr("s")]), var("s"), Expr::from(1));
    assert_eq!(
      d.borrowed().approximate::<f64>(&host.approximator(), &Scope::Empty),
      Err(UndefinedDerivative::UnsupportedOperandKind),
    );
  }

  #[test]
  fn test_shallow_reduce_keeps_node() {
    let host = Host::new();
    let mut errors = ErrorList::new();
    let mut ctx = SimplifierContext::new(&host.functions, &host.variables, &host.mode, &mut errors);
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), Expr::from(3));
    assert_strict_eq!(d.clone().shallow_reduce(&mut ctx), Expr::from(d));
    assert!(errors.is_empty());
  }

  #[test]
  fn test_shallow_reduce_undefined_operand() {
    let host = Host::new();
    let mut errors = ErrorList::new();
    let mut ctx = SimplifierContext::new(&host.functions, &host.variables, &host.mode, &mut errors);
    let d = Derivative::new(var_expr("x"), var("x"), Expr::undefined());
    assert_strict_eq!(d.shallow_reduce(&mut ctx), Expr::undefined());
  }

  #[test]
  fn test_shallow_reduce_matrix_operand() {
    let host = Host::new();
    let mut errors = ErrorList::new();
    let mut ctx = SimplifierContext::new(&host.functions, &host.variables, &host.mode, &mut errors);
    let matrix = Expr::call("vector", vec![Expr::from(1), Expr::from(2)]);
    let d = Derivative::new(var_expr("x"), var("x"), matrix);
    assert_strict_eq!(d.shallow_reduce(&mut ctx), Expr::undefined());
  }

  #[test]
  fn test_replace_unknown() {
    let unknown = Expr::from(Var::unknown());
    let d = Derivative::new(Expr::call("*", vec![unknown.clone(), var_expr("t")]), var("t"), unknown.clone());
    let replaced = d.replace_unknown(&var("y"));
    assert_eq!(replaced.number_of_operands(), 3);
    assert_strict_eq!(replaced.function().clone(), Expr::call("*", vec![var_expr("y"), var_expr("t")]));
    assert_eq!(replaced.variable(), &var("t"));
    assert_strict_eq!(replaced.point().clone(), var_expr("y"));
  }

  #[test]
  fn test_replace_unknown_bound_by_node() {
    let unknown = Expr::from(Var::unknown());
    let d = Derivative::new(pow(unknown.clone(), Expr::from(2)), Var::unknown(), unknown.clone());
    let replaced = d.replace_unknown(&var("y"));
    assert_strict_eq!(replaced.function().clone(), pow(unknown, Expr::from(2)));
    assert!(replaced.variable().is_unknown());
    assert_strict_eq!(replaced.point().clone(), var_expr("y"));
  }

  #[test]
  fn test_serialize_and_layout() {
    let d = Derivative::new(pow(var_expr("x"), Expr::from(2)), var("x"), Expr::from(0.5));
    let settings = SerializationSettings::default();
    assert_eq!(d.serialize(&settings), "diff(x^2, x, 0.5)");
    assert_eq!(Expr::from(d.clone()).to_string(), "diff(x^2, x, 0.5)");
    assert_eq!(
      d.layout(&settings),
      "<span class=\"operator\">diff</span>(<span class=\"var\">x</span><span class=\"operator\">^</span>2, <span class=\"var\">x</span>, 0.5)",
    );
  }
}
