
use super::error::SimplifierError;
use crate::errorlist::ErrorList;
use crate::expr::Expr;
use crate::expr::function::table::FunctionTable;
use crate::expr::var::table::VarTable;
use crate::expr::walker::postorder_walk_ok;
use crate::mode::calculation::CalculationMode;

pub trait Simplifier {
  /// Simplifies a single node, assuming its children are already
  /// simplified.
  fn simplify_expr_part(&self, expr: Expr, ctx: &mut SimplifierContext) -> Expr;

  fn simplify_expr(&self, expr: Expr, ctx: &mut SimplifierContext) -> Expr {
    postorder_walk_ok(expr, |e| self.simplify_expr_part(e, ctx))
  }
}

/// Everything a reduction pass may consult, plus the list it records
/// recoverable problems in.
pub struct SimplifierContext<'a, 'e> {
  pub functions: &'a FunctionTable,
  pub variables: &'a VarTable<f64>,
  pub mode: &'a CalculationMode,
  pub errors: &'e mut ErrorList<SimplifierError>,
}

impl<'a, 'e> SimplifierContext<'a, 'e> {
  pub fn new(
    functions: &'a FunctionTable,
    variables: &'a VarTable<f64>,
    mode: &'a CalculationMode,
    errors: &'e mut ErrorList<SimplifierError>,
  ) -> Self {
    Self { functions, variables, mode, errors }
  }
}
