
use super::base::{Simplifier, SimplifierContext};
use super::error::SimplifierError;
use crate::expr::Expr;
use crate::expr::calculus::{Precision, WorkingFloat};
use crate::expr::function::Function;
use crate::expr::function::flags::FunctionFlags;
use crate::expr::prisms::ExprToNumber;
use crate::util::angles::AngleUnit;
use crate::util::prism::{Prism, OnVec};

/// A [`Simplifier`] that evaluates calls to functions flagged with
/// [`FunctionFlags::CONSTANT_FOLDING`] whose arguments are all
/// numerical literals. Folding happens in the working precision of
/// the calculation mode.
///
/// A fold that does not produce a finite number yields `undef` and
/// records [`SimplifierError::NonFiniteResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantFolder;

impl Simplifier for ConstantFolder {
  fn simplify_expr_part(&self, expr: Expr, ctx: &mut SimplifierContext) -> Expr {
    let (function_name, args) = match expr {
      Expr::Call(function_name, args) => (function_name, args),
      expr => return expr,
    };
    let Some(function) = ctx.functions.get(&function_name) else {
      return Expr::Call(function_name, args);
    };
    if !function.flags().contains(FunctionFlags::CONSTANT_FOLDING) || !function.accepts_arity(args.len()) {
      return Expr::Call(function_name, args);
    }
    let args = match OnVec::new(ExprToNumber).narrow_type(args) {
      Ok(args) => args,
      Err(args) => return Expr::Call(function_name, args),
    };
    let value = match ctx.mode.precision {
      Precision::Reduced => fold::<f32>(function, &args, ctx.mode.angle_unit),
      Precision::Full => fold::<f64>(function, &args, ctx.mode.angle_unit),
    };
    if value.is_finite() {
      Expr::from(value)
    } else {
      ctx.errors.push(SimplifierError::NonFiniteResult { function: function_name });
      Expr::undefined()
    }
  }
}

fn fold<T: WorkingFloat>(function: &Function, args: &[f64], angle_unit: AngleUnit) -> f64 {
  let args: Vec<T> = args.iter().map(|&x| T::narrow(x)).collect();
  function.apply(&args, angle_unit).widen()
}
