
use super::base::{Simplifier, SimplifierContext};
use crate::expr::Expr;
use crate::expr::function::flags::FunctionFlags;

/// `InvolutionSimplifier` is a [`Simplifier`] that performs the
/// simplification described in [`FunctionFlags::IS_INVOLUTION`].
/// Specifically, if `f` is a function with that flag set, then this
/// simplifier will simplify applications of the form `f(f(x))` to
/// simply `x`.
///
/// This simplification only affects unary applications of the
/// function `f`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvolutionSimplifier;

impl Simplifier for InvolutionSimplifier {
  fn simplify_expr_part(&self, expr: Expr, ctx: &mut SimplifierContext) -> Expr {
    let (function_name, mut args) = match expr {
      Expr::Call(function_name, args) => (function_name, args),
      expr => return expr,
    };
    let is_involution = ctx.functions.get(&function_name)
      .is_some_and(|f| f.flags().contains(FunctionFlags::IS_INVOLUTION));
    if is_involution && args.len() == 1 {
      if let Expr::Call(inner_name, inner_args) = &mut args[0] {
        if *inner_name == function_name && inner_args.len() == 1 {
          return inner_args.remove(0);
        }
      }
    }
    Expr::Call(function_name, args)
  }
}
