
//! Miscellaneous Boolean predicates on the [`Expr`] type.

use super::Expr;
use super::walker;

/// Head of a complex number literal `complex(re, im)`.
pub const COMPLEX_FUNCTION_NAME: &str = "complex";

/// Head of a vector or matrix literal.
pub const VECTOR_FUNCTION_NAME: &str = "vector";

/// Returns true if `expr` is a complex number literal.
pub fn is_complex(expr: &Expr) -> bool {
  matches!(expr, Expr::Call(f, args) if f == COMPLEX_FUNCTION_NAME && args.len() == 2)
}

/// Returns true if `expr` is a vector or matrix literal.
pub fn is_vector(expr: &Expr) -> bool {
  matches!(expr, Expr::Call(f, _) if f == VECTOR_FUNCTION_NAME)
}

/// Returns true if `expr` contains a complex or matrix literal
/// anywhere. Such operands cannot take part in real-valued numeric
/// work.
pub fn contains_non_real_literal(expr: &Expr) -> bool {
  walker::any(expr, |e| is_complex(e) || is_vector(e))
}
