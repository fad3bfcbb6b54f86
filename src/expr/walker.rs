
//! Utility functions for walking an expression tree.

use super::Expr;
use crate::util::unwrap_infallible;

/// Rebuilds `expr` bottom-up, passing every node to `f` after its
/// children have been rebuilt.
pub fn postorder_walk<E, F>(expr: Expr, mut f: F) -> Result<Expr, E>
where F: FnMut(Expr) -> Result<Expr, E> {
  postorder_walk_impl(expr, &mut f)
}

pub fn postorder_walk_ok<F>(expr: Expr, mut f: F) -> Expr
where F: FnMut(Expr) -> Expr {
  let f_err = |expr| Ok(f(expr));
  unwrap_infallible(
    postorder_walk(expr, f_err)
  )
}

fn postorder_walk_impl<E, F>(expr: Expr, f: &mut F) -> Result<Expr, E>
where F: FnMut(Expr) -> Result<Expr, E> {
  let expr = match expr {
    Expr::Atom(atom) => {
      Expr::Atom(atom)
    }
    Expr::Call(function_name, args) => {
      let args = args.into_iter().map(|x| postorder_walk_impl(x, f)).collect::<Result<Vec<_>, _>>()?;
      Expr::Call(function_name, args)
    }
  };
  f(expr)
}

pub fn postorder_walk_borrowed<F>(expr: &Expr, mut f: F)
where F: FnMut(&Expr) {
  postorder_walk_borrowed_impl(expr, &mut f);
}

fn postorder_walk_borrowed_impl<F>(expr: &Expr, f: &mut F)
where F: FnMut(&Expr) {
  for arg in expr.children() {
    postorder_walk_borrowed_impl(arg, f);
  }
  f(expr);
}

/// Returns true if any of the sub-expressions of `expr` (including
/// `expr` itself) satisfies the predicate.
pub fn any<F>(expr: &Expr, f: F) -> bool
where F: Fn(&Expr) -> bool {
  let mut result = false;
  postorder_walk_borrowed(expr, |e| {
    if f(e) {
      result = true;
    }
  });
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_postorder_visits_children_first() {
    let expr = Expr::call("f", vec![Expr::from(1), Expr::call("g", vec![Expr::from(2)])]);
    let mut visited = Vec::new();
    postorder_walk_borrowed(&expr, |e| visited.push(e.to_string()));
    assert_eq!(visited, vec!["1", "2", "g(2)", "f(1, g(2))"]);
  }

  #[test]
  fn test_postorder_walk_rebuilds() {
    let expr = Expr::call("f", vec![Expr::from(1), Expr::from(2)]);
    let doubled = postorder_walk_ok(expr, |e| match e {
      Expr::Atom(crate::expr::atom::Atom::Number(n)) => Expr::from(n * 2.0),
      e => e,
    });
    assert_eq!(doubled, Expr::call("f", vec![Expr::from(2), Expr::from(4)]));
  }

  #[test]
  fn test_postorder_walk_short_circuits() {
    let expr = Expr::call("f", vec![Expr::from(1), Expr::undefined()]);
    let result: Result<Expr, &str> = postorder_walk(expr, |e| {
      if e.is_undefined() { Err("undefined") } else { Ok(e) }
    });
    assert_eq!(result, Err("undefined"));
  }

  #[test]
  fn test_any() {
    let expr = Expr::call("f", vec![Expr::from(1), Expr::call("g", vec![Expr::undefined()])]);
    assert!(any(&expr, Expr::is_undefined));
    assert!(!any(&Expr::from(1), Expr::is_undefined));
  }
}
