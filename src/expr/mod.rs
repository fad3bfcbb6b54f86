
pub mod algebra;
pub mod approximation;
pub mod atom;
pub mod calculus;
pub mod function;
pub mod predicates;
pub mod prisms;
pub mod simplifier;
pub mod var;
pub mod walker;

use atom::Atom;
use var::Var;
use calculus::Derivative;
use crate::display::{serialize, SerializationSettings};
use crate::util::stricteq::StrictEq;

use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// An expression tree. Every compound node, including operators such
/// as `+` and the derivative node `diff`, is represented as a prefix
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
  Atom(Atom),
  Call(String, Vec<Expr>),
}

impl Expr {
  /// Convenience constructor for [Expr::Call].
  pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(name.to_string(), args)
  }

  /// Convenience constructor for a variable. Returns `None` if the
  /// name is not a valid variable name.
  pub fn var(name: &str) -> Option<Expr> {
    Var::new(name).map(Expr::from)
  }

  pub fn undefined() -> Expr {
    Expr::Atom(Atom::Undefined)
  }

  pub fn zero() -> Expr {
    Expr::from(0.0)
  }

  pub fn one() -> Expr {
    Expr::from(1.0)
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self, Expr::Atom(Atom::Undefined))
  }

  /// The direct children of this node. Atoms have no children.
  pub fn children(&self) -> &[Expr] {
    match self {
      Expr::Atom(_) => &[],
      Expr::Call(_, args) => args,
    }
  }

  /// Rewrites every free occurrence of a variable, as decided by `f`.
  ///
  /// A `diff` node binds its second operand inside its first: the
  /// bound symbol itself is never passed to `f`, and neither are
  /// occurrences of that symbol in the differentiated function.
  pub fn map_free_vars<F>(self, mut f: F) -> Expr
  where F: FnMut(Var) -> Expr {
    let mut bound = Vec::new();
    map_free_vars_impl(self, &mut f, &mut bound)
  }

  /// Replaces every free occurrence of `var` with `value`.
  pub fn substitute_var(self, var: &Var, value: &Expr) -> Expr {
    self.map_free_vars(|v| {
      if &v == var {
        value.clone()
      } else {
        Expr::from(v)
      }
    })
  }

  /// Replaces free occurrences of the [unknown placeholder](Var::unknown)
  /// with `symbol`.
  pub fn replace_unknown(self, symbol: &Var) -> Expr {
    self.substitute_var(&Var::unknown(), &Expr::from(symbol.clone()))
  }
}

fn map_free_vars_impl<F>(expr: Expr, f: &mut F, bound: &mut Vec<Var>) -> Expr
where F: FnMut(Var) -> Expr {
  match expr {
    Expr::Atom(Atom::Var(v)) => {
      if bound.contains(&v) {
        Expr::from(v)
      } else {
        f(v)
      }
    }
    Expr::Atom(atom) => {
      Expr::Atom(atom)
    }
    Expr::Call(name, args) => {
      let binding = Derivative::bound_variable(&name, &args).cloned();
      let mut new_args = Vec::with_capacity(args.len());
      for (index, arg) in args.into_iter().enumerate() {
        let new_arg = match &binding {
          Some(_) if index == Derivative::VARIABLE_INDEX => arg,
          Some(var) if index == Derivative::FUNCTION_INDEX => {
            bound.push(var.clone());
            let arg = map_free_vars_impl(arg, f, bound);
            bound.pop();
            arg
          }
          _ => map_free_vars_impl(arg, f, bound),
        };
        new_args.push(new_arg);
      }
      Expr::Call(name, new_args)
    }
  }
}

impl From<Atom> for Expr {
  fn from(a: Atom) -> Expr {
    Expr::Atom(a)
  }
}

impl From<Var> for Expr {
  fn from(v: Var) -> Expr {
    Expr::Atom(Atom::Var(v))
  }
}

impl From<f64> for Expr {
  fn from(n: f64) -> Expr {
    Expr::Atom(Atom::Number(n))
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::Atom(Atom::Number(n as f64))
  }
}

impl StrictEq for Expr {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Expr::Atom(a), Expr::Atom(b)) => a.strict_eq(b),
      (Expr::Call(f, a), Expr::Call(g, b)) => f == g && a.strict_eq(b),
      _ => false,
    }
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&serialize(self, &SerializationSettings::default()))
  }
}
