
use super::var::Var;
use crate::display::number::format_number;
use crate::display::SerializationSettings;
use crate::util::stricteq::StrictEq;

use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
  Number(f64),
  Var(Var),
  /// The result of an operation that has no meaningful value, such as
  /// a derivative that failed to converge.
  Undefined,
}

impl Atom {
  /// Display token of [`Atom::Undefined`].
  pub const UNDEFINED_NAME: &'static str = "undef";
}

impl From<f64> for Atom {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl From<Var> for Atom {
  fn from(v: Var) -> Self {
    Self::Var(v)
  }
}

impl StrictEq for Atom {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Atom::Number(a), Atom::Number(b)) => a.strict_eq(b),
      (a, b) => a == b,
    }
  }
}

impl Display for Atom {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Atom::Number(n) => write!(f, "{}", format_number(*n, &SerializationSettings::default())),
      Atom::Var(v) => write!(f, "{v}"),
      Atom::Undefined => write!(f, "{}", Atom::UNDEFINED_NAME),
    }
  }
}
