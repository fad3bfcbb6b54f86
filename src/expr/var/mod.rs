
pub mod constants;
pub mod table;

use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// A variable in an equation, left intentionally un-evaluated.
///
/// Variables are identified by strings. A variable's name must begin
/// with a letter, followed by zero or more letters, digits, or
/// apostrophes. This structure enforces these constraints, with the
/// single exception of the reserved [`Var::unknown`] placeholder.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Var(String);

#[derive(Clone, Debug)]
pub struct TryFromStringError {
  original_string: String,
}

pub static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z$][a-zA-Z$0-9']*$").unwrap()
});

impl Var {
  /// Name of the unknown placeholder. It can never collide with a
  /// user variable, since it fails [`VALID_NAME_RE`].
  pub const UNKNOWN_NAME: &'static str = "_";

  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  /// The placeholder standing in for "the variable the user has not
  /// named yet". Parametered expressions replace it through
  /// `replace_unknown`.
  pub fn unknown() -> Self {
    Self(Self::UNKNOWN_NAME.to_owned())
  }

  pub fn is_unknown(&self) -> bool {
    self.0 == Self::UNKNOWN_NAME
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Var {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl From<Var> for String {
  fn from(v: Var) -> Self {
    v.0
  }
}

impl TryFromStringError {
  pub fn original_string(&self) -> &str {
    &self.original_string
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}

impl Display for TryFromStringError {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Invalid variable name '{}'", self.original_string)
  }
}

impl StdError for TryFromStringError {}
