
//! Helpers for keeping track of which angle format is currently in
//! use.

use num::{Float, FromPrimitive};
use num::traits::FloatConst;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// The unit in which trigonometric functions receive their arguments
/// and in which inverse trigonometric functions report their results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
  #[default]
  Radians,
  Degrees,
  Gradians,
}

impl AngleUnit {
  /// The measure of a half turn in this unit.
  pub fn half_turn<T>(self) -> T
  where T: FloatConst + FromPrimitive {
    match self {
      AngleUnit::Radians => T::PI(),
      AngleUnit::Degrees => T::from_i32(180).unwrap(), // unwrap: Small integers are always representable
      AngleUnit::Gradians => T::from_i32(200).unwrap(), // unwrap: Small integers are always representable
    }
  }

  /// Converts an angle measured in `self` into radians.
  pub fn to_radians<T>(self, value: T) -> T
  where T: Float + FloatConst + FromPrimitive {
    match self {
      AngleUnit::Radians => value,
      _ => value * T::PI() / self.half_turn(),
    }
  }

  /// Converts an angle measured in radians into `self`.
  pub fn from_radians<T>(self, value: T) -> T
  where T: Float + FloatConst + FromPrimitive {
    match self {
      AngleUnit::Radians => value,
      _ => value * self.half_turn() / T::PI(),
    }
  }
}

impl Display for AngleUnit {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      AngleUnit::Radians => write!(f, "rad"),
      AngleUnit::Degrees => write!(f, "deg"),
      AngleUnit::Gradians => write!(f, "grad"),
    }
  }
}
