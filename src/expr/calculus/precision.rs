
//! Working precisions for numerical approximation.

use num::{Float, FromPrimitive};
use num::traits::FloatConst;
use serde::{Serialize, Deserialize};

use std::fmt::{Debug, Display};

/// The floating-point precision in which an approximation is carried
/// out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
  /// Single precision (`f32`).
  Reduced,
  /// Double precision (`f64`).
  #[default]
  Full,
}

/// The limits of a working precision that numerical algorithms need
/// to know about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionConfig {
  /// The smallest positive normal magnitude.
  pub minimum_magnitude: f64,
  /// The difference between 1 and the next representable value.
  pub machine_epsilon: f64,
}

/// A floating-point type usable as a working precision.
pub trait WorkingFloat: Float + FloatConst + FromPrimitive + Debug + Display + Send + Sync + 'static {
  const PRECISION: Precision;

  /// Converts from `f64`, rounding to the nearest representable
  /// value.
  fn narrow(value: f64) -> Self;

  fn widen(self) -> f64;
}

impl Precision {
  pub fn config(self) -> PrecisionConfig {
    match self {
      Precision::Reduced => PrecisionConfig {
        minimum_magnitude: f64::from(f32::MIN_POSITIVE),
        machine_epsilon: f64::from(f32::EPSILON),
      },
      Precision::Full => PrecisionConfig {
        minimum_magnitude: f64::MIN_POSITIVE,
        machine_epsilon: f64::EPSILON,
      },
    }
  }
}

impl WorkingFloat for f32 {
  const PRECISION: Precision = Precision::Reduced;

  fn narrow(value: f64) -> Self {
    value as f32
  }

  fn widen(self) -> f64 {
    f64::from(self)
  }
}

impl WorkingFloat for f64 {
  const PRECISION: Precision = Precision::Full;

  fn narrow(value: f64) -> Self {
    value
  }

  fn widen(self) -> f64 {
    self
  }
}
