
use crate::display::SerializationSettings;
use crate::expr::calculus::{Precision, RiddersConfig, RiddersConfigError};
use crate::util::angles::AngleUnit;

use serde::{Serialize, Deserialize};

/// The calculator's current calculation mode: how angles are read,
/// which working precision approximations use, and how numerical
/// differentiation is tuned.
///
/// Missing fields deserialize to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationMode {
  pub angle_unit: AngleUnit,
  pub precision: Precision,
  pub differentiation: RiddersConfig,
  pub display: SerializationSettings,
}

impl CalculationMode {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
    self.angle_unit = angle_unit;
    self
  }

  pub fn with_precision(mut self, precision: Precision) -> Self {
    self.precision = precision;
    self
  }

  pub fn validate(&self) -> Result<(), RiddersConfigError> {
    self.differentiation.validate()
  }
}
