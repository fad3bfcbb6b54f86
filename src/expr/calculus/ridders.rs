
//! Numerical differentiation by Ridders' method.
//!
//! The derivative is estimated from central differences at a
//! sequence of shrinking step sizes, which are combined by repeated
//! Richardson extrapolation. The entry with the smallest observed
//! error wins. See C. J. F. Ridders, "Accurate computation of F'(x)
//! and F'(x) F''(x)", Advances in Engineering Software 4(2), 1982.

use super::precision::{PrecisionConfig, WorkingFloat};

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Bound on both the extrapolation order and the number of step
/// sizes tried in one pass.
pub const TABLE_SIZE: usize = 10;

/// Bound on the number of passes, each starting from a step ten
/// times smaller than the last.
pub const MAX_STEP_RETRIES: usize = 10;

const RETRY_STEP_DIVISOR: f64 = 10.0;

/// Tuning parameters of the differentiator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiddersConfig {
  /// Step size of the first pass.
  pub min_initial_step: f64,
  /// Largest accepted ratio of estimated error to estimated value.
  pub max_error_rate: f64,
  /// Factor by which the step shrinks between table columns.
  pub step_reduction_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RiddersConfigError {
  #[error("Initial step must be positive and finite, got {0}")]
  InvalidInitialStep(f64),
  #[error("Maximum error rate must be positive and finite, got {0}")]
  InvalidErrorRate(f64),
  #[error("Step reduction factor must be finite and greater than 1, got {0}")]
  InvalidReductionFactor(f64),
}

/// Why a derivative has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum UndefinedDerivative {
  #[error("The point, or the function value at the point, is not a number")]
  NonNumericInput,
  #[error("Numerical differentiation did not reach the required accuracy")]
  ConvergenceFailure,
  #[error("Complex and matrix operands cannot be differentiated numerically")]
  UnsupportedOperandKind,
  #[error("The differentiation settings are out of range")]
  InvalidConfig,
}

/// A derivative estimate and its absolute error estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifferentiationResult<T> {
  pub value: T,
  pub error: T,
}

/// Estimates indexed by (extrapolation order, step index). Entry
/// `(0, k)` is the central difference at the `k`th step; entry
/// `(j, k)` for `j > 0` combines `(j - 1, k)` and `(j - 1, k - 1)`.
#[derive(Debug)]
struct ExtrapolationTable<T> {
  entries: [[T; TABLE_SIZE]; TABLE_SIZE],
}

#[derive(Clone, Copy, Debug)]
pub struct RiddersDifferentiator {
  config: RiddersConfig,
  precision: PrecisionConfig,
}

impl RiddersConfig {
  pub const DEFAULT_MIN_INITIAL_STEP: f64 = 0.01;
  pub const DEFAULT_MAX_ERROR_RATE: f64 = 0.01;
  pub const DEFAULT_STEP_REDUCTION_FACTOR: f64 = 1.4;

  pub fn validate(&self) -> Result<(), RiddersConfigError> {
    if !(self.min_initial_step.is_finite() && self.min_initial_step > 0.0) {
      return Err(RiddersConfigError::InvalidInitialStep(self.min_initial_step));
    }
    if !(self.max_error_rate.is_finite() && self.max_error_rate > 0.0) {
      return Err(RiddersConfigError::InvalidErrorRate(self.max_error_rate));
    }
    if !(self.step_reduction_factor.is_finite() && self.step_reduction_factor > 1.0) {
      return Err(RiddersConfigError::InvalidReductionFactor(self.step_reduction_factor));
    }
    Ok(())
  }
}

impl Default for RiddersConfig {
  fn default() -> Self {
    Self {
      min_initial_step: Self::DEFAULT_MIN_INITIAL_STEP,
      max_error_rate: Self::DEFAULT_MAX_ERROR_RATE,
      step_reduction_factor: Self::DEFAULT_STEP_REDUCTION_FACTOR,
    }
  }
}

impl<T: WorkingFloat> DifferentiationResult<T> {
  /// Whether the error is small enough, relative to the value, for
  /// the estimate to be reported. A NaN error never is.
  ///
  /// Note that a zero value with a zero error is accepted: `0 / 0` is
  /// NaN, which does not exceed the tolerance.
  pub fn is_acceptable(&self, max_error_rate: T) -> bool {
    let relative_error = (self.error / self.value).abs();
    !(relative_error > max_error_rate || self.error.is_nan())
  }
}

impl<T: WorkingFloat> ExtrapolationTable<T> {
  fn new() -> Self {
    Self { entries: [[T::one(); TABLE_SIZE]; TABLE_SIZE] }
  }

  fn get(&self, order: usize, step: usize) -> T {
    self.entries[order][step]
  }

  fn set(&mut self, order: usize, step: usize, value: T) {
    self.entries[order][step] = value;
  }
}

impl RiddersDifferentiator {
  pub fn new(config: RiddersConfig, precision: PrecisionConfig) -> Self {
    Self { config, precision }
  }

  pub fn config(&self) -> &RiddersConfig {
    &self.config
  }

  /// Differentiates `f` at `x`, rounding the value so that it
  /// carries no digits below the error estimate.
  pub fn differentiate<T, F>(&self, f: F, x: T) -> Result<DifferentiationResult<T>, UndefinedDerivative>
  where T: WorkingFloat,
        F: FnMut(T) -> T {
    let DifferentiationResult { value, error } = self.estimate(f, x)?;
    let minimum_magnitude = T::narrow(self.precision.minimum_magnitude);
    Ok(DifferentiationResult { value: round_to_error(value, error, minimum_magnitude), error })
  }

  /// Differentiates `f` at `x` without rounding the result.
  ///
  /// Each pass fills an extrapolation table starting from step `h`.
  /// Passes are retried with `h / 10` until the relative error is
  /// acceptable, `h` falls below machine epsilon, or
  /// [`MAX_STEP_RETRIES`] passes have run.
  ///
  /// Out-of-range settings, a non-finite abscissa and a non-finite
  /// function value at the abscissa are all rejected before any
  /// extrapolation.
  pub fn estimate<T, F>(&self, mut f: F, x: T) -> Result<DifferentiationResult<T>, UndefinedDerivative>
  where T: WorkingFloat,
        F: FnMut(T) -> T {
    if let Err(err) = self.config.validate() {
      warn!(%err, "invalid differentiation settings");
      return Err(UndefinedDerivative::InvalidConfig);
    }
    if !x.is_finite() || !f(x).is_finite() {
      debug!(abscissa = %x, "derivative point or function value is not finite");
      return Err(UndefinedDerivative::NonNumericInput);
    }

    let max_error_rate = T::narrow(self.config.max_error_rate);
    let epsilon = T::narrow(self.precision.machine_epsilon);
    let divisor = T::narrow(RETRY_STEP_DIVISOR);

    let mut h = T::narrow(self.config.min_initial_step);
    let mut candidate = DifferentiationResult { value: T::zero(), error: T::nan() };
    let mut passes = 0;
    for pass in 0..MAX_STEP_RETRIES {
      passes = pass + 1;
      candidate = self.extrapolate(&mut f, x, h);
      trace!(pass, step = %h, value = %candidate.value, error = %candidate.error, "ridders pass");
      h = h / divisor;
      if candidate.is_acceptable(max_error_rate) || h < epsilon {
        break;
      }
    }

    if !candidate.is_acceptable(max_error_rate) {
      debug!(abscissa = %x, value = %candidate.value, error = %candidate.error, "derivative did not converge");
      return Err(UndefinedDerivative::ConvergenceFailure);
    }
    if passes > 1 {
      debug!(abscissa = %x, passes, value = %candidate.value, "derivative accepted after shrinking the step");
    }
    Ok(candidate)
  }

  fn extrapolate<T, F>(&self, f: &mut F, x: T, h: T) -> DifferentiationResult<T>
  where T: WorkingFloat,
        F: FnMut(T) -> T {
    let factor = T::narrow(self.config.step_reduction_factor);
    let factor_squared = factor * factor;

    let mut best = DifferentiationResult { value: T::zero(), error: T::max_value() };
    let mut table = ExtrapolationTable::new();

    let mut step = representable_step(x, h);
    table.set(0, 0, central_difference(f, x, step));
    for k in 1..TABLE_SIZE {
      step = representable_step(x, step / factor);
      table.set(0, k, central_difference(f, x, step));

      let mut weight = factor_squared;
      for j in 1..=k {
        let current = table.get(j - 1, k);
        let previous = table.get(j - 1, k - 1);
        let estimate = (current * weight - previous) / (weight - T::one());
        table.set(j, k, estimate);
        weight = weight * factor_squared;

        // Written as a comparison rather than `max` so that a NaN
        // difference poisons the local error instead of being skipped.
        let error_current = (estimate - current).abs();
        let error_previous = (estimate - previous).abs();
        let local_error = if error_current > error_previous { error_current } else { error_previous };
        if local_error < best.error {
          best = DifferentiationResult { value: estimate, error: local_error };
        }
      }

      // Higher orders are making things worse; stop here.
      if (table.get(k, k) - table.get(k - 1, k - 1)).abs() > best.error + best.error {
        break;
      }
    }
    best
  }
}

/// Adjusts `h` so that `x + h` is exactly representable, removing
/// the rounding error of the step itself from the difference
/// quotient.
fn representable_step<T: WorkingFloat>(x: T, h: T) -> T {
  let shifted = x + h;
  shifted - x
}

fn central_difference<T, F>(f: &mut F, x: T, h: T) -> T
where T: WorkingFloat,
      F: FnMut(T) -> T {
  let plus = f(x + h);
  let minus = f(x - h);
  (plus - minus) / (h + h)
}

/// Rounds `value` to a multiple of `10^(floor(log10(|error|)) + 2)`.
/// Errors smaller than `minimum_magnitude` leave the value as is.
pub fn round_to_error<T: WorkingFloat>(value: T, error: T, minimum_magnitude: T) -> T {
  let error = error.abs();
  if error < minimum_magnitude {
    return value;
  }
  let ten = T::narrow(10.0);
  let two = T::narrow(2.0);
  let unit = ten.powf(error.log10().floor() + two);
  (value / unit).round() * unit
}
