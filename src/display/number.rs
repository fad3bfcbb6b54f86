
//! Formatting of floating-point literals.

use super::{FloatDisplayMode, SerializationSettings};

/// Decimal exponents in this range are written positionally in
/// [`FloatDisplayMode::Decimal`]; the upper bound is the number of
/// significant digits.
const MIN_POSITIONAL_EXPONENT: i32 = -5;

/// Formats `n` with at most `settings.significant_digits` significant
/// digits, without trailing zeros. Negative zero is written `0`.
pub fn format_number(n: f64, settings: &SerializationSettings) -> String {
  if !n.is_finite() {
    return n.to_string();
  }
  if n == 0.0 {
    return String::from("0");
  }
  let digits = settings.significant_digits.max(1);
  let scientific = format!("{:.*e}", digits - 1, n);
  let Some((mantissa, exponent)) = scientific.split_once('e') else {
    return scientific;
  };
  let Ok(exponent) = exponent.parse::<i32>() else {
    return scientific;
  };
  let positional = (MIN_POSITIONAL_EXPONENT..digits as i32).contains(&exponent);
  match settings.float_mode {
    FloatDisplayMode::Decimal if positional => {
      let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
      trim_fraction(&format!("{n:.decimals$}")).to_owned()
    }
    _ => {
      format!("{}e{}", trim_fraction(mantissa), exponent)
    }
  }
}

fn trim_fraction(text: &str) -> &str {
  if text.contains('.') {
    text.trim_end_matches('0').trim_end_matches('.')
  } else {
    text
  }
}
