
pub mod flags;
pub mod library;
pub mod table;

use flags::FunctionFlags;
use crate::expr::calculus::WorkingFloat;
use crate::util::angles::AngleUnit;

use std::fmt::{self, Formatter, Debug};

/// A mathematical function known to the calculator engine, together
/// with the numerical rule used to approximate it.
pub struct Function {
  name: String,
  arity: Arity,
  flags: FunctionFlags,
  operation: Operation,
}

/// The number of arguments a [`Function`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
  Exactly(usize),
  AtLeast(usize),
}

/// The numerical rule behind a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Sum,
  Difference,
  Negate,
  Product,
  Quotient,
  Power,
  Abs,
  Sqrt,
  Exp,
  Ln,
  Log10,
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
}

impl Function {
  pub fn new(name: impl Into<String>, arity: Arity, operation: Operation) -> Self {
    Self {
      name: name.into(),
      arity,
      flags: FunctionFlags::empty(),
      operation,
    }
  }

  pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
    self.flags = flags;
    self
  }

  /// The function's name.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn arity(&self) -> Arity {
    self.arity
  }

  /// The property-based flags set on this function.
  pub fn flags(&self) -> FunctionFlags {
    self.flags
  }

  pub fn operation(&self) -> Operation {
    self.operation
  }

  pub fn accepts_arity(&self, count: usize) -> bool {
    match self.arity {
      Arity::Exactly(n) => count == n,
      Arity::AtLeast(n) => count >= n,
    }
  }

  /// Applies the function to numerical arguments. An unacceptable
  /// number of arguments, or a value outside the function's domain,
  /// produces NaN.
  pub fn apply<T: WorkingFloat>(&self, args: &[T], angle_unit: AngleUnit) -> T {
    if !self.accepts_arity(args.len()) {
      return T::nan();
    }
    match self.operation {
      Operation::Sum => args.iter().fold(T::zero(), |acc, &x| acc + x),
      Operation::Product => args.iter().fold(T::one(), |acc, &x| acc * x),
      Operation::Difference => args[0] - args[1],
      Operation::Negate => -args[0],
      Operation::Quotient => {
        if args[1].is_zero() {
          T::nan()
        } else {
          args[0] / args[1]
        }
      }
      Operation::Power => args[0].powf(args[1]),
      Operation::Abs => args[0].abs(),
      Operation::Sqrt => args[0].sqrt(),
      Operation::Exp => args[0].exp(),
      Operation::Ln => args[0].ln(),
      Operation::Log10 => args[0].log10(),
      Operation::Sin => angle_unit.to_radians(args[0]).sin(),
      Operation::Cos => angle_unit.to_radians(args[0]).cos(),
      Operation::Tan => angle_unit.to_radians(args[0]).tan(),
      Operation::Asin => angle_unit.from_radians(args[0].asin()),
      Operation::Acos => angle_unit.from_radians(args[0].acos()),
      Operation::Atan => angle_unit.from_radians(args[0].atan()),
    }
  }
}

impl Debug for Function {
  fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
    write!(f, "Function {{ name: {:?}, arity: {:?}, flags: {:?}, operation: {:?} }}", self.name, self.arity, self.flags, self.operation)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  #[test]
  fn test_arity_checks() {
    let f = Function::new("-", Arity::Exactly(2), Operation::Difference);
    assert!(f.accepts_arity(2));
    assert!(!f.accepts_arity(3));
    assert!(f.apply(&[1.0_f64], AngleUnit::Radians).is_nan());
    let g = Function::new("+", Arity::AtLeast(0), Operation::Sum);
    assert_eq!(g.apply::<f64>(&[], AngleUnit::Radians), 0.0);
    assert_eq!(g.apply(&[1.0_f64, 2.0, 3.5], AngleUnit::Radians), 6.5);
  }

  #[test]
  fn test_quotient_by_zero_is_nan() {
    let f = Function::new("/", Arity::Exactly(2), Operation::Quotient);
    assert!(f.apply(&[1.0_f64, 0.0], AngleUnit::Radians).is_nan());
    assert_eq!(f.apply(&[1.0_f32, 4.0], AngleUnit::Radians), 0.25);
  }

  #[test]
  fn test_trigonometry_honours_angle_unit() {
    let sin = Function::new("sin", Arity::Exactly(1), Operation::Sin);
    assert_abs_diff_eq!(sin.apply(&[30.0_f64], AngleUnit::Degrees), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(sin.apply(&[100.0_f64], AngleUnit::Gradians), 1.0, epsilon = 1e-12);
    let atan = Function::new("atan", Arity::Exactly(1), Operation::Atan);
    assert_abs_diff_eq!(atan.apply(&[1.0_f64], AngleUnit::Degrees), 45.0, epsilon = 1e-12);
  }
}
