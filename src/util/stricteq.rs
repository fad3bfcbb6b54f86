
use std::fmt::{self, Debug, Formatter};

/// Trait for defining a stricter notion of equality than the usual
/// [`PartialEq`].
///
/// `a.strict_eq(b)` should be symmetric and transitive. Unlike
/// `PartialEq` on floats, strict equality of floating-point values
/// compares bit patterns, so `NaN` is strictly equal to an identical
/// `NaN` and `0.0` is not strictly equal to `-0.0`.
pub trait StrictEq {
  fn strict_eq(&self, other: &Self) -> bool;
}

/// Lifts a [`StrictEq`] relation into `PartialEq` for use with macros
/// like `assert_eq!`.
///
/// The `Debug` impl for `Strictly<'a, T>` prints equivalently to a
/// simple `T`, to make debug output prettier.
pub struct Strictly<'a, T: ?Sized>(pub &'a T);

impl<'a, T: StrictEq + ?Sized> PartialEq for Strictly<'a, T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.strict_eq(other.0)
  }
}

impl<'a, T: Debug + ?Sized> Debug for Strictly<'a, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self.0)
  }
}

impl StrictEq for f64 {
  fn strict_eq(&self, other: &Self) -> bool {
    self.to_bits() == other.to_bits()
  }
}

impl StrictEq for f32 {
  fn strict_eq(&self, other: &Self) -> bool {
    self.to_bits() == other.to_bits()
  }
}

impl<T: StrictEq> StrictEq for [T] {
  fn strict_eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
  }
}

impl<T: StrictEq> StrictEq for Vec<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    self.as_slice().strict_eq(other.as_slice())
  }
}

#[macro_export]
macro_rules! assert_strict_eq {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_eq!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}

#[macro_export]
macro_rules! assert_strict_ne {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_ne!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}
