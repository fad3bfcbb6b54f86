
use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
  pub struct FunctionFlags: u32 {
    /// Functions with this flag are folded into a single number by
    /// the default reduction whenever all of their arguments are
    /// numerical literals. Functions whose exact value is usually
    /// irrational (such as `sin`) are left unset, so that reduction
    /// never trades an exact form for an approximation.
    const CONSTANT_FOLDING = 0b0001;
    /// Functions with this flag are known to be involutions.
    /// Specifically, if `f` is a function with this flag, then
    /// `f(f(x))` can simplify to `x`, regardless of the value of `x`.
    /// This flag will only be used to simplify unary applications of
    /// the function.
    const IS_INVOLUTION = 0b0010;
  }
}
