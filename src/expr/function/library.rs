
//! The built-in function library.

use super::{Function, Arity, Operation};
use super::flags::FunctionFlags;
use super::table::FunctionTable;

/// Name of the unary negation function.
pub const NEGATE_FUNCTION_NAME: &str = "negate";

/// The table of every built-in function.
pub fn builtin_functions() -> FunctionTable {
  let mut table = FunctionTable::with_capacity(20);
  append_arithmetic_functions(&mut table);
  append_transcendental_functions(&mut table);
  table
}

pub fn append_arithmetic_functions(table: &mut FunctionTable) {
  let folding = FunctionFlags::CONSTANT_FOLDING;
  table.insert(Function::new("+", Arity::AtLeast(0), Operation::Sum).with_flags(folding));
  table.insert(Function::new("*", Arity::AtLeast(0), Operation::Product).with_flags(folding));
  table.insert(Function::new("-", Arity::Exactly(2), Operation::Difference).with_flags(folding));
  table.insert(Function::new("/", Arity::Exactly(2), Operation::Quotient).with_flags(folding));
  table.insert(Function::new("^", Arity::Exactly(2), Operation::Power).with_flags(folding));
  table.insert(
    Function::new(NEGATE_FUNCTION_NAME, Arity::Exactly(1), Operation::Negate)
      .with_flags(folding | FunctionFlags::IS_INVOLUTION),
  );
  table.insert(Function::new("abs", Arity::Exactly(1), Operation::Abs).with_flags(folding));
}

pub fn append_transcendental_functions(table: &mut FunctionTable) {
  let unary = [
    ("sqrt", Operation::Sqrt),
    ("exp", Operation::Exp),
    ("ln", Operation::Ln),
    ("log", Operation::Log10),
    ("sin", Operation::Sin),
    ("cos", Operation::Cos),
    ("tan", Operation::Tan),
    ("asin", Operation::Asin),
    ("acos", Operation::Acos),
    ("atan", Operation::Atan),
  ];
  for (name, operation) in unary {
    table.insert(Function::new(name, Arity::Exactly(1), operation));
  }
}
