
//! Textual serialization and HTML layout of expressions.
//!
//! Both renderings share one writer. Calls are written in prefix
//! form, `name(arg, arg, ...)`, except for the binary arithmetic
//! operators, which are written infix.

pub mod layout;
pub mod number;

use crate::expr::Expr;
use crate::expr::atom::Atom;
use number::format_number;

use itertools::{Itertools, Position};
use phf::phf_map;
use serde::{Serialize, Deserialize};

/// How floating-point literals are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatDisplayMode {
  /// Positional notation for moderate magnitudes, scientific
  /// otherwise.
  #[default]
  Decimal,
  Scientific,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationSettings {
  pub float_mode: FloatDisplayMode,
  pub significant_digits: usize,
}

/// The markup a rendering is produced in.
pub trait Markup {
  fn write_number(&self, out: &mut String, text: &str);
  fn write_var(&self, out: &mut String, name: &str);
  fn write_operator(&self, out: &mut String, name: &str);
  fn write_undefined(&self, out: &mut String);
}

/// Unadorned text, suitable for round-tripping.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

/// Binary operators written infix, with their binding power.
static INFIX_OPERATORS: phf::Map<&'static str, u8> = phf_map! {
  "+" => 1,
  "-" => 1,
  "*" => 2,
  "/" => 2,
  "^" => 3,
};

const MIN_PRECEDENCE: u8 = 0;

impl SerializationSettings {
  pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 7;
}

impl Default for SerializationSettings {
  fn default() -> Self {
    Self {
      float_mode: FloatDisplayMode::default(),
      significant_digits: Self::DEFAULT_SIGNIFICANT_DIGITS,
    }
  }
}

impl Markup for PlainText {
  fn write_number(&self, out: &mut String, text: &str) {
    out.push_str(text);
  }

  fn write_var(&self, out: &mut String, name: &str) {
    out.push_str(name);
  }

  fn write_operator(&self, out: &mut String, name: &str) {
    out.push_str(name);
  }

  fn write_undefined(&self, out: &mut String) {
    out.push_str(Atom::UNDEFINED_NAME);
  }
}

/// Serializes `expr` to plain text.
pub fn serialize(expr: &Expr, settings: &SerializationSettings) -> String {
  let mut out = String::new();
  write_expr(&PlainText, &mut out, expr, settings, MIN_PRECEDENCE);
  out
}

/// Writes `name(args...)`, whatever `name` is.
pub fn write_prefix<M: Markup + ?Sized>(
  markup: &M,
  out: &mut String,
  name: &str,
  args: &[Expr],
  settings: &SerializationSettings,
) {
  markup.write_operator(out, name);
  out.push('(');
  let mut first = true;
  for arg in args {
    if !first {
      out.push_str(", ");
    }
    first = false;
    write_expr(markup, out, arg, settings, MIN_PRECEDENCE);
  }
  out.push(')');
}

/// Writes `expr`, parenthesizing it if it binds more loosely than
/// `precedence`.
pub fn write_expr<M: Markup + ?Sized>(
  markup: &M,
  out: &mut String,
  expr: &Expr,
  settings: &SerializationSettings,
  precedence: u8,
) {
  match expr {
    Expr::Atom(Atom::Number(n)) => {
      let text = format_number(*n, settings);
      let needs_parens = text.starts_with('-') && precedence > MIN_PRECEDENCE;
      write_parenthesized_if(out, needs_parens, |out| markup.write_number(out, &text));
    }
    Expr::Atom(Atom::Var(v)) => {
      markup.write_var(out, v.as_str());
    }
    Expr::Atom(Atom::Undefined) => {
      markup.write_undefined(out);
    }
    Expr::Call(name, args) => {
      match (INFIX_OPERATORS.get(name.as_str()), args.as_slice()) {
        (Some(&op_precedence), [left, right]) => {
          write_parenthesized_if(out, precedence > op_precedence, |out| {
            // `^` groups to the right and the others to the left.
            let (left_precedence, right_precedence) = if name == "^" {
              (op_precedence + 1, op_precedence)
            } else {
              (op_precedence, op_precedence + 1)
            };
            write_expr(markup, out, left, settings, left_precedence);
            write_infix_operator(markup, out, name);
            write_expr(markup, out, right, settings, right_precedence);
          });
        }
        (Some(&op_precedence), args) if args.len() > 2 && (name == "+" || name == "*") => {
          write_parenthesized_if(out, precedence > op_precedence, |out| {
            for (position, arg) in args.iter().with_position() {
              if !matches!(position, Position::First | Position::Only) {
                write_infix_operator(markup, out, name);
              }
              write_expr(markup, out, arg, settings, op_precedence + 1);
            }
          });
        }
        _ => {
          write_prefix(markup, out, name, args, settings);
        }
      }
    }
  }
}

fn write_infix_operator<M: Markup + ?Sized>(markup: &M, out: &mut String, name: &str) {
  if name == "^" {
    markup.write_operator(out, name);
  } else {
    out.push(' ');
    markup.write_operator(out, name);
    out.push(' ');
  }
}

fn write_parenthesized_if<F>(out: &mut String, parenthesize: bool, body: F)
where F: FnOnce(&mut String) {
  if parenthesize {
    out.push('(');
    body(out);
    out.push(')');
  } else {
    body(out);
  }
}
