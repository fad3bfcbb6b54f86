
//! HTML layout of expressions.

use super::{Markup, SerializationSettings, write_expr};
use crate::expr::Expr;
use crate::expr::atom::Atom;

use html_escape::encode_safe;

/// HTML markup. Variables, operator names and the undefined token
/// each get a span with a dedicated class.
#[derive(Clone, Copy, Debug, Default)]
pub struct Html;

impl Markup for Html {
  fn write_number(&self, out: &mut String, text: &str) {
    out.push_str(&encode_safe(text));
  }

  fn write_var(&self, out: &mut String, name: &str) {
    write_span(out, "var", name);
  }

  fn write_operator(&self, out: &mut String, name: &str) {
    write_span(out, "operator", name);
  }

  fn write_undefined(&self, out: &mut String) {
    write_span(out, "undefined", Atom::UNDEFINED_NAME);
  }
}

fn write_span(out: &mut String, class: &str, text: &str) {
  out.push_str("<span class=\"");
  out.push_str(class);
  out.push_str("\">");
  out.push_str(&encode_safe(text));
  out.push_str("</span>");
}

/// Lays `expr` out as HTML.
pub fn layout(expr: &Expr, settings: &SerializationSettings) -> String {
  let mut out = String::new();
  write_expr(&Html, &mut out, expr, settings, 0);
  out
}
