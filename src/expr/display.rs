//! Infix and debug rendering of expression graphs.
//!
//! Both renderers walk the graph with an explicit stack and write into
//! a single buffer. A shared subexpression is rendered once per path
//! that reaches it, so the output of a heavily shared DAG can be much
//! larger than the graph itself.

use super::{Expr, ExprKind, Operator};
use super::precedence::Precedence;

use std::fmt::{self, Debug, Display, Formatter, Write};

/// How the `Pow` operator is spelled in infix output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PowerNotation {
  /// `x ^ 2`
  #[default]
  Caret,
  /// `x ** 2`
  DoubleStar,
}

/// Infix renderer.
///
/// The default renderer is the one used by `Display for Expr`: binary
/// operators are surrounded by single spaces, power is written `^`, and
/// an operand is parenthesized exactly when its parent's precedence is
/// strictly greater than its own.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
  power_notation: PowerNotation,
  compact: bool,
}

enum InfixTask<'a> {
  Visit(&'a Expr, Precedence),
  Token(Operator),
  Close,
}

enum DebugTask<'a> {
  Visit(&'a Expr),
  Text(&'static str),
}

impl Renderer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_power_notation(mut self, power_notation: PowerNotation) -> Self {
    self.power_notation = power_notation;
    self
  }

  /// If true, operators are written without surrounding spaces
  /// (`x+1`). Default is false.
  pub fn with_compact(mut self, compact: bool) -> Self {
    self.compact = compact;
    self
  }

  pub fn power_notation(&self) -> PowerNotation {
    self.power_notation
  }

  pub fn is_compact(&self) -> bool {
    self.compact
  }

  fn token(&self, op: Operator) -> &'static str {
    match (op, self.power_notation) {
      (Operator::Pow, PowerNotation::DoubleStar) => "**",
      (op, _) => op.token(),
    }
  }

  pub fn render(&self, expr: &Expr) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = self.write_to(&mut out, expr);
    out
  }

  pub fn write_to(&self, out: &mut impl Write, expr: &Expr) -> fmt::Result {
    let mut tasks = vec![InfixTask::Visit(expr, Precedence::MIN)];
    while let Some(task) = tasks.pop() {
      match task {
        InfixTask::Token(op) => {
          if self.compact {
            out.write_str(self.token(op))?;
          } else {
            write!(out, " {} ", self.token(op))?;
          }
        }
        InfixTask::Close => out.write_char(')')?,
        InfixTask::Visit(e, parent) => match e.kind() {
          ExprKind::Number(n) => write!(out, "{n}")?,
          ExprKind::Symbol(s) => out.write_str(s.as_str())?,
          ExprKind::Operator(op, [left, right]) => {
            let prec = op.precedence();
            if prec.needs_parens_under(parent) {
              out.write_char('(')?;
              tasks.push(InfixTask::Close);
            }
            tasks.push(InfixTask::Visit(right, prec));
            tasks.push(InfixTask::Token(*op));
            tasks.push(InfixTask::Visit(left, prec));
          }
        },
      }
    }
    Ok(())
  }
}

impl Expr {
  /// Constructor-style rendering that shows the graph's shape with no
  /// precedence rules applied, e.g. `Add(Symbol("x"), Number(3))`.
  pub fn to_debug_string(&self) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_debug(&mut out, self);
    out
  }
}

fn write_debug(out: &mut impl Write, expr: &Expr) -> fmt::Result {
  let mut tasks = vec![DebugTask::Visit(expr)];
  while let Some(task) = tasks.pop() {
    match task {
      DebugTask::Text(s) => out.write_str(s)?,
      DebugTask::Visit(e) => match e.kind() {
        ExprKind::Number(n) => write!(out, "Number({n})")?,
        ExprKind::Symbol(s) => write!(out, "Symbol({:?})", s.as_str())?,
        ExprKind::Operator(op, [left, right]) => {
          write!(out, "{}(", op.name())?;
          tasks.push(DebugTask::Text(")"));
          tasks.push(DebugTask::Visit(right));
          tasks.push(DebugTask::Text(", "));
          tasks.push(DebugTask::Visit(left));
        }
      },
    }
  }
  Ok(())
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Renderer::default().write_to(f, self)
  }
}

impl Debug for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write_debug(f, self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::number::Number;

  fn var(name: &str) -> Expr {
    Expr::var(name).unwrap()
  }

  #[test]
  fn test_terminals() {
    assert_eq!(Expr::number(3).to_string(), "3");
    assert_eq!(Expr::number(2.5).to_string(), "2.5");
    assert_eq!(Expr::number(Number::ratio(1, 3).unwrap()).to_string(), "1:3");
    assert_eq!(var("x").to_string(), "x");
  }

  #[test]
  fn test_tighter_operand_is_bare() {
    let e = Expr::sum(Expr::product(var("a"), var("b")), var("c"));
    assert_eq!(e.to_string(), "a * b + c");
  }

  #[test]
  fn test_looser_operand_is_parenthesized() {
    let e = Expr::product(Expr::sum(var("a"), var("b")), var("c"));
    assert_eq!(e.to_string(), "(a + b) * c");
    let e = Expr::power(Expr::product(var("a"), 2), Expr::sum(var("n"), 1));
    assert_eq!(e.to_string(), "(a * 2) ^ (n + 1)");
  }

  #[test]
  fn test_equal_precedence_is_not_parenthesized() {
    // Only a strictly greater parent precedence adds parentheses, on
    // either side.
    let e = Expr::difference(var("a"), Expr::sum(var("b"), var("c")));
    assert_eq!(e.to_string(), "a - b + c");
    let e = Expr::quotient(Expr::product(var("a"), var("b")), var("c"));
    assert_eq!(e.to_string(), "a * b / c");
    let e = Expr::power(var("a"), Expr::power(var("b"), var("c")));
    assert_eq!(e.to_string(), "a ^ b ^ c");
  }

  #[test]
  fn test_nested_parentheses() {
    let x = var("x");
    let e = Expr::quotient(Expr::difference(Expr::product(&x, 0), 1), Expr::power(&x, 2));
    assert_eq!(e.to_string(), "(x * 0 - 1) / x ^ 2");
  }

  #[test]
  fn test_renderer_options() {
    let e = Expr::sum(Expr::power(var("x"), 2), 1);
    assert_eq!(Renderer::new().render(&e), "x ^ 2 + 1");
    let starred = Renderer::new().with_power_notation(PowerNotation::DoubleStar);
    assert_eq!(starred.render(&e), "x ** 2 + 1");
    let compact = starred.with_compact(true);
    assert_eq!(compact.render(&e), "x**2+1");
    assert!(compact.is_compact());
    assert_eq!(compact.power_notation(), PowerNotation::DoubleStar);
  }

  #[test]
  fn test_shared_subexpression_rendered_at_each_use() {
    let s = Expr::sum(var("x"), 1);
    let e = Expr::product(&s, &s);
    assert_eq!(e.to_string(), "(x + 1) * (x + 1)");
  }

  #[test]
  fn test_debug_string() {
    let e = Expr::sum(var("x"), 3);
    assert_eq!(e.to_debug_string(), r#"Add(Symbol("x"), Number(3))"#);
    assert_eq!(format!("{e:?}"), e.to_debug_string());
    let e = Expr::difference(var("a"), Expr::sum(var("b"), var("c")));
    assert_eq!(e.to_debug_string(), r#"Sub(Symbol("a"), Add(Symbol("b"), Symbol("c")))"#);
  }

  #[test]
  fn test_deep_chain_renders_without_overflow() {
    let mut e = var("x");
    for _ in 0..100_000 {
      e = Expr::sum(e, 1);
    }
    let rendered = e.to_string();
    assert!(rendered.starts_with("x + 1 + 1"));
    assert_eq!(rendered.len(), 1 + 4 * 100_000);
    let debug = e.to_debug_string();
    assert!(debug.starts_with("Add(Add(Add("));
    assert!(debug.ends_with("Number(1))"));
  }
}
