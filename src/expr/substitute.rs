//! Replacing a variable throughout an expression graph.

use super::{Expr, ExprKind};
use super::walker;

use log::debug;

/// Replaces every `Symbol` terminal named `name` in `expr` with
/// `replacement`.
///
/// Subgraphs that do not mention `name` are returned as-is (the same
/// nodes, not copies), and a node shared by several parents in the
/// input is rebuilt once and shared by the same parents in the output.
/// If `name` does not occur at all, the result is `expr` itself.
pub fn substitute(expr: &Expr, name: &str, replacement: &Expr) -> Expr {
  debug!("substituting '{}' in {} node {:?}", name, expr.kind_name(), expr.id());
  walker::evaluate_ok(expr, name, |node, operands: &[&Expr], name: &str| {
    match node.kind() {
      ExprKind::Symbol(s) if s.as_str() == name => replacement.clone(),
      ExprKind::Number(_) | ExprKind::Symbol(_) => node.clone(),
      ExprKind::Operator(op, original) => {
        let unchanged = original.iter().zip(operands).all(|(a, b)| a.ptr_eq(b));
        if unchanged {
          node.clone()
        } else {
          Expr::operator(*op, operands[0], operands[1])
        }
      }
    }
  })
}

impl Expr {
  /// See [`substitute`].
  pub fn substitute(&self, name: &str, replacement: &Expr) -> Expr {
    substitute(self, name, replacement)
  }
}
