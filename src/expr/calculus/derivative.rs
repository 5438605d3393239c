use crate::expr::{Expr, ExprKind, Operator};
use crate::expr::number::Number;
use crate::expr::walker;

use log::{debug, warn};
use num::One;
use thiserror::Error;

/// Differentiates expressions with respect to one named variable.
///
/// The engine runs a single bottom-up pass over the graph (see
/// [`walker::evaluate`]), so a subexpression shared by several parents
/// is differentiated once and its derivative is shared in the result.
/// No simplification is performed: `d(x + 3)` is `1 + 0`.
#[derive(Debug, Clone)]
pub struct DerivativeEngine {
  target_variable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DifferentiationError {
  /// Only the constant-exponent power rule is implemented.
  #[error("Unsupported operation: cannot differentiate {kind} with an exponent depending on '{variable}'")]
  VariableExponent { kind: &'static str, variable: String },
}

/// Result computed at each node: its derivative, and whether the node
/// mentions the target variable at all.
#[derive(Debug, Clone)]
struct Differential {
  derivative: Expr,
  depends_on_target: bool,
}

impl DerivativeEngine {
  pub fn new(target_variable: impl Into<String>) -> Self {
    Self { target_variable: target_variable.into() }
  }

  pub fn target_variable(&self) -> &str {
    &self.target_variable
  }

  pub fn differentiate(&self, expr: &Expr) -> Result<Expr, DifferentiationError> {
    debug!("differentiating {} node {:?} with respect to '{}'", expr.kind_name(), expr.id(), self.target_variable);
    let root = walker::evaluate(expr, self.target_variable.as_str(), derivative_rule)?;
    Ok(root.derivative)
  }

  /// Differentiates `n` times. The zeroth derivative is `expr` itself.
  pub fn nth_derivative(&self, expr: &Expr, n: usize) -> Result<Expr, DifferentiationError> {
    let mut result = expr.clone();
    for _ in 0..n {
      result = self.differentiate(&result)?;
    }
    Ok(result)
  }
}

impl Differential {
  fn constant() -> Self {
    Differential { derivative: Expr::zero(), depends_on_target: false }
  }
}

fn derivative_rule(
  node: &Expr,
  operands: &[&Differential],
  target: &str,
) -> Result<Differential, DifferentiationError> {
  match node.kind() {
    ExprKind::Number(_) => Ok(Differential::constant()),
    ExprKind::Symbol(s) => {
      if s.as_str() == target {
        Ok(Differential { derivative: Expr::one(), depends_on_target: true })
      } else {
        Ok(Differential::constant())
      }
    }
    ExprKind::Operator(op, [a, b]) => {
      let (da, db) = (operands[0], operands[1]);
      let derivative = match op {
        Operator::Add => Expr::sum(&da.derivative, &db.derivative),
        Operator::Sub => Expr::difference(&da.derivative, &db.derivative),
        Operator::Mul => Expr::sum(
          Expr::product(&da.derivative, b),
          Expr::product(&db.derivative, a),
        ),
        Operator::Div => Expr::quotient(
          Expr::difference(Expr::product(b, &da.derivative), Expr::product(a, &db.derivative)),
          Expr::power(b, 2),
        ),
        Operator::Pow => {
          if db.depends_on_target {
            warn!("exponent of Pow node {:?} depends on '{}'", node.id(), target);
            return Err(DifferentiationError::VariableExponent {
              kind: op.name(),
              variable: target.to_owned(),
            });
          }
          Expr::product(Expr::product(&da.derivative, b), Expr::power(a, decremented(b)))
        }
      };
      Ok(Differential {
        derivative,
        depends_on_target: da.depends_on_target || db.depends_on_target,
      })
    }
  }
}

/// `n - 1` for the power rule, folded when `n` is a literal.
fn decremented(exponent: &Expr) -> Expr {
  match exponent.as_number() {
    Some(n) => Expr::number(n - &Number::one()),
    None => Expr::difference(exponent, 1),
  }
}

/// Derivative of `expr` with respect to the variable named `var`.
pub fn differentiate(expr: &Expr, var: &str) -> Result<Expr, DifferentiationError> {
  DerivativeEngine::new(var).differentiate(expr)
}
