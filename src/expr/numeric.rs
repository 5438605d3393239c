//! Numeric evaluation of an expression under variable bindings.

use super::{Expr, ExprKind, Operator};
use super::number::Number;
use super::walker;

use log::debug;
use thiserror::Error;

use std::collections::HashMap;

/// Values for the symbols of an expression, by name.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
  values: HashMap<String, Number>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NumericError {
  #[error("No value bound for variable '{0}'")]
  UnboundVariable(String),
  #[error("Division by zero")]
  DivisionByZero,
}

impl Bindings {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style [`Bindings::insert`].
  pub fn with(mut self, name: impl Into<String>, value: impl Into<Number>) -> Self {
    self.insert(name, value);
    self
  }

  /// Binds `name`, returning the value it previously had, if any.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Number>) -> Option<Number> {
    self.values.insert(name.into(), value.into())
  }

  pub fn get(&self, name: &str) -> Option<&Number> {
    self.values.get(name)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl<S: Into<String>, N: Into<Number>> FromIterator<(S, N)> for Bindings {
  fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
    let mut bindings = Bindings::new();
    for (name, value) in iter {
      bindings.insert(name, value);
    }
    bindings
  }
}

/// Evaluates `expr` to a number, looking every symbol up in
/// `bindings`.
///
/// Arithmetic stays exact as long as the inputs are exact (see
/// [`Number`]). Division by an exact or floating zero, and zero raised
/// to a negative integer power, are reported as
/// [`NumericError::DivisionByZero`].
pub fn evaluate_numeric(expr: &Expr, bindings: &Bindings) -> Result<Number, NumericError> {
  debug!("numerically evaluating {} node {:?} with {} bindings", expr.kind_name(), expr.id(), bindings.len());
  walker::evaluate(expr, bindings, numeric_rule)
}

fn numeric_rule(node: &Expr, operands: &[&Number], bindings: &Bindings) -> Result<Number, NumericError> {
  match node.kind() {
    ExprKind::Number(n) => Ok(n.clone()),
    ExprKind::Symbol(s) => {
      bindings.get(s.as_str())
        .cloned()
        .ok_or_else(|| NumericError::UnboundVariable(s.as_str().to_owned()))
    }
    ExprKind::Operator(op, _) => {
      let (a, b) = (operands[0], operands[1]);
      match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div => a.checked_div(b).ok_or(NumericError::DivisionByZero),
        Operator::Pow => a.pow(b).ok_or(NumericError::DivisionByZero),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  use approx::assert_abs_diff_eq;

  fn var(name: &str) -> Expr {
    Expr::var(name).unwrap()
  }

  #[test]
  fn test_constant_expression() {
    let e = Expr::sum(Expr::product(2, 3), 4);
    assert_strict_eq!(evaluate_numeric(&e, &Bindings::new()).unwrap(), Number::from(10));
  }

  #[test]
  fn test_bound_variables() {
    let x = var("x");
    let y = var("y");
    let e = Expr::difference(Expr::power(&x, 2), &y);
    let bindings = Bindings::new().with("x", 3).with("y", 1);
    assert_strict_eq!(evaluate_numeric(&e, &bindings).unwrap(), Number::from(8));
  }

  #[test]
  fn test_division_stays_exact() {
    let e = Expr::quotient(1, var("x"));
    let bindings = Bindings::new().with("x", 3);
    assert_strict_eq!(evaluate_numeric(&e, &bindings).unwrap(), Number::ratio(1, 3).unwrap());
  }

  #[test]
  fn test_float_contaminates() {
    let e = Expr::product(var("x"), 0.5);
    let bindings: Bindings = [("x", 3)].into_iter().collect();
    let value = evaluate_numeric(&e, &bindings).unwrap();
    assert_abs_diff_eq!(value.to_f64(), 1.5);
  }

  #[test]
  fn test_fractional_power_uses_floats() {
    let e = Expr::power(var("x"), 0.5);
    let bindings = Bindings::new().with("x", 2);
    let value = evaluate_numeric(&e, &bindings).unwrap();
    assert_abs_diff_eq!(value.to_f64(), std::f64::consts::SQRT_2, epsilon = 1e-12);
  }

  #[test]
  fn test_negative_integer_power_is_exact() {
    let e = Expr::power(2, -2);
    assert_strict_eq!(evaluate_numeric(&e, &Bindings::new()).unwrap(), Number::ratio(1, 4).unwrap());
  }

  #[test]
  fn test_huge_integer_power_falls_back_to_float() {
    let e = Expr::power(2, Expr::number(1i64 << 40));
    let value = evaluate_numeric(&e, &Bindings::new()).unwrap();
    assert_eq!(value.to_f64(), f64::INFINITY);
  }

  #[test]
  fn test_unbound_variable() {
    let e = Expr::sum(var("x"), var("y"));
    let bindings = Bindings::new().with("x", 1);
    let err = evaluate_numeric(&e, &bindings).unwrap_err();
    assert_eq!(err, NumericError::UnboundVariable(String::from("y")));
    assert_eq!(err.to_string(), "No value bound for variable 'y'");
  }

  #[test]
  fn test_division_by_zero() {
    let bindings = Bindings::new().with("x", 0);
    let e = Expr::quotient(1, var("x"));
    assert_eq!(evaluate_numeric(&e, &bindings), Err(NumericError::DivisionByZero));
    let e = Expr::quotient(1, 0.0);
    assert_eq!(evaluate_numeric(&e, &bindings), Err(NumericError::DivisionByZero));
    let e = Expr::power(var("x"), -1);
    assert_eq!(evaluate_numeric(&e, &bindings), Err(NumericError::DivisionByZero));
  }

  #[test]
  fn test_derivative_evaluates_to_slope() {
    let x = var("x");
    let e = Expr::sum(Expr::power(&x, 3), Expr::product(2, &x));
    let d = crate::expr::calculus::differentiate(&e, "x").unwrap();
    let bindings = Bindings::new().with("x", 2);
    // 3x^2 + 2 at x = 2
    assert_strict_eq!(evaluate_numeric(&d, &bindings).unwrap(), Number::from(14));
  }

  #[test]
  fn test_rebinding() {
    let mut bindings = Bindings::new();
    assert!(bindings.is_empty());
    assert_eq!(bindings.insert("x", 1), None);
    assert_eq!(bindings.insert("x", 2), Some(Number::from(1)));
    assert_eq!(bindings.get("x"), Some(&Number::from(2)));
    assert_eq!(bindings.len(), 1);
  }
}
