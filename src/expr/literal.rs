//! Terminal construction from dynamically typed values.
//!
//! Values arriving from outside the type system (configuration,
//! bindings, foreign callers) are `serde_json::Value`s. A `Number`
//! terminal accepts only JSON numbers and a `Symbol` terminal only
//! JSON strings; anything else is a [`TypeMismatchError`].

use super::Expr;
use super::number::Number;
use super::symbol::Symbol;
use crate::error::Error;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Type mismatch: expected {expected}, got {actual}")]
pub struct TypeMismatchError {
  expected: &'static str,
  actual: &'static str,
}

impl TypeMismatchError {
  pub fn new(expected: &'static str, actual: &'static str) -> Self {
    Self { expected, actual }
  }

  pub fn expected(&self) -> &'static str {
    self.expected
  }

  pub fn actual(&self) -> &'static str {
    self.actual
  }
}

/// Human-readable name of a JSON value's type.
pub fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

impl Expr {
  /// Builds a `Number` terminal, failing with
  /// [`Error::TypeMismatch`] unless `value` is a JSON number.
  pub fn try_number(value: &Value) -> Result<Expr, Error> {
    Ok(Expr::number(Number::try_from(value)?))
  }

  /// Builds a `Symbol` terminal, failing with [`Error::TypeMismatch`]
  /// unless `value` is a JSON string, or [`Error::InvalidSymbol`] if
  /// the string is not a valid name.
  pub fn try_symbol(value: &Value) -> Result<Expr, Error> {
    Ok(Expr::symbol(Symbol::try_from(value)?))
  }

  /// Builds whichever terminal fits the value: a JSON number becomes
  /// a `Number`, a JSON string a `Symbol`.
  pub fn try_terminal(value: &Value) -> Result<Expr, Error> {
    match value {
      Value::Number(_) => Expr::try_number(value),
      Value::String(_) => Expr::try_symbol(value),
      other => Err(TypeMismatchError::new("number or string", value_kind(other)).into()),
    }
  }
}

impl TryFrom<&Value> for Expr {
  type Error = Error;

  fn try_from(value: &Value) -> Result<Expr, Error> {
    Expr::try_terminal(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  use serde_json::json;

  #[test]
  fn test_number_from_non_numeric_value() {
    let err = Expr::try_number(&json!("not-a-number")).unwrap_err();
    assert_eq!(err, Error::TypeMismatch(TypeMismatchError::new("number", "string")));
    assert_eq!(err.to_string(), "Type mismatch: expected number, got string");
    assert!(Expr::try_number(&json!(true)).is_err());
    assert!(Expr::try_number(&json!([1, 2])).is_err());
  }

  #[test]
  fn test_number_from_numeric_value() {
    let e = Expr::try_number(&json!(5)).unwrap();
    assert_strict_eq!(e.as_number().cloned(), Some(Number::from(5)));
    let e = Expr::try_number(&json!(0.5)).unwrap();
    assert_strict_eq!(e.as_number().cloned(), Some(Number::from(0.5)));
  }

  #[test]
  fn test_symbol_from_values() {
    let e = Expr::try_symbol(&json!("x")).unwrap();
    assert_eq!(e.as_symbol().map(Symbol::as_str), Some("x"));
    assert_eq!(
      Expr::try_symbol(&json!(1)).unwrap_err(),
      Error::TypeMismatch(TypeMismatchError::new("string", "number")),
    );
    assert!(matches!(Expr::try_symbol(&json!("x y")), Err(Error::InvalidSymbol(_))));
  }

  #[test]
  fn test_try_terminal_dispatches_on_value_type() {
    assert_eq!(Expr::try_from(&json!(2)).unwrap().kind_name(), "Number");
    assert_eq!(Expr::try_from(&json!("t")).unwrap().kind_name(), "Symbol");
    assert_eq!(
      Expr::try_from(&json!(null)).unwrap_err(),
      Error::TypeMismatch(TypeMismatchError::new("number or string", "null")),
    );
  }

  #[test]
  fn test_value_kind_names() {
    assert_eq!(value_kind(&json!({})), "object");
    assert_eq!(value_kind(&json!([])), "array");
    assert_eq!(value_kind(&json!(false)), "boolean");
  }
}
