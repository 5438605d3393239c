use crate::error::Error;
use crate::expr::literal::{TypeMismatchError, value_kind};

use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use std::fmt::{self, Display, Formatter};

/// The name of a free variable.
///
/// A name begins with a letter or underscore, followed by zero or more
/// letters, digits, underscores, or apostrophes (so `x'` and `x_1`
/// are valid).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid symbol name '{original_string}'")]
pub struct InvalidSymbolError {
  original_string: String,
}

static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_']*$").expect("symbol name regex is valid")
});

impl Symbol {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl InvalidSymbolError {
  pub fn original_string(&self) -> &str {
    &self.original_string
  }
}

impl TryFrom<String> for Symbol {
  type Error = InvalidSymbolError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(InvalidSymbolError { original_string: name })
    }
  }
}

impl TryFrom<&str> for Symbol {
  type Error = InvalidSymbolError;

  fn try_from(name: &str) -> Result<Self, Self::Error> {
    Self::try_from(name.to_owned())
  }
}

/// Only JSON strings are candidate names; any other value is a type
/// mismatch, while a string that breaks the naming rules is an
/// invalid symbol.
impl TryFrom<&Value> for Symbol {
  type Error = Error;

  fn try_from(value: &Value) -> Result<Self, Self::Error> {
    match value {
      Value::String(s) => Ok(Symbol::try_from(s.as_str())?),
      other => Err(TypeMismatchError::new("string", value_kind(other)).into()),
    }
  }
}

impl From<Symbol> for String {
  fn from(s: Symbol) -> Self {
    s.0
  }
}

impl AsRef<str> for Symbol {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl PartialEq<str> for Symbol {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}
