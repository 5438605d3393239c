use crate::expr::calculus::DifferentiationError;
use crate::expr::literal::TypeMismatchError;
use crate::expr::numeric::NumericError;
use crate::expr::symbol::InvalidSymbolError;

use thiserror::Error;

/// Every failure the crate reports. Each variant wraps the error type
/// of the module that raises it, and converts from it with `?`.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  TypeMismatch(#[from] TypeMismatchError),
  #[error("{0}")]
  InvalidSymbol(#[from] InvalidSymbolError),
  #[error("{0}")]
  UnsupportedOperation(#[from] DifferentiationError),
  #[error("{0}")]
  Numeric(#[from] NumericError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
