mod promote;
mod repr;

pub use repr::NumberRepr;

use promote::Promoted;
use crate::expr::literal::{TypeMismatchError, value_kind};
use crate::util::stricteq::StrictEq;

use num::{BigInt, BigRational, Zero, One, ToPrimitive, Signed};
use thiserror::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::ops;
use std::cmp::Ordering;

/// The value stored in a `Number` terminal.
///
/// Numbers stay exact for as long as they can: integers are
/// arbitrary-precision, quotients of integers become rationals, and
/// only operations that cannot be done exactly (or an explicit float
/// input) produce IEEE 754 values.
#[derive(Debug, Clone)]
pub struct Number {
  inner: NumberImpl,
}

#[derive(Debug, Clone)]
enum NumberImpl {
  Integer(BigInt),
  Ratio(BigRational),
  Float(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse number")]
#[non_exhaustive]
pub struct ParseNumberError {}

impl Number {
  pub fn repr(&self) -> NumberRepr {
    match &self.inner {
      NumberImpl::Integer(_) => NumberRepr::Integer,
      NumberImpl::Ratio(_) => NumberRepr::Ratio,
      NumberImpl::Float(_) => NumberRepr::Float,
    }
  }

  /// Exact quotient `numer / denom`, or `None` if `denom` is zero.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Number> {
    let denom = denom.into();
    if denom.is_zero() {
      return None;
    }
    Some(Number::from(BigRational::new(numer.into(), denom)))
  }

  /// Rationals with a denominator of one are stored as integers.
  fn normalized(self) -> Number {
    match self.inner {
      NumberImpl::Ratio(r) if r.is_integer() => Number::from(r.to_integer()),
      inner => Number { inner },
    }
  }

  pub fn is_integer(&self) -> bool {
    matches!(self.inner, NumberImpl::Integer(_))
  }

  pub fn to_f64(&self) -> f64 {
    promote::to_float(self.inner.clone())
  }

  pub fn recip(&self) -> Number {
    &Number::one() / self
  }

  /// Division which refuses a zero divisor, in any representation.
  pub fn checked_div(&self, other: &Number) -> Option<Number> {
    if other.is_zero() {
      None
    } else {
      Some(self / other)
    }
  }

  /// Raises `self` to the power `exp`.
  ///
  /// Integer exponents are applied exactly to exact bases, as long as
  /// the result fits in [`MAX_EXACT_POW_BITS`]. Any other power goes
  /// through `f64::powf`, which may produce NaN for negative bases or
  /// overflow to infinity. Returns `None` only for zero raised to a
  /// negative power.
  pub fn pow(&self, exp: &Number) -> Option<Number> {
    let NumberImpl::Integer(e) = &exp.inner else {
      return Some(Number::from(self.to_f64().powf(exp.to_f64())));
    };
    if e.is_negative() {
      if self.is_zero() {
        return None;
      }
      return self.recip().pow(&Number::from(-e.clone()));
    }
    let Some(e) = e.to_usize() else {
      return Some(Number::from(self.to_f64().powf(exp.to_f64())));
    };
    let result = match &self.inner {
      NumberImpl::Integer(i) if fits_exact_pow(i.bits(), e) => {
        Number::from(num::pow(i.clone(), e))
      }
      NumberImpl::Ratio(r) if fits_exact_pow(r.numer().bits().max(r.denom().bits()), e) => {
        Number::from(num::pow(r.clone(), e))
      }
      _ => Number::from(self.to_f64().powf(e as f64)),
    };
    Some(result)
  }
}

/// Upper bound on the size, in bits, of an exactly computed power.
/// Larger powers are computed in floating point.
pub const MAX_EXACT_POW_BITS: u64 = 1 << 20;

/// Whether `base ^ exp` stays within [`MAX_EXACT_POW_BITS`], for a base
/// of `base_bits` bits. Bases of magnitude at most one never grow.
fn fits_exact_pow(base_bits: u64, exp: usize) -> bool {
  base_bits <= 1 || base_bits.saturating_mul(exp as u64) <= MAX_EXACT_POW_BITS
}

impl From<i32> for Number {
  fn from(i: i32) -> Number {
    Number::from(i64::from(i))
  }
}

impl From<i64> for Number {
  fn from(i: i64) -> Number {
    Number { inner: NumberImpl::Integer(i.into()) }
  }
}

impl From<BigInt> for Number {
  fn from(i: BigInt) -> Number {
    Number { inner: NumberImpl::Integer(i) }
  }
}

impl From<BigRational> for Number {
  fn from(r: BigRational) -> Number {
    Number { inner: NumberImpl::Ratio(r) }.normalized()
  }
}

impl From<f64> for Number {
  fn from(f: f64) -> Number {
    Number { inner: NumberImpl::Float(f) }
  }
}

/// Accepts JSON numbers only. Integers that fit in 64 bits stay
/// exact; everything else becomes a float.
impl TryFrom<&Value> for Number {
  type Error = TypeMismatchError;

  fn try_from(value: &Value) -> Result<Number, TypeMismatchError> {
    let Value::Number(n) = value else {
      return Err(TypeMismatchError::new("number", value_kind(value)));
    };
    if let Some(i) = n.as_i64() {
      Ok(Number::from(i))
    } else if let Some(u) = n.as_u64() {
      Ok(Number::from(BigInt::from(u)))
    } else {
      // serde_json numbers are always representable as f64 unless the
      // arbitrary_precision feature is on, which we do not enable.
      n.as_f64().map(Number::from).ok_or_else(|| TypeMismatchError::new("number", "unrepresentable number"))
    }
  }
}

impl TryFrom<Value> for Number {
  type Error = TypeMismatchError;

  fn try_from(value: Value) -> Result<Number, TypeMismatchError> {
    Number::try_from(&value)
  }
}

impl Default for Number {
  fn default() -> Number {
    Number::zero()
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.inner {
      NumberImpl::Integer(i) => write!(f, "{i}"),
      NumberImpl::Ratio(r) => write!(f, "{}:{}", r.numer(), r.denom()),
      NumberImpl::Float(d) => {
        // Keep integral floats visibly distinct from integers.
        if d.fract() != 0.0 || !d.is_finite() {
          write!(f, "{}", d)
        } else if d.abs() < 1e16 {
          write!(f, "{:.1}", d)
        } else {
          write!(f, "{:e}", d)
        }
      }
    }
  }
}

/// Compares numerical value, ignoring representation. See
/// [`StrictEq`] for the representation-aware comparison.
impl PartialEq for Number {
  fn eq(&self, other: &Number) -> bool {
    self.partial_cmp(other) == Some(Ordering::Equal)
  }
}

impl StrictEq for Number {
  fn strict_eq(&self, other: &Number) -> bool {
    self.repr() == other.repr() && self == other
  }
}

impl PartialOrd for Number {
  fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
    match Promoted::new(self.clone(), other.clone()) {
      Promoted::Integers(a, b) => a.partial_cmp(&b),
      Promoted::Ratios(a, b) => a.partial_cmp(&b),
      Promoted::Floats(a, b) => a.partial_cmp(&b),
    }
  }
}

macro_rules! impl_number_op {
  ($trait:ident, $method:ident, $op:tt) => {
    impl ops::$trait for Number {
      type Output = Number;

      fn $method(self, other: Number) -> Number {
        match Promoted::new(self, other) {
          Promoted::Integers(a, b) => Number::from(a $op b),
          Promoted::Ratios(a, b) => Number::from(a $op b),
          Promoted::Floats(a, b) => Number::from(a $op b),
        }
      }
    }

    impl ops::$trait for &Number {
      type Output = Number;

      fn $method(self, other: &Number) -> Number {
        ops::$trait::$method(self.clone(), other.clone())
      }
    }
  };
}

impl_number_op!(Add, add, +);
impl_number_op!(Sub, sub, -);
impl_number_op!(Mul, mul, *);

/// Exact inputs give an exact quotient, so `1 / 2` is the rational
/// `1:2`. An exact zero divisor falls back to float division (and
/// hence infinity or NaN); use [`Number::checked_div`] to reject it.
impl ops::Div for Number {
  type Output = Number;

  fn div(self, other: Number) -> Number {
    match Promoted::new(self, other) {
      Promoted::Integers(a, b) => {
        if b.is_zero() {
          Number::from(a.to_f64().unwrap_or(f64::NAN) / 0.0)
        } else {
          Number::from(BigRational::new(a, b))
        }
      }
      Promoted::Ratios(a, b) => {
        if b.is_zero() {
          Number::from(a.to_f64().unwrap_or(f64::NAN) / 0.0)
        } else {
          Number::from(a / b)
        }
      }
      Promoted::Floats(a, b) => Number::from(a / b),
    }
  }
}

impl ops::Div for &Number {
  type Output = Number;

  fn div(self, other: &Number) -> Number {
    self.clone() / other.clone()
  }
}

impl ops::Neg for Number {
  type Output = Number;

  fn neg(self) -> Number {
    match self.inner {
      NumberImpl::Integer(i) => Number::from(-i),
      NumberImpl::Ratio(r) => Number::from(-r),
      NumberImpl::Float(f) => Number::from(-f),
    }
  }
}

impl Zero for Number {
  fn zero() -> Number {
    Number::from(0i64)
  }

  fn is_zero(&self) -> bool {
    match &self.inner {
      NumberImpl::Integer(i) => i.is_zero(),
      NumberImpl::Ratio(r) => r.is_zero(),
      NumberImpl::Float(f) => f.is_zero(),
    }
  }
}

impl One for Number {
  fn one() -> Number {
    Number::from(1i64)
  }

  fn is_one(&self) -> bool {
    match &self.inner {
      NumberImpl::Integer(i) => i.is_one(),
      NumberImpl::Ratio(r) => r.is_one(),
      NumberImpl::Float(f) => f.is_one(),
    }
  }
}

impl FromStr for Number {
  type Err = ParseNumberError;

  fn from_str(s: &str) -> Result<Number, ParseNumberError> {
    parse_integer(s)
      .or_else(|| parse_ratio(s))
      .or_else(|| parse_float(s))
      .ok_or(ParseNumberError {})
  }
}

fn parse_integer(s: &str) -> Option<Number> {
  BigInt::from_str(s).map(Number::from).ok()
}

fn parse_ratio(s: &str) -> Option<Number> {
  static RATIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?\d+):([+-]?\d+)$").expect("ratio regex is valid")
  });
  let caps = RATIO_RE.captures(s)?;
  let numer = BigInt::from_str(&caps[1]).ok()?;
  let denom = BigInt::from_str(&caps[2]).ok()?;
  Number::ratio(numer, denom)
}

fn parse_float(s: &str) -> Option<Number> {
  // Rust's float parser accepts "inf" and "NaN"; literal input does not.
  let f = f64::from_str(s).ok()?;
  f.is_finite().then(|| Number::from(f))
}
