//! Promotion of two numbers to a shared representation. Private to
//! `crate::expr::number`.

use super::{Number, NumberImpl};

use num::{BigInt, BigRational, ToPrimitive};

/// Two numbers lifted into the least general representation able to
/// hold both of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Promoted {
  Integers(BigInt, BigInt),
  Ratios(BigRational, BigRational),
  Floats(f64, f64),
}

impl Promoted {
  pub fn new(left: Number, right: Number) -> Promoted {
    use NumberImpl::{Integer, Float};
    match (left.inner, right.inner) {
      (Integer(a), Integer(b)) => Promoted::Integers(a, b),
      (Float(a), b) => Promoted::Floats(a, to_float(b)),
      (a, Float(b)) => Promoted::Floats(to_float(a), b),
      (a, b) => Promoted::Ratios(to_ratio(a), to_ratio(b)),
    }
  }
}

fn to_ratio(n: NumberImpl) -> BigRational {
  match n {
    NumberImpl::Integer(i) => BigRational::from_integer(i),
    NumberImpl::Ratio(r) => r,
    NumberImpl::Float(_) => unreachable!("floats are promoted before reaching to_ratio"),
  }
}

pub(super) fn to_float(n: NumberImpl) -> f64 {
  match n {
    NumberImpl::Integer(i) => i.to_f64().unwrap_or(f64::NAN),
    NumberImpl::Ratio(r) => r.to_f64().unwrap_or(f64::NAN),
    NumberImpl::Float(f) => f,
  }
}
