//! Operator sugar for building expressions.
//!
//! `+`, `-`, `*`, `/` and `^` on `Expr` (or `&Expr`) build operator
//! nodes through the named builders on [`Expr`], so a numeric operand
//! on either side is coerced into a `Number` terminal and operand order
//! follows the written order: `5 - x` is `Sub(Number(5), x)`.
//!
//! Power is available both as [`num::pow::Pow`] (`x.pow(2)`) and as
//! `^`. Rust parses `^` with *lower* precedence than `+` and `*`, so
//! `x ^ 2 + 1` means `x ^ (2 + 1)`; parenthesize, or prefer `pow`.

use super::{Expr, Operator};
use super::number::Number;

use num::pow::Pow;

use std::ops::{Add, Sub, Mul, Div, BitXor, Neg};

macro_rules! impl_expr_op {
  ($trait:ident, $method:ident, $op:expr) => {
    impl<T: Into<Expr>> $trait<T> for Expr {
      type Output = Expr;

      fn $method(self, rhs: T) -> Expr {
        Expr::operator($op, self, rhs)
      }
    }

    impl<T: Into<Expr>> $trait<T> for &Expr {
      type Output = Expr;

      fn $method(self, rhs: T) -> Expr {
        Expr::operator($op, self, rhs)
      }
    }
  };
}

/// Impls with a plain number on the left-hand side. Only one integer
/// type gets them, so an unsuffixed literal such as the `5` in
/// `5 - x` resolves to `i32`.
macro_rules! impl_reversed_op {
  ($lhs:ty; $($trait:ident, $method:ident, $op:expr);* $(;)?) => {
    $(
      impl $trait<Expr> for $lhs {
        type Output = Expr;

        fn $method(self, rhs: Expr) -> Expr {
          Expr::operator($op, self, rhs)
        }
      }

      impl $trait<&Expr> for $lhs {
        type Output = Expr;

        fn $method(self, rhs: &Expr) -> Expr {
          Expr::operator($op, self, rhs)
        }
      }
    )*
  };
}

macro_rules! impl_reversed_ops {
  ($($lhs:ty),*) => {
    $(
      impl_reversed_op! {
        $lhs;
        Add, add, Operator::Add;
        Sub, sub, Operator::Sub;
        Mul, mul, Operator::Mul;
        Div, div, Operator::Div;
        BitXor, bitxor, Operator::Pow;
        Pow, pow, Operator::Pow;
      }
    )*
  };
}

impl_expr_op!(Add, add, Operator::Add);
impl_expr_op!(Sub, sub, Operator::Sub);
impl_expr_op!(Mul, mul, Operator::Mul);
impl_expr_op!(Div, div, Operator::Div);
impl_expr_op!(BitXor, bitxor, Operator::Pow);
impl_expr_op!(Pow, pow, Operator::Pow);

impl_reversed_ops!(i32, f64, Number);

/// Negation is `0 - x`; there is no unary node kind.
impl Neg for Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    Expr::difference(0, self)
  }
}

impl Neg for &Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    Expr::difference(0, self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn var(name: &str) -> Expr {
    Expr::var(name).unwrap()
  }

  #[test]
  fn test_literal_on_the_right() {
    let x = var("x");
    assert_eq!((&x + 3).to_debug_string(), r#"Add(Symbol("x"), Number(3))"#);
    assert_eq!((&x - 3).to_debug_string(), r#"Sub(Symbol("x"), Number(3))"#);
    assert_eq!((&x * 2.5).to_debug_string(), r#"Mul(Symbol("x"), Number(2.5))"#);
    assert_eq!((&x / 4i64).to_debug_string(), r#"Div(Symbol("x"), Number(4))"#);
    assert_eq!((&x).pow(2).to_debug_string(), r#"Pow(Symbol("x"), Number(2))"#);
    assert_eq!((&x ^ 2).to_debug_string(), r#"Pow(Symbol("x"), Number(2))"#);
  }

  #[test]
  fn test_literal_on_the_left_keeps_written_order() {
    let x = var("x");
    assert_eq!((5 - &x).to_debug_string(), r#"Sub(Number(5), Symbol("x"))"#);
    assert_eq!((1 / &x).to_debug_string(), r#"Div(Number(1), Symbol("x"))"#);
    assert_eq!((2 + &x).to_debug_string(), r#"Add(Number(2), Symbol("x"))"#);
    assert_eq!((0.5 * x.clone()).to_debug_string(), r#"Mul(Number(0.5), Symbol("x"))"#);
    assert_eq!((2 ^ &x).to_debug_string(), r#"Pow(Number(2), Symbol("x"))"#);
    assert_eq!(Pow::pow(3, &x).to_debug_string(), r#"Pow(Number(3), Symbol("x"))"#);
    let half = Number::ratio(1, 2).unwrap();
    assert_eq!((half - &x).to_debug_string(), r#"Sub(Number(1:2), Symbol("x"))"#);
  }

  #[test]
  fn test_sugar_shares_operands() {
    let x = var("x");
    let e = &x * &x;
    assert!(e.operands()[0].ptr_eq(&x));
    assert!(e.operands()[1].ptr_eq(&x));
  }

  #[test]
  fn test_sugar_matches_builders() {
    let x = var("x");
    let y = var("y");
    let sugar = (&x + &y) * (&x - 1) / y.clone().pow(2);
    let built = Expr::quotient(
      Expr::product(Expr::sum(&x, &y), Expr::difference(&x, 1)),
      Expr::power(&y, 2),
    );
    assert!(sugar.structurally_eq(&built));
  }

  #[test]
  fn test_negation() {
    let x = var("x");
    assert_eq!((-&x).to_debug_string(), r#"Sub(Number(0), Symbol("x"))"#);
  }
}
