use std::fmt::{self, Debug, Formatter};

/// An equality finer than [`PartialEq`]: `a.strict_eq(b)` implies
/// `a == b`, but may additionally compare internal representation.
pub trait StrictEq: PartialEq {
  fn strict_eq(&self, other: &Self) -> bool;
}

/// Adapter that makes `==` mean [`StrictEq::strict_eq`], so that
/// `assert_eq!` can report strict mismatches. Debug-prints as the
/// wrapped value.
pub struct Strictly<'a, T>(pub &'a T);

impl<T: StrictEq> PartialEq for Strictly<'_, T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.strict_eq(other.0)
  }
}

impl<T: Debug> Debug for Strictly<'_, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self.0, f)
  }
}

impl<T: StrictEq> StrictEq for Option<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Some(a), Some(b)) => a.strict_eq(b),
      (None, None) => true,
      _ => false,
    }
  }
}

#[macro_export]
macro_rules! assert_strict_eq {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_eq!($crate::util::stricteq::Strictly(left_val), $crate::util::stricteq::Strictly(right_val))
      }
    }
  };
}

#[macro_export]
macro_rules! assert_strict_ne {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_ne!($crate::util::stricteq::Strictly(left_val), $crate::util::stricteq::Strictly(right_val))
      }
    }
  };
}
