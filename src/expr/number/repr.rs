/// Internal representation of a [`Number`](super::Number), ordered
/// from most to least exact. Arithmetic on two numbers happens in the
/// larger of their two representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberRepr {
  Integer,
  Ratio,
  Float,
}

impl NumberRepr {
  pub fn is_exact(self) -> bool {
    self != NumberRepr::Float
  }
}
