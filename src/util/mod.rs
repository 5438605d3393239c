//! Small helpers shared across the crate.

pub mod stricteq;

use std::convert::Infallible;

/// Extracts the value of a `Result` whose error type cannot be
/// constructed.
pub fn unwrap_infallible<T>(res: Result<T, Infallible>) -> T {
  match res {
    Ok(res) => res,
    Err(never) => match never {},
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unwrap_infallible() {
    let res: Result<&str, Infallible> = Ok("ok");
    assert_eq!(unwrap_infallible(res), "ok");
  }
}
