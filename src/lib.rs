//! Symbolic arithmetic expressions with sharing, precedence-aware
//! rendering, and differentiation.
//!
//! Expressions are immutable graphs of [`Expr`] nodes built with the
//! constructors on `Expr` or with ordinary operators:
//!
//! ```ignore
//! use symgraph::{Expr, differentiate};
//!
//! let x = Expr::var("x").unwrap();
//! let e = &x * &x + 3;
//! assert_eq!(e.to_string(), "x * x + 3");
//! assert_eq!(differentiate(&e, "x")?.to_string(), "1 * x + 1 * x + 0");
//! ```
//!
//! Every analysis is a rule applied bottom-up by
//! [`walker::evaluate`](expr::walker::evaluate), which visits each
//! distinct node once no matter how many parents share it.

pub mod error;
pub mod expr;
pub mod util;

pub use error::{Error, Result};
pub use expr::{Expr, ExprKind, NodeId, Operator};
pub use expr::calculus::{DerivativeEngine, DifferentiationError, differentiate};
pub use expr::display::{PowerNotation, Renderer};
pub use expr::number::Number;
pub use expr::numeric::{Bindings, NumericError, evaluate_numeric};
pub use expr::substitute::substitute;
pub use expr::symbol::Symbol;
