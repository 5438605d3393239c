//! Symbolic calculus on expression graphs.

mod derivative;

pub use derivative::{DerivativeEngine, DifferentiationError, differentiate};
