//! Numerical evaluation of expressions.
//!
//! [`eval`] reduces an expression to an [`f64`], looking up the value of each symbol by name in a
//! set of [`Substitutions`]. Evaluation never mutates or caches anything, so the same expression
//! can be evaluated concurrently with different substitutions.
//!
//! Floating-point overflow and NaN are ordinary results, not errors. Evaluation only fails if a
//! symbol has no substitution, or if a node cannot be reduced to a number (see [`error`]).

pub mod error;
mod eval;
mod subs;

pub use eval::eval;
pub use subs::Substitutions;
