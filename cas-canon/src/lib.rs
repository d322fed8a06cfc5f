//! Canonical symbolic expressions built from numbers, symbols, sums, products, and powers.
//!
//! Every [`Expr`] is in canonical form: nested sums and products are flattened, numbers are folded
//! together, like terms and like bases are collected, identity elements are absorbed, and operands
//! are sorted. Two constructions that only differ in the order or grouping of their operands
//! always produce equal expressions.
//!
//! ```
//! use cas_canon::Expr;
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//!
//! // x + y + x = y + x + x
//! let lhs = Expr::sum(&[x.clone(), y.clone(), x.clone()]);
//! let rhs = Expr::sum(&[y.clone(), x.clone(), x.clone()]);
//! assert_eq!(lhs, rhs);
//! assert_eq!(lhs.to_string(), "(y+(2*x))");
//!
//! // x * x^-1 = 1
//! assert_eq!(x.clone() / x.clone(), Expr::one());
//! ```
//!
//! Expressions can be evaluated numerically by substituting values for their symbols:
//!
//! ```
//! use cas_canon::{numerical::eval, Expr};
//! use std::collections::HashMap;
//!
//! let x = Expr::symbol("x");
//! let expr = (x.clone() + Expr::one()) * (x + Expr::number(2.0));
//! let subs = HashMap::from([("x", 3.0)]);
//! assert_eq!(eval(&expr, &subs).unwrap(), 20.0);
//! ```
//!
//! # Modules
//!
//! - [`expr`]: the expression type, its ordering, equality, and rendering.
//! - [`canon`]: the routines that build canonical sums, products, and powers.
//! - [`numerical`]: numerical evaluation and its errors.
//! - [`engine`]: a configurable front end over all of the above.
//! - [`symbol`]: the symbol table that interns symbol names.
//! - [`hash`]: the hash function behind structural hashes.

pub mod canon;
pub mod engine;
pub mod expr;
pub mod hash;
pub mod numerical;
pub mod symbol;

pub use expr::Expr;
