//! Construction of expressions in canonical form.
//!
//! Each submodule exposes a `create` function that takes operands which are already canonical
//! (every [`Expr`](crate::expr::Expr) is), and returns the unique canonical expression for their
//! sum, product, or power:
//!
//! - [`add::create`] flattens nested sums, adds up numbers, and combines like terms (`x + 2x =
//! 3x`). Scaled sums are distributed (`2(x + 1) = 2 + 2x` inside a sum).
//! - [`multiply::create`] flattens nested products, multiplies numbers, and combines like bases
//! (`x * x^2 = x^3`).
//! - [`power::create`] absorbs the trivial exponents and bases, and evaluates numeric powers.
//!
//! Like terms and like bases are collected in hash maps keyed by the expression itself. Since an
//! [`Expr`](crate::expr::Expr) hashes by its cached structural hash, collecting `n` operands takes
//! `O(n)` expected time, instead of comparing every pair of operands. The collected operands are
//! then sorted into canonical order, which makes the result independent of the order of the input.
//!
//! None of these functions fail. Floating-point overflow, infinities, and NaN are ordinary
//! numbers as far as construction is concerned.

pub mod add;
pub mod multiply;
pub mod power;
