//! Canonical construction of powers.
//!
//! The rules below are tried in order; the first one that applies produces the result. If none
//! apply, the power is built as-is, since both operands are already canonical.

use crate::expr::{Expr, Node};

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, though it may be undefined in other mathematical
/// contexts.
fn power_zero(_: &Expr, exponent: &Expr) -> Option<Expr> {
    matches!(exponent.node(), Node::Zero).then(Expr::one)
}

/// `a^1 = a`
fn power_one(base: &Expr, exponent: &Expr) -> Option<Expr> {
    matches!(exponent.node(), Node::One).then(|| base.clone())
}

/// `0^a = 0`
///
/// `0^0` is handled by the [`power_zero`] rule. Negative exponents are not special-cased, so
/// `0^-1 = 0`.
fn power_zero_left(base: &Expr, _: &Expr) -> Option<Expr> {
    matches!(base.node(), Node::Zero).then(Expr::zero)
}

/// `1^a = 1`
fn power_one_left(base: &Expr, _: &Expr) -> Option<Expr> {
    matches!(base.node(), Node::One).then(Expr::one)
}

/// Evaluates a number raised to a number, such as `2^3 = 8`.
///
/// This follows [`f64::powf`], so `(-8)^(1/3)` is NaN rather than `-2`.
fn numeric_power(base: &Expr, exponent: &Expr) -> Option<Expr> {
    let base = base.as_number()?;
    let exponent = exponent.as_number()?;
    Some(Expr::number(base.powf(exponent)))
}

/// Returns the canonical form of `base^exponent`.
pub fn create(base: &Expr, exponent: &Expr) -> Expr {
    let result = power_zero(base, exponent)
        .or_else(|| power_one(base, exponent))
        .or_else(|| power_zero_left(base, exponent))
        .or_else(|| power_one_left(base, exponent))
        .or_else(|| numeric_power(base, exponent));

    match result {
        Some(expr) => expr,
        None => {
            tracing::trace!(base = %base.kind(), exponent = %exponent.kind(), "built power");
            Expr::new_pow(base.clone(), exponent.clone())
        },
    }
}
