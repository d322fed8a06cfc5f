//! Canonical construction of products, including combining like factors.
//!
//! Every operand is split into a base and a numeric exponent (`x^3` is `x` to the `3`, and `x` is
//! `x` to the `1`). Numbers are multiplied into a single coefficient, and the exponents of equal
//! bases are added together:
//!
//! `2 * x * y * x^2 * 3 = 6 * x^3 * y`
//!
//! Nested products and powers with numeric exponents are flattened recursively, distributing the
//! exponent: `(x * y^2)^3 * x = x^4 * y^6`. Any factor of `0` makes the whole product `0`.
//!
//! Powers with a non-numeric exponent, such as `x^y`, cannot be merged with other powers of `x`
//! without adding exponents symbolically. They are collected separately, keyed by the whole power,
//! and placed after the other factors.

use crate::expr::{Expr, Node};
use rustc_hash::FxHashMap;
use super::power;

/// Marker that a factor of zero was found, so the product is zero.
#[derive(Debug)]
struct Annihilated;

/// Accumulates the factors of a product.
#[derive(Debug)]
struct Factors {
    /// The product of all numeric factors.
    coeff: f64,

    /// The accumulated exponent of each base.
    bases: FxHashMap<Expr, f64>,

    /// The accumulated exponent of each power with a non-numeric exponent.
    opaque: FxHashMap<Expr, f64>,
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            coeff: 1.0,
            bases: FxHashMap::default(),
            opaque: FxHashMap::default(),
        }
    }
}

impl Factors {
    /// Multiplies `expr^exponent` into the product.
    ///
    /// Returns [`Annihilated`] as soon as a factor of zero is found; the remaining factors are not
    /// visited.
    ///
    /// Numeric factors are raised with [`f64::powf`], so a fractional exponent on a negative
    /// number makes the coefficient NaN: `(-x)^0.5` collects as `NaN * x^0.5`.
    fn collect(&mut self, expr: &Expr, exponent: f64) -> Result<(), Annihilated> {
        match expr.node() {
            Node::Zero => return Err(Annihilated),
            Node::One => {},
            Node::NegativeOne => self.coeff *= (-1.0f64).powf(exponent),
            Node::Number(n) => self.coeff *= n.powf(exponent),
            Node::Mul(factors) => {
                for factor in factors {
                    self.collect(factor, exponent)?;
                }
            },
            Node::Pow([base, exp]) => match exp.as_number() {
                Some(n) => self.collect(base, exponent * n)?,
                None => *self.opaque.entry(expr.clone()).or_insert(0.0) += exponent,
            },
            Node::Symbol(_) | Node::Add(_) => {
                *self.bases.entry(expr.clone()).or_insert(0.0) += exponent;
            },
        }

        Ok(())
    }

    /// Builds the canonical product from the collected factors.
    fn finish(self) -> Expr {
        if self.coeff == 0.0 {
            return Expr::zero();
        }

        let mut operands = Vec::with_capacity(1 + self.bases.len() + self.opaque.len());
        if self.coeff != 1.0 {
            operands.push(Expr::number(self.coeff));
        }
        operands.extend(raise_sorted(self.bases));
        operands.extend(raise_sorted(self.opaque));

        match operands.len() {
            0 => Expr::one(),
            1 => operands.remove(0),
            _ => {
                tracing::trace!(factors = operands.len(), "built product");
                Expr::new_mul(operands)
            },
        }
    }
}

/// Raises each base to its accumulated exponent, dropping bases whose exponents cancelled out, and
/// returns the powers sorted by base.
fn raise_sorted(bases: FxHashMap<Expr, f64>) -> impl Iterator<Item = Expr> {
    let mut powers = bases.into_iter()
        .filter(|(_, exponent)| *exponent != 0.0)
        .collect::<Vec<_>>();
    powers.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));

    powers.into_iter().map(|(base, exponent)| {
        if exponent == 1.0 {
            base
        } else {
            power::create(&base, &Expr::number(exponent))
        }
    })
}

/// Returns the canonical product of the given factors.
///
/// The product of no factors is `1`, and the product of one factor is that factor.
pub fn create(operands: &[Expr]) -> Expr {
    match operands {
        [] => Expr::one(),
        [single] => single.clone(),
        _ => {
            let mut factors = Factors::default();
            for operand in operands {
                if factors.collect(operand, 1.0).is_err() {
                    tracing::trace!("product annihilated by zero factor");
                    return Expr::zero();
                }
            }
            factors.finish()
        },
    }
}

/// Returns `expr` in the form a product stores it, with numeric exponents distributed over the
/// factors of its base.
///
/// `(2x)^2` becomes `4x^2`, and `(x^2)^3` becomes `x^6`. Expressions that a product keeps as they
/// are, such as symbols and sums, are returned unchanged.
pub fn normalize(expr: &Expr) -> Expr {
    let mut factors = Factors::default();
    match factors.collect(expr, 1.0) {
        Ok(()) => factors.finish(),
        Err(Annihilated) => Expr::zero(),
    }
}
