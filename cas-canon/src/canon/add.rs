//! Canonical construction of sums, including combining like terms.
//!
//! Every operand is split into a numeric coefficient and a term (`3*x*y` is `3` times `x*y`, and
//! `x` is `1` times `x`). Numbers are added into a single constant, and the coefficients of equal
//! terms are added together:
//!
//! `x + 2x + 3 + y - x + 4 = 7 + 2x + y`
//!
//! Nested sums are flattened recursively, so the result never contains a sum as a direct operand.
//! A sum scaled by a number is flattened too, with its terms scaled: `2(x + 1) + y = 2 + 2x + y`.
//!
//! Terms are keyed the way [`multiply::create`] would build them. A power that a product would
//! rewrite, such as `(2x)^2` or `(x^2)^3`, is first brought into that form (`4x^2` and `x^6`), so
//! it combines with the products that [`multiply::create`] returns for it.

use crate::expr::{Expr, Kind, Node};
use rustc_hash::FxHashMap;
use super::multiply;

/// Accumulates the terms of a sum.
#[derive(Debug, Default)]
struct Terms {
    /// The sum of all numeric operands.
    constant: f64,

    /// The accumulated coefficient of each term.
    coefficients: FxHashMap<Expr, f64>,
}

impl Terms {
    /// Adds `multiplier * expr` to the sum.
    fn collect(&mut self, expr: &Expr, multiplier: f64) {
        match expr.node() {
            Node::Zero => {},
            Node::One => self.constant += multiplier,
            Node::NegativeOne => self.constant -= multiplier,
            Node::Number(n) => self.constant += n * multiplier,
            Node::Add(terms) => {
                for term in terms {
                    self.collect(term, multiplier);
                }
            },
            Node::Mul(factors) => {
                let (coeff, term) = split_coefficient(expr, factors);
                if term.kind() == Kind::Add {
                    self.collect(&term, coeff * multiplier);
                } else {
                    self.add_term(term, coeff * multiplier);
                }
            },
            Node::Pow([base, exp]) if is_rewritten_by_product(base, exp) => {
                self.collect(&multiply::normalize(expr), multiplier);
            },
            Node::Symbol(_) | Node::Pow(_) => self.add_term(expr.clone(), multiplier),
        }
    }

    /// Adds `coeff` to the coefficient of the given term.
    fn add_term(&mut self, term: Expr, coeff: f64) {
        *self.coefficients.entry(term).or_insert(0.0) += coeff;
    }

    /// Builds the canonical sum from the collected terms.
    fn finish(self) -> Expr {
        let mut terms = self.coefficients.into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .map(|(term, coeff)| {
                if coeff == 1.0 {
                    term
                } else {
                    multiply::create(&[Expr::number(coeff), term])
                }
            })
            .collect::<Vec<_>>();
        terms.sort();

        match terms.len() {
            0 => Expr::number(self.constant),
            1 if self.constant == 0.0 => terms.remove(0),
            _ => {
                if self.constant != 0.0 {
                    terms.insert(0, Expr::number(self.constant));
                }
                tracing::trace!(terms = terms.len(), "built sum");
                Expr::new_add(terms)
            },
        }
    }
}

/// Returns true if [`multiply::create`] would not keep `base^exponent` as it is, because the
/// numeric exponent is distributed over the factors of a product, or multiplied into the numeric
/// exponent of a power.
fn is_rewritten_by_product(base: &Expr, exponent: &Expr) -> bool {
    exponent.is_numeric() && match base.node() {
        Node::Mul(_) => true,
        Node::Pow([_, inner]) => inner.is_numeric(),
        _ => false,
    }
}

/// Splits a product into its numeric coefficient and the remaining term.
///
/// - `3*x` -> `(3, x)`
/// - `-1*x*y` -> `(-1, x*y)`
/// - `x*y` -> `(1, x*y)`
///
/// The coefficient of a canonical product, if any, is its first factor.
fn split_coefficient(expr: &Expr, factors: &[Expr]) -> (f64, Expr) {
    if let Some((first, rest)) = factors.split_first() {
        if let Some(coeff) = first.as_number() {
            let term = match rest {
                [single] => single.clone(),
                _ => Expr::new_mul(rest.to_vec()),
            };
            return (coeff, term);
        }
    }

    (1.0, expr.clone())
}

/// Returns the canonical sum of the given terms.
///
/// The sum of no terms is `0`, and the sum of one term is that term.
pub fn create(operands: &[Expr]) -> Expr {
    match operands {
        [] => Expr::zero(),
        [single] => single.clone(),
        _ => {
            let mut terms = Terms::default();
            for operand in operands {
                terms.collect(operand, 1.0);
            }
            terms.finish()
        },
    }
}
