//! Property-based tests for canonical construction.
//!
//! Expressions are generated from integer-valued numbers and a handful of symbols, so that every
//! coefficient and exponent is computed exactly, regardless of the order in which floating-point
//! operations happen to be performed.
//!
//! Arbitrary trees are kept shallow where a property compares results exactly, so that their
//! coefficients stay well within the range of integers an `f64` represents exactly.

use cas_canon::{
    canon::{add, multiply, power},
    expr::Kind,
    numerical::eval,
    Expr,
};
use proptest::prelude::*;
use std::collections::HashMap;

// -- Strategies --

/// Generate an integer-valued number.
fn number_strategy() -> impl Strategy<Value = Expr> {
    (-3i32..=3).prop_map(|n| Expr::number(f64::from(n)))
}

/// Generate a symbol.
fn symbol_strategy() -> impl Strategy<Value = Expr> {
    prop::sample::select(vec!["a", "b", "c"]).prop_map(Expr::symbol)
}

/// Generate a symbol raised to a small positive power.
fn symbol_power_strategy() -> impl Strategy<Value = Expr> {
    (symbol_strategy(), 1i32..=3)
        .prop_map(|(symbol, exp)| power::create(&symbol, &Expr::number(f64::from(exp))))
}

/// Generate a monomial, such as `3*a^2*b`.
fn monomial_strategy() -> impl Strategy<Value = Expr> {
    (-3i32..=3, prop::collection::vec(symbol_power_strategy(), 1..=2))
        .prop_map(|(coeff, mut factors)| {
            factors.push(Expr::number(f64::from(coeff)));
            multiply::create(&factors)
        })
}

/// Generate a sum of monomials.
fn polynomial_strategy() -> impl Strategy<Value = Expr> {
    prop::collection::vec(monomial_strategy(), 1..=3)
        .prop_map(|terms| add::create(&terms))
}

/// Generate an operand for sums.
fn term_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        number_strategy(),
        symbol_strategy(),
        monomial_strategy(),
        polynomial_strategy(),
    ]
}

/// Generate an operand for products.
fn factor_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        term_strategy(),
        (polynomial_strategy(), 2i32..=3)
            .prop_map(|(base, exp)| power::create(&base, &Expr::number(f64::from(exp)))),
    ]
}

/// Generate an arbitrary expression tree with non-negative integer exponents, nested up to `depth`
/// levels deep.
fn tree_strategy(depth: u32) -> BoxedStrategy<Expr> {
    prop_oneof![number_strategy(), symbol_strategy()]
        .boxed()
        .prop_recursive(depth, 24, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 2..=3).prop_map(|terms| add::create(&terms)),
                prop::collection::vec(inner.clone(), 2..=3)
                    .prop_map(|factors| multiply::create(&factors)),
                (inner, 0i32..=2)
                    .prop_map(|(base, exp)| power::create(&base, &Expr::number(f64::from(exp)))),
            ]
        })
        .boxed()
}

// -- Helpers --

/// Runs the `create` routine matching the kind of `expr` over its own operands.
fn recreate(expr: &Expr) -> Expr {
    match expr.kind() {
        Kind::Add => add::create(expr.operands()),
        Kind::Mul => multiply::create(expr.operands()),
        Kind::Pow => power::create(&expr.operands()[0], &expr.operands()[1]),
        _ => expr.clone(),
    }
}

fn substitutions() -> HashMap<&'static str, f64> {
    HashMap::from([("a", 2.0), ("b", -1.0), ("c", 3.0)])
}

/// Checks that two evaluated values agree to within rounding.
fn close(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() <= 1e-9 * lhs.abs().max(rhs.abs()).max(1.0)
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Rebuilding a canonical sum from its own operands gives the same sum.
    #[test]
    fn prop_sum_idempotence(terms in prop::collection::vec(term_strategy(), 0..5)) {
        let expr = add::create(&terms);
        prop_assert_eq!(recreate(&expr), expr);
    }

    /// Rebuilding a canonical product from its own operands gives the same product.
    #[test]
    fn prop_product_idempotence(factors in prop::collection::vec(factor_strategy(), 0..5)) {
        let expr = multiply::create(&factors);
        prop_assert_eq!(recreate(&expr), expr);
    }

    /// Nested sums collapse into a single flat sum.
    #[test]
    fn prop_sum_associativity(a in tree_strategy(2), b in tree_strategy(2), c in tree_strategy(2)) {
        let nested = add::create(&[add::create(&[a.clone(), b.clone()]), c.clone()]);
        let flat = add::create(&[a.clone(), b.clone(), c.clone()]);
        prop_assert_eq!(&nested, &flat);

        let nested = add::create(&[a, add::create(&[b, c])]);
        prop_assert_eq!(nested, flat);
    }

    /// Nested products collapse into a single flat product.
    #[test]
    fn prop_product_associativity(
        a in tree_strategy(2),
        b in tree_strategy(2),
        c in tree_strategy(2),
    ) {
        let nested = multiply::create(&[a.clone(), multiply::create(&[b.clone(), c.clone()])]);
        let flat = multiply::create(&[a, b, c]);
        prop_assert_eq!(nested, flat);
    }

    /// The order of the terms of a sum does not matter.
    #[test]
    fn prop_sum_commutativity(terms in prop::collection::vec(tree_strategy(2), 2..4)) {
        let mut reversed = terms.clone();
        reversed.reverse();
        prop_assert_eq!(add::create(&terms), add::create(&reversed));
    }

    /// The order of the factors of a product does not matter.
    #[test]
    fn prop_product_commutativity(factors in prop::collection::vec(tree_strategy(2), 2..4)) {
        let mut rotated = factors.clone();
        rotated.rotate_left(1);
        prop_assert_eq!(multiply::create(&factors), multiply::create(&rotated));
    }

    /// Subtracting an expression from itself gives exactly `0`.
    #[test]
    fn prop_sub_self_is_zero(a in tree_strategy(2)) {
        let negated = multiply::create(&[Expr::neg_one(), a.clone()]);
        prop_assert!(add::create(&[a.clone(), negated]).ptr_eq(&Expr::zero()));
        prop_assert!((a.clone() - a).ptr_eq(&Expr::zero()));
    }

    /// `0` and `1` are absorbed by sums, products, and powers.
    #[test]
    fn prop_absorption(x in term_strategy().prop_filter("non-numeric", |x| !x.is_numeric())) {
        prop_assert_eq!(add::create(&[x.clone(), Expr::zero()]), x.clone());
        prop_assert_eq!(multiply::create(&[x.clone(), Expr::one()]), x.clone());
        prop_assert!(multiply::create(&[x.clone(), Expr::zero()]).ptr_eq(&Expr::zero()));
        prop_assert!(power::create(&x, &Expr::zero()).ptr_eq(&Expr::one()));
        prop_assert_eq!(power::create(&x, &Expr::one()), x);
    }

    /// Adding a term to itself doubles its coefficient.
    #[test]
    fn prop_like_terms(x in prop_oneof![symbol_strategy(), monomial_strategy()]) {
        let doubled = multiply::create(&[Expr::number(2.0), x.clone()]);
        prop_assert_eq!(add::create(&[x.clone(), x]), doubled);
    }

    /// Multiplying a base by itself squares it.
    #[test]
    fn prop_like_bases(
        x in prop_oneof![symbol_strategy(), polynomial_strategy()]
            .prop_filter("symbol or sum", |x| matches!(x.kind(), Kind::Symbol | Kind::Add)),
    ) {
        let squared = power::create(&x, &Expr::number(2.0));
        prop_assert_eq!(multiply::create(&[x.clone(), x]), squared);
    }

    /// Equal expressions have equal hashes, however they were built.
    #[test]
    fn prop_hash_consistency(terms in prop::collection::vec(term_strategy(), 1..5)) {
        let mut reversed = terms.clone();
        reversed.reverse();

        let sum = add::create(&terms);
        let rebuilt = add::create(&reversed);
        prop_assert_eq!(&sum, &rebuilt);
        prop_assert_eq!(sum.structural_hash(), rebuilt.structural_hash());

        let product = multiply::create(&terms);
        let rebuilt = multiply::create(&reversed);
        prop_assert_eq!(&product, &rebuilt);
        prop_assert_eq!(product.structural_hash(), rebuilt.structural_hash());
    }

    /// Expressions with different hashes are never equal.
    #[test]
    fn prop_hash_mismatch_implies_unequal(a in tree_strategy(3), b in tree_strategy(3)) {
        if a.structural_hash() != b.structural_hash() {
            prop_assert_ne!(a, b);
        } else if a == b {
            prop_assert_eq!(a.to_string(), b.to_string());
        }
    }

    /// Canonical sums and products evaluate to the sum and product of their operands.
    #[test]
    fn prop_evaluation_preserved(operands in prop::collection::vec(tree_strategy(3), 1..4)) {
        let subs = substitutions();
        let values = operands.iter()
            .map(|operand| eval(operand, &subs))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let sum = eval(&add::create(&operands), &subs).unwrap();
        let expected = values.iter().sum::<f64>();
        prop_assert!(close(sum, expected), "sum: {} != {}", sum, expected);

        let product = eval(&multiply::create(&operands), &subs).unwrap();
        let expected = values.iter().product::<f64>();
        prop_assert!(close(product, expected), "product: {} != {}", product, expected);
    }

    /// The symbols of a sum are the symbols of its terms, unless they cancel out.
    #[test]
    fn prop_symbols_subset(terms in prop::collection::vec(term_strategy(), 1..5)) {
        let sum = add::create(&terms);
        let all = terms.iter()
            .flat_map(|term| term.symbols())
            .collect::<std::collections::BTreeSet<_>>();
        prop_assert!(sum.symbols().is_subset(&all));
    }
}
