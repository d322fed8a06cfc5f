use crate::{expr::{Expr, Node}, symbol::Symbol};
use super::{
    error::{kind::{UnboundSymbol, Unevaluable}, Error},
    Substitutions,
};

/// The cause of a failed evaluation, before it is located in the rendered expression.
#[derive(Debug)]
enum Fault {
    Unbound(Symbol),
    Unevaluable(Expr),
}

impl Fault {
    /// Locates every occurrence of the offending symbol or node in the rendered expression.
    fn into_error(self, root: &Expr) -> Error {
        match self {
            Self::Unbound(symbol) => {
                let (_, spans) = root.render_with_spans(|expr| expr.as_symbol() == Some(&symbol));
                tracing::debug!(symbol = %symbol, occurrences = spans.len(), "unbound symbol");
                Error::new(spans, UnboundSymbol { name: symbol.name().to_owned() })
            },
            Self::Unevaluable(node) => {
                let (_, spans) = root.render_with_spans(|expr| *expr == node);
                tracing::debug!(kind = %node.kind(), "unevaluable node");
                Error::new(spans, Unevaluable { kind: node.kind() })
            },
        }
    }
}

/// Evaluates an operand list that must hold at least two operands, folding with `op`.
fn fold_operands<S>(
    expr: &Expr,
    operands: &[Expr],
    subs: &S,
    init: f64,
    op: fn(f64, f64) -> f64,
) -> Result<f64, Fault>
where
    S: Substitutions + ?Sized,
{
    if operands.len() < 2 {
        return Err(Fault::Unevaluable(expr.clone()));
    }

    operands.iter()
        .try_fold(init, |acc, operand| Ok(op(acc, eval_inner(operand, subs)?)))
}

fn eval_inner<S: Substitutions + ?Sized>(expr: &Expr, subs: &S) -> Result<f64, Fault> {
    match expr.node() {
        Node::Zero => Ok(0.0),
        Node::One => Ok(1.0),
        Node::NegativeOne => Ok(-1.0),
        Node::Number(n) => Ok(*n),
        Node::Symbol(symbol) => subs.value_of(symbol.name())
            .ok_or_else(|| Fault::Unbound(symbol.clone())),
        Node::Pow([base, exp]) => Ok(eval_inner(base, subs)?.powf(eval_inner(exp, subs)?)),
        Node::Mul(factors) => fold_operands(expr, factors, subs, 1.0, |a, b| a * b),
        Node::Add(terms) => fold_operands(expr, terms, subs, 0.0, |a, b| a + b),
    }
}

/// Evaluates the expression to a number, using `subs` for the values of its symbols.
///
/// Returns an error if a symbol has no value in `subs`, or if a sum or product node has fewer than
/// two operands. The spans of the error point into the expression's [`Display`] output.
///
/// [`Display`]: std::fmt::Display
///
/// ```
/// use cas_canon::{numerical::eval, Expr};
/// use std::collections::HashMap;
///
/// // x * 3
/// let expr = Expr::symbol("x") * Expr::number(3.0);
/// let subs = HashMap::from([("x", 4.0)]);
/// assert_eq!(eval(&expr, &subs).unwrap(), 12.0);
/// ```
pub fn eval<S: Substitutions + ?Sized>(expr: &Expr, subs: &S) -> Result<f64, Error> {
    eval_inner(expr, subs).map_err(|fault| fault.into_error(expr))
}
