//! Rendering of expressions to text.
//!
//! Numbers render as decimal literals and symbols as their names. Composite expressions are always
//! parenthesized, so the output never depends on operator precedence:
//!
//! - powers render as `(base^exponent)`
//! - products render as `(a*b*c)`
//! - sums render as `(a+b+c)`
//!
//! A product or sum with a single operand renders as that operand alone.

use super::{Expr, Node};
use std::ops::Range;

impl Expr {
    /// Writes the expression to `out`, calling `visit` with each node and the byte range its text
    /// occupies, in post-order.
    fn render(&self, out: &mut String, visit: &mut dyn FnMut(&Expr, Range<usize>)) {
        let start = out.len();
        match self.node() {
            Node::Zero => out.push('0'),
            Node::One => out.push('1'),
            Node::NegativeOne => out.push_str("-1"),
            Node::Number(n) => out.push_str(&n.to_string()),
            Node::Symbol(sym) => out.push_str(sym.name()),
            Node::Pow([base, exp]) => {
                out.push('(');
                base.render(out, visit);
                out.push('^');
                exp.render(out, visit);
                out.push(')');
            },
            Node::Mul(operands) => render_joined(operands, '*', out, visit),
            Node::Add(operands) => render_joined(operands, '+', out, visit),
        }
        visit(self, start..out.len());
    }

    /// Renders the expression, returning the text along with the byte range of every node for
    /// which `predicate` returns true.
    ///
    /// The text is identical to the [`Display`](std::fmt::Display) output. The ranges are in
    /// post-order.
    pub fn render_with_spans(
        &self,
        mut predicate: impl FnMut(&Expr) -> bool,
    ) -> (String, Vec<Range<usize>>) {
        let mut out = String::new();
        let mut spans = Vec::new();
        self.render(&mut out, &mut |expr, span| {
            if predicate(expr) {
                spans.push(span);
            }
        });
        (out, spans)
    }
}

/// Renders the operands of a product or sum, joined by `op` and wrapped in parentheses.
fn render_joined(
    operands: &[Expr],
    op: char,
    out: &mut String,
    visit: &mut dyn FnMut(&Expr, Range<usize>),
) {
    if let [single] = operands {
        single.render(out, visit);
        return;
    }

    out.push('(');
    let mut iter = operands.iter();
    if let Some(operand) = iter.next() {
        operand.render(out, visit);
        for operand in iter {
            out.push(op);
            operand.render(out, visit);
        }
    }
    out.push(')');
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.render(&mut out, &mut |_, _| {});
        f.write_str(&out)
    }
}
