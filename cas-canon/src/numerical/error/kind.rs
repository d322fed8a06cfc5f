use ariadne::{Fmt, Label, Report, ReportKind};
use cas_error::{ErrorKind, EXPR};
use crate::expr::Kind;
use std::ops::Range;

/// Builds a report starting at the first span, with the same label on every span.
fn labelled_report<'r, 'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: String,
    label: &str,
    help: String,
) -> Report<'r, (&'a str, Range<usize>)> {
    let offset = spans.first().map_or(0, |span| span.start);
    Report::build(ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(spans.iter().map(|span| {
            Label::new((src_id, span.clone()))
                .with_color(EXPR)
                .with_message(label)
        }))
        .with_help(help)
        .finish()
}

/// The symbol has no value in the substitutions.
#[derive(Debug, Clone, PartialEq)]
pub struct UnboundSymbol {
    /// The name of the symbol.
    pub name: String,
}

impl std::fmt::Display for UnboundSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` has no value", self.name)
    }
}

impl ErrorKind for UnboundSymbol {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        labelled_report(
            src_id,
            spans,
            self.to_string(),
            "this symbol",
            format!(
                "to evaluate this expression, substitute a value for {}",
                (&self.name).fg(EXPR),
            ),
        )
    }
}

/// The node cannot be reduced to a number.
///
/// Sums and products need at least two operands to be evaluated. Nodes built through
/// [`crate::canon`] always satisfy this.
#[derive(Debug, Clone, PartialEq)]
pub struct Unevaluable {
    /// The kind of the node.
    pub kind: Kind,
}

impl std::fmt::Display for Unevaluable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot evaluate this `{}` expression", self.kind)
    }
}

impl ErrorKind for Unevaluable {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        labelled_report(
            src_id,
            spans,
            self.to_string(),
            "this expression",
            "build the expression with `Expr::sum` or `Expr::product`".to_owned(),
        )
    }
}
