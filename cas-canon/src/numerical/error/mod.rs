pub mod kind;

use ariadne::Report;
use cas_error::ErrorKind;
use kind::{UnboundSymbol, Unevaluable};
use std::ops::Range;

/// The kind of evaluation error that occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorKind {
    /// A symbol has no value in the substitutions.
    UnboundSymbol(UnboundSymbol),

    /// A node cannot be reduced to a number.
    Unevaluable(Unevaluable),
}

impl ErrorKind for EvalErrorKind {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        match self {
            Self::UnboundSymbol(kind) => kind.build_report(src_id, spans),
            Self::Unevaluable(kind) => kind.build_report(src_id, spans),
        }
    }
}

impl From<UnboundSymbol> for EvalErrorKind {
    fn from(kind: UnboundSymbol) -> Self {
        Self::UnboundSymbol(kind)
    }
}

impl From<Unevaluable> for EvalErrorKind {
    fn from(kind: Unevaluable) -> Self {
        Self::Unevaluable(kind)
    }
}

/// An error that occurred while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The regions of the rendered expression that caused this error. Every occurrence of the
    /// offending symbol or node is included.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: EvalErrorKind,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl Into<EvalErrorKind>) -> Self {
        Self { spans, kind: kind.into() }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            EvalErrorKind::UnboundSymbol(kind) => write!(f, "{}", kind),
            EvalErrorKind::Unevaluable(kind) => write!(f, "{}", kind),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for cas_error::Error {
    fn from(err: Error) -> Self {
        cas_error::Error::new(err.spans, err.kind)
    }
}
