//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Expressions have no source text of their own; errors point into the **rendered** form of the
//! expression that failed (its `Display` output), so a report can highlight the offending symbols
//! or subexpressions in the same text the user sees.

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    ///
    /// `spans` are byte ranges into the rendered expression identified by `src_id`. Implementors
    /// may assume there is at least one span.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of a rendered expression that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the rendered expression that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error into a [`String`], using `source` as the text the spans
    /// point into.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement `Display`, so this is the way to
    /// get at the report's text without printing it to stderr. The output contains ANSI color
    /// codes.
    pub fn render_report(&self, src_id: &str, source: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id)
            .write((src_id, Source::from(source)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
