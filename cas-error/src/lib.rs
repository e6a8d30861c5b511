//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors produced by the parser and by expression conversion carry the spans of the source text
//! they originated from. The [`Error`] type pairs those spans with a boxed [`ErrorKind`], which
//! knows how to render itself as an [`ariadne`] report.

use ariadne::{Color, Label, Report, ReportKind};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)>;
}

/// Builds the common shape of report used by most error kinds: a message, one label per span (in
/// order), and an optional help line.
///
/// If there are more spans than labels, the extra spans are highlighted without a message.
pub fn simple_report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    labels: &[String],
    help: Option<String>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let start = spans.first().map_or(0, |span| span.start);
    let mut builder = Report::build(ReportKind::Error, src_id, start)
        .with_message(message)
        .with_labels(spans.iter().enumerate().map(|(i, span)| {
            let label = Label::new((src_id, span.clone())).with_color(EXPR);
            match labels.get(i) {
                Some(text) => label.with_message(text),
                None => label,
            }
        }));

    if let Some(help) = help {
        builder.set_help(help);
    }

    builder.finish()
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
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
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'a, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use super::*;

    #[derive(Debug)]
    struct DivideByWord;

    impl ErrorKind for DivideByWord {
        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<'a, (&'a str, Range<usize>)> {
            simple_report(
                src_id,
                spans,
                "cannot divide by a word",
                &["this word".to_string()],
                Some("try a number instead".to_string()),
            )
        }
    }

    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_labels_and_help() {
        let err = Error::new(vec![4..9], DivideByWord);
        let output = render(&err, "1 / hello");
        assert!(output.contains("cannot divide by a word"), "{}", output);
        assert!(output.contains("this word"), "{}", output);
        assert!(output.contains("try a number instead"), "{}", output);
    }

    #[test]
    fn extra_spans_have_no_label() {
        let err = Error::new(vec![0..1, 4..9], DivideByWord);
        let output = render(&err, "1 / hello");
        assert_eq!(output.matches("this word").count(), 1, "{}", output);
    }
}
