use ariadne::Source;
use cas_error::{simple_report, Error, ErrorKind, EXPR};
use std::ops::Range;

/// A REPL command was called with arguments it cannot use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCommand {
    /// The name of the command.
    pub name: &'static str,

    /// How the command should be called.
    pub usage: &'static str,
}

impl ErrorKind for InvalidCommand {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> ariadne::Report<'a, (&'a str, Range<usize>)> {
        use ariadne::Fmt;
        simple_report(
            src_id,
            spans,
            format!("invalid arguments to `{}`", self.name),
            &["this call".to_string()],
            Some(format!("usage: {}", self.usage.fg(EXPR))),
        )
    }
}

/// Report the error to stderr.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
pub fn report_to_stderr(err: &Error, input: &str) {
    let report = err.build_report("input");
    if let Err(io_err) = report.eprint(("input", Source::from(input))) {
        eprintln!("failed to print error report: {}", io_err);
    }
}
