//! Errors produced while converting a parsed expression.

use ariadne::Fmt;
use cas_error::{simple_report, ErrorKind, EXPR};
use std::ops::Range;

type Report<'a> = ariadne::Report<'a, (&'a str, Range<usize>)>;

/// The function does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedFunction {
    /// The name of the function.
    pub name: String,

    /// Known functions with a similar name.
    pub suggestions: Vec<&'static str>,
}

impl ErrorKind for UndefinedFunction {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        let help = match self.suggestions.as_slice() {
            [] => "the available functions are `exp`, `log` (or `ln`), and `sqrt`".to_string(),
            [suggestion] => format!("did you mean the `{}` function?", suggestion.fg(EXPR)),
            suggestions => format!(
                "did you mean one of these functions? {}",
                suggestions.iter()
                    .map(|s| format!("`{}`", s.fg(EXPR)))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        };
        simple_report(
            src_id,
            spans,
            format!("the `{}` function does not exist", self.name),
            &["this function".to_string()],
            Some(help),
        )
    }
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: &'static str,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments given.
    pub given: usize,
}

impl ErrorKind for WrongArgumentCount {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        simple_report(
            src_id,
            spans,
            format!(
                "the `{}` function takes {} argument(s), but {} were given",
                self.name,
                self.expected,
                self.given,
            ),
            &["this function call".to_string()],
            None,
        )
    }
}

/// An integer literal does not fit in 64 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerOverflow;

impl ErrorKind for IntegerOverflow {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        simple_report(
            src_id,
            spans,
            "integer literal is too large",
            &[format!("this {}", "integer".fg(EXPR))],
            Some(format!("integers must be between {} and {}", i64::MIN, i64::MAX)),
        )
    }
}
