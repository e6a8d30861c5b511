//! Error kinds produced while parsing.

use ariadne::Fmt;
use cas_error::{simple_report, ErrorKind, EXPR};
use crate::tokenizer::TokenKind;
use std::ops::Range;

type Report<'a> = ariadne::Report<'a, (&'a str, Range<usize>)>;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        simple_report(
            src_id,
            spans,
            "unexpected end of file",
            &[format!("you might need to add another {} here", "expression".fg(EXPR))],
            None,
        )
    }
}

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedEof;

impl ErrorKind for ExpectedEof {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        simple_report(
            src_id,
            spans,
            "expected end of file",
            &[format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
            None,
        )
    }
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

impl ErrorKind for UnexpectedToken {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        let expected = self.expected.iter()
            .map(|t| format!("{:?}", t))
            .collect::<Vec<_>>()
            .join(", ");
        simple_report(
            src_id,
            spans,
            "unexpected token",
            &[format!("expected one of: {}", expected)],
            Some(format!("found {:?}", self.found)),
        )
    }
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis opened a function call's argument list.
    pub call: bool,
}

impl ErrorKind for UnclosedParenthesis {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        let help = if self.call {
            "function arguments are separated by commas and closed with `)`"
        } else {
            "add a closing parenthesis `)` somewhere after this"
        };
        simple_report(
            src_id,
            spans,
            "unclosed parenthesis",
            &["this parenthesis is not closed".to_string()],
            Some(help.to_string()),
        )
    }
}

/// The parentheses are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyParenthesis;

impl ErrorKind for EmptyParenthesis {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a> {
        simple_report(
            src_id,
            spans,
            "missing expression inside parenthesis",
            &["add an expression here".to_string()],
            None,
        )
    }
}
