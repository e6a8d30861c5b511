use cas_error::Error;
use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::UnclosedParenthesis,
        token::{CloseParen, Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A function call, such as `exp(x)` or `log(x, 10)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl<'source> Parse<'source> for Call {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let unclosed = || Error::new(vec![open_paren.span.clone()], UnclosedParenthesis { call: true });

        let mut args = Vec::new();
        let close_paren = if input.peek_token().is_some_and(|token| token.kind == TokenKind::CloseParen) {
            input.try_parse::<CloseParen>()?
        } else {
            loop {
                args.push(input.try_parse::<Expr>()?);
                if input.try_parse::<Comma>().is_ok() {
                    continue;
                }
                break input.try_parse::<CloseParen>().map_err(|_| unclosed())?;
            }
        };

        Ok(Self {
            span: name.span.start..close_paren.span.end,
            name,
            args,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut iter = self.args.iter();
        if let Some(arg) = iter.next() {
            write!(f, "{}", arg)?;
            for arg in iter {
                write!(f, ", {}", arg)?;
            }
        }
        write!(f, ")")
    }
}
