use cas_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::{LitInt, LitSym, Literal}, paren::Paren, unary::Unary},
        error::{UnexpectedEof, UnexpectedToken},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Represents a general expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses a single operand: a literal, a call, a parenthesized expression, or a unary
    /// operation. Binary operators following the operand are left in the stream.
    pub(crate) fn parse_operand(input: &mut Parser) -> Result<Self, Error> {
        let Some((kind, span)) = input.peek_token().map(|token| (token.kind, token.span.clone())) else {
            return Err(Error::new(vec![input.eof_span()], UnexpectedEof));
        };

        match kind {
            TokenKind::Sub => input.try_parse::<Unary>().map(Self::Unary),
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Self::Paren),
            TokenKind::Int => input.try_parse::<LitInt>().map(|int| Self::Literal(Literal::Integer(int))),
            TokenKind::Name => {
                // a name directly followed by an opening parenthesis is a function call
                let mut input_ahead = input.clone();
                input_ahead.next_token()?;
                let is_call = input_ahead
                    .peek_token()
                    .is_some_and(|token| token.kind == TokenKind::OpenParen);

                if is_call {
                    input.try_parse::<Call>().map(Self::Call)
                } else {
                    input.try_parse::<LitSym>().map(|sym| Self::Literal(Literal::Symbol(sym)))
                }
            },
            kind => Err(Error::new(vec![span], UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Name, TokenKind::OpenParen, TokenKind::Sub],
                found: kind,
            })),
        }
    }
}

impl<'source> Parse<'source> for Expr {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let lhs = Self::parse_operand(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
