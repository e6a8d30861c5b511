use cas_error::Error;
use crate::parser::{token::{Int, Name}, Parse, Parser};
use std::{fmt, ops::Range};

/// An integer literal, represented as a [`String`] so that values too large for any fixed-width
/// type can still be reported accurately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitInt {
    /// The value of the integer literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitInt {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let int = input.try_parse::<Int>()?;
        Ok(Self {
            value: int.lexeme.to_owned(),
            span: int.span,
        })
    }
}

impl fmt::Display for LitInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x` or `theta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitSym {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        Ok(Self {
            name: name.lexeme.to_owned(),
            span: name.span,
        })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(LitInt),
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}
