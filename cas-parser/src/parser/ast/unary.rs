use cas_error::Error;
use crate::parser::{ast::{binary::Binary, expr::Expr}, token::op::UnaryOp, Parse, Parser};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl<'source> Parse<'source> for Unary {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;

        // only operators that bind tighter than negation (`^`) belong to the operand, so `-x^2`
        // is `-(x^2)` but `-2x` is `(-2)x`
        let operand = Expr::parse_operand(input)?;
        let operand = Binary::parse_expr(input, operand, op.precedence())?;

        Ok(Self {
            span: op.span.start..operand.span().end,
            operand: Box::new(operand),
            op,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-{}", self.operand)
    }
}
