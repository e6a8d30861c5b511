use cas_error::Error;
use crate::parser::{
    ast::expr::Expr,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if an operator with the given precedence and associativity should extend the
    /// expression currently being parsed at precedence `min`.
    ///
    /// A right-associative operator also extends an expression of equal precedence, so that
    /// `2^3^4` becomes `2^(3^4)`.
    fn extends(op: &BinOp, min: Precedence) -> bool {
        let precedence = op.precedence();
        precedence > min || (precedence == min && op.associativity() == Associativity::Right)
    }

    /// Reads the operator following `lhs`, if any. An operand directly following `lhs` with no
    /// operator in between is implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// The operator is only consumed if it extends the expression at precedence `min`.
    fn next_op(input: &mut Parser, lhs: &Expr, min: Precedence) -> Option<BinOp> {
        let mut input_ahead = input.clone();
        if let Ok(op) = input_ahead.try_parse::<BinOp>() {
            if Self::extends(&op, min) {
                *input = input_ahead;
                return Some(op);
            }
            return None;
        }

        let token = input.peek_token()?;
        if !token.kind.starts_operand() {
            return None;
        }

        let op = BinOp {
            kind: BinOpKind::Mul,
            implicit: true,
            span: lhs.span().end..token.span.start,
        };
        Self::extends(&op, min).then_some(op)
    }

    /// Parses a chain of binary operations starting with `lhs`, consuming every operator that
    /// binds tighter than `min` (precedence climbing).
    ///
    /// If we are parsing `1 + 2 * 3`, the left-hand-side `1` and the operator `+` are read first.
    /// The right-hand-side is then parsed with the precedence of `+` as the new minimum, which
    /// lets `*` claim `2` before the `+` node is built, producing `1 + (2 * 3)`.
    pub(crate) fn parse_expr(input: &mut Parser, mut lhs: Expr, min: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::next_op(input, &lhs, min) {
            let rhs = Expr::parse_operand(input)?;
            let rhs = Self::parse_expr(input, rhs, op.precedence())?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.op.kind, self.op.implicit) {
            (_, true) => write!(f, "{}{}", self.lhs, self.rhs),
            (BinOpKind::Exp, _) => write!(f, "{}^{}", self.lhs, self.rhs),
            (kind, _) => write!(f, "{} {} {}", self.lhs, kind.symbol(), self.rhs),
        }
    }
}
