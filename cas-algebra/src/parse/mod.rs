//! Conversion from the syntax tree produced by [`cas_parser`] into [`Expr`].
//!
//! The conversion is lossy: spans are dropped, parentheses disappear, and operators are rewritten
//! in terms of the core expression kinds (`a - b` becomes `a + -1 * b`, and `a / b` becomes
//! `a * b^-1`).
//!
//! ```
//! use cas_algebra::{parse, Expr};
//!
//! let expr = parse("2x^2 - 1").unwrap();
//! assert_eq!(expr, Expr::add([
//!     Expr::mul([Expr::int(2), Expr::pow(Expr::var("x"), Expr::int(2))]),
//!     Expr::mul([Expr::int(-1), Expr::int(1)]),
//! ]));
//! ```

pub mod error;

use cas_error::Error;
use cas_parser::parser::{
    ast::{self, Call, Literal},
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use crate::{consts, expr::Expr};
use error::{IntegerOverflow, UndefinedFunction, WrongArgumentCount};
use levenshtein::levenshtein;

/// The functions that can be called, by name, with the number of arguments they take.
const FUNCTIONS: [(&str, usize); 4] = [("exp", 1), ("log", 1), ("ln", 1), ("sqrt", 1)];

fn convert_call(call: Call) -> Result<Expr, Error> {
    let name = call.name.name.as_str();
    let Some(&(name, expected)) = FUNCTIONS.iter().find(|(n, _)| *n == name) else {
        let suggestions = FUNCTIONS.iter()
            .map(|(n, _)| *n)
            .filter(|n| levenshtein(n, name) < 2)
            .collect();
        return Err(Error::new(
            vec![call.name.span.clone()],
            UndefinedFunction { name: name.to_string(), suggestions },
        ));
    };

    if call.args.len() != expected {
        return Err(Error::new(
            call.outer_span().to_vec(),
            WrongArgumentCount { name, expected, given: call.args.len() },
        ));
    }

    let mut args = call.args.into_iter()
        .map(Expr::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let arg = args.remove(0);
    Ok(match name {
        "exp" => Expr::exp(arg),
        "log" | "ln" => Expr::log(arg),
        _ => Expr::sqrt(arg),
    })
}

impl TryFrom<ast::Expr> for Expr {
    type Error = Error;

    fn try_from(expr: ast::Expr) -> Result<Self, Self::Error> {
        match expr {
            ast::Expr::Literal(Literal::Integer(int)) => int.value.parse::<i64>()
                .map(Expr::int)
                .map_err(|_| Error::new(vec![int.span], IntegerOverflow)),
            ast::Expr::Literal(Literal::Symbol(sym)) => Ok(consts::lookup(&sym.name)
                .cloned()
                .unwrap_or_else(|| Expr::var(sym.name))),
            ast::Expr::Paren(paren) => Expr::try_from(paren.into_innermost()),
            ast::Expr::Call(call) => convert_call(call),
            ast::Expr::Unary(unary) => {
                let operand = Expr::try_from(*unary.operand)?;
                Ok(match unary.op.kind {
                    UnaryOpKind::Neg => Expr::neg(operand),
                })
            },
            ast::Expr::Binary(binary) => {
                let lhs = Expr::try_from(*binary.lhs)?;
                let rhs = Expr::try_from(*binary.rhs)?;
                Ok(match binary.op.kind {
                    BinOpKind::Exp => Expr::pow(lhs, rhs),
                    BinOpKind::Mul => Expr::mul([lhs, rhs]),
                    BinOpKind::Div => Expr::div(lhs, rhs),
                    BinOpKind::Add => Expr::add([lhs, rhs]),
                    BinOpKind::Sub => Expr::sub(lhs, rhs),
                })
            },
        }
    }
}

/// Parses the source text into an expression.
pub fn parse(input: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(input);
    let expr = parser.try_parse_full::<ast::Expr>()?;
    Expr::try_from(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::{consts::PI, simplify::simplify};

    fn var(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn operators() {
        assert_eq!(parse("a + b * c").unwrap(), Expr::add([var("a"), Expr::mul([var("b"), var("c")])]));
        assert_eq!(parse("a / b").unwrap(), Expr::mul([var("a"), Expr::pow(var("b"), Expr::int(-1))]));
        assert_eq!(parse("1 / b").unwrap(), Expr::pow(var("b"), Expr::int(-1)));
        assert_eq!(parse("-x").unwrap(), Expr::mul([Expr::int(-1), var("x")]));
        assert_eq!(parse("x^y^z").unwrap(), Expr::pow(var("x"), Expr::pow(var("y"), var("z"))));
    }

    #[test]
    fn nested_sums_flatten() {
        assert_eq!(
            parse("x + (y + z)").unwrap(),
            Expr::add([var("x"), var("y"), var("z")]),
        );
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(parse("ln(x)").unwrap(), Expr::log(var("x")));
        assert_eq!(parse("sqrt(exp(x))").unwrap(), Expr::sqrt(Expr::exp(var("x"))));
        assert_eq!(parse("2pi").unwrap(), Expr::mul([Expr::int(2), PI.clone()]));
    }

    #[test]
    fn simplify_parsed() {
        assert_eq!(simplify(&parse("6 + 2/3").unwrap()), Expr::frac(20, 3));
        assert_eq!(simplify(&parse("x * (1 / x)").unwrap()), Expr::int(1));
        assert_eq!(simplify(&parse("(x^2)^3").unwrap()), Expr::pow(var("x"), Expr::int(6)));
    }

    #[test]
    fn undefined_function() {
        let err = parse("sqr(x)").unwrap_err();
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn wrong_argument_count() {
        let err = parse("log(x, 2)").unwrap_err();
        assert_eq!(err.spans, vec![0..4, 8..9]);
    }

    #[test]
    fn integer_overflow() {
        let err = parse("1 + 99999999999999999999").unwrap_err();
        assert_eq!(err.spans, vec![4..24]);
    }

    #[test]
    fn syntax_error() {
        let err = parse("1 +").unwrap_err();
        assert_eq!(err.spans, vec![3..3]);
    }
}
