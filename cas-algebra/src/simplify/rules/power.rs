//! Simplification rules for powers.

use crate::{
    expr::{constraint::{IsInteger, IsRational, NonPositiveRational, PositiveRational}, Expr},
    simplify::{Rule, Step},
};

/// The base and exponent of a power.
fn split(expr: &Expr) -> (&Expr, &Expr) {
    (expr.operand(1), expr.operand(2))
}

/// Raises a rational base to an integer exponent. Overflow gives [`Expr::Undefined`].
fn fold_power(expr: &Expr) -> Expr {
    let (base, exponent) = split(expr);
    base.as_rational()
        .zip(exponent.as_integer())
        .and_then(|(base, exponent)| base.checked_pow(exponent))
        .map_or(Expr::Undefined, Expr::Rational)
}

/// `(a^b)^c = a^(b*c)`
fn power_of_power(expr: &Expr) -> Expr {
    let (inner, c) = split(expr);
    let (a, b) = split(inner);
    Expr::pow(a.clone(), Expr::mul([b.clone(), c.clone()]))
}

/// `(a*b)^n = a^n * b^n`
fn power_of_product(expr: &Expr) -> Expr {
    let (base, exponent) = split(expr);
    let factors = (1..=base.num_operands())
        .map(|n| Expr::pow(base.operand(n).clone(), exponent.clone()));
    Expr::Mul(factors.collect())
}

pub fn rules() -> Vec<Rule> {
    let a = || Expr::pattern_var("a");

    vec![
        Rule::pattern(
            Step::ZeroPowPositive,
            Expr::pow(Expr::int(0), Expr::constr_pattern_var("n", PositiveRational)),
            |_| Expr::int(0),
        ),
        Rule::pattern(
            Step::ZeroPowNonPositive,
            Expr::pow(Expr::int(0), Expr::constr_pattern_var("n", NonPositiveRational)),
            |_| Expr::Undefined,
        ),
        Rule::pattern(Step::OnePow, Expr::pow(Expr::int(1), a()), |_| Expr::int(1)),
        Rule::pattern(Step::PowZero, Expr::pow(a(), Expr::int(0)), |_| Expr::int(1)),
        Rule::pattern(Step::PowOne, Expr::pow(a(), Expr::int(1)), |expr| split(expr).0.clone()),
        Rule::pattern(
            Step::FoldPower,
            Expr::pow(
                Expr::constr_pattern_var("a", IsRational),
                Expr::constr_pattern_var("n", IsInteger),
            ),
            fold_power,
        ),
        Rule::pattern(
            Step::PowerOfPower,
            Expr::pow(Expr::pow(a(), Expr::pattern_var("b")), Expr::pattern_var("c")),
            power_of_power,
        ),
        Rule::predicate(
            Step::PowerOfProduct,
            |expr| matches!(split(expr).0, Expr::Mul(_)),
            power_of_product,
        ),
    ]
}
