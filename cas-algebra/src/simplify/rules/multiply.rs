//! Simplification rules for products, including combining factors with like bases.

use crate::{
    expr::Expr,
    order::{is_sorted, top_operand_sort},
    simplify::{Rule, Step},
};
use super::{adjacent_rationals, find_pair, operands};

/// `*(a) = a`
fn single_factor(expr: &Expr) -> Expr {
    expr.operand(1).clone()
}

/// `a * (b * c) = a * b * c`
fn flatten(expr: &Expr) -> Expr {
    Expr::mul(operands(expr).iter().cloned())
}

/// `1 * a = a`
/// `a * 1 = a`
fn multiply_one(expr: &Expr) -> Expr {
    let factors = operands(expr).iter()
        .filter(|factor| !factor.is_one())
        .cloned()
        .collect();
    Expr::Mul(factors).downgrade()
}

/// Multiplies the first two adjacent rational factors.
fn fold_rationals(expr: &Expr) -> Expr {
    let mut factors = operands(expr).to_vec();
    let Some(i) = adjacent_rationals(&factors) else {
        return expr.clone();
    };

    let product = factors[i].as_rational()
        .zip(factors[i + 1].as_rational())
        .and_then(|(a, b)| a.checked_mul(b))
        .map_or(Expr::Undefined, Expr::Rational);
    factors[i] = product;
    factors.remove(i + 1);
    Expr::Mul(factors).downgrade()
}

fn like_factors(factors: &[Expr]) -> Option<(usize, usize)> {
    find_pair(factors, Expr::asae_base)
}

/// Combines the first pair of factors with the same base by adding their exponents.
///
/// `a*a = a^2`
/// `a*a^2 = a^3`
/// `a^n*a^m = a^(n+m)`
fn combine_like_factors(expr: &Expr) -> Expr {
    let mut factors = operands(expr).to_vec();
    let Some((i, j)) = like_factors(&factors) else {
        return expr.clone();
    };

    let exponent = Expr::add([factors[i].asae_exponent(), factors[j].asae_exponent()]);
    factors[i] = Expr::pow(factors[i].asae_base(), exponent);
    factors.remove(j);
    Expr::Mul(factors).downgrade()
}

/// Sorts factors that fell out of canonical order when they were simplified.
fn sort_factors(expr: &Expr) -> Expr {
    top_operand_sort(expr.clone())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::predicate(Step::EmptyProduct, |expr| operands(expr).is_empty(), |_| Expr::int(1)),
        Rule::pattern(Step::SingleFactor, Expr::mul([Expr::pattern_var("a")]), single_factor),
        Rule::predicate(
            Step::FlattenProduct,
            |expr| operands(expr).iter().any(|factor| matches!(factor, Expr::Mul(_))),
            flatten,
        ),
        Rule::predicate(
            Step::MultiplyZero,
            |expr| operands(expr).iter().any(Expr::is_zero),
            |_| Expr::int(0),
        ),
        Rule::predicate(Step::MultiplyOne, |expr| operands(expr).iter().any(Expr::is_one), multiply_one),
        Rule::predicate(
            Step::FoldProduct,
            |expr| adjacent_rationals(operands(expr)).is_some(),
            fold_rationals,
        ),
        Rule::predicate(
            Step::CombineLikeFactors,
            |expr| like_factors(operands(expr)).is_some(),
            combine_like_factors,
        ),
        Rule::predicate(Step::SortFactors, |expr| !is_sorted(operands(expr)), sort_factors),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn combine_adds_exponents() {
        let expr = Expr::mul([Expr::int(2), var("x"), var("y"), Expr::pow(var("x"), var("n"))]);
        assert_eq!(combine_like_factors(&expr), Expr::mul([
            Expr::int(2),
            Expr::pow(var("x"), Expr::add([Expr::int(1), var("n")])),
            var("y"),
        ]));
    }

    #[test]
    fn rationals_are_not_bases() {
        let expr = Expr::mul([Expr::int(2), Expr::int(2)]);
        assert_eq!(like_factors(operands(&expr)), None);
    }

    #[test]
    fn fold_adjacent() {
        let expr = Expr::mul([Expr::frac(2, 3), Expr::int(6), var("x")]);
        assert_eq!(fold_rationals(&expr), Expr::mul([Expr::int(4), var("x")]));
    }
}
