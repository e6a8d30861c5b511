//! Simplification rules for sums, including combining like terms.

use crate::{
    expr::Expr,
    order::{is_sorted, top_operand_sort},
    rational::Rational,
    simplify::{Rule, Step},
};
use super::{adjacent_rationals, find_pair, operands};

/// `+(a) = a`
fn single_term(expr: &Expr) -> Expr {
    expr.operand(1).clone()
}

/// `a + (b + c) = a + b + c`
fn flatten(expr: &Expr) -> Expr {
    Expr::add(operands(expr).iter().cloned())
}

/// `0 + a = a`
/// `a + 0 = a`
fn add_zero(expr: &Expr) -> Expr {
    let terms = operands(expr).iter()
        .filter(|term| !term.is_zero())
        .cloned()
        .collect();
    Expr::Add(terms).downgrade()
}

/// Adds the first two adjacent rational terms.
fn fold_rationals(expr: &Expr) -> Expr {
    let mut terms = operands(expr).to_vec();
    let Some(i) = adjacent_rationals(&terms) else {
        return expr.clone();
    };

    let sum = terms[i].as_rational()
        .zip(terms[i + 1].as_rational())
        .and_then(|(a, b)| a.checked_add(b))
        .map_or(Expr::Undefined, Expr::Rational);
    terms[i] = sum;
    terms.remove(i + 1);
    Expr::Add(terms).downgrade()
}

/// Utility function to split a term into its rational coefficient and the rest of the term. If the
/// term is not a product with a leading rational, the coefficient is 1.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
fn split_coefficient(term: &Expr) -> (Rational, Expr) {
    if let Expr::Mul(factors) = term {
        if let Some((Expr::Rational(coeff), rest)) = factors.split_first() {
            return (*coeff, Expr::Mul(rest.to_vec()).downgrade());
        }
    }
    (Rational::from(1), term.clone())
}

fn like_terms(terms: &[Expr]) -> Option<(usize, usize)> {
    find_pair(terms, |term| split_coefficient(term).1)
}

/// Combines the first pair of like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
fn combine_like_terms(expr: &Expr) -> Expr {
    let mut terms = operands(expr).to_vec();
    let Some((i, j)) = like_terms(&terms) else {
        return expr.clone();
    };

    let (a, rest) = split_coefficient(&terms[i]);
    let (b, _) = split_coefficient(&terms[j]);
    let Some(coeff) = a.checked_add(b) else {
        return Expr::Undefined;
    };

    terms.remove(j);
    if coeff.is_zero() {
        terms.remove(i);
    } else if coeff.is_one() {
        terms[i] = rest;
    } else {
        terms[i] = Expr::mul([Expr::Rational(coeff), rest]);
    }
    Expr::Add(terms).downgrade()
}

/// Sorts terms that fell out of canonical order when they were simplified.
fn sort_terms(expr: &Expr) -> Expr {
    top_operand_sort(expr.clone())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::predicate(Step::EmptySum, |expr| operands(expr).is_empty(), |_| Expr::int(0)),
        Rule::pattern(Step::SingleTerm, Expr::add([Expr::pattern_var("a")]), single_term),
        Rule::predicate(
            Step::FlattenSum,
            |expr| operands(expr).iter().any(|term| matches!(term, Expr::Add(_))),
            flatten,
        ),
        Rule::predicate(Step::AddZero, |expr| operands(expr).iter().any(Expr::is_zero), add_zero),
        Rule::predicate(
            Step::FoldSum,
            |expr| adjacent_rationals(operands(expr)).is_some(),
            fold_rationals,
        ),
        Rule::predicate(
            Step::CombineLikeTerms,
            |expr| like_terms(operands(expr)).is_some(),
            combine_like_terms,
        ),
        Rule::predicate(Step::SortTerms, |expr| !is_sorted(operands(expr)), sort_terms),
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
    fn split() {
        let term = Expr::mul([Expr::frac(1, 4), var("a"), var("b")]);
        assert_eq!(split_coefficient(&term), (Rational::new(1, 4).unwrap(), Expr::mul([var("a"), var("b")])));
        assert_eq!(split_coefficient(&var("a")), (Rational::from(1), var("a")));
    }

    #[test]
    fn combine_opposites() {
        let expr = Expr::add([Expr::int(1), var("a"), Expr::neg(var("a"))]);
        assert_eq!(combine_like_terms(&expr), Expr::int(1));
    }

    #[test]
    fn fold_adjacent() {
        let expr = Expr::add([Expr::frac(1, 2), Expr::frac(1, 2), var("x")]);
        assert_eq!(fold_rationals(&expr), Expr::add([Expr::int(1), var("x")]));

        let overflow = Expr::add([Expr::int(i64::MAX), Expr::int(1)]);
        assert_eq!(fold_rationals(&overflow), Expr::Undefined);
    }
}
