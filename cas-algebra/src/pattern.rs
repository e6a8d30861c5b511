//! Structural pattern matching.
//!
//! A pattern is an ordinary [`Expr`] in which some variables are flagged as pattern variables
//! (see [`Expr::pattern_var`]). [`pattern_match`] walks the expression and the pattern in lockstep,
//! binding each pattern variable to the sub-expression at its position.
//!
//! Sums and products are matched operand-by-operand, in order. There is no search over
//! permutations of commutative operands; patterns are written against the canonical order the
//! simplifier sorts operands into.

use crate::expr::Expr;
use std::collections::HashMap;

/// Maps the names of pattern variables to the expressions they matched.
pub type Bindings = HashMap<String, Expr>;

/// Returns true if `expr` matches `pattern`, recording the matched sub-expressions in `bindings`.
///
/// A pattern variable that is already bound only matches an expression equal to its bound value,
/// so a pattern variable that occurs more than once forces those positions to be equal. A
/// constrained pattern variable also requires its constraint to hold before it is bound.
///
/// Bindings made before a failed match are **not** rolled back. Use a fresh, empty [`Bindings`] for
/// every top-level match attempt.
///
/// ```
/// use cas_algebra::{pattern::{pattern_match, Bindings}, Expr};
///
/// let pattern = Expr::pow(Expr::pattern_var("base"), Expr::int(2));
/// let expr = Expr::pow(Expr::var("x") + Expr::int(1), Expr::int(2));
///
/// let mut bindings = Bindings::new();
/// assert!(pattern_match(&expr, &pattern, &mut bindings));
/// assert_eq!(bindings["base"], Expr::var("x") + Expr::int(1));
/// ```
pub fn pattern_match(expr: &Expr, pattern: &Expr, bindings: &mut Bindings) -> bool {
    match (expr, pattern) {
        (_, Expr::Variable(var)) if var.pattern => {
            if let Some(bound) = bindings.get(&var.name) {
                let bound = bound.clone();
                return pattern_match(expr, &bound, bindings);
            }

            if let Some(constraint) = &var.constraint {
                if !constraint.is_satisfied_by(expr) {
                    return false;
                }
            }

            bindings.insert(var.name.clone(), expr.clone());
            true
        },
        (Expr::Variable(a), Expr::Variable(b)) => a == b,
        (Expr::Undefined, Expr::Undefined) => true,
        (Expr::Rational(a), Expr::Rational(b)) => a == b,
        (Expr::Add(a), Expr::Add(b)) | (Expr::Mul(a), Expr::Mul(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|(expr, pattern)| pattern_match(expr, pattern, bindings))
        },
        (Expr::Pow(base, exp), Expr::Pow(pattern_base, pattern_exp)) => {
            pattern_match(base, pattern_base, bindings)
                && pattern_match(exp, pattern_exp, bindings)
        },
        (Expr::Exp(arg), Expr::Exp(pattern_arg))
        | (Expr::Log(arg), Expr::Log(pattern_arg))
        | (Expr::Sqrt(arg), Expr::Sqrt(pattern_arg)) => pattern_match(arg, pattern_arg, bindings),
        _ => false,
    }
}

/// Returns true if `pattern` contains no variables other than pattern variables.
pub fn is_pure_pattern(pattern: &Expr) -> bool {
    pattern.variables().iter().all(|var| var.pattern)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::expr::constraint::{IsInteger, PositiveRational};

    fn matches(expr: &Expr, pattern: &Expr) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        pattern_match(expr, pattern, &mut bindings).then_some(bindings)
    }

    #[test]
    fn pattern_variable_matches_anything() {
        let pattern = Expr::pattern_var("x");
        for expr in [Expr::int(3), Expr::var("y"), Expr::Undefined, Expr::exp(Expr::var("z"))] {
            let bindings = matches(&expr, &pattern).unwrap();
            assert_eq!(bindings["x"], expr);
        }
    }

    #[test]
    fn repeated_pattern_variable() {
        let two_x = Expr::pow(Expr::int(2), Expr::var("x"));
        let expr = Expr::mul([two_x.clone(), Expr::exp(two_x.clone())]);
        let pattern = Expr::mul([Expr::pattern_var("x"), Expr::exp(Expr::pattern_var("x"))]);

        let bindings = matches(&expr, &pattern).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings["x"], two_x);

        let mismatched = Expr::mul([Expr::var("a"), Expr::exp(Expr::var("b"))]);
        assert!(matches(&mismatched, &pattern).is_none());
    }

    #[test]
    fn literal_variables() {
        assert!(matches(&Expr::var("x"), &Expr::var("x")).is_some());
        assert!(matches(&Expr::var("y"), &Expr::var("x")).is_none());
        assert!(matches(&Expr::var("x"), &Expr::constr_var("x", IsInteger)).is_none());
    }

    #[test]
    fn constrained_pattern_variable() {
        let pattern = Expr::pow(Expr::int(0), Expr::constr_pattern_var("n", PositiveRational));
        assert!(matches(&Expr::pow(Expr::int(0), Expr::frac(1, 2)), &pattern).is_some());
        assert!(matches(&Expr::pow(Expr::int(0), Expr::int(-2)), &pattern).is_none());
        assert!(matches(&Expr::pow(Expr::int(0), Expr::var("n")), &pattern).is_none());
    }

    #[test]
    fn leaves_match_by_equality() {
        assert!(matches(&Expr::Undefined, &Expr::Undefined).is_some());
        assert!(matches(&Expr::int(2), &Expr::Undefined).is_none());
        assert!(matches(&Expr::frac(2, 4), &Expr::frac(1, 2)).is_some());
        assert!(matches(&Expr::int(1), &Expr::int(2)).is_none());
    }

    #[test]
    fn sums_match_in_order() {
        let pattern = Expr::add([Expr::pattern_var("a"), Expr::var("y")]);
        let bindings = matches(&Expr::add([Expr::var("x"), Expr::var("y")]), &pattern).unwrap();
        assert_eq!(bindings["a"], Expr::var("x"));

        // no commutative search
        assert!(matches(&Expr::add([Expr::var("y"), Expr::var("x")]), &pattern).is_none());

        // operand counts must agree
        let three = Expr::add([Expr::var("w"), Expr::var("x"), Expr::var("y")]);
        assert!(matches(&three, &pattern).is_none());

        // kinds must agree
        assert!(matches(&Expr::mul([Expr::var("x"), Expr::var("y")]), &pattern).is_none());
    }

    #[test]
    fn functions_recurse() {
        let pattern = Expr::log(Expr::exp(Expr::pattern_var("u")));
        let bindings = matches(&Expr::log(Expr::exp(Expr::var("t"))), &pattern).unwrap();
        assert_eq!(bindings["u"], Expr::var("t"));
        assert!(matches(&Expr::sqrt(Expr::exp(Expr::var("t"))), &pattern).is_none());
    }

    #[test]
    fn pure_patterns() {
        assert!(is_pure_pattern(&Expr::pow(Expr::pattern_var("x"), Expr::int(0))));
        assert!(!is_pure_pattern(&Expr::pow(Expr::pattern_var("x"), Expr::var("n"))));
    }
}
