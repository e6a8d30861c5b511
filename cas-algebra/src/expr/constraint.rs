//! Predicates that a constrained variable's match must satisfy.

use super::Expr;
use std::fmt::Debug;

/// A named predicate over expressions.
///
/// Constraints are attached to [`Variable`](super::Variable)s. When a constrained pattern variable
/// is matched against an expression, the expression must satisfy the constraint for the match to
/// succeed.
///
/// Constraints are compared and ordered by [`Constraint::name`], so two constraints with the same
/// name must accept exactly the same expressions.
pub trait Constraint: Debug + Send + Sync {
    /// A short name identifying this constraint.
    fn name(&self) -> &str;

    /// Returns true if the given expression satisfies the constraint.
    fn is_satisfied_by(&self, expr: &Expr) -> bool;
}

/// Accepts rational numbers strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveRational;

impl Constraint for PositiveRational {
    fn name(&self) -> &str {
        "positive_rational"
    }

    fn is_satisfied_by(&self, expr: &Expr) -> bool {
        expr.as_rational().is_some_and(|r| r.is_positive())
    }
}

/// Accepts rational numbers less than or equal to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositiveRational;

impl Constraint for NonPositiveRational {
    fn name(&self) -> &str {
        "non_positive_rational"
    }

    fn is_satisfied_by(&self, expr: &Expr) -> bool {
        expr.as_rational().is_some_and(|r| !r.is_positive())
    }
}

/// Accepts any rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsRational;

impl Constraint for IsRational {
    fn name(&self) -> &str {
        "rational"
    }

    fn is_satisfied_by(&self, expr: &Expr) -> bool {
        expr.as_rational().is_some()
    }
}

/// Accepts integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsInteger;

impl Constraint for IsInteger {
    fn name(&self) -> &str {
        "integer"
    }

    fn is_satisfied_by(&self, expr: &Expr) -> bool {
        expr.as_integer().is_some()
    }
}

/// An ad-hoc constraint built from a plain function.
#[derive(Clone, Copy)]
pub struct FnConstraint {
    pub name: &'static str,
    pub predicate: fn(&Expr) -> bool,
}

impl Debug for FnConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FnConstraint").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Constraint for FnConstraint {
    fn name(&self) -> &str {
        self.name
    }

    fn is_satisfied_by(&self, expr: &Expr) -> bool {
        (self.predicate)(expr)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::pattern::{pattern_match, Bindings};

    fn is_even(expr: &Expr) -> bool {
        expr.as_integer().is_some_and(|n| n % 2 == 0)
    }

    const EVEN: FnConstraint = FnConstraint { name: "even", predicate: is_even };

    #[test]
    fn fn_constraint_filters_matches() {
        let pattern = Expr::pow(Expr::var("x"), Expr::constr_pattern_var("n", EVEN));

        let mut bindings = Bindings::new();
        assert!(pattern_match(&Expr::pow(Expr::var("x"), Expr::int(4)), &pattern, &mut bindings));
        assert_eq!(bindings["n"], Expr::int(4));

        for exponent in [Expr::int(3), Expr::frac(1, 2), Expr::var("n")] {
            let mut bindings = Bindings::new();
            assert!(!pattern_match(&Expr::pow(Expr::var("x"), exponent), &pattern, &mut bindings));
        }
    }

    #[test]
    fn constraints_with_the_same_name_are_equal() {
        let reject_all = FnConstraint { name: "even", predicate: |_| false };
        assert_eq!(Expr::constr_var("n", EVEN), Expr::constr_var("n", reject_all));

        let named_like_builtin = FnConstraint { name: "integer", predicate: is_even };
        assert_eq!(Expr::constr_var("n", IsInteger), Expr::constr_var("n", named_like_builtin));
        assert_ne!(Expr::constr_var("n", EVEN), Expr::constr_var("n", IsInteger));
    }

    #[test]
    fn debug_shows_the_name() {
        assert_eq!(format!("{:?}", EVEN), "FnConstraint { name: \"even\", .. }");
    }
}
