//! Symbolic algebra over exact rational numbers.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`Expr`] nodes. Sums and products are n-ary and
//! **flattened**: `x + (y + z)` is a single [`Expr::Add`] node with three terms. This makes it easy
//! to combine like terms, since all of the terms in question live at the same level of the tree.
//!
//! Numbers are exact [`Rational`]s. Operations with no meaningful result (division by zero, `0^0`,
//! overflow) produce [`Expr::Undefined`] instead of failing.
//!
//! # Simplification
//!
//! [`simplify()`] rewrites an expression into its canonical form, the _automatically simplified
//! algebraic expression_ (ASAE). Operands of sums and products are sorted into the canonical
//! order defined by [`compare()`], and a table of rewrite rules ([`simplify::RuleSet`]) is applied
//! bottom-up until nothing changes.
//!
//! ```
//! use cas_algebra::{parse, simplify, Expr};
//!
//! let expr = parse("x + 2x + 3").unwrap();
//! assert_eq!(simplify(&expr).to_string(), "3 + 3 * x");
//!
//! let expr = Expr::var("x") * Expr::div(Expr::int(1), Expr::var("x"));
//! assert_eq!(simplify(&expr), Expr::int(1));
//! ```

pub mod consts;
pub mod derivative;
pub mod eval;
pub mod expr;
pub mod order;
pub mod parse;
pub mod pattern;
pub mod rational;
pub mod simplify;
pub mod step_collector;

pub use derivative::{d, derivative};
pub use eval::{eval, Arguments};
pub use expr::{Expr, Variable};
pub use order::{compare, top_operand_sort};
pub use parse::parse;
pub use pattern::{pattern_match, Bindings};
pub use rational::Rational;
pub use simplify::{simplify, simplify_with_steps, Simplifier};
pub use step_collector::StepCollector;

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;
    use super::Expr;

    /// Generates small, arbitrarily nested expressions over the variables `x`, `y` and `z`.
    pub fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            8 => (-5i64..5).prop_map(Expr::int),
            2 => (-5i64..5, 1i64..5).prop_map(|(num, den)| Expr::frac(num, den)),
            8 => prop::sample::select(vec!["x", "y", "z"]).prop_map(|name| Expr::var(name)),
            1 => Just(Expr::Undefined),
        ];

        leaf.prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Expr::add),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Expr::mul),
                (inner.clone(), inner.clone()).prop_map(|(base, exp)| Expr::pow(base, exp)),
                inner.clone().prop_map(Expr::exp),
                inner.clone().prop_map(Expr::log),
                inner.prop_map(Expr::sqrt),
            ]
        })
    }
}
