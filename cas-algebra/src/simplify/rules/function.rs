//! Simplification rules for the unary functions `exp`, `log` and `sqrt`.

use crate::{expr::Expr, simplify::{Rule, Step}};

pub fn exp_rules() -> Vec<Rule> {
    vec![
        Rule::pattern(Step::ExpZero, Expr::exp(Expr::int(0)), |_| Expr::int(1)),
    ]
}

pub fn log_rules() -> Vec<Rule> {
    vec![
        Rule::pattern(Step::LogOne, Expr::log(Expr::int(1)), |_| Expr::int(0)),
    ]
}

pub fn sqrt_rules() -> Vec<Rule> {
    Vec::new()
}
