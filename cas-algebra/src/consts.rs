//! Named constants. Each constant is a [`Variable`](crate::Variable) with a fixed numeric
//! approximation: it simplifies and differentiates like any other symbol, and evaluates to its
//! value.

use once_cell::sync::Lazy;
use crate::expr::Expr;

pub static PI: Lazy<Expr> = Lazy::new(|| Expr::real("pi", std::f64::consts::PI));

/// Euler's number.
pub static E: Lazy<Expr> = Lazy::new(|| Expr::real("e", std::f64::consts::E));

/// Returns the constant with the given name, if there is one.
pub fn lookup(name: &str) -> Option<&'static Expr> {
    match name {
        "pi" => Some(&PI),
        "e" => Some(&E),
        _ => None,
    }
}
