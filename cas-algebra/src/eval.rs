//! Numeric evaluation of expressions.

use crate::{expr::Expr, simplify::simplify};
use std::{collections::HashMap, error::Error, fmt};

/// The values to evaluate an expression with, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(HashMap<String, f64>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the variable with the given name to a value. Each variable can only be bound once.
    pub fn add_argument(&mut self, name: impl Into<String>, value: f64) -> Result<(), DuplicateArgument> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(DuplicateArgument { name });
        }
        self.0.insert(name, value);
        Ok(())
    }

    /// Returns the value bound to the variable with the given name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

/// A variable was bound more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateArgument {
    /// The name of the variable.
    pub name: String,
}

impl fmt::Display for DuplicateArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "the variable `{}` already has a value", self.name)
    }
}

impl Error for DuplicateArgument {}

/// Evaluates a simplified expression.
fn evaluate(expr: &Expr, args: &Arguments) -> f64 {
    match expr {
        Expr::Undefined => f64::NAN,
        Expr::Rational(r) => r.to_f64(),
        Expr::Variable(var) => args.get(&var.name)
            .or(var.value)
            .unwrap_or(f64::NAN),
        Expr::Add(terms) => terms.iter().map(|term| evaluate(term, args)).sum(),
        Expr::Mul(factors) => factors.iter().map(|factor| evaluate(factor, args)).product(),
        Expr::Pow(base, exponent) => evaluate(base, args).powf(evaluate(exponent, args)),
        Expr::Exp(arg) => evaluate(arg, args).exp(),
        Expr::Log(arg) => evaluate(arg, args).ln(),
        Expr::Sqrt(arg) => evaluate(arg, args).sqrt(),
    }
}

/// Simplifies the expression once, and returns a function that evaluates it.
///
/// [`Expr::Undefined`] and variables with no value evaluate to NaN. Named constants such as `pi`
/// evaluate to their approximation unless the arguments bind them to something else.
///
/// ```
/// use cas_algebra::{eval, Arguments, Expr};
///
/// let f = eval(&(Expr::var("x") * Expr::var("x") + Expr::int(1)));
///
/// let mut args = Arguments::new();
/// args.add_argument("x", 3.0).unwrap();
/// assert_eq!(f(&args), 10.0);
/// ```
pub fn eval(expr: &Expr) -> impl Fn(&Arguments) -> f64 {
    let simplified = simplify(expr);
    move |args| evaluate(&simplified, args)
}

impl Expr {
    /// Approximates the value of the expression with no variables bound.
    pub fn approx(&self) -> f64 {
        eval(self)(&Arguments::new())
    }
}
