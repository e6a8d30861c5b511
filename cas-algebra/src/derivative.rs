//! Symbolic differentiation.

use crate::{expr::Expr, simplify::simplify};

/// Returns true if the expression contains a variable with the given name.
fn depends_on(expr: &Expr, var: &str) -> bool {
    expr.variables().iter().any(|v| v.name == var)
}

/// Differentiates the expression with respect to the variable with the given name, without
/// simplifying the result.
///
/// Every variable with a different name, including named constants such as `pi`, is treated as a
/// constant.
pub fn derivative(expr: &Expr, var: &str) -> Expr {
    match expr {
        Expr::Undefined => Expr::Undefined,
        Expr::Rational(_) => Expr::int(0),
        Expr::Variable(v) => Expr::int((v.name == var).into()),

        // (f + g)' = f' + g'
        Expr::Add(terms) => Expr::Add(terms.iter().map(|term| derivative(term, var)).collect()),

        // (f * g * h)' = f' * g * h + f * g' * h + f * g * h'
        Expr::Mul(factors) => {
            let terms = (0..factors.len())
                .map(|i| {
                    let mut factors = factors.clone();
                    factors[i] = derivative(&factors[i], var);
                    Expr::Mul(factors)
                })
                .collect();
            Expr::Add(terms)
        },

        Expr::Pow(base, exponent) => {
            if depends_on(exponent, var) {
                // f^g = exp(g * log(f))
                let rewritten = Expr::exp(Expr::mul([(**exponent).clone(), Expr::log((**base).clone())]));
                derivative(&rewritten, var)
            } else {
                // (f^n)' = n * f^(n - 1) * f'
                Expr::mul([
                    (**exponent).clone(),
                    Expr::pow((**base).clone(), Expr::add([(**exponent).clone(), Expr::int(-1)])),
                    derivative(base, var),
                ])
            }
        },

        // exp(f)' = exp(f) * f'
        Expr::Exp(arg) => Expr::mul([expr.clone(), derivative(arg, var)]),

        // log(f)' = f^-1 * f'
        Expr::Log(arg) => Expr::mul([
            Expr::pow((**arg).clone(), Expr::int(-1)),
            derivative(arg, var),
        ]),

        // sqrt(f)' = 1/2 * sqrt(f)^-1 * f'
        Expr::Sqrt(arg) => Expr::mul([
            Expr::frac(1, 2),
            Expr::pow(expr.clone(), Expr::int(-1)),
            derivative(arg, var),
        ]),
    }
}

/// Differentiates the expression with respect to the variable with the given name, and simplifies
/// the result.
///
/// ```
/// use cas_algebra::{d, Expr};
///
/// let x = Expr::var("x");
/// let expr = Expr::pow(x.clone(), Expr::int(3));
/// assert_eq!(d(&expr, "x"), Expr::mul([Expr::int(3), Expr::pow(x, Expr::int(2))]));
/// ```
pub fn d(expr: &Expr, var: &str) -> Expr {
    simplify(&derivative(expr, var))
}
