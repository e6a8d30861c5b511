//! The canonical order over expressions, used to sort the operands of sums and products.
//!
//! [`compare`] implements the order relation for automatically simplified expressions described
//! by Cohen (_Computer Algebra and Symbolic Computation: Mathematical Methods_, figure 3.9),
//! extended with the `exp`, `log`, and `sqrt` functions.
//!
//! When two expressions of different kinds are compared, the one whose kind has the lower
//! [`promotion rank`](rank) is rewritten into the shape of the other and the comparison recurses.
//! For example, comparing `x` against `x^2` compares `x^1` against `x^2`, so `x` comes first. If
//! the rewritten expression turns out to be equal to the other one, the expression of the lower
//! rank comes first.

use crate::expr::{Expr, Variable};
use std::cmp::Ordering;

/// The promotion rank of each kind of expression. An expression is promoted into the shape of a
/// higher-ranked expression when the two are compared.
fn rank(expr: &Expr) -> u8 {
    match expr {
        Expr::Undefined => 0,
        Expr::Rational(_) => 1,
        Expr::Variable(_) => 2,
        Expr::Exp(_) | Expr::Log(_) | Expr::Sqrt(_) => 3,
        Expr::Add(_) => 4,
        Expr::Pow(..) => 5,
        Expr::Mul(_) => 6,
    }
}

/// Orders the unary functions among themselves when their arguments are equal.
fn function_rank(expr: &Expr) -> u8 {
    match expr {
        Expr::Exp(_) => 0,
        Expr::Log(_) => 1,
        Expr::Sqrt(_) => 2,
        _ => unreachable!("only called on unary functions"),
    }
}

/// Rewrites `expr` into the shape of `target`, which must have a higher [`rank`].
fn promote(expr: &Expr, target: &Expr) -> Expr {
    let expr = expr.clone();
    match target {
        Expr::Mul(_) => Expr::Mul(vec![expr]),
        Expr::Pow(..) => Expr::pow(expr, Expr::int(1)),
        Expr::Add(_) => Expr::Add(vec![expr]),
        Expr::Exp(_) => Expr::exp(expr),
        Expr::Log(_) => Expr::log(expr),
        Expr::Sqrt(_) => Expr::sqrt(expr),
        Expr::Undefined | Expr::Rational(_) | Expr::Variable(_) => {
            unreachable!("nothing is promoted into a leaf")
        },
    }
}

/// Compares variables by name, then pattern flag, then constraint name.
fn compare_variables(a: &Variable, b: &Variable) -> bool {
    let key = |v: &'_ Variable| (v.name.clone(), v.pattern, v.constraint_name().map(str::to_owned));
    key(a) < key(b)
}

/// Compares two operand lists starting from the **last** operand. The first unequal pair decides;
/// if one list is a suffix of the other, the shorter list comes first.
fn compare_operands_backward(a: &[Expr], b: &[Expr]) -> bool {
    for (a, b) in a.iter().rev().zip(b.iter().rev()) {
        if a != b {
            return compare(a, b);
        }
    }
    a.len() < b.len()
}

/// Returns true if `a` comes strictly before `b` in the canonical order.
///
/// The order is total and strict over simplified expressions: for any two simplified expressions
/// `a` and `b`, exactly one of `compare(a, b)`, `compare(b, a)`, or `a == b` holds.
pub fn compare(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Undefined, Expr::Undefined) => false,
        (Expr::Rational(a), Expr::Rational(b)) => a < b,
        (Expr::Variable(a), Expr::Variable(b)) => compare_variables(a, b),
        (Expr::Add(a), Expr::Add(b)) | (Expr::Mul(a), Expr::Mul(b)) => compare_operands_backward(a, b),
        (Expr::Pow(a_base, a_exp), Expr::Pow(b_base, b_exp)) => {
            if a_base != b_base {
                compare(a_base, b_base)
            } else {
                compare(a_exp, b_exp)
            }
        },
        (
            Expr::Exp(a_arg) | Expr::Log(a_arg) | Expr::Sqrt(a_arg),
            Expr::Exp(b_arg) | Expr::Log(b_arg) | Expr::Sqrt(b_arg),
        ) => {
            if a_arg != b_arg {
                compare(a_arg, b_arg)
            } else {
                function_rank(a) < function_rank(b)
            }
        },

        // leaves that are never promoted
        (Expr::Undefined, _) => true,
        (_, Expr::Undefined) => false,
        (Expr::Rational(_), _) => true,
        (_, Expr::Rational(_)) => false,

        _ => match rank(a).cmp(&rank(b)) {
            Ordering::Less => {
                let promoted = promote(a, b);
                if &promoted == b {
                    true
                } else {
                    compare(&promoted, b)
                }
            },
            Ordering::Greater => {
                let promoted = promote(b, a);
                if &promoted == a {
                    false
                } else {
                    compare(a, &promoted)
                }
            },
            Ordering::Equal => unreachable!("same-rank pairs are handled above"),
        },
    }
}

/// Sorts the immediate operands of a sum or product into canonical order. Operands of operands
/// are not touched, and any other kind of expression is returned unchanged.
///
/// This is an insertion sort, which is fast for the short operand lists that sums and products
/// usually have.
pub fn top_operand_sort(expr: Expr) -> Expr {
    fn sort(ops: &mut [Expr]) {
        for i in 1..ops.len() {
            let mut j = i;
            while j > 0 && compare(&ops[j], &ops[j - 1]) {
                ops.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    match expr {
        Expr::Add(mut ops) => {
            sort(&mut ops);
            Expr::Add(ops)
        },
        Expr::Mul(mut ops) => {
            sort(&mut ops);
            Expr::Mul(ops)
        },
        expr => expr,
    }
}

/// Returns true if no operand of the sum or product comes strictly before the one preceding it.
pub fn is_sorted(ops: &[Expr]) -> bool {
    ops.windows(2).all(|pair| !compare(&pair[1], &pair[0]))
}
