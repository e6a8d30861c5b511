//! The standard simplification rules.
//!
//! Each module builds the ordered rule list for one kind of expression. Rules are tried in the
//! order they are listed, so cheap structural cleanups (such as flattening nested sums) come
//! before the rules that rely on a clean shape.

pub mod add;
pub mod function;
pub mod multiply;
pub mod power;

use crate::expr::Expr;

/// Returns the operands of a sum or product, or nothing for any other kind of expression.
pub(crate) fn operands(expr: &Expr) -> &[Expr] {
    match expr {
        Expr::Add(ops) | Expr::Mul(ops) => ops,
        _ => &[],
    }
}

/// Returns the index of the first operand that is immediately followed by another rational, if
/// both are rational.
pub(crate) fn adjacent_rationals(ops: &[Expr]) -> Option<usize> {
    ops.windows(2).position(|pair| {
        matches!(pair, [Expr::Rational(_), Expr::Rational(_)])
    })
}

/// Finds the first pair of non-rational operands `(i, j)`, `i < j`, for which `key` produces the
/// same value.
pub(crate) fn find_pair(ops: &[Expr], key: impl Fn(&Expr) -> Expr) -> Option<(usize, usize)> {
    let keys = ops.iter()
        .map(|op| match op {
            Expr::Rational(_) => None,
            op => Some(key(op)),
        })
        .collect::<Vec<_>>();

    keys.iter().enumerate().find_map(|(i, a)| {
        let a = a.as_ref()?;
        keys[i + 1..].iter()
            .position(|b| b.as_ref() == Some(a))
            .map(|offset| (i, i + 1 + offset))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn find_adjacent_rationals() {
        let ops = [Expr::var("x"), Expr::int(1), Expr::frac(1, 2), Expr::int(3)];
        assert_eq!(adjacent_rationals(&ops), Some(1));
        assert_eq!(adjacent_rationals(&ops[..2]), None);
    }

    #[test]
    fn find_pair_skips_rationals() {
        let ops = [Expr::int(2), Expr::var("x"), Expr::int(2), Expr::var("y"), Expr::var("x")];
        assert_eq!(find_pair(&ops, Expr::clone), Some((1, 4)));
        assert_eq!(find_pair(&ops[..4], Expr::clone), None);
    }
}
