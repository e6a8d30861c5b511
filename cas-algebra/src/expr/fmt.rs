//! Formatting of expressions as infix text.
//!
//! The output is valid input for the parser, and parenthesizes only where the grammar requires
//! it. Sums with negative terms are written with `-`, and a leading `-1` factor is written as
//! unary negation.

use super::Expr;
use crate::rational::Rational;
use std::fmt::{self, Display, Formatter};

/// Binding strength of an expression when printed, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Strength {
    Sum,
    Product,
    Power,
    Atom,
}

impl Expr {
    fn strength(&self) -> Strength {
        match self {
            // a lone operand is printed bare
            Self::Add(ops) | Self::Mul(ops) if ops.len() == 1 => ops[0].strength(),
            Self::Add(terms) if terms.len() > 1 => Strength::Sum,
            Self::Mul(factors) if factors.len() > 1 => Strength::Product,
            // a negative number or fraction reads as an operation
            Self::Rational(Rational::Fraction(_)) => Strength::Product,
            Self::Rational(r) if r.is_negative() => Strength::Product,
            Self::Pow(..) => Strength::Power,
            _ => Strength::Atom,
        }
    }

    /// If this term is negative (a negative rational, or a product with a negative rational
    /// coefficient), returns its absolute value.
    fn negated_term(&self) -> Option<Expr> {
        match self {
            Self::Rational(r) if r.is_negative() => Some(Self::Rational(r.checked_neg()?)),
            Self::Mul(factors) if factors.len() > 1 => {
                let coeff = factors[0].as_rational().filter(Rational::is_negative)?;
                let abs = coeff.checked_neg()?;
                let rest = factors[1..].iter().cloned();
                if abs.is_one() {
                    Some(Self::Mul(rest.collect()).downgrade())
                } else {
                    Some(Self::Mul(std::iter::once(Self::Rational(abs)).chain(rest).collect()))
                }
            },
            _ => None,
        }
    }
}

/// Writes `expr`, surrounded by parentheses if it binds looser than `min`.
fn write_grouped(f: &mut Formatter<'_>, expr: &Expr, min: Strength) -> fmt::Result {
    if expr.strength() < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Rational(r) => write!(f, "{}", r),
            Self::Variable(var) => {
                if var.pattern {
                    write!(f, "?")?;
                }
                write!(f, "{}", var.name)
            },
            Self::Add(terms) => {
                let mut iter = terms.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "0");
                };
                write_grouped(f, first, Strength::Sum)?;
                for term in iter {
                    match term.negated_term() {
                        Some(abs) => {
                            write!(f, " - ")?;
                            write_grouped(f, &abs, Strength::Product)?;
                        },
                        None => {
                            write!(f, " + ")?;
                            write_grouped(f, term, Strength::Product)?;
                        },
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "1");
                };

                if first.as_integer() == Some(-1) && factors.len() > 1 {
                    write!(f, "-")?;
                    let rest = Self::Mul(factors[1..].to_vec()).downgrade();
                    // `-x^2` already means `-(x^2)`, but a product must be grouped to keep the
                    // negation on the whole thing
                    return write_grouped(f, &rest, Strength::Power);
                }

                if first.as_rational().is_some() {
                    write!(f, "{}", first)?;
                } else {
                    write_grouped(f, first, Strength::Power)?;
                }
                for factor in iter {
                    write!(f, " * ")?;
                    write_grouped(f, factor, Strength::Power)?;
                }
                Ok(())
            },
            Self::Pow(base, exponent) => {
                write_grouped(f, base, Strength::Atom)?;
                write!(f, "^")?;
                match **exponent {
                    // a negative integer exponent parses as unary negation
                    Self::Rational(Rational::Integer(_)) => write!(f, "{}", exponent),
                    _ => write_grouped(f, exponent, Strength::Power),
                }
            },
            Self::Exp(arg) => write!(f, "exp({})", arg),
            Self::Log(arg) => write!(f, "log({})", arg),
            Self::Sqrt(arg) => write!(f, "sqrt({})", arg),
        }
    }
}
