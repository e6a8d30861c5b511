//! The symbolic expression tree.
//!
//! [`Expr`] is a closed tagged union of the node kinds the engine understands. Expressions are
//! immutable values: every transformation builds a new tree, cloning only what it needs.
//!
//! # Construction
//!
//! Expressions should be built through the factory functions on [`Expr`] (such as [`Expr::add`]
//! and [`Expr::pow`]) or the arithmetic operators. The factories flatten same-kind nesting, so
//! `Expr::add([x, Expr::add([y, z])])` is a single [`Expr::Add`] with three terms, but otherwise
//! perform no simplification. Full canonicalization only happens in
//! [`simplify`](crate::simplify()).
//!
//! ```
//! use cas_algebra::Expr;
//!
//! let x = Expr::var("x");
//! let y = Expr::var("y");
//! let expr = x.clone() + (y.clone() + Expr::int(1));
//! assert_eq!(expr, Expr::Add(vec![x, y, Expr::int(1)]));
//! ```
//!
//! # Strict equality
//!
//! The [`PartialEq`] implementation for [`Expr`] is **structural**: two expressions are equal if
//! they have the same shape, with operands in the same order. It is not mathematical equivalence;
//! `x + y` and `y + x` are not equal until both have been simplified into canonical order.

pub mod constraint;
mod fmt;
mod iter;

use crate::rational::Rational;
use iter::ExprIter;
use std::{collections::BTreeSet, sync::Arc};

pub use constraint::Constraint;

/// A named variable, such as `x`.
///
/// Variables used inside rule patterns are flagged as **pattern variables**; the
/// [matcher](crate::pattern) binds them to arbitrary sub-expressions instead of comparing them
/// literally. Any variable may carry a [`Constraint`] that a matched expression must satisfy, and
/// named constants such as `pi` carry a fixed numeric approximation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// The name of the variable.
    pub name: String,

    /// Whether this is a pattern variable.
    pub pattern: bool,

    /// A predicate that any expression matched by this variable must satisfy.
    pub constraint: Option<Arc<dyn Constraint>>,

    /// A fixed numeric approximation, used only during numeric evaluation.
    pub value: Option<f64>,
}

impl Variable {
    /// Returns the name of the attached constraint, if any.
    pub fn constraint_name(&self) -> Option<&str> {
        self.constraint.as_ref().map(|c| c.name())
    }
}

/// Variables are compared by name, pattern flag, constraint name, and fixed value.
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pattern == other.pattern
            && self.constraint_name() == other.constraint_name()
            && self.value.map(f64::to_bits) == other.value.map(f64::to_bits)
    }
}

impl Eq for Variable {}

/// A symbolic expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// The result of an undefined operation, such as division by zero. Undefined absorbs every
    /// expression it is part of.
    Undefined,

    /// An exact rational number.
    Rational(Rational),

    /// A variable, possibly a pattern variable or a named constant.
    Variable(Variable),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// A base raised to an exponent.
    Pow(Box<Expr>, Box<Expr>),

    /// The natural exponential function.
    Exp(Box<Expr>),

    /// The natural logarithm.
    Log(Box<Expr>),

    /// The principal square root.
    Sqrt(Box<Expr>),
}

/// Factories.
impl Expr {
    pub fn undefined() -> Self {
        Self::Undefined
    }

    /// Creates an integer.
    pub fn int(n: i64) -> Self {
        Self::Rational(Rational::Integer(n))
    }

    /// Creates the fraction `num / den` in lowest terms. Returns [`Expr::Undefined`] if `den` is
    /// zero, or if the reduced fraction does not fit in [`i64`].
    pub fn frac(num: i64, den: i64) -> Self {
        Rational::new(num, den).map_or(Self::Undefined, Self::Rational)
    }

    /// Creates a variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(Variable {
            name: name.into(),
            pattern: false,
            constraint: None,
            value: None,
        })
    }

    /// Creates a variable with a constraint.
    pub fn constr_var(name: impl Into<String>, constraint: impl Constraint + 'static) -> Self {
        Self::Variable(Variable {
            name: name.into(),
            pattern: false,
            constraint: Some(Arc::new(constraint)),
            value: None,
        })
    }

    /// Creates a pattern variable, which matches any expression.
    pub fn pattern_var(name: impl Into<String>) -> Self {
        Self::Variable(Variable {
            name: name.into(),
            pattern: true,
            constraint: None,
            value: None,
        })
    }

    /// Creates a pattern variable that only matches expressions satisfying the constraint.
    pub fn constr_pattern_var(name: impl Into<String>, constraint: impl Constraint + 'static) -> Self {
        Self::Variable(Variable {
            name: name.into(),
            pattern: true,
            constraint: Some(Arc::new(constraint)),
            value: None,
        })
    }

    /// Creates a named constant with a fixed numeric approximation, such as `pi`.
    ///
    /// Symbolically, the constant behaves exactly like a variable.
    pub fn real(name: impl Into<String>, value: f64) -> Self {
        Self::Variable(Variable {
            name: name.into(),
            pattern: false,
            constraint: None,
            value: Some(value),
        })
    }

    /// Creates a sum of the given terms. Terms that are themselves sums are flattened into this
    /// one.
    pub fn add(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut out = Vec::new();
        for term in terms {
            match term {
                Self::Add(inner) => out.extend(inner),
                term => out.push(term),
            }
        }
        Self::Add(out)
    }

    /// Creates a product of the given factors. Factors that are themselves products are flattened
    /// into this one.
    pub fn mul(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut out = Vec::new();
        for factor in factors {
            match factor {
                Self::Mul(inner) => out.extend(inner),
                factor => out.push(factor),
            }
        }
        Self::Mul(out)
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn exp(arg: Expr) -> Self {
        Self::Exp(Box::new(arg))
    }

    pub fn log(arg: Expr) -> Self {
        Self::Log(Box::new(arg))
    }

    pub fn sqrt(arg: Expr) -> Self {
        Self::Sqrt(Box::new(arg))
    }

    /// `-x = -1 * x`
    pub fn neg(arg: Expr) -> Self {
        Self::mul([Self::int(-1), arg])
    }

    /// `a - b = a + -1 * b`
    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::add([lhs, Self::neg(rhs)])
    }

    /// `a / b = a * b^-1`, or just `b^-1` if `a` is `1`.
    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        let recip = Self::pow(rhs, Self::int(-1));
        if lhs.is_one() {
            recip
        } else {
            Self::mul([lhs, recip])
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::add([self, rhs])
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::sub(self, rhs)
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::mul([self, rhs])
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::div(self, rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::neg(self)
    }
}

impl From<Rational> for Expr {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

/// Accessors.
impl Expr {
    /// If the expression is a rational number, returns it.
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Self::Rational(r) => Some(*r),
            _ => None,
        }
    }

    /// If the expression is an integer, returns it.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_rational()?.as_integer()
    }

    /// If the expression is a variable, returns it.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_rational().is_some_and(|r| r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        self.as_rational().is_some_and(|r| r.is_one())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The base of the expression when viewed as a power: the base of a [`Expr::Pow`], the
    /// expression itself otherwise, and [`Expr::Undefined`] for rational numbers.
    pub fn asae_base(&self) -> Expr {
        match self {
            Self::Rational(_) => Self::Undefined,
            Self::Pow(base, _) => (**base).clone(),
            _ => self.clone(),
        }
    }

    /// The exponent of the expression when viewed as a power: the exponent of a [`Expr::Pow`],
    /// `1` otherwise, and [`Expr::Undefined`] for rational numbers.
    pub fn asae_exponent(&self) -> Expr {
        match self {
            Self::Rational(_) => Self::Undefined,
            Self::Pow(_, exponent) => (**exponent).clone(),
            _ => Self::int(1),
        }
    }

    /// Returns true if both expressions are the same kind of node, without looking at their
    /// operands. Variables are the same kind only if their pattern flags and constraints agree.
    pub fn type_equal(&self, other: &Expr) -> bool {
        match (self, other) {
            (Self::Variable(a), Self::Variable(b)) => {
                a.pattern == b.pattern && a.constraint_name() == b.constraint_name()
            },
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// Generic tree operations.
///
/// Operands are indexed from `1`. Leaves ([`Expr::Undefined`], [`Expr::Rational`], and
/// [`Expr::Variable`]) have no operands. Indexing past [`Expr::num_operands`] is a programming
/// error and panics.
impl Expr {
    pub fn num_operands(&self) -> usize {
        match self {
            Self::Undefined | Self::Rational(_) | Self::Variable(_) => 0,
            Self::Add(ops) | Self::Mul(ops) => ops.len(),
            Self::Pow(..) => 2,
            Self::Exp(_) | Self::Log(_) | Self::Sqrt(_) => 1,
        }
    }

    /// Returns operand `n`, counting from `1`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or greater than [`Expr::num_operands`].
    pub fn operand(&self, n: usize) -> &Expr {
        let count = self.num_operands();
        if n == 0 || n > count {
            panic!("cannot access operand {} of an expression with {} operands", n, count);
        }

        match self {
            Self::Add(ops) | Self::Mul(ops) => &ops[n - 1],
            Self::Pow(base, exponent) => if n == 1 { &**base } else { &**exponent },
            Self::Exp(arg) | Self::Log(arg) | Self::Sqrt(arg) => &**arg,
            Self::Undefined | Self::Rational(_) | Self::Variable(_) => unreachable!(),
        }
    }

    /// Returns a mutable reference to operand `n`, counting from `1`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or greater than [`Expr::num_operands`].
    fn operand_mut(&mut self, n: usize) -> &mut Expr {
        let count = self.num_operands();
        if n == 0 || n > count {
            panic!("cannot access operand {} of an expression with {} operands", n, count);
        }

        match self {
            Self::Add(ops) | Self::Mul(ops) => &mut ops[n - 1],
            Self::Pow(base, exponent) => if n == 1 { &mut **base } else { &mut **exponent },
            Self::Exp(arg) | Self::Log(arg) | Self::Sqrt(arg) => &mut **arg,
            Self::Undefined | Self::Rational(_) | Self::Variable(_) => unreachable!(),
        }
    }

    /// Returns a copy of this expression with operand `n` replaced by `u`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or greater than [`Expr::num_operands`].
    pub fn replace_operand(&self, n: usize, u: Expr) -> Expr {
        let mut out = self.clone();
        *out.operand_mut(n) = u;
        out
    }

    /// Returns a copy of this expression with operands `i` and `j` swapped.
    ///
    /// # Panics
    ///
    /// Panics if either index is zero or greater than [`Expr::num_operands`].
    pub fn swap_operands(&self, i: usize, j: usize) -> Expr {
        let a = self.operand(i).clone();
        let b = self.operand(j).clone();
        let mut out = self.clone();
        *out.operand_mut(i) = b;
        *out.operand_mut(j) = a;
        out
    }

    /// Consumes the expression and applies `f` to each of its operands, reassembling a node of
    /// the same kind.
    pub fn map_operands(self, mut f: impl FnMut(Expr) -> Expr) -> Expr {
        match self {
            Self::Undefined | Self::Rational(_) | Self::Variable(_) => self,
            Self::Add(ops) => Self::Add(ops.into_iter().map(f).collect()),
            Self::Mul(ops) => Self::Mul(ops.into_iter().map(f).collect()),
            Self::Pow(base, exponent) => {
                let base = f(*base);
                Self::pow(base, f(*exponent))
            },
            Self::Exp(arg) => Self::exp(f(*arg)),
            Self::Log(arg) => Self::log(f(*arg)),
            Self::Sqrt(arg) => Self::sqrt(f(*arg)),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if `u` occurs anywhere in this expression, including the expression itself.
    pub fn contains(&self, u: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == u)
    }

    /// Returns true if [`Expr::Undefined`] occurs anywhere in this expression.
    pub fn contains_undefined(&self) -> bool {
        self.post_order_iter().any(Expr::is_undefined)
    }

    /// Returns every variable occurring in this expression, in post-order, including repeats.
    pub fn variables(&self) -> Vec<&Variable> {
        self.post_order_iter()
            .filter_map(Expr::as_variable)
            .collect()
    }

    /// Returns the names of the variables in this expression, sorted and without duplicates.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables()
            .into_iter()
            .map(|var| var.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the depth of the expression tree. Leaves have depth `0`.
    pub fn depth(&self) -> usize {
        (1..=self.num_operands())
            .map(|n| self.operand(n).depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Replaces every occurrence of `u` in this expression with `t`.
    ///
    /// Substitution proceeds bottom-up. A node that only becomes equal to `u` after its operands
    /// were substituted is replaced as well, so substituting `x` for `1/x` in `1/(1/x)` gives `x`.
    pub fn substitute(&self, u: &Expr, t: &Expr) -> Expr {
        if u == t {
            return self.clone();
        }
        if self == u {
            return t.clone();
        }
        if !self.contains(u) {
            return self.clone();
        }

        let out = self.clone().map_operands(|op| op.substitute(u, t));
        if &out == u {
            t.clone()
        } else {
            out
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use constraint::PositiveRational;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    #[test]
    fn factories_flatten() {
        let expr = Expr::add([x(), Expr::add([y(), Expr::int(1)])]);
        assert_eq!(expr, Expr::Add(vec![x(), y(), Expr::int(1)]));

        let expr = Expr::mul([Expr::mul([x(), y()]), Expr::mul([Expr::int(2)])]);
        assert_eq!(expr, Expr::Mul(vec![x(), y(), Expr::int(2)]));
    }

    #[test]
    fn derived_factories() {
        assert_eq!(-x(), Expr::Mul(vec![Expr::int(-1), x()]));
        assert_eq!(x() - y(), Expr::Add(vec![x(), Expr::Mul(vec![Expr::int(-1), y()])]));
        assert_eq!(Expr::int(1) / x(), Expr::pow(x(), Expr::int(-1)));
        assert_eq!(y() / x(), Expr::Mul(vec![y(), Expr::pow(x(), Expr::int(-1))]));
        assert_eq!(Expr::frac(4, 0), Expr::Undefined);
        assert_eq!(Expr::frac(4, 6), Expr::Rational(Rational::new(2, 3).unwrap()));
    }

    #[test]
    fn equality_is_structural() {
        assert_ne!(Expr::add([x(), y()]), Expr::add([y(), x()]));
        assert_ne!(x(), Expr::pattern_var("x"));
        assert_ne!(Expr::pattern_var("x"), Expr::constr_pattern_var("x", PositiveRational));
        assert_eq!(
            Expr::constr_var("x", PositiveRational),
            Expr::constr_var("x", PositiveRational),
        );
    }

    #[test]
    fn asae_base_and_exponent() {
        let pow = Expr::pow(x(), y());
        assert_eq!(pow.asae_base(), x());
        assert_eq!(pow.asae_exponent(), y());
        assert_eq!(x().asae_base(), x());
        assert_eq!(x().asae_exponent(), Expr::int(1));
        assert_eq!(Expr::int(3).asae_base(), Expr::Undefined);
        assert_eq!(Expr::int(3).asae_exponent(), Expr::Undefined);
    }

    #[test]
    fn operands() {
        let pow = Expr::pow(x(), y());
        assert_eq!(pow.num_operands(), 2);
        assert_eq!(pow.operand(1), &x());
        assert_eq!(pow.operand(2), &y());
        assert_eq!(Expr::log(x()).operand(1), &x());
        assert_eq!(x().num_operands(), 0);

        let sum = Expr::add([x(), y(), Expr::int(3)]);
        assert_eq!(sum.replace_operand(2, Expr::int(7)), Expr::add([x(), Expr::int(7), Expr::int(3)]));
        assert_eq!(sum.swap_operands(1, 3), Expr::add([Expr::int(3), y(), x()]));
    }

    #[test]
    #[should_panic(expected = "cannot access operand 3")]
    fn operand_out_of_range() {
        Expr::pow(x(), y()).operand(3);
    }

    #[test]
    #[should_panic(expected = "cannot access operand 0")]
    fn operand_zero() {
        Expr::exp(x()).operand(0);
    }

    #[test]
    fn type_equal() {
        assert!(Expr::add([x()]).type_equal(&Expr::add([y(), x()])));
        assert!(x().type_equal(&y()));
        assert!(!x().type_equal(&Expr::pattern_var("x")));
        assert!(!Expr::exp(x()).type_equal(&Expr::log(x())));
    }

    #[test]
    fn contains() {
        let expr = Expr::mul([x(), Expr::pow(Expr::int(10), Expr::exp(y()))]);
        assert!(expr.contains(&Expr::exp(y())));
        assert!(expr.contains(&expr));
        assert!(!expr.contains(&Expr::exp(x())));
        assert!(!expr.contains_undefined());
        assert!(Expr::add([x(), Expr::log(Expr::Undefined)]).contains_undefined());
    }

    #[test]
    fn variable_names() {
        assert_eq!(Expr::Undefined.variable_names(), Vec::<String>::new());
        assert_eq!(Expr::int(0).variable_names(), Vec::<String>::new());
        assert_eq!(Expr::var("X").variable_names(), vec!["X"]);
        assert_eq!(
            Expr::pow(Expr::mul([Expr::var("Y"), Expr::var("X"), Expr::var("Y")]), Expr::int(10))
                .variable_names(),
            vec!["X", "Y"],
        );
    }

    #[test]
    fn depth() {
        assert_eq!(Expr::Undefined.depth(), 0);
        assert_eq!(Expr::int(1).depth(), 0);
        assert_eq!(Expr::constr_var("x", PositiveRational).depth(), 0);
        assert_eq!(Expr::add([Expr::int(0), x(), Expr::int(0), x()]).depth(), 1);
        assert_eq!(
            Expr::add([
                Expr::mul([x(), Expr::pow(Expr::int(10), Expr::exp(x()))]),
                x(),
                Expr::int(0),
            ]).depth(),
            4,
        );
    }

    #[test]
    fn substitute() {
        let sum = Expr::add([x(), y(), Expr::int(0), y()]);
        assert_eq!(sum.substitute(&y(), &Expr::var("z")), Expr::add([x(), Expr::var("z"), Expr::int(0), Expr::var("z")]));
        assert_eq!(Expr::int(7).substitute(&Expr::int(7), &Expr::int(-7)), Expr::int(-7));
        assert_eq!(x().substitute(&y(), &Expr::int(0)), x());
        assert_eq!(Expr::exp(x()).substitute(&Expr::exp(x()), &y()), y());

        let whole = Expr::add([Expr::int(9) / x(), y()]);
        assert_eq!(whole.substitute(&(Expr::int(9) / x()), &Expr::var("z")), Expr::add([Expr::var("z"), y()]));
    }

    #[test]
    fn substitute_exposes_further_matches() {
        let recip = Expr::int(1) / x();
        let nested = Expr::int(1) / (Expr::int(1) / (Expr::int(1) / (Expr::int(1) / x())));
        assert_eq!(nested.substitute(&recip, &x()), x());
    }

    #[test]
    fn substitute_with_self_reference_terminates() {
        let expr = Expr::exp(x());
        let t = Expr::add([x(), Expr::int(1)]);
        assert_eq!(expr.substitute(&x(), &t), Expr::exp(t));
    }

    #[test]
    fn downgrade() {
        assert_eq!(Expr::Add(vec![]).downgrade(), Expr::int(0));
        assert_eq!(Expr::Mul(vec![]).downgrade(), Expr::int(1));
        assert_eq!(Expr::Mul(vec![x()]).downgrade(), x());
        assert_eq!(Expr::Add(vec![x(), y()]).downgrade(), Expr::Add(vec![x(), y()]));
    }
}
