//! Exact rational arithmetic over machine integers.
//!
//! A [`Rational`] is either an [`Integer`](Rational::Integer) or a reduced [`Fraction`]. Every
//! operation is checked: division by zero, `0^0`, and [`i64`] overflow produce [`None`] instead of
//! panicking, which the expression layer turns into [`Expr::Undefined`](crate::Expr::Undefined).

use std::{cmp::Ordering, fmt};

/// Returns the greatest common divisor of two **positive** integers, or [`None`] if either
/// operand is zero or negative.
pub fn gcd(a: i64, b: i64) -> Option<i64> {
    if a <= 0 || b <= 0 {
        return None;
    }
    i64::try_from(gcd_unsigned(a.unsigned_abs(), b.unsigned_abs())).ok()
}

fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A fraction in lowest terms.
///
/// The numerator carries the sign, the denominator is always greater than one, and the two are
/// coprime. The fields are private so that a [`Fraction`] can only be obtained through
/// [`Rational::new`], which performs the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Returns the numerator of the fraction.
    pub fn numerator(&self) -> i64 {
        self.num
    }

    /// Returns the denominator of the fraction. This is always greater than one.
    pub fn denominator(&self) -> i64 {
        self.den
    }
}

/// An exact rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rational {
    /// An integer, such as `2` or `-144`.
    Integer(i64),

    /// A non-integer fraction in lowest terms, such as `2/3`.
    Fraction(Fraction),
}

impl Rational {
    /// Builds the rational number `num / den` in lowest terms.
    ///
    /// Returns [`None`] if `den` is zero, or if the reduced numerator or denominator does not fit in
    /// an [`i64`], such as `i64::MIN / -1`.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        if num == 0 {
            return Some(Self::Integer(0));
        }

        // reduce the magnitudes, so that `i64::MIN` needs no negation
        let negative = (num < 0) != (den < 0);
        let (num_abs, den_abs) = (num.unsigned_abs(), den.unsigned_abs());
        let divisor = gcd_unsigned(num_abs, den_abs);
        let (num_abs, den_abs) = (num_abs / divisor, den_abs / divisor);

        let num = if negative {
            i64::try_from(-i128::from(num_abs)).ok()?
        } else {
            i64::try_from(num_abs).ok()?
        };
        let den = i64::try_from(den_abs).ok()?;
        if den == 1 {
            Some(Self::Integer(num))
        } else {
            Some(Self::Fraction(Fraction { num, den }))
        }
    }

    /// Returns the numerator of this number.
    pub fn numerator(&self) -> i64 {
        match self {
            Self::Integer(n) => *n,
            Self::Fraction(frac) => frac.num,
        }
    }

    /// Returns the denominator of this number. Integers have denominator one.
    pub fn denominator(&self) -> i64 {
        match self {
            Self::Integer(_) => 1,
            Self::Fraction(frac) => frac.den,
        }
    }

    /// If this number is an integer, returns it.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Fraction(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Integer(0))
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Self::Integer(1))
    }

    /// Returns true if this number is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.numerator() > 0
    }

    /// Returns true if this number is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.numerator() < 0
    }

    /// `a/b + c/d = (ad + cb) / bd`
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let num = self.numerator().checked_mul(rhs.denominator())?
            .checked_add(rhs.numerator().checked_mul(self.denominator())?)?;
        let den = self.denominator().checked_mul(rhs.denominator())?;
        Self::new(num, den)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs.checked_neg()?)
    }

    pub fn checked_neg(self) -> Option<Self> {
        Self::new(self.numerator().checked_neg()?, self.denominator())
    }

    /// `a/b * c/d = ac / bd`
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let num = self.numerator().checked_mul(rhs.numerator())?;
        let den = self.denominator().checked_mul(rhs.denominator())?;
        Self::new(num, den)
    }

    /// Returns [`None`] when dividing by zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs.checked_recip()?)
    }

    /// Returns the reciprocal of this number, or [`None`] if it is zero.
    pub fn checked_recip(self) -> Option<Self> {
        Self::new(self.denominator(), self.numerator())
    }

    pub fn checked_abs(self) -> Option<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Some(self)
        }
    }

    /// Raises this number to an integer power.
    ///
    /// A negative exponent inverts the base first, then raises it to the positive exponent. `0^0`
    /// and `0` raised to a negative power are undefined.
    pub fn checked_pow(self, exp: i64) -> Option<Self> {
        if exp < 0 {
            return self.checked_recip()?.checked_pow(exp.checked_neg()?);
        }
        if exp == 0 {
            return if self.is_zero() { None } else { Some(Self::Integer(1)) };
        }

        // |base| <= 1 never overflows, and any larger base overflows long before the exponent
        // leaves `u32`
        let exp = match u32::try_from(exp) {
            Ok(exp) => exp,
            Err(_) => return match (self.numerator().unsigned_abs(), self.denominator()) {
                (0, _) => Some(Self::Integer(0)),
                (1, 1) if exp % 2 == 0 => Some(Self::Integer(1)),
                (1, 1) => Some(self),
                _ => None,
            },
        };

        let num = self.numerator().checked_pow(exp)?;
        let den = self.denominator().checked_pow(exp)?;
        Self::new(num, den)
    }

    /// Returns the floating-point approximation of this number.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => *n as f64,
            Self::Fraction(frac) => frac.num as f64 / frac.den as f64,
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// Rationals are ordered by numeric value. The cross-multiplication is done in [`i128`], so it is
/// always exact.
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator() as i128 * other.denominator() as i128;
        let rhs = other.numerator() as i128 * self.denominator() as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Fraction(frac) => write!(f, "{}/{}", frac.num, frac.den),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use super::*;

    fn frac(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    #[test]
    fn gcd_of_positive() {
        assert_eq!(gcd(12, 18), Some(6));
        assert_eq!(gcd(7, 13), Some(1));
        assert_eq!(gcd(5, 5), Some(5));
    }

    #[test]
    fn gcd_of_non_positive_is_undefined() {
        assert_eq!(gcd(0, 3), None);
        assert_eq!(gcd(3, 0), None);
        assert_eq!(gcd(-4, 2), None);
    }

    #[test]
    fn reduce_normalizes_sign_and_collapses() {
        assert_eq!(frac(2, 4), frac(1, 2));
        assert_eq!(frac(3, -6).numerator(), -1);
        assert_eq!(frac(3, -6).denominator(), 2);
        assert_eq!(frac(-4, -2), Rational::Integer(2));
        assert_eq!(frac(0, -5), Rational::Integer(0));
        assert_eq!(Rational::new(1, 0), None);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Rational::Integer(6).checked_add(frac(2, 3)), Some(frac(20, 3)));
        assert_eq!(frac(1, 2).checked_sub(frac(1, 3)), Some(frac(1, 6)));
        assert_eq!(Rational::Integer(6).checked_mul(frac(2, 3)), Some(Rational::Integer(4)));
        assert_eq!(frac(1, 2).checked_div(frac(1, 4)), Some(Rational::Integer(2)));
        assert_eq!(frac(-3, 4).checked_abs(), Some(frac(3, 4)));
        assert_eq!(frac(-3, 4).checked_neg(), Some(frac(3, 4)));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        assert_eq!(Rational::Integer(5).checked_div(Rational::Integer(0)), None);
        assert_eq!(Rational::Integer(0).checked_recip(), None);
    }

    #[test]
    fn power() {
        assert_eq!(frac(2, 3).checked_pow(2), Some(frac(4, 9)));
        assert_eq!(Rational::Integer(2).checked_pow(-3), Some(frac(1, 8)));
        assert_eq!(frac(-2, 3).checked_pow(-1), Some(frac(-3, 2)));
        assert_eq!(Rational::Integer(7).checked_pow(0), Some(Rational::Integer(1)));
        assert_eq!(Rational::Integer(-1).checked_pow(i64::MAX), Some(Rational::Integer(-1)));
        assert_eq!(Rational::Integer(-1).checked_pow(1 << 40), Some(Rational::Integer(1)));
    }

    #[test]
    fn power_undefined_cases() {
        assert_eq!(Rational::Integer(0).checked_pow(0), None);
        assert_eq!(Rational::Integer(0).checked_pow(-2), None);
        assert_eq!(Rational::Integer(2).checked_pow(64), None);
    }

    #[test]
    fn overflow_is_undefined() {
        assert_eq!(Rational::Integer(i64::MAX).checked_add(Rational::Integer(1)), None);
        assert_eq!(Rational::Integer(i64::MIN).checked_neg(), None);
        assert_eq!(Rational::new(i64::MIN, -1), None);
        assert_eq!(Rational::new(1, i64::MIN), None);
    }

    #[test]
    fn extremes_that_fit() {
        assert_eq!(Rational::new(i64::MIN, 1), Some(Rational::Integer(i64::MIN)));
        assert_eq!(Rational::new(i64::MIN, 2), Some(Rational::Integer(-(1 << 62))));
        assert_eq!(Rational::new(i64::MIN, i64::MIN), Some(Rational::Integer(1)));
        assert_eq!(Rational::new(i64::MAX, -1), Some(Rational::Integer(-i64::MAX)));
        assert_eq!(frac(i64::MIN, 3).denominator(), 3);
        assert_eq!(
            Rational::Integer(i64::MIN + 1).checked_add(Rational::Integer(-1)),
            Some(Rational::Integer(i64::MIN)),
        );
        assert_eq!(
            Rational::Integer(-(1 << 62)).checked_mul(Rational::Integer(2)),
            Some(Rational::Integer(i64::MIN)),
        );
    }

    #[test]
    fn huge_exponent_of_extreme_base() {
        assert_eq!(Rational::Integer(i64::MIN).checked_pow(1 << 40), None);
        assert_eq!(Rational::Integer(i64::MIN).checked_pow(i64::MAX), None);
        assert_eq!(Rational::Integer(i64::MIN).checked_pow(-(1 << 40)), None);
        assert_eq!(frac(-1, i64::MAX).checked_pow(1 << 40), None);
        assert_eq!(Rational::Integer(0).checked_pow(1 << 40), Some(Rational::Integer(0)));
    }

    #[test]
    fn ordering() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(-1, 2) < Rational::Integer(0));
        assert!(Rational::Integer(2) > frac(3, 2));
        assert_eq!(frac(2, 4).cmp(&frac(1, 2)), Ordering::Equal);
    }

    #[test]
    fn display() {
        assert_eq!(frac(-20, 6).to_string(), "-10/3");
        assert_eq!(Rational::Integer(42).to_string(), "42");
    }

    proptest! {
        #[test]
        fn new_is_in_lowest_terms(num in -1000i64..1000, den in -1000i64..1000) {
            prop_assume!(den != 0);
            let r = Rational::new(num, den).unwrap();
            prop_assert!(r.denominator() > 0);
            if let Rational::Fraction(frac) = r {
                prop_assert!(frac.denominator() > 1);
                prop_assert_eq!(gcd(frac.numerator().abs(), frac.denominator()), Some(1));
            }
            prop_assert_eq!(Rational::new(r.numerator(), r.denominator()), Some(r));
        }

        #[test]
        fn add_then_sub_is_identity(a in -1000i64..1000, b in 1i64..1000, c in -1000i64..1000, d in 1i64..1000) {
            let x = Rational::new(a, b).unwrap();
            let y = Rational::new(c, d).unwrap();
            prop_assert_eq!(x.checked_add(y).and_then(|sum| sum.checked_sub(y)), Some(x));
        }

        #[test]
        fn new_at_the_extremes(num in any::<i64>(), den in any::<i64>()) {
            prop_assume!(den != 0);
            match Rational::new(num, den) {
                Some(r) => {
                    prop_assert!(r.denominator() > 0);
                    prop_assert_eq!(
                        num as i128 * r.denominator() as i128,
                        r.numerator() as i128 * den as i128
                    );
                    if let Rational::Fraction(frac) = r {
                        let num_abs = frac.numerator().unsigned_abs();
                        let den_abs = frac.denominator().unsigned_abs();
                        prop_assert_eq!(gcd_unsigned(num_abs, den_abs), 1);
                    }
                },
                // only a reduced magnitude of 2^63 is out of range
                None => prop_assert!((num == i64::MIN && den < 0) || den == i64::MIN),
            }
        }
    }
}
