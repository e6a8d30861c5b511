/// A rewrite rule applied during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `+() = 0`
    EmptySum,

    /// `+(a) = a`
    SingleTerm,

    /// `a + (b + c) = a + b + c`
    FlattenSum,

    /// `0 + a = a`
    AddZero,

    /// Adds two adjacent rational terms.
    FoldSum,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// Restores the canonical order of the terms of a sum.
    SortTerms,

    /// `*() = 1`
    EmptyProduct,

    /// `*(a) = a`
    SingleFactor,

    /// `a * (b * c) = a * b * c`
    FlattenProduct,

    /// `0 * a = 0`
    MultiplyZero,

    /// `1 * a = a`
    MultiplyOne,

    /// Multiplies two adjacent rational factors.
    FoldProduct,

    /// `a^n * a^m = a^(n + m)`
    CombineLikeFactors,

    /// Restores the canonical order of the factors of a product.
    SortFactors,

    /// `0^n = 0` for a positive rational `n`
    ZeroPowPositive,

    /// `0^n = undefined` for a rational `n <= 0`
    ZeroPowNonPositive,

    /// `1^a = 1`
    OnePow,

    /// `a^0 = 1`
    PowZero,

    /// `a^1 = a`
    PowOne,

    /// Raises a rational to an integer power.
    FoldPower,

    /// `(a^b)^c = a^(b * c)`
    PowerOfPower,

    /// `(a * b)^n = a^n * b^n`
    PowerOfProduct,

    /// `exp(0) = 1`
    ExpZero,

    /// `log(1) = 0`
    LogOne,
}
