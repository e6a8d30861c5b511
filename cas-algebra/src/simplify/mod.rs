//! Simplification of expressions into canonical form.
//!
//! # Rules
//!
//! Simplification is driven by a [`RuleSet`]: one ordered list of [`Rule`]s per kind of
//! expression. A rule either matches a [pattern](crate::pattern) or tests a predicate, and if it
//! matches, its transform produces the rewritten expression. Only the first matching rule is
//! applied; the whole expression is then simplified again, until no rule matches.
//!
//! The default rules are built once and shared through [`STANDARD_RULES`]. A custom table can be
//! injected with [`Simplifier::new`].
//!
//! # Steps
//!
//! Each applied rule is reported to a [`StepCollector`] as a [`Step`], and logged at the `DEBUG`
//! level with [`tracing`]. Use [`simplify_with_steps`] to get the list of steps.
//!
//! ```
//! use cas_algebra::{simplify::{simplify_with_steps, Step}, Expr};
//!
//! let expr = Expr::add([Expr::var("x"), Expr::int(0)]);
//! let (simplified, steps) = simplify_with_steps(&expr);
//! assert_eq!(simplified, Expr::var("x"));
//! assert_eq!(steps, vec![Step::AddZero]);
//! ```

pub mod rules;
mod step;

use crate::{
    expr::Expr,
    order::top_operand_sort,
    pattern::{pattern_match, Bindings},
    step_collector::StepCollector,
};
use once_cell::sync::Lazy;
use std::fmt;
use tracing::debug;

pub use step::Step;

/// Decides whether a [`Rule`] applies to an expression.
#[derive(Clone)]
pub enum Matcher {
    /// The rule applies if the expression matches the pattern.
    Pattern(Expr),

    /// The rule applies if the predicate returns true.
    Predicate(fn(&Expr) -> bool),
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

/// A single rewrite rule.
///
/// The transform is only called on expressions the matcher accepted. It reads whatever operands
/// it needs directly from the expression; pattern bindings are not passed along.
#[derive(Clone)]
pub struct Rule {
    /// The step reported when this rule is applied.
    pub step: Step,

    /// Decides whether the rule applies.
    pub matcher: Matcher,

    /// Builds the rewritten expression.
    pub transform: fn(&Expr) -> Expr,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Rule")
            .field("step", &self.step)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Creates a rule that applies to expressions matching the given pattern.
    pub fn pattern(step: Step, pattern: Expr, transform: fn(&Expr) -> Expr) -> Self {
        Self { step, matcher: Matcher::Pattern(pattern), transform }
    }

    /// Creates a rule that applies to expressions accepted by the given predicate.
    pub fn predicate(step: Step, predicate: fn(&Expr) -> bool, transform: fn(&Expr) -> Expr) -> Self {
        Self { step, matcher: Matcher::Predicate(predicate), transform }
    }

    /// Returns true if this rule applies to the expression.
    pub fn matches(&self, expr: &Expr) -> bool {
        match &self.matcher {
            Matcher::Pattern(pattern) => pattern_match(expr, pattern, &mut Bindings::new()),
            Matcher::Predicate(predicate) => predicate(expr),
        }
    }
}

/// The rules to simplify with, one ordered list per kind of expression.
///
/// Leaves ([`Expr::Undefined`], [`Expr::Rational`], and [`Expr::Variable`]) are always simplified,
/// so they have no rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub add: Vec<Rule>,
    pub mul: Vec<Rule>,
    pub pow: Vec<Rule>,
    pub exp: Vec<Rule>,
    pub log: Vec<Rule>,
    pub sqrt: Vec<Rule>,
}

impl RuleSet {
    /// Builds the standard rules.
    pub fn standard() -> Self {
        Self {
            add: rules::add::rules(),
            mul: rules::multiply::rules(),
            pow: rules::power::rules(),
            exp: rules::function::exp_rules(),
            log: rules::function::log_rules(),
            sqrt: rules::function::sqrt_rules(),
        }
    }

    /// Returns the rules that apply to the kind of the given expression.
    pub fn for_expr(&self, expr: &Expr) -> &[Rule] {
        match expr {
            Expr::Undefined | Expr::Rational(_) | Expr::Variable(_) => &[],
            Expr::Add(_) => &self.add,
            Expr::Mul(_) => &self.mul,
            Expr::Pow(..) => &self.pow,
            Expr::Exp(_) => &self.exp,
            Expr::Log(_) => &self.log,
            Expr::Sqrt(_) => &self.sqrt,
        }
    }

    /// Returns an iterator over every rule in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.add.iter()
            .chain(&self.mul)
            .chain(&self.pow)
            .chain(&self.exp)
            .chain(&self.log)
            .chain(&self.sqrt)
    }
}

/// The standard rules, built on first use.
pub static STANDARD_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::standard);

/// Simplifies expressions with a given [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct Simplifier<'a> {
    rules: &'a RuleSet,
}

impl Default for Simplifier<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_RULES)
    }
}

impl<'a> Simplifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Simplifies the expression.
    pub fn simplify(&self, expr: &Expr) -> Expr {
        self.simplify_with(expr, &mut ())
    }

    /// Simplifies the expression, reporting every applied rule to the step collector.
    ///
    /// Any expression containing [`Expr::Undefined`] simplifies to [`Expr::Undefined`]. Otherwise,
    /// the operands of a sum or product are sorted into canonical order, every operand is
    /// simplified, and the first rule for the expression's kind that matches is applied. This
    /// repeats until no rule matches.
    pub fn simplify_with(&self, expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
        let mut expr = expr.clone();
        loop {
            if expr.contains_undefined() {
                return Expr::Undefined;
            }

            expr = top_operand_sort(expr)
                .map_operands(|operand| self.simplify_with(&operand, step_collector));

            // an operand may have simplified to undefined
            if expr.contains_undefined() {
                return Expr::Undefined;
            }

            let Some(rule) = self.rules.for_expr(&expr).iter().find(|rule| rule.matches(&expr)) else {
                return expr;
            };

            let next = (rule.transform)(&expr);
            debug!(step = ?rule.step, "{} => {}", expr, next);
            step_collector.push(rule.step);
            expr = next;
        }
    }
}

/// Simplifies the expression with the [standard rules](STANDARD_RULES).
pub fn simplify(expr: &Expr) -> Expr {
    Simplifier::default().simplify(expr)
}

/// Simplifies the expression with the [standard rules](STANDARD_RULES), reporting every applied
/// rule to the step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    Simplifier::default().simplify_with(expr, step_collector)
}

/// Simplifies the expression with the [standard rules](STANDARD_RULES), returning the steps taken.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}
