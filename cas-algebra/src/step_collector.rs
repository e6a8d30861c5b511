/// A type that collects the rewrite steps taken while simplifying an expression.
///
/// [`StepCollector`] is also implemented for the unit type `()`, for when the steps are not
/// needed, and for [`Vec`], which records every step in order.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
