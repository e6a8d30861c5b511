use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). Every operand is yielded before the node that contains it.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Undefined | Expr::Rational(_) | Expr::Variable(_) => return self.visit(),
                Expr::Add(ops) | Expr::Mul(ops) => match ops.last() {
                    Some(last) if !self.is_last_visited(last) => {
                        self.stack.extend(ops.iter().rev());
                    },
                    _ => return self.visit(),
                },
                Expr::Pow(base, exponent) => {
                    if self.is_last_visited(exponent) {
                        return self.visit();
                    }
                    self.stack.push(exponent);
                    self.stack.push(base);
                },
                Expr::Exp(arg) | Expr::Log(arg) | Expr::Sqrt(arg) => {
                    if self.is_last_visited(arg) {
                        return self.visit();
                    }
                    self.stack.push(arg);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let x = Expr::var("x");
        let expr = Expr::add([
            Expr::int(1),
            Expr::pow(x.clone(), Expr::int(2)),
            Expr::exp(x.clone()),
        ]);
        let visited = expr.post_order_iter().cloned().collect::<Vec<_>>();
        assert_eq!(visited, vec![
            Expr::int(1),
            x.clone(),
            Expr::int(2),
            Expr::pow(x.clone(), Expr::int(2)),
            x.clone(),
            Expr::exp(x),
            expr.clone(),
        ]);
    }

    #[test]
    fn empty_sum_is_a_leaf() {
        let expr = Expr::Add(vec![]);
        assert_eq!(expr.post_order_iter().count(), 1);
    }
}
