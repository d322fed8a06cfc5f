use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// Subexpressions shared between several parents are visited once per parent.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
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

    /// Returns true if the given operand slot is the last visited expression.
    ///
    /// Slots are compared by address, not by value; equal operands in different positions are
    /// different slots.
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
            let operands = expr.operands();
            match operands.last() {
                Some(last) if !self.is_last_visited(last) => {
                    self.stack.extend(operands.iter().rev());
                },
                _ => return self.visit(),
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
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let two = Expr::number(2.0);

        // (2 * x * y^2)
        let expr = Expr::product(&[two.clone(), x.clone(), y.pow(&two)]);
        let visited = expr.post_order_iter().cloned().collect::<Vec<_>>();
        assert_eq!(visited, vec![
            two.clone(),
            x,
            y.clone(),
            two.clone(),
            y.pow(&two),
            expr.clone(),
        ]);
    }

    #[test]
    fn single_leaf() {
        let x = Expr::symbol("x");
        assert_eq!(x.post_order_iter().count(), 1);
    }
}
