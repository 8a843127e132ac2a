use std::collections::{BTreeSet, HashMap};

use crate::context::Context;
use crate::reference::Bx;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Color {
    Gray,
    Black,
}

/// Post-order depth-first traversal of an expression DAG.
///
/// Every distinct node is yielded exactly once, after all of its arguments.
/// The traversal uses an explicit stack, so deep expressions do not
/// overflow the call stack.
pub struct DfsIter<'a> {
    ctx: &'a Context,
    stack: Vec<Bx>,
    // Absent nodes are white.
    colors: HashMap<Bx, Color>,
}

impl<'a> DfsIter<'a> {
    pub fn new(ctx: &'a Context, root: Bx) -> Self {
        Self {
            ctx,
            stack: vec![root],
            colors: HashMap::new(),
        }
    }
}

impl Iterator for DfsIter<'_> {
    type Item = Bx;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&f) = self.stack.last() {
            match self.colors.get(&f) {
                None => {
                    self.colors.insert(f, Color::Gray);
                    for &arg in self.ctx.args(f).iter().rev() {
                        if !self.colors.contains_key(&arg) {
                            self.stack.push(arg);
                        }
                    }
                }
                Some(Color::Gray) => {
                    self.stack.pop();
                    self.colors.insert(f, Color::Black);
                    return Some(f);
                }
                Some(Color::Black) => {
                    // Pushed more than once before being visited.
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl Context {
    /// Iterate over all distinct nodes of `f`, arguments before operators.
    pub fn dfs(&self, f: Bx) -> DfsIter<'_> {
        DfsIter::new(self, f)
    }

    /// Set of variables `f` depends on syntactically.
    ///
    /// Complements contribute their underlying variable.
    pub fn support(&self, f: Bx) -> BTreeSet<Bx> {
        self.dfs(f).filter_map(|g| self.var_of(g)).collect()
    }
}
