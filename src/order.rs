use std::cmp::Ordering;

use crate::context::Context;
use crate::node::Node;
use crate::reference::Bx;

impl Context {
    /// Canonical total order over expressions.
    ///
    /// ```text
    /// constants < literals < operators
    /// ```
    ///
    /// Constants are ordered by kind, literals (of either polarity) by
    /// literal id, operators by kind, then by argument lists compared
    /// lexicographically with this same order, then by length.
    ///
    /// Since nodes are hash-consed, the result is `Equal` iff `a == b`.
    pub fn cmp(&self, a: Bx, b: Bx) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let x = self.node(a);
        let y = self.node(b);

        fn group(node: &Node) -> u8 {
            match node {
                Node::Constant(_) => 0,
                Node::Literal(_) => 1,
                Node::Operator(_) => 2,
            }
        }

        match (&x, &y) {
            (Node::Constant(k1), Node::Constant(k2)) => k1.bits().cmp(&k2.bits()),
            (Node::Literal(l1), Node::Literal(l2)) => l1.id().cmp(&l2.id()),
            (Node::Operator(op1), Node::Operator(op2)) => {
                op1.kind.bits().cmp(&op2.kind.bits()).then_with(|| {
                    for (&u, &v) in op1.args.iter().zip(op2.args.iter()) {
                        match self.cmp(u, v) {
                            Ordering::Equal => {}
                            ord => return ord,
                        }
                    }
                    op1.args.len().cmp(&op2.args.len())
                })
            }
            _ => group(&x).cmp(&group(&y)),
        }
    }

    /// Sort handles by [`cmp`][Context::cmp].
    pub fn sort(&self, args: &mut [Bx]) {
        args.sort_by(|&a, &b| self.cmp(a, b));
    }
}
