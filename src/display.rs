use std::fmt::{Display, Formatter};

use crate::context::Context;
use crate::kind::Kind;
use crate::node::Node;
use crate::reference::Bx;

/// Functional-notation view of an expression, see [`Context::display`].
pub struct ExprDisplay<'a> {
    ctx: &'a Context,
    root: Bx,
}

impl ExprDisplay<'_> {
    fn write(&self, f: &mut Formatter<'_>, g: Bx) -> std::fmt::Result {
        match self.ctx.node(g) {
            Node::Constant(kind) => {
                let s = match kind {
                    Kind::Zero => "0",
                    Kind::One => "1",
                    Kind::Logical => "X",
                    _ => "?",
                };
                write!(f, "{}", s)
            }
            Node::Literal(lit) => {
                let name = self.ctx.get_name(lit.id()).map_err(|_| std::fmt::Error)?;
                if lit.is_negative() {
                    write!(f, "~{}", name)
                } else {
                    write!(f, "{}", name)
                }
            }
            Node::Operator(op) => {
                write!(f, "{}(", op.kind)?;
                for (i, &arg) in op.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.write(f, arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write(f, self.root)
    }
}

impl Context {
    /// Render `f` in functional notation:
    ///
    /// ```text
    /// Or(And(a, ~b), IfThenElse(s, 1, X))
    /// ```
    ///
    /// Constants render as `0`, `1`, `X` (logical) and `?` (illogical).
    pub fn display(&self, f: Bx) -> ExprDisplay<'_> {
        ExprDisplay { ctx: self, root: f }
    }

    pub fn to_expr_string(&self, f: Bx) -> String {
        self.display(f).to_string()
    }
}
