//! Operator sugar for building expressions.
//!
//! `!`, `&`, `|`, `^` and `%` (equality) on handles build lazy operation
//! values; [`Context::eval`] materializes them with the raw constructors:
//!
//! ```
//! use boolexpr_rs::context::Context;
//!
//! let ctx = Context::default();
//! let a = ctx.get_var("a");
//! let b = ctx.get_var("b");
//! let f = ctx.eval(!a | b);
//! assert_eq!(f, ctx.or([ctx.not(a), b]));
//! ```

use std::ops::{BitAnd, BitOr, BitXor, Not, Rem};

use crate::context::Context;
use crate::reference::Bx;

pub trait Eval {
    fn eval(&self, ctx: &Context) -> Bx;
}

impl Context {
    pub fn eval(&self, value: impl Eval) -> Bx {
        value.eval(self)
    }
}

impl Eval for Bx {
    fn eval(&self, _ctx: &Context) -> Bx {
        *self
    }
}

pub struct NotOp<F> {
    f: F,
}

pub struct AndOp<F, G> {
    f: F,
    g: G,
}

pub struct OrOp<F, G> {
    f: F,
    g: G,
}

pub struct XorOp<F, G> {
    f: F,
    g: G,
}

pub struct EqOp<F, G> {
    f: F,
    g: G,
}

impl<F: Eval> Eval for NotOp<F> {
    fn eval(&self, ctx: &Context) -> Bx {
        ctx.not(self.f.eval(ctx))
    }
}

impl<F: Eval, G: Eval> Eval for AndOp<F, G> {
    fn eval(&self, ctx: &Context) -> Bx {
        ctx.and([self.f.eval(ctx), self.g.eval(ctx)])
    }
}

impl<F: Eval, G: Eval> Eval for OrOp<F, G> {
    fn eval(&self, ctx: &Context) -> Bx {
        ctx.or([self.f.eval(ctx), self.g.eval(ctx)])
    }
}

impl<F: Eval, G: Eval> Eval for XorOp<F, G> {
    fn eval(&self, ctx: &Context) -> Bx {
        ctx.xor([self.f.eval(ctx), self.g.eval(ctx)])
    }
}

impl<F: Eval, G: Eval> Eval for EqOp<F, G> {
    fn eval(&self, ctx: &Context) -> Bx {
        ctx.eq([self.f.eval(ctx), self.g.eval(ctx)])
    }
}

// Binary operators for every expression type, with any expression on the right.
macro_rules! impl_ops {
    ($t:ty $(, $p:ident)*) => {
        impl<$($p,)* R: Eval> BitAnd<R> for $t {
            type Output = AndOp<Self, R>;

            fn bitand(self, rhs: R) -> Self::Output {
                AndOp { f: self, g: rhs }
            }
        }

        impl<$($p,)* R: Eval> BitOr<R> for $t {
            type Output = OrOp<Self, R>;

            fn bitor(self, rhs: R) -> Self::Output {
                OrOp { f: self, g: rhs }
            }
        }

        impl<$($p,)* R: Eval> BitXor<R> for $t {
            type Output = XorOp<Self, R>;

            fn bitxor(self, rhs: R) -> Self::Output {
                XorOp { f: self, g: rhs }
            }
        }

        impl<$($p,)* R: Eval> Rem<R> for $t {
            type Output = EqOp<Self, R>;

            fn rem(self, rhs: R) -> Self::Output {
                EqOp { f: self, g: rhs }
            }
        }

        impl<$($p),*> Not for $t {
            type Output = NotOp<Self>;

            fn not(self) -> Self::Output {
                NotOp { f: self }
            }
        }
    };
}

impl_ops!(Bx);
impl_ops!(NotOp<F>, F);
impl_ops!(AndOp<F, G>, F, G);
impl_ops!(OrOp<F, G>, F, G);
impl_ops!(XorOp<F, G>, F, G);
impl_ops!(EqOp<F, G>, F, G);

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_eval_var() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        assert_eq!(ctx.eval(x), x);
    }

    #[test]
    fn test_eval_not_var() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        assert_eq!(ctx.eval(!x), ctx.not(x));
        assert_eq!(ctx.eval(!!x), x);
    }

    #[test]
    fn test_eval_binary() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        let y = ctx.get_var("y");
        assert_eq!(ctx.eval(x & y), ctx.and([x, y]));
        assert_eq!(ctx.eval(x | y), ctx.or([x, y]));
        assert_eq!(ctx.eval(x ^ y), ctx.xor([x, y]));
        assert_eq!(ctx.eval(x % y), ctx.eq([x, y]));
    }

    #[test]
    fn test_eval_nested() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        let y = ctx.get_var("y");
        let z = ctx.get_var("z");
        let f = ctx.eval(!(x | y) & (z ^ !x));
        let expected = ctx.and([
            ctx.not(ctx.or([x, y])),
            ctx.xor([z, ctx.not(x)]),
        ]);
        assert_eq!(f, expected);
        assert_eq!(ctx.to_expr_string(f), "And(Nor(x, y), Xor(z, ~x))");
    }
}
