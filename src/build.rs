//! Expression constructors.
//!
//! Raw constructors (`or`, `and`, ...) keep their arguments exactly as given
//! and only fold the degenerate arities:
//!
//! ```text
//! Or() = 0     And() = 1     Xor() = 0     Equal() = 1
//! Or(x) = x    And(x) = x    Xor(x) = x    Equal(x) = 1
//! ```
//!
//! Dual kinds fold to the inverted results. Reduced constructors (`or_s`,
//! `and_s`, ...) additionally run the argument-set reduction, producing
//! simple nodes.

use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::reference::Bx;

impl Context {
    pub(crate) fn mk_nary(&self, kind: Kind, args: Vec<Bx>) -> Bx {
        assert!(kind.is_nary());

        let positive = kind.positive();
        let res = match (positive, args.len()) {
            (Kind::Or | Kind::Xor, 0) => self.zero(),
            (Kind::And, 0) => self.one(),
            (Kind::Equal, 0 | 1) => self.one(),
            (_, 1) => args[0],
            _ => return self.mk_op(kind, args, false),
        };
        if kind.is_neg() {
            self.invert(res)
        } else {
            res
        }
    }

    pub fn or(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Or, args.into_iter().collect())
    }
    pub fn nor(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Nor, args.into_iter().collect())
    }
    pub fn and(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::And, args.into_iter().collect())
    }
    pub fn nand(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Nand, args.into_iter().collect())
    }
    pub fn xor(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Xor, args.into_iter().collect())
    }
    pub fn xnor(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Xnor, args.into_iter().collect())
    }
    pub fn eq(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Equal, args.into_iter().collect())
    }
    pub fn neq(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.mk_nary(Kind::Unequal, args.into_iter().collect())
    }

    /// Implication `p => q`.
    pub fn impl_(&self, p: Bx, q: Bx) -> Bx {
        self.mk_op(Kind::Implies, vec![p, q], false)
    }

    /// If-then-else: `s ? d1 : d0`.
    pub fn ite(&self, s: Bx, d1: Bx, d0: Bx) -> Bx {
        self.mk_op(Kind::IfThenElse, vec![s, d1, d0], false)
    }

    /// Negation, that is, [`invert`][Context::invert].
    pub fn not(&self, f: Bx) -> Bx {
        self.invert(f)
    }

    pub fn or_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.or(args))
    }
    pub fn nor_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.nor(args))
    }
    pub fn and_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.and(args))
    }
    pub fn nand_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.nand(args))
    }
    pub fn xor_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.xor(args))
    }
    pub fn xnor_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.xnor(args))
    }
    pub fn eq_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.eq(args))
    }
    pub fn neq_s(&self, args: impl IntoIterator<Item = Bx>) -> Bx {
        self.simplify(self.neq(args))
    }
    pub fn impl_s(&self, p: Bx, q: Bx) -> Bx {
        self.simplify(self.impl_(p, q))
    }
    pub fn ite_s(&self, s: Bx, d1: Bx, d0: Bx) -> Bx {
        self.simplify(self.ite(s, d1, d0))
    }

    /// Build a raw operator of the given kind.
    ///
    /// Fails with [`Error::NotAnOperator`] for atom kinds and with
    /// [`Error::Arity`] when a fixed-arity kind gets the wrong number of
    /// arguments.
    pub fn op(&self, kind: Kind, args: impl IntoIterator<Item = Bx>) -> Result<Bx> {
        let args: Vec<Bx> = args.into_iter().collect();
        debug!("op(kind = {}, args = {:?})", kind, args);

        if !kind.is_op() {
            return Err(Error::NotAnOperator(kind.to_string()));
        }
        if let Some(expected) = kind.arity() {
            if args.len() != expected {
                return Err(Error::Arity {
                    kind,
                    expected,
                    found: args.len(),
                });
            }
            return Ok(self.mk_op(kind, args, false));
        }
        Ok(self.mk_nary(kind, args))
    }
}
