//! Argument-set reduction.
//!
//! Every reduction takes the arguments of one operator, each of them
//! already simplified, and returns the canonical simple node (or the atom)
//! equivalent to the operator applied to them.
//!
//! Unknown constants propagate: `Illogical` anywhere poisons the result,
//! `Logical` makes the result `Logical` unless some known argument decides
//! it (a dominator, a complementary pair, or a fixed-arity shortcut).

use std::collections::HashSet;

use log::debug;

use crate::context::Context;
use crate::kind::Kind;
use crate::reference::Bx;

#[derive(Default)]
struct Unknowns {
    logical: bool,
    illogical: bool,
}

impl Unknowns {
    fn add(&mut self, kind: Kind) -> bool {
        match kind {
            Kind::Logical => self.logical = true,
            Kind::Illogical => self.illogical = true,
            _ => return false,
        }
        true
    }
}

impl Context {
    /// Reduce an operator of any kind over simplified arguments.
    ///
    /// Negative kinds are reduced as the inverted positive kind.
    pub(crate) fn reduce(&self, kind: Kind, args: &[Bx]) -> Bx {
        assert!(kind.is_op(), "Kind {} is not an operator", kind);

        let res = match kind.positive() {
            Kind::Or | Kind::And => self.reduce_lattice(kind.positive(), args),
            Kind::Xor => self.reduce_xor(args),
            Kind::Equal => self.reduce_equal(args),
            Kind::Implies => self.reduce_implies(args[0], args[1]),
            Kind::IfThenElse => self.reduce_ite(args[0], args[1], args[2]),
            _ => unreachable!(),
        };
        if kind.is_neg() {
            self.invert(res)
        } else {
            res
        }
    }

    /// Check whether the sorted, deduplicated list contains a literal
    /// together with its complement.
    fn has_complements(&self, args: &[Bx]) -> bool {
        let mut ids = HashSet::new();
        for &arg in args {
            if let Some(lit) = self.lit(arg) {
                if ids.contains(&lit.negate().id()) {
                    return true;
                }
                ids.insert(lit.id());
            }
        }
        false
    }

    /// Reduce `Or` or `And` over simplified arguments.
    pub(crate) fn reduce_lattice(&self, kind: Kind, args: &[Bx]) -> Bx {
        assert!(matches!(kind, Kind::Or | Kind::And));

        let (identity, dominator) = if kind == Kind::Or {
            (self.zero(), self.one())
        } else {
            (self.one(), self.zero())
        };

        let mut unknowns = Unknowns::default();
        let mut dominated = false;
        let mut flat = Vec::with_capacity(args.len());

        let mut stack: Vec<Bx> = args.iter().rev().copied().collect();
        while let Some(arg) = stack.pop() {
            if arg == identity {
                continue;
            }
            if arg == dominator {
                dominated = true;
                continue;
            }
            let node = self.node(arg);
            if unknowns.add(node.kind()) {
                continue;
            }
            if node.kind() == kind && node.is_simple() {
                stack.extend(node.args().iter().rev());
            } else {
                flat.push(arg);
            }
        }

        if unknowns.illogical {
            return self.illogical();
        }
        if dominated {
            debug!("{}: dominated by {}", kind, self.kind(dominator));
            return dominator;
        }

        self.sort(&mut flat);
        flat.dedup();

        if self.has_complements(&flat) {
            debug!("{}: complementary literals", kind);
            return dominator;
        }
        if unknowns.logical {
            return self.logical();
        }

        match flat.len() {
            0 => identity,
            1 => flat[0],
            _ => self.mk_op(kind, flat, true),
        }
    }

    /// Reduce `Xor` over simplified arguments.
    pub(crate) fn reduce_xor(&self, args: &[Bx]) -> Bx {
        let mut unknowns = Unknowns::default();
        let mut parity = false;
        let mut flat = Vec::with_capacity(args.len());

        let mut stack: Vec<Bx> = args.iter().rev().copied().collect();
        while let Some(arg) = stack.pop() {
            if self.is_zero(arg) {
                continue;
            }
            if self.is_one(arg) {
                parity = !parity;
                continue;
            }
            let node = self.node(arg);
            if unknowns.add(node.kind()) {
                continue;
            }
            match node.kind() {
                Kind::Xor if node.is_simple() => stack.extend(node.args().iter().rev()),
                Kind::Xnor if node.is_simple() => {
                    parity = !parity;
                    stack.extend(node.args().iter().rev());
                }
                _ => flat.push(arg),
            }
        }

        if unknowns.illogical {
            return self.illogical();
        }
        if unknowns.logical {
            return self.logical();
        }

        // After sorting, equal arguments are adjacent, and so are the two
        // polarities of a variable.
        self.sort(&mut flat);
        let mut xs: Vec<Bx> = Vec::with_capacity(flat.len());
        for arg in flat {
            match xs.last() {
                Some(&top) if top == arg => {
                    xs.pop();
                }
                Some(&top) if self.are_complements(top, arg) => {
                    xs.pop();
                    parity = !parity;
                }
                _ => xs.push(arg),
            }
        }

        let res = match xs.len() {
            0 => self.zero(),
            1 => xs[0],
            _ => self.mk_op(Kind::Xor, xs, true),
        };
        if parity {
            self.invert(res)
        } else {
            res
        }
    }

    /// Reduce `Equal` over simplified arguments.
    pub(crate) fn reduce_equal(&self, args: &[Bx]) -> Bx {
        let mut unknowns = Unknowns::default();
        let mut has_zero = false;
        let mut has_one = false;
        let mut rest = Vec::with_capacity(args.len());

        for &arg in args {
            if self.is_zero(arg) {
                has_zero = true;
            } else if self.is_one(arg) {
                has_one = true;
            } else if !unknowns.add(self.kind(arg)) {
                rest.push(arg);
            }
        }

        if unknowns.illogical {
            return self.illogical();
        }

        self.sort(&mut rest);
        rest.dedup();

        if has_zero && has_one {
            debug!("Equal: both constants");
            return self.zero();
        }
        if self.has_complements(&rest) {
            debug!("Equal: complementary literals");
            return self.zero();
        }
        if unknowns.logical {
            return self.logical();
        }
        if has_zero {
            // All arguments must be zero.
            return self.invert(self.reduce_lattice(Kind::Or, &rest));
        }
        if has_one {
            // All arguments must be one.
            return self.reduce_lattice(Kind::And, &rest);
        }
        if rest.len() < 2 {
            return self.one();
        }
        self.mk_op(Kind::Equal, rest, true)
    }

    /// Reduce `Implies(p, q)` over simplified arguments.
    pub(crate) fn reduce_implies(&self, p: Bx, q: Bx) -> Bx {
        let (kp, kq) = (self.kind(p), self.kind(q));
        if kp == Kind::Illogical || kq == Kind::Illogical {
            return self.illogical();
        }

        // 0 => q = 1
        // p => 1 = 1
        if self.is_zero(p) || self.is_one(q) {
            return self.one();
        }
        // 1 => q = q
        if self.is_one(p) {
            return q;
        }
        // p => 0 = ~p
        if self.is_zero(q) {
            return self.invert(p);
        }
        if kp == Kind::Logical || kq == Kind::Logical {
            return self.logical();
        }
        // p => p = 1
        if p == q {
            return self.one();
        }
        // p => ~p = ~p
        if self.are_complements(p, q) {
            return q;
        }

        self.mk_op(Kind::Implies, vec![p, q], true)
    }

    /// Reduce `IfThenElse(s, d1, d0)` over simplified arguments.
    pub(crate) fn reduce_ite(&self, s: Bx, d1: Bx, d0: Bx) -> Bx {
        let kinds = [self.kind(s), self.kind(d1), self.kind(d0)];
        if kinds.contains(&Kind::Illogical) {
            return self.illogical();
        }

        // ite(1, d1, d0) = d1
        // ite(0, d1, d0) = d0
        if self.is_one(s) {
            return d1;
        }
        if self.is_zero(s) {
            return d0;
        }
        // ite(s, d, d) = d
        if d1 == d0 {
            return d1;
        }
        if kinds.contains(&Kind::Logical) {
            return self.logical();
        }

        // ite(s, 1, 0) = s
        // ite(s, 0, 1) = ~s
        if self.is_one(d1) && self.is_zero(d0) {
            return s;
        }
        if self.is_zero(d1) && self.is_one(d0) {
            return self.invert(s);
        }

        // ite(s, 1, d0) = s | d0
        // ite(s, 0, d0) = ~s & d0
        // ite(s, d1, 1) = ~s | d1
        // ite(s, d1, 0) = s & d1
        if self.is_one(d1) {
            return self.reduce_lattice(Kind::Or, &[s, d0]);
        }
        if self.is_zero(d1) {
            return self.reduce_lattice(Kind::And, &[self.invert(s), d0]);
        }
        if self.is_one(d0) {
            return self.reduce_lattice(Kind::Or, &[self.invert(s), d1]);
        }
        if self.is_zero(d0) {
            return self.reduce_lattice(Kind::And, &[s, d1]);
        }

        // ite(s, s, d0) = s | d0
        // ite(s, d1, s) = s & d1
        if s == d1 {
            return self.reduce_lattice(Kind::Or, &[s, d0]);
        }
        if s == d0 {
            return self.reduce_lattice(Kind::And, &[s, d1]);
        }

        self.mk_op(Kind::IfThenElse, vec![s, d1, d0], true)
    }

    /// Check whether two nodes are the two polarities of one variable.
    pub fn are_complements(&self, a: Bx, b: Bx) -> bool {
        match (self.lit(a), self.lit(b)) {
            (Some(x), Some(y)) => x.negate() == y,
            _ => false,
        }
    }
}
