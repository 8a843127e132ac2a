use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::cache::OpKey;
use crate::context::Context;
use crate::kind::Kind;
use crate::node::Node;
use crate::reference::Bx;

/// A set of clauses (for CNF) or terms (for DNF), each a set of literals.
type ClauseSet = BTreeSet<BTreeSet<Bx>>;

impl Context {
    /// Negation by duality.
    ///
    /// ```text
    /// ~0 = 1    ~X = X    ~? = ?
    /// ~x = x'   ~Or(a, b) = Nor(a, b)   ~Implies(p, q) = NotImplies(p, q)
    /// ```
    ///
    /// Operators keep their arguments and their `simple` flag.
    pub fn invert(&self, f: Bx) -> Bx {
        match self.node(f) {
            Node::Constant(kind) => match kind {
                Kind::Zero => self.one(),
                Kind::One => self.zero(),
                _ => f,
            },
            Node::Literal(lit) => self.lit_bx(lit.negate()),
            Node::Operator(op) => self.mk_op(op.kind.dual(), op.args.to_vec(), op.simple),
        }
    }

    /// Rebuild `f` with all operators reduced to canonical simple form.
    ///
    /// Simple nodes are returned unchanged, so the pass is idempotent.
    pub fn simplify(&self, f: Bx) -> Bx {
        debug!("simplify(f = {})", f);
        let mut memo = HashMap::new();
        self.simplify_(f, &mut memo)
    }

    fn simplify_(&self, f: Bx, memo: &mut HashMap<Bx, Bx>) -> Bx {
        let node = self.node(f);
        if node.is_simple() {
            return f;
        }
        if let Some(&res) = memo.get(&f) {
            return res;
        }
        let key = OpKey::Simplify(f);
        if let Some(res) = self.cache_get(key) {
            debug!("cache: simplify({}) -> {}", f, res);
            return res;
        }

        let args: Vec<Bx> = node.args().iter().map(|&a| self.simplify_(a, memo)).collect();
        let res = self.reduce(node.kind(), &args);

        memo.insert(f, res);
        self.cache_insert(key, res);
        res
    }

    /// Push all negations down to the literals.
    ///
    /// Negative operators are replaced with their De Morgan duals:
    ///
    /// ```text
    /// Nor(a, b)          => And(~a, ~b)
    /// Nand(a, b)         => Or(~a, ~b)
    /// Xnor(a, b)         => Xor(~a, b)
    /// Unequal(a, b)      => Equal(~a, b)
    /// Unequal(a, b, c)   => And(Or(a, b, c), Or(~a, ~b, ~c))
    /// Implies(p, q)      => Or(~p, q)
    /// NotImplies(p, q)   => And(p, ~q)
    /// NotIfThenElse(s, a, b) => IfThenElse(s, ~a, ~b)
    /// ```
    ///
    /// The result is built with raw constructors, so argument order is
    /// preserved. Subgraphs without negative operators are returned as-is.
    ///
    /// `Unequal` over more than two arguments means "not all equal", which
    /// no single `Equal` expresses, hence the conjunction above.
    pub fn pushdown_not(&self, f: Bx) -> Bx {
        debug!("pushdown_not(f = {})", f);
        let mut memo = HashMap::new();
        self.pushdown_not_(f, &mut memo)
    }

    fn pushdown_not_(&self, f: Bx, memo: &mut HashMap<Bx, Bx>) -> Bx {
        let node = self.node(f);
        let Node::Operator(op) = node else {
            return f;
        };
        if let Some(&res) = memo.get(&f) {
            return res;
        }
        let key = OpKey::PushdownNot(f);
        if let Some(res) = self.cache_get(key) {
            return res;
        }

        let args = &op.args;
        let mut down = |g: Bx| self.pushdown_not_(g, memo);

        let res = match op.kind {
            Kind::Nor => {
                let xs: Vec<Bx> = args.iter().map(|&a| down(self.invert(a))).collect();
                self.and(xs)
            }
            Kind::Nand => {
                let xs: Vec<Bx> = args.iter().map(|&a| down(self.invert(a))).collect();
                self.or(xs)
            }
            Kind::Xnor => {
                let mut xs = Vec::with_capacity(args.len());
                xs.push(down(self.invert(args[0])));
                xs.extend(args[1..].iter().map(|&a| down(a)));
                self.xor(xs)
            }
            Kind::Unequal if args.len() == 2 => {
                let xs = vec![down(self.invert(args[0])), down(args[1])];
                self.eq(xs)
            }
            Kind::Unequal => {
                let pos: Vec<Bx> = args.iter().map(|&a| down(a)).collect();
                let neg: Vec<Bx> = args.iter().map(|&a| down(self.invert(a))).collect();
                self.and([self.or(pos), self.or(neg)])
            }
            Kind::Implies => {
                let xs = vec![down(self.invert(args[0])), down(args[1])];
                self.or(xs)
            }
            Kind::NotImplies => {
                let xs = vec![down(args[0]), down(self.invert(args[1]))];
                self.and(xs)
            }
            Kind::NotIfThenElse => {
                let s = down(args[0]);
                let d1 = down(self.invert(args[1]));
                let d0 = down(self.invert(args[2]));
                self.ite(s, d1, d0)
            }
            kind => {
                let xs: Vec<Bx> = args.iter().map(|&a| down(a)).collect();
                if xs[..] == args[..] {
                    f
                } else {
                    self.mk_op(kind, xs, false)
                }
            }
        };

        memo.insert(f, res);
        self.cache_insert(key, res);
        res
    }

    /// Balanced `Xor` expansion into lattice operators.
    fn xor_latop(&self, args: &[Bx]) -> Bx {
        match args.len() {
            0 => self.zero(),
            1 => args[0],
            n => {
                let a = self.xor_latop(&args[..n / 2]);
                let b = self.xor_latop(&args[n / 2..]);
                // a ^ b = ~a & b | a & ~b
                self.or([
                    self.and([self.invert(a), b]),
                    self.and([a, self.invert(b)]),
                ])
            }
        }
    }

    /// Rewrite `f` using only `Or`, `And` and their duals.
    ///
    /// ```text
    /// Xor(a, b)          => Or(And(~a, b), And(a, ~b))    (balanced for n args)
    /// Equal(a, b, c)     => Or(And(a, b, c), And(~a, ~b, ~c))
    /// Unequal(a, b, c)   => And(Or(a, b, c), Or(~a, ~b, ~c))
    /// Implies(p, q)      => Or(~p, q)
    /// IfThenElse(s, a, b) => Or(And(s, a), And(~s, b))
    /// ```
    pub fn to_latop(&self, f: Bx) -> Bx {
        debug!("to_latop(f = {})", f);
        let mut memo = HashMap::new();
        self.to_latop_(f, &mut memo)
    }

    fn to_latop_(&self, f: Bx, memo: &mut HashMap<Bx, Bx>) -> Bx {
        let node = self.node(f);
        let Node::Operator(op) = node else {
            return f;
        };
        if let Some(&res) = memo.get(&f) {
            return res;
        }
        let key = OpKey::ToLatop(f);
        if let Some(res) = self.cache_get(key) {
            return res;
        }

        let xs: Vec<Bx> = op.args.iter().map(|&a| self.to_latop_(a, memo)).collect();
        let neg = |xs: &[Bx]| -> Vec<Bx> { xs.iter().map(|&x| self.invert(x)).collect() };

        let res = match op.kind {
            Kind::Or | Kind::Nor | Kind::And | Kind::Nand => {
                if xs[..] == op.args[..] {
                    f
                } else {
                    self.mk_op(op.kind, xs, false)
                }
            }
            Kind::Xor => self.xor_latop(&xs),
            Kind::Xnor => self.invert(self.xor_latop(&xs)),
            Kind::Equal => {
                let ns = neg(&xs);
                self.or([self.and(xs), self.and(ns)])
            }
            Kind::Unequal => {
                let ns = neg(&xs);
                self.and([self.or(xs), self.or(ns)])
            }
            Kind::Implies => self.or([self.invert(xs[0]), xs[1]]),
            Kind::NotImplies => self.and([xs[0], self.invert(xs[1])]),
            Kind::IfThenElse | Kind::NotIfThenElse => {
                let (s, d1, d0) = (xs[0], xs[1], xs[2]);
                let ite = self.or([self.and([s, d1]), self.and([self.invert(s), d0])]);
                if op.kind.is_neg() {
                    self.invert(ite)
                } else {
                    ite
                }
            }
            _ => unreachable!(),
        };

        memo.insert(f, res);
        self.cache_insert(key, res);
        res
    }

    /// Balanced binary tree of `kind` over the given arguments.
    fn binary_tree(&self, kind: Kind, args: &[Bx]) -> Bx {
        match args.len() {
            0..=2 => self.mk_nary(kind, args.to_vec()),
            n => {
                let a = self.binary_tree(kind, &args[..n / 2]);
                let b = self.binary_tree(kind, &args[n / 2..]);
                self.mk_op(kind, vec![a, b], false)
            }
        }
    }

    /// Balanced binary tree with the dual kind only at the root.
    fn binary_tree_dual(&self, kind: Kind, args: &[Bx]) -> Bx {
        let n = args.len();
        if n <= 2 {
            return self.mk_nary(kind, args.to_vec());
        }
        let a = self.binary_tree(kind.positive(), &args[..n / 2]);
        let b = self.binary_tree(kind.positive(), &args[n / 2..]);
        self.mk_op(kind, vec![a, b], false)
    }

    /// Rewrite all n-ary operators into balanced trees of binary operators.
    ///
    /// Negative kinds keep the negation at the root only, e.g.
    /// `Nor(a, b, c, d) => Nor(Or(a, b), Or(c, d))`. `Equal` becomes the
    /// conjunction of adjacent pairwise equalities.
    pub fn to_binop(&self, f: Bx) -> Bx {
        debug!("to_binop(f = {})", f);
        let mut memo = HashMap::new();
        self.to_binop_(f, &mut memo)
    }

    fn to_binop_(&self, f: Bx, memo: &mut HashMap<Bx, Bx>) -> Bx {
        let node = self.node(f);
        let Node::Operator(op) = node else {
            return f;
        };
        if let Some(&res) = memo.get(&f) {
            return res;
        }
        let key = OpKey::ToBinop(f);
        if let Some(res) = self.cache_get(key) {
            return res;
        }

        let xs: Vec<Bx> = op.args.iter().map(|&a| self.to_binop_(a, memo)).collect();

        let res = match op.kind {
            Kind::Or | Kind::And | Kind::Xor if xs.len() > 2 => self.binary_tree(op.kind, &xs),
            Kind::Nor | Kind::Nand | Kind::Xnor if xs.len() > 2 => {
                self.binary_tree_dual(op.kind, &xs)
            }
            Kind::Equal | Kind::Unequal if xs.len() > 2 => {
                let pairs: Vec<Bx> = xs.windows(2).map(|w| self.eq([w[0], w[1]])).collect();
                if op.kind == Kind::Equal {
                    self.binary_tree(Kind::And, &pairs)
                } else {
                    self.binary_tree_dual(Kind::Nand, &pairs)
                }
            }
            _ if xs[..] == op.args[..] => f,
            kind => self.mk_op(kind, xs, false),
        };

        memo.insert(f, res);
        self.cache_insert(key, res);
        res
    }

    /// Negation normal form: only `Or`, `And` and literals, simplified.
    pub fn to_nnf(&self, f: Bx) -> Bx {
        debug!("to_nnf(f = {})", f);
        self.simplify(self.pushdown_not(self.to_latop(f)))
    }

    /// Conjunctive normal form.
    ///
    /// Clauses are distributed over the NNF, so the result may be
    /// exponentially larger than the input.
    pub fn to_cnf(&self, f: Bx) -> Bx {
        debug!("to_cnf(f = {})", f);
        self.to_normal_form(f, Kind::And)
    }

    /// Disjunctive normal form.
    ///
    /// Terms are distributed over the NNF, so the result may be
    /// exponentially larger than the input.
    pub fn to_dnf(&self, f: Bx) -> Bx {
        debug!("to_dnf(f = {})", f);
        self.to_normal_form(f, Kind::Or)
    }

    fn to_normal_form(&self, f: Bx, outer: Kind) -> Bx {
        let nnf = self.to_nnf(f);
        if self.kind(nnf).is_unknown() {
            return nnf;
        }

        let mut memo = HashMap::new();
        let sets = self.distribute(nnf, outer, &mut memo);
        debug!("{} sets of size {}", outer, sets.len());

        let inner = if outer == Kind::And { Kind::Or } else { Kind::And };
        let sets: Vec<Bx> = sets
            .into_iter()
            .map(|set| self.mk_lattice(inner, set.into_iter().collect()))
            .collect();
        self.simplify(self.mk_lattice(outer, sets))
    }

    fn mk_lattice(&self, kind: Kind, args: Vec<Bx>) -> Bx {
        if kind == Kind::Or {
            self.or(args)
        } else {
            self.and(args)
        }
    }

    /// Collect the clause (or term) sets of an NNF expression.
    fn distribute(&self, f: Bx, outer: Kind, memo: &mut HashMap<Bx, ClauseSet>) -> ClauseSet {
        let (identity, dominator) = if outer == Kind::And {
            (self.one(), self.zero())
        } else {
            (self.zero(), self.one())
        };

        if f == identity {
            return ClauseSet::new();
        }
        if f == dominator {
            return ClauseSet::from([BTreeSet::new()]);
        }
        if self.kind(f).is_lit() {
            return ClauseSet::from([BTreeSet::from([f])]);
        }
        if let Some(res) = memo.get(&f) {
            return res.clone();
        }

        let node = self.node(f);
        let res = if node.kind() == outer {
            let mut res = ClauseSet::new();
            for &arg in node.args() {
                res.extend(self.distribute(arg, outer, memo));
            }
            res
        } else {
            assert!(
                matches!(node.kind(), Kind::Or | Kind::And),
                "Expression is not in NNF: {}",
                node.kind()
            );
            let mut res = ClauseSet::from([BTreeSet::new()]);
            for &arg in node.args() {
                let sets = self.distribute(arg, outer, memo);
                let mut product = ClauseSet::new();
                for a in &res {
                    for b in &sets {
                        let set: BTreeSet<Bx> = a.union(b).copied().collect();
                        if !self.is_tautology(&set) {
                            product.insert(set);
                        }
                    }
                }
                res = product;
            }
            res
        };

        memo.insert(f, res.clone());
        res
    }

    /// Check whether a set of literals contains some literal together with its complement.
    fn is_tautology(&self, set: &BTreeSet<Bx>) -> bool {
        set.iter().any(|&x| set.contains(&self.invert(x)))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn vars(ctx: &Context, n: usize) -> Vec<Bx> {
        (0..n).map(|i| ctx.get_var(&format!("x_{}", i))).collect()
    }

    #[test]
    fn test_invert() {
        let ctx = Context::default();
        let a = ctx.get_var("a");
        let b = ctx.get_var("b");
        assert_eq!(ctx.invert(ctx.zero()), ctx.one());
        assert_eq!(ctx.invert(ctx.one()), ctx.zero());
        assert_eq!(ctx.invert(ctx.logical()), ctx.logical());
        assert_eq!(ctx.invert(ctx.illogical()), ctx.illogical());
        assert_eq!(ctx.kind(ctx.invert(a)), Kind::Complement);
        assert_eq!(ctx.invert(ctx.invert(a)), a);

        let f = ctx.impl_(a, b);
        let g = ctx.invert(f);
        assert_eq!(ctx.kind(g), Kind::NotImplies);
        assert_eq!(ctx.args(g), ctx.args(f));
        assert_eq!(ctx.invert(g), f);

        let s = ctx.or_s([a, b]);
        assert!(ctx.is_simple(ctx.invert(s)));
    }

    #[test]
    fn test_simplify() {
        let ctx = Context::default();
        let x = vars(&ctx, 3);
        let f = ctx.or([x[2], ctx.and([x[0], ctx.one()]), ctx.zero(), x[0]]);
        let g = ctx.simplify(f);
        assert_eq!(g, ctx.or_s([x[0], x[2]]));
        assert_eq!(ctx.simplify(g), g);
        assert!(ctx.is_simple(g));

        assert_eq!(ctx.simplify(ctx.eq([ctx.one(), x[1]])), x[1]);
        assert_eq!(ctx.simplify(ctx.xor([x[1], x[1]])), ctx.zero());
        assert_eq!(ctx.simplify(ctx.nor([x[0], ctx.not(x[0])])), ctx.zero());
    }

    #[test]
    fn test_pushdown_not() {
        let ctx = Context::default();
        let x = vars(&ctx, 4);
        let nx: Vec<Bx> = x.iter().map(|&v| ctx.not(v)).collect();

        let f = ctx.nor([nx[0], x[1], nx[2], x[3]]);
        assert_eq!(ctx.pushdown_not(f), ctx.and([x[0], nx[1], x[2], nx[3]]));

        let f = ctx.xnor([nx[0], x[1], nx[2], x[3]]);
        assert_eq!(ctx.pushdown_not(f), ctx.xor([x[0], x[1], nx[2], x[3]]));

        let f = ctx.not(ctx.impl_(x[0], x[1]));
        assert_eq!(ctx.pushdown_not(f), ctx.and([x[0], nx[1]]));

        let f = ctx.not(ctx.ite(x[0], x[1], x[2]));
        assert_eq!(ctx.pushdown_not(f), ctx.ite(x[0], nx[1], nx[2]));

        let f = ctx.neq([x[0], x[1]]);
        assert_eq!(ctx.pushdown_not(f), ctx.eq([nx[0], x[1]]));

        let f = ctx.neq([x[0], x[1], x[2]]);
        assert_eq!(
            ctx.pushdown_not(f),
            ctx.and([ctx.or([x[0], x[1], x[2]]), ctx.or([nx[0], nx[1], nx[2]])])
        );
    }

    #[test]
    fn test_pushdown_not_unchanged() {
        let ctx = Context::default();
        let x = vars(&ctx, 3);
        let f = ctx.or([ctx.and([x[0], x[1]]), x[2]]);
        assert_eq!(ctx.pushdown_not(f), f);
    }

    #[test]
    fn test_to_latop() {
        let ctx = Context::default();
        let x = vars(&ctx, 3);
        let nx: Vec<Bx> = x.iter().map(|&v| ctx.not(v)).collect();

        let f = ctx.impl_(x[0], x[1]);
        assert_eq!(ctx.to_latop(f), ctx.or([nx[0], x[1]]));

        let f = ctx.xor([x[0], x[1]]);
        assert_eq!(
            ctx.to_latop(f),
            ctx.or([ctx.and([nx[0], x[1]]), ctx.and([x[0], nx[1]])])
        );

        let f = ctx.eq([x[0], x[1], x[2]]);
        assert_eq!(
            ctx.to_latop(f),
            ctx.or([ctx.and([x[0], x[1], x[2]]), ctx.and([nx[0], nx[1], nx[2]])])
        );

        let f = ctx.neq([x[0], x[1]]);
        assert_eq!(
            ctx.to_latop(f),
            ctx.and([ctx.or([x[0], x[1]]), ctx.or([nx[0], nx[1]])])
        );

        let f = ctx.ite(x[0], x[1], x[2]);
        assert_eq!(
            ctx.to_latop(f),
            ctx.or([ctx.and([x[0], x[1]]), ctx.and([nx[0], x[2]])])
        );

        let f = ctx.and([x[0], x[1]]);
        assert_eq!(ctx.to_latop(f), f);
    }

    #[test]
    fn test_to_binop() {
        let ctx = Context::default();
        let x = vars(&ctx, 4);

        let f = ctx.or([x[0], x[1], x[2], x[3]]);
        assert_eq!(
            ctx.to_binop(f),
            ctx.or([ctx.or([x[0], x[1]]), ctx.or([x[2], x[3]])])
        );

        let f = ctx.nor([x[0], x[1], x[2], x[3]]);
        assert_eq!(
            ctx.to_binop(f),
            ctx.nor([ctx.or([x[0], x[1]]), ctx.or([x[2], x[3]])])
        );

        let f = ctx.xor([x[0], x[1], x[2]]);
        assert_eq!(ctx.to_binop(f), ctx.xor([x[0], ctx.xor([x[1], x[2]])]));

        let f = ctx.eq([x[0], x[1], x[2]]);
        assert_eq!(
            ctx.to_binop(f),
            ctx.and([ctx.eq([x[0], x[1]]), ctx.eq([x[1], x[2]])])
        );

        let f = ctx.impl_(x[0], x[1]);
        assert_eq!(ctx.to_binop(f), f);
    }

    #[test]
    fn test_to_nnf() {
        let ctx = Context::default();
        let x = vars(&ctx, 2);
        let f = ctx.impl_(x[0], x[1]);
        let g = ctx.to_nnf(f);
        assert_eq!(g, ctx.or_s([ctx.not(x[0]), x[1]]));
        assert_eq!(ctx.to_nnf(g), g);
    }

    #[test]
    fn test_to_cnf() {
        let ctx = Context::default();
        let x = vars(&ctx, 4);

        // (a & b) | (c & d) = (a | c) & (a | d) & (b | c) & (b | d)
        let f = ctx.or([ctx.and([x[0], x[1]]), ctx.and([x[2], x[3]])]);
        let g = ctx.to_cnf(f);
        let expected = ctx.and_s([
            ctx.or_s([x[0], x[2]]),
            ctx.or_s([x[0], x[3]]),
            ctx.or_s([x[1], x[2]]),
            ctx.or_s([x[1], x[3]]),
        ]);
        assert_eq!(g, expected);

        assert_eq!(ctx.to_cnf(ctx.or([x[0], ctx.not(x[0])])), ctx.one());
        assert_eq!(ctx.to_cnf(ctx.zero()), ctx.zero());
        assert_eq!(ctx.to_cnf(ctx.logical()), ctx.logical());
    }

    #[test]
    fn test_to_dnf() {
        let ctx = Context::default();
        let x = vars(&ctx, 3);

        // a & (b | c) = a & b | a & c
        let f = ctx.and([x[0], ctx.or([x[1], x[2]])]);
        let g = ctx.to_dnf(f);
        let expected = ctx.or_s([ctx.and_s([x[0], x[1]]), ctx.and_s([x[0], x[2]])]);
        assert_eq!(g, expected);

        assert_eq!(ctx.to_dnf(ctx.and([x[0], ctx.not(x[0])])), ctx.zero());
    }
}
