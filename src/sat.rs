use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::context::Context;
use crate::kind::Kind;
use crate::node::Node;
use crate::reference::Bx;
use crate::subst::Point;

/// Value of an operator of the given kind over known argument values.
fn eval_op(kind: Kind, args: &[bool]) -> bool {
    let res = match kind.positive() {
        Kind::Or => args.iter().any(|&x| x),
        Kind::And => args.iter().all(|&x| x),
        Kind::Xor => args.iter().filter(|&&x| x).count() % 2 == 1,
        Kind::Equal => args.windows(2).all(|w| w[0] == w[1]),
        Kind::Implies => !args[0] || args[1],
        Kind::IfThenElse => {
            if args[0] {
                args[1]
            } else {
                args[2]
            }
        }
        _ => unreachable!(),
    };
    res != kind.is_neg()
}

impl Context {
    /// Find a satisfying assignment of `f`, if any.
    ///
    /// The point assigns constants to a subset of the support of `f`; any
    /// extension of it satisfies `f`. Returns `None` for unsatisfiable
    /// expressions and for unknown constants.
    ///
    /// This is a plain Shannon-expansion search, exponential in the worst case.
    pub fn sat(&self, f: Bx) -> Option<Point> {
        debug!("sat(f = {})", f);
        self.sat_(self.simplify(f))
    }

    fn sat_(&self, f: Bx) -> Option<Point> {
        match self.node(f) {
            Node::Constant(Kind::Zero) => None,
            Node::Constant(Kind::One) => Some(Point::new()),
            Node::Constant(kind) => {
                debug!("sat: unknown constant {}", kind);
                None
            }
            Node::Literal(lit) => {
                let x = self.var_of(f)?;
                Some(Point::from([(x, self.constant(lit.is_positive()))]))
            }
            Node::Operator(op) => {
                // Prefer a unit literal of a top-level conjunction, trying
                // the polarity that satisfies it first.
                let unit = if op.kind == Kind::And {
                    op.args.iter().find_map(|&a| self.lit(a))
                } else {
                    None
                };
                let (x, first) = match unit {
                    Some(lit) => (self.var_of(self.lit_bx(lit))?, lit.is_positive()),
                    None => (*self.support(f).first()?, false),
                };

                for value in [first, !first] {
                    let c = self.constant(value);
                    let g = self.compose_unchecked(f, &Point::from([(x, c)]));
                    if let Some(mut point) = self.sat_(g) {
                        point.insert(x, c);
                        return Some(point);
                    }
                }
                None
            }
        }
    }

    /// Check whether `f` and `g` are equivalent.
    ///
    /// Expressions that reduce to an unknown constant are never equivalent
    /// to anything.
    pub fn equiv(&self, f: Bx, g: Bx) -> bool {
        debug!("equiv(f = {}, g = {})", f, g);
        let h = self.xor_s([f, g]);
        if self.kind(h).is_unknown() {
            return false;
        }
        self.sat(h).is_none()
    }

    /// Evaluate `f` under a total assignment of its variables.
    ///
    /// Returns `None` if `f` contains unknown constants or an unassigned variable.
    pub fn truth_value(&self, f: Bx, assignment: &HashMap<Bx, bool>) -> Option<bool> {
        self.fold(f, |g, args: &[Option<bool>]| match self.node(g) {
            Node::Constant(Kind::Zero) => Some(false),
            Node::Constant(Kind::One) => Some(true),
            Node::Constant(_) => None,
            Node::Literal(lit) => {
                let x = self.var_of(g)?;
                let value = *assignment.get(&x)?;
                Some(value == lit.is_positive())
            }
            Node::Operator(op) => {
                let args: Option<Vec<bool>> = args.iter().copied().collect();
                Some(eval_op(op.kind, &args?))
            }
        })
    }

    /// Number of satisfying assignments of `f` over its support.
    ///
    /// Unknown constants have no models.
    pub fn sat_count(&self, f: Bx) -> BigUint {
        debug!("sat_count(f = {})", f);
        let g = self.simplify(f);
        // Variables eliminated by simplification are free.
        let free = self.support(f).len() - self.support(g).len();
        let mut cache = HashMap::new();
        self.sat_count_(g, &mut cache) << free
    }

    fn sat_count_(&self, f: Bx, cache: &mut HashMap<Bx, BigUint>) -> BigUint {
        match self.kind(f) {
            Kind::One => return BigUint::from(1u32),
            kind if kind.is_const() => return BigUint::ZERO,
            kind if kind.is_lit() => return BigUint::from(1u32),
            _ => {}
        }

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let support = self.support(f);
        let n = support.len();
        let x = *support.first().unwrap_or_else(|| unreachable!());

        let mut count = BigUint::ZERO;
        for value in [false, true] {
            let g = self.compose_unchecked(f, &Point::from([(x, self.constant(value))]));
            // Variables of f that g no longer depends on are free.
            let free = n - 1 - self.support(g).len();
            count += self.sat_count_(g, cache) << free;
        }

        cache.insert(f, count.clone());
        count
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    /// Check that every extension of the point satisfies `f`.
    fn check_point(ctx: &Context, f: Bx, point: &Point) {
        let support: Vec<Bx> = ctx.support(f).into_iter().collect();
        let free: Vec<Bx> = support.iter().copied().filter(|x| !point.contains_key(x)).collect();
        for bits in 0..1u32 << free.len() {
            let mut assignment: HashMap<Bx, bool> =
                point.iter().map(|(&x, &v)| (x, ctx.is_one(v))).collect();
            for (j, &x) in free.iter().enumerate() {
                assignment.insert(x, (bits >> j) & 1 == 1);
            }
            assert_eq!(
                ctx.truth_value(f, &assignment),
                Some(true),
                "point does not satisfy {}",
                ctx.display(f)
            );
        }
    }

    #[test]
    fn test_sat_constants() {
        let ctx = Context::default();
        assert_eq!(ctx.sat(ctx.zero()), None);
        assert_eq!(ctx.sat(ctx.one()), Some(Point::new()));
        assert_eq!(ctx.sat(ctx.logical()), None);
        assert_eq!(ctx.sat(ctx.illogical()), None);
    }

    #[test]
    fn test_sat_literals() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        assert_eq!(ctx.sat(x), Some(Point::from([(x, ctx.one())])));
        assert_eq!(ctx.sat(ctx.not(x)), Some(Point::from([(x, ctx.zero())])));
    }

    #[test]
    fn test_sat_contradiction() {
        let ctx = Context::default();
        let x = ctx.get_var("x");
        assert_eq!(ctx.sat(ctx.and([x, ctx.not(x)])), None);
        assert_eq!(ctx.sat(ctx.or([x, ctx.not(x)])), Some(Point::new()));
    }

    #[test]
    fn test_sat_operators() {
        let ctx = Context::default();
        let a = ctx.get_var("a");
        let b = ctx.get_var("b");
        let c = ctx.get_var("c");

        let fs = [
            ctx.and([a, ctx.not(b), ctx.or([b, c])]),
            ctx.xor([a, b, c]),
            ctx.eq([a, b, ctx.not(c)]),
            ctx.ite(a, ctx.not(b), ctx.impl_(b, c)),
            ctx.nand([a, b]),
        ];
        for f in fs {
            let point = ctx.sat(f).unwrap();
            println!("{} => {:?}", ctx.display(f), point);
            check_point(&ctx, f, &point);
        }

        let unsat = ctx.and([ctx.xor([a, b]), ctx.eq([a, b])]);
        assert_eq!(ctx.sat(unsat), None);
    }

    #[test]
    fn test_equiv() {
        let ctx = Context::default();
        let a = ctx.get_var("a");
        let b = ctx.get_var("b");
        assert!(ctx.equiv(ctx.impl_(a, b), ctx.or([ctx.not(a), b])));
        assert!(ctx.equiv(ctx.nand([a, b]), ctx.or([ctx.not(a), ctx.not(b)])));
        assert!(!ctx.equiv(ctx.and([a, b]), ctx.or([a, b])));
        assert!(!ctx.equiv(ctx.logical(), ctx.logical()));
    }

    #[test]
    fn test_truth_value() {
        let ctx = Context::default();
        let a = ctx.get_var("a");
        let b = ctx.get_var("b");
        let f = ctx.ite(a, b, ctx.not(b));
        let at = |va, vb| HashMap::from([(a, va), (b, vb)]);
        assert_eq!(ctx.truth_value(f, &at(true, true)), Some(true));
        assert_eq!(ctx.truth_value(f, &at(true, false)), Some(false));
        assert_eq!(ctx.truth_value(f, &at(false, false)), Some(true));
        assert_eq!(ctx.truth_value(f, &HashMap::from([(a, true)])), None);
        assert_eq!(
            ctx.truth_value(ctx.or([a, ctx.logical()]), &at(true, true)),
            None
        );
    }

    #[test]
    fn test_sat_count() {
        let ctx = Context::default();
        let a = ctx.get_var("a");
        let b = ctx.get_var("b");
        let c = ctx.get_var("c");
        assert_eq!(ctx.sat_count(ctx.zero()), BigUint::ZERO);
        assert_eq!(ctx.sat_count(ctx.one()), BigUint::from(1u32));
        assert_eq!(ctx.sat_count(a), BigUint::from(1u32));
        assert_eq!(ctx.sat_count(ctx.or([a, b])), BigUint::from(3u32));
        assert_eq!(ctx.sat_count(ctx.xor([a, b, c])), BigUint::from(4u32));
        assert_eq!(ctx.sat_count(ctx.or([a, ctx.and([b, c])])), BigUint::from(5u32));
        // Over {a, b}, although `b` cancels out.
        assert_eq!(ctx.sat_count(ctx.xor([a, b, b])), BigUint::from(2u32));
    }
}
