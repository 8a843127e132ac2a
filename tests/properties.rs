use std::collections::HashMap;

use num_bigint::BigUint;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use boolexpr_rs::context::Context;
use boolexpr_rs::kind::Kind;
use boolexpr_rs::reference::Bx;
use boolexpr_rs::subst::{Point, Var2Bx};

const NUM_VARS: usize = 4;
const MAX_DEPTH: usize = 3;
const MAX_ARITY: usize = 3;

const OPS: [Kind; 12] = [
    Kind::Nor,
    Kind::Or,
    Kind::Nand,
    Kind::And,
    Kind::Xnor,
    Kind::Xor,
    Kind::Unequal,
    Kind::Equal,
    Kind::NotImplies,
    Kind::Implies,
    Kind::NotIfThenElse,
    Kind::IfThenElse,
];

/// Random expression over a fixed set of variables, built in a fresh context.
#[derive(Debug, Clone)]
enum Recipe {
    Const(bool),
    Lit(usize, bool),
    Op(Kind, Vec<Recipe>),
}

impl Recipe {
    fn gen(g: &mut Gen, depth: usize) -> Self {
        let leaf = depth == 0 || u8::arbitrary(g) % 4 == 0;
        if leaf {
            if u8::arbitrary(g) % 5 == 0 {
                Recipe::Const(bool::arbitrary(g))
            } else {
                Recipe::Lit(usize::arbitrary(g) % NUM_VARS, bool::arbitrary(g))
            }
        } else {
            let kind = *g.choose(&OPS).unwrap();
            let arity = kind
                .arity()
                .unwrap_or_else(|| 2 + usize::arbitrary(g) % (MAX_ARITY - 1));
            let args = (0..arity).map(|_| Recipe::gen(g, depth - 1)).collect();
            Recipe::Op(kind, args)
        }
    }

    fn build(&self, ctx: &Context, xs: &[Bx]) -> Bx {
        match self {
            Recipe::Const(value) => ctx.constant(*value),
            Recipe::Lit(i, true) => xs[*i],
            Recipe::Lit(i, false) => ctx.not(xs[*i]),
            Recipe::Op(kind, args) => {
                let args: Vec<Bx> = args.iter().map(|r| r.build(ctx, xs)).collect();
                ctx.op(*kind, args).unwrap()
            }
        }
    }
}

impl Arbitrary for Recipe {
    fn arbitrary(g: &mut Gen) -> Self {
        Recipe::gen(g, MAX_DEPTH)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Recipe::Op(_, args) => Box::new(args.clone().into_iter()),
            _ => Box::new(std::iter::empty()),
        }
    }
}

fn setup(recipe: &Recipe) -> (Context, Vec<Bx>, Bx) {
    let ctx = Context::default();
    let xs: Vec<Bx> = (0..NUM_VARS).map(|i| ctx.get_var(&format!("x_{}", i))).collect();
    let f = recipe.build(&ctx, &xs);
    (ctx, xs, f)
}

fn assignment(xs: &[Bx], bits: u32) -> HashMap<Bx, bool> {
    xs.iter()
        .enumerate()
        .map(|(j, &x)| (x, (bits >> j) & 1 == 1))
        .collect()
}

/// Truth table of `f` over the given variables.
fn table(ctx: &Context, xs: &[Bx], f: Bx) -> Vec<bool> {
    (0..1u32 << xs.len())
        .map(|bits| ctx.truth_value(f, &assignment(xs, bits)).unwrap())
        .collect()
}

fn only_kinds(ctx: &Context, f: Bx, allowed: &[Kind]) -> bool {
    ctx.dfs(f).all(|g| {
        let kind = ctx.kind(g);
        kind.is_atom() || allowed.contains(&kind)
    })
}

#[quickcheck]
fn double_negation(recipe: Recipe) -> bool {
    let (ctx, _, f) = setup(&recipe);
    ctx.invert(ctx.invert(f)) == f
}

#[quickcheck]
fn invert_is_negation(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let t = table(&ctx, &xs, f);
    let u = table(&ctx, &xs, ctx.invert(f));
    t.iter().zip(&u).all(|(a, b)| a != b)
}

#[quickcheck]
fn simplify_sound_and_idempotent(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.simplify(f);
    ctx.is_simple(g) && ctx.simplify(g) == g && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn pushdown_not_sound(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.pushdown_not(f);
    let positive = ctx.dfs(g).all(|h| {
        let kind = ctx.kind(h);
        !kind.is_op() || kind.is_pos()
    });
    positive && ctx.pushdown_not(g) == g && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn to_latop_sound(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.to_latop(f);
    only_kinds(&ctx, g, &[Kind::Or, Kind::Nor, Kind::And, Kind::Nand])
        && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn to_binop_sound(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.to_binop(f);
    let binary = ctx
        .dfs(g)
        .all(|h| !ctx.kind(h).is_nary() || ctx.args(h).len() <= 2);
    binary && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn to_nnf_sound_and_idempotent(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.to_nnf(f);
    only_kinds(&ctx, g, &[Kind::Or, Kind::And])
        && ctx.to_nnf(g) == g
        && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn to_cnf_sound(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.to_cnf(f);
    ctx.is_cnf(g) && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn to_dnf_sound(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = ctx.to_dnf(f);
    ctx.is_dnf(g) && table(&ctx, &xs, f) == table(&ctx, &xs, g)
}

#[quickcheck]
fn sat_sound_and_complete(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let t = table(&ctx, &xs, f);
    match ctx.sat(f) {
        None => t.iter().all(|&v| !v),
        Some(point) => (0..1u32 << NUM_VARS).all(|bits| {
            let mut a = assignment(&xs, bits);
            for (x, v) in &point {
                a.insert(*x, ctx.is_one(*v));
            }
            ctx.truth_value(f, &a) == Some(true)
        }),
    }
}

#[quickcheck]
fn sat_count_matches_table(recipe: Recipe) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let models = table(&ctx, &xs, f).iter().filter(|&&v| v).count();
    let free = NUM_VARS - ctx.support(f).len();
    ctx.sat_count(f) << free == BigUint::from(models)
}

#[quickcheck]
fn tseytin_equisatisfiable(recipe: Recipe) -> bool {
    let (ctx, _, f) = setup(&recipe);
    let g = ctx.tseytin(f, "a").unwrap();
    ctx.is_cnf(g) && ctx.sat(f).is_some() == ctx.sat(g).is_some()
}

#[quickcheck]
fn cofactor_expansion(recipe: Recipe, index: usize) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let x = xs[index % NUM_VARS];
    let f0 = ctx.restrict(f, &Point::from([(x, ctx.zero())])).unwrap();
    let f1 = ctx.restrict(f, &Point::from([(x, ctx.one())])).unwrap();
    let cofactors = ctx.cofactors(f, &[x]).unwrap();
    cofactors == vec![f0, f1] && table(&ctx, &xs, ctx.ite(x, f1, f0)) == table(&ctx, &xs, f)
}

#[quickcheck]
fn compose_substitutes(recipe: Recipe, other: Recipe, index: usize) -> bool {
    let (ctx, xs, f) = setup(&recipe);
    let g = other.build(&ctx, &xs);
    let x = xs[index % NUM_VARS];
    let h = ctx.compose(f, &Var2Bx::from([(x, g)])).unwrap();
    (0..1u32 << NUM_VARS).all(|bits| {
        let mut a = assignment(&xs, bits);
        let vg = ctx.truth_value(g, &a).unwrap();
        let vh = ctx.truth_value(h, &a).unwrap();
        a.insert(x, vg);
        ctx.truth_value(f, &a) == Some(vh)
    })
}

#[quickcheck]
fn equiv_matches_table(a: Recipe, b: Recipe) -> bool {
    let (ctx, xs, f) = setup(&a);
    let g = b.build(&ctx, &xs);
    ctx.equiv(f, g) == (table(&ctx, &xs, f) == table(&ctx, &xs, g))
}

#[quickcheck]
fn display_is_stable(recipe: Recipe) -> bool {
    let (ctx, _, f) = setup(&recipe);
    let (ctx2, _, f2) = setup(&recipe);
    ctx.to_expr_string(f) == ctx2.to_expr_string(f2)
}
