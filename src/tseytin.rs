use std::collections::HashMap;

use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::reference::Bx;

impl Context {
    /// CNF of the biconditional `x <=> f` for the operator `f`.
    ///
    /// Lattice, implication and if-then-else operators get their direct
    /// clause encodings; the parity and equality families go through
    /// [`to_cnf`][Context::to_cnf].
    pub fn eqvar(&self, f: Bx, x: Bx) -> Result<Bx> {
        let kind = self.kind(f);
        if !kind.is_op() {
            return Err(Error::NotAnOperator(self.to_expr_string(f)));
        }

        let args = self.args(f);
        let nx = self.invert(x);
        let neg: Vec<Bx> = args.iter().map(|&a| self.invert(a)).collect();

        let clauses: Vec<Bx> = match kind {
            // x <=> a | b:  (~x | a | b) & (x | ~a) & (x | ~b)
            Kind::Or | Kind::Nor => {
                let (px, qx) = if kind == Kind::Or { (nx, x) } else { (x, nx) };
                let mut cs = vec![self.or(std::iter::once(px).chain(args.iter().copied()))];
                cs.extend(neg.iter().map(|&na| self.or([qx, na])));
                cs
            }
            // x <=> a & b:  (x | ~a | ~b) & (~x | a) & (~x | b)
            Kind::And | Kind::Nand => {
                let (px, qx) = if kind == Kind::And { (x, nx) } else { (nx, x) };
                let mut cs = vec![self.or(std::iter::once(px).chain(neg.iter().copied()))];
                cs.extend(args.iter().map(|&a| self.or([qx, a])));
                cs
            }
            // x <=> (p => q):  (~x | ~p | q) & (x | p) & (x | ~q)
            Kind::Implies | Kind::NotImplies => {
                let (px, qx) = if kind == Kind::Implies { (nx, x) } else { (x, nx) };
                let (p, q) = (args[0], args[1]);
                vec![
                    self.or([px, neg[0], q]),
                    self.or([qx, p]),
                    self.or([qx, neg[1]]),
                ]
            }
            // x <=> (s ? d1 : d0)
            Kind::IfThenElse | Kind::NotIfThenElse => {
                let (px, qx) = if kind == Kind::IfThenElse { (nx, x) } else { (x, nx) };
                let (s, d1, d0) = (args[0], args[1], args[2]);
                vec![
                    self.or([px, neg[0], d1]),
                    self.or([px, s, d0]),
                    self.or([qx, neg[0], neg[1]]),
                    self.or([qx, s, neg[2]]),
                ]
            }
            _ => {
                return Ok(self.to_cnf(self.eq([x, f])));
            }
        };

        Ok(self.and_s(clauses))
    }

    /// Tseytin encoding of `f`.
    ///
    /// Every distinct operator of the simplified `f` gets a fresh auxiliary
    /// variable named `"{prefix}_{n}"`, skipping names already in use. The
    /// result is a CNF, equisatisfiable with `f`: the conjunction of the top
    /// auxiliary variable with all the `aux <=> op` definitions.
    /// Atoms are returned as-is.
    ///
    /// `Xor`, `Equal` and their duals over more than two arguments are
    /// encoded through their binary form (see [`to_binop`][Context::to_binop]),
    /// so every definition has a bounded number of clauses and the encoding
    /// stays linear in the size of `f`.
    pub fn tseytin(&self, f: Bx, prefix: &str) -> Result<Bx> {
        debug!("tseytin(f = {}, prefix = {})", f, prefix);

        let f = self.simplify(f);
        if self.kind(f).is_atom() {
            return Ok(f);
        }

        let mut counter = 0usize;
        let mut fresh = || loop {
            let name = format!("{}_{}", prefix, counter);
            counter += 1;
            if !self.has_var(&name) {
                return self.get_var(&name);
            }
        };

        let mut clauses = Vec::new();
        let top = self.tseytin_(f, &mut fresh, &mut clauses)?;
        debug!("tseytin: {} definitions", clauses.len());

        Ok(self.and_s(std::iter::once(top).chain(clauses)))
    }

    /// Define an auxiliary variable for every operator of `f`, returning the one of `f` itself.
    fn tseytin_<F>(&self, f: Bx, fresh: &mut F, clauses: &mut Vec<Bx>) -> Result<Bx>
    where
        F: FnMut() -> Bx,
    {
        let mut aux: HashMap<Bx, Bx> = HashMap::new();
        for g in self.dfs(f) {
            let kind = self.kind(g);
            if kind.is_atom() {
                continue;
            }
            let xs: Vec<Bx> = self
                .args(g)
                .iter()
                .map(|a| aux.get(a).copied().unwrap_or(*a))
                .collect();
            let wide = matches!(kind.positive(), Kind::Xor | Kind::Equal) && xs.len() > 2;
            let op = self.op(kind, xs)?;
            let x = if wide {
                self.tseytin_(self.to_binop(op), fresh, clauses)?
            } else {
                let x = fresh();
                clauses.push(self.eqvar(op, x)?);
                x
            };
            aux.insert(g, x);
        }
        Ok(aux[&f])
    }
}
