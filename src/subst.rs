use std::collections::HashMap;

use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::node::Node;
use crate::reference::Bx;
use crate::types::Lit;

/// Substitution map: variable to expression.
pub type Var2Bx = HashMap<Bx, Bx>;

/// Partial assignment: variable to constant.
pub type Point = HashMap<Bx, Bx>;

impl Context {
    fn check_var(&self, x: Bx) -> Result<()> {
        if self.kind(x) == Kind::Variable {
            Ok(())
        } else {
            Err(Error::NotAVariable(self.to_expr_string(x)))
        }
    }

    /// Substitute expressions for variables, simultaneously.
    ///
    /// A complement of a substituted variable becomes the inverted
    /// replacement. The result is simplified.
    pub fn compose(&self, f: Bx, var2bx: &Var2Bx) -> Result<Bx> {
        debug!("compose(f = {}, var2bx = {:?})", f, var2bx);

        for &x in var2bx.keys() {
            self.check_var(x)?;
        }

        Ok(self.compose_unchecked(f, var2bx))
    }

    /// Substitution without validating the map keys.
    pub(crate) fn compose_unchecked(&self, f: Bx, var2bx: &Var2Bx) -> Bx {
        let mut values: HashMap<Bx, Bx> = HashMap::new();
        for g in self.dfs(f) {
            let res = match self.node(g) {
                Node::Constant(_) => g,
                Node::Literal(lit) => {
                    let x = self.lit_bx(Lit::positive(lit.index()));
                    match var2bx.get(&x) {
                        Some(&h) if lit.is_positive() => h,
                        Some(&h) => self.invert(h),
                        None => g,
                    }
                }
                Node::Operator(op) => {
                    let xs: Vec<Bx> = op.args.iter().map(|a| values[a]).collect();
                    if xs[..] == op.args[..] {
                        g
                    } else {
                        self.mk_op(op.kind, xs, false)
                    }
                }
            };
            values.insert(g, res);
        }

        self.simplify(values[&f])
    }

    /// Substitute constants for variables.
    pub fn restrict(&self, f: Bx, point: &Point) -> Result<Bx> {
        debug!("restrict(f = {}, point = {:?})", f, point);

        for &value in point.values() {
            if !self.kind(value).is_const() {
                return Err(Error::NotAConstant(self.to_expr_string(value)));
            }
        }
        self.compose(f, point)
    }

    /// All `2^n` cofactors of `f` with respect to the given variables.
    ///
    /// Cofactors are listed in binary counting order of the assignment, the
    /// first variable being the least significant bit.
    pub fn cofactors(&self, f: Bx, vars: &[Bx]) -> Result<Vec<Bx>> {
        debug!("cofactors(f = {}, vars = {:?})", f, vars);

        for &x in vars {
            self.check_var(x)?;
        }

        let n = vars.len();
        assert!(n < 32, "Too many variables: {}", n);
        (0..1u32 << n)
            .map(|bits| {
                let point: Point = vars
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| (x, self.constant((bits >> j) & 1 == 1)))
                    .collect();
                self.restrict(f, &point)
            })
            .collect()
    }

    /// Existential quantification: the disjunction of all cofactors.
    pub fn smoothing(&self, f: Bx, vars: &[Bx]) -> Result<Bx> {
        Ok(self.or_s(self.cofactors(f, vars)?))
    }

    /// Universal quantification: the conjunction of all cofactors.
    pub fn consensus(&self, f: Bx, vars: &[Bx]) -> Result<Bx> {
        Ok(self.and_s(self.cofactors(f, vars)?))
    }

    /// Boolean difference: the exclusive disjunction of all cofactors.
    pub fn derivative(&self, f: Bx, vars: &[Bx]) -> Result<Bx> {
        Ok(self.xor_s(self.cofactors(f, vars)?))
    }
}
