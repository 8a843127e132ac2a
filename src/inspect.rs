use std::collections::HashMap;

use crate::context::Context;
use crate::kind::Kind;
use crate::reference::Bx;

impl Context {
    /// Fold the DAG bottom-up, visiting each distinct node once.
    pub(crate) fn fold<T, F>(&self, f: Bx, mut visit: F) -> T
    where
        T: Copy,
        F: FnMut(Bx, &[T]) -> T,
    {
        let mut values: HashMap<Bx, T> = HashMap::new();
        for g in self.dfs(f) {
            let args: Vec<T> = self.args(g).iter().map(|a| values[a]).collect();
            let value = visit(g, &args);
            values.insert(g, value);
        }
        values[&f]
    }

    /// Length of the longest path from `f` to an atom.
    pub fn depth(&self, f: Bx) -> u64 {
        self.fold(f, |g, args| {
            if self.kind(g).is_atom() {
                0
            } else {
                1 + args.iter().copied().max().unwrap_or(0)
            }
        })
    }

    /// Number of nodes in the tree view of `f`.
    ///
    /// Shared subexpressions are counted once per occurrence.
    pub fn size(&self, f: Bx) -> u64 {
        self.fold(f, |_, args| {
            args.iter().fold(1u64, |acc, &x| acc.saturating_add(x))
        })
    }

    /// Number of atom occurrences in the tree view of `f`.
    pub fn atom_count(&self, f: Bx) -> u64 {
        self.fold(f, |g, args| {
            if self.kind(g).is_atom() {
                1
            } else {
                args.iter().fold(0u64, |acc, &x| acc.saturating_add(x))
            }
        })
    }

    /// Number of operator occurrences in the tree view of `f`.
    pub fn op_count(&self, f: Bx) -> u64 {
        self.fold(f, |g, args| {
            if self.kind(g).is_atom() {
                0
            } else {
                args.iter().fold(1u64, |acc, &x| acc.saturating_add(x))
            }
        })
    }

    /// Check whether `f` is a simple `kind` node over literals only.
    fn is_clause(&self, f: Bx, kind: Kind) -> bool {
        self.kind(f) == kind
            && self.is_simple(f)
            && self.args(f).iter().all(|&a| self.kind(a).is_lit())
    }

    fn is_normal_form(&self, f: Bx, outer: Kind, inner: Kind) -> bool {
        let kind = self.kind(f);
        if kind.is_known() || kind.is_lit() {
            return true;
        }
        if self.is_clause(f, inner) {
            return true;
        }
        kind == outer
            && self.is_simple(f)
            && self
                .args(f)
                .iter()
                .all(|&a| self.kind(a).is_lit() || self.is_clause(a, inner))
    }

    /// Check whether `f` is in conjunctive normal form.
    pub fn is_cnf(&self, f: Bx) -> bool {
        self.is_normal_form(f, Kind::And, Kind::Or)
    }

    /// Check whether `f` is in disjunctive normal form.
    pub fn is_dnf(&self, f: Bx) -> bool {
        self.is_normal_form(f, Kind::Or, Kind::And)
    }
}
