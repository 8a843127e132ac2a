use std::cell::RefCell;
use std::cmp::min;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

use log::debug;

use crate::cache::{Cache, OpKey};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::node::{Node, Operator};
use crate::reference::Bx;
use crate::table::Table;
use crate::types::Lit;

type Storage = Table<Node>;

/// Owner of all expression nodes.
///
/// The context interns variables by name, hash-conses every node it builds
/// and memoizes the rewrite passes. All operations take `&self`; the state is
/// kept behind `RefCell`s, so a context is single-threaded.
pub struct Context {
    storage: RefCell<Storage>,
    cache: RefCell<Cache<OpKey, Bx>>,
    vars: RefCell<HashMap<String, Bx>>,
    names: RefCell<Vec<String>>,
    lits: RefCell<Vec<Bx>>,
    zero: Bx,
    one: Bx,
    logical: Bx,
    illogical: Bx,
}

impl Context {
    pub fn new(storage_bits: usize) -> Self {
        assert!(
            storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );

        let cache_bits = min(storage_bits, 16);

        let mut storage = Storage::new(storage_bits);

        // Allocate the constants:
        let zero = Bx::new(storage.put(Node::Constant(Kind::Zero)) as u32);
        let one = Bx::new(storage.put(Node::Constant(Kind::One)) as u32);
        let logical = Bx::new(storage.put(Node::Constant(Kind::Logical)) as u32);
        let illogical = Bx::new(storage.put(Node::Constant(Kind::Illogical)) as u32);
        assert_eq!(zero.index(), 1); // Make sure the constants come first.

        Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::new(cache_bits)),
            vars: RefCell::new(HashMap::new()),
            names: RefCell::new(Vec::new()),
            lits: RefCell::new(Vec::new()),
            zero,
            one,
            logical,
            illogical,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(16)
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Context")
            .field("buckets", &storage.num_buckets())
            .field("size", &storage.size())
            .field("vars", &self.var_count())
            .finish()
    }
}

impl Context {
    pub fn cache(&self) -> std::cell::Ref<'_, Cache<OpKey, Bx>> {
        self.cache.borrow()
    }

    pub(crate) fn cache_get(&self, key: OpKey) -> Option<Bx> {
        self.cache.borrow().get(&key).copied()
    }
    pub(crate) fn cache_insert(&self, key: OpKey, res: Bx) {
        self.cache.borrow_mut().insert(key, res);
    }

    /// Number of distinct nodes ever built in this context.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }

    pub fn zero(&self) -> Bx {
        self.zero
    }
    pub fn one(&self) -> Bx {
        self.one
    }
    pub fn logical(&self) -> Bx {
        self.logical
    }
    pub fn illogical(&self) -> Bx {
        self.illogical
    }

    pub fn is_zero(&self, f: Bx) -> bool {
        f == self.zero
    }
    pub fn is_one(&self, f: Bx) -> bool {
        f == self.one
    }

    /// Constant handle for a Boolean value.
    pub fn constant(&self, value: bool) -> Bx {
        if value {
            self.one
        } else {
            self.zero
        }
    }

    /// Clone the node out of the table.
    ///
    /// The returned node does not borrow the context, so it can be held
    /// across calls that build new nodes.
    pub fn node(&self, f: Bx) -> Node {
        self.storage.borrow().value(f.index()).clone()
    }

    pub fn kind(&self, f: Bx) -> Kind {
        self.storage.borrow().value(f.index()).kind()
    }

    /// Operator arguments, empty for atoms.
    pub fn args(&self, f: Bx) -> Rc<[Bx]> {
        match self.storage.borrow().value(f.index()) {
            Node::Operator(op) => op.args.clone(),
            _ => Rc::new([]),
        }
    }

    /// Literal payload, `None` for constants and operators.
    pub fn lit(&self, f: Bx) -> Option<Lit> {
        match self.storage.borrow().value(f.index()) {
            Node::Literal(lit) => Some(*lit),
            _ => None,
        }
    }

    pub fn is_simple(&self, f: Bx) -> bool {
        self.storage.borrow().value(f.index()).is_simple()
    }

    /// Number of interned variables.
    pub fn var_count(&self) -> usize {
        self.names.borrow().len()
    }

    /// Get the variable with the given name, creating it on first request.
    pub fn get_var(&self, name: &str) -> Bx {
        if let Some(&x) = self.vars.borrow().get(name) {
            return x;
        }

        let index = self.var_count() as u32;
        debug!("get_var(name = {}) -> new variable {}", name, index);

        let (neg, pos) = {
            let mut storage = self.storage.borrow_mut();
            let neg = storage.put(Node::Literal(Lit::negative(index)));
            let pos = storage.put(Node::Literal(Lit::positive(index)));
            (Bx::new(neg as u32), Bx::new(pos as u32))
        };

        // Literal ids index this table directly.
        let mut lits = self.lits.borrow_mut();
        assert_eq!(lits.len(), Lit::negative(index).id() as usize);
        lits.push(neg);
        lits.push(pos);

        self.names.borrow_mut().push(name.to_string());
        self.vars.borrow_mut().insert(name.to_string(), pos);
        pos
    }

    /// Check whether a variable with the given name exists.
    pub fn has_var(&self, name: &str) -> bool {
        self.vars.borrow().contains_key(name)
    }

    /// Name of the variable underlying the literal with the given id.
    pub fn get_name(&self, id: u32) -> Result<String> {
        let index = Lit::from_id(id).index() as usize;
        self.names
            .borrow()
            .get(index)
            .cloned()
            .ok_or(Error::UnknownId(id))
    }

    /// Literal handle with the given id.
    pub fn get_lit(&self, id: u32) -> Result<Bx> {
        self.lits
            .borrow()
            .get(id as usize)
            .copied()
            .ok_or(Error::UnknownId(id))
    }

    /// Literal handle for a literal issued by this context.
    pub(crate) fn lit_bx(&self, lit: Lit) -> Bx {
        self.lits.borrow()[lit.id() as usize]
    }

    /// Name of the variable underlying a literal node.
    pub fn var_name(&self, f: Bx) -> Option<String> {
        let lit = self.lit(f)?;
        self.get_name(lit.id()).ok()
    }

    /// Positive literal (the variable) of a literal node.
    pub fn var_of(&self, f: Bx) -> Option<Bx> {
        let lit = self.lit(f)?;
        Some(self.lit_bx(Lit::positive(lit.index())))
    }

    /// Put an operator node into the table.
    ///
    /// If an identical node already exists, its handle is returned. A node
    /// put as `simple` marks the shared slot as simple.
    pub(crate) fn mk_op(&self, kind: Kind, args: Vec<Bx>, simple: bool) -> Bx {
        assert!(kind.is_op(), "Kind {} is not an operator", kind);

        let mut storage = self.storage.borrow_mut();
        let i = storage.put(Node::Operator(Operator {
            kind,
            args: args.into(),
            simple,
        }));
        if simple {
            if let Node::Operator(op) = storage.value_mut(i) {
                op.simple = true;
            }
        }
        Bx::new(i as u32)
    }
}
