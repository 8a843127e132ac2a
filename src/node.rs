use std::rc::Rc;

use crate::kind::Kind;
use crate::reference::Bx;
use crate::types::Lit;
use crate::utils::{pairing2, pairing_seq, MyHash};

/// Operator payload: kind, ordered argument list and the `simple` flag.
///
/// The flag marks nodes already in reduced canonical form. It does not take
/// part in node identity: two operators are equal iff their kinds and
/// argument lists are.
#[derive(Debug, Clone)]
pub struct Operator {
    pub kind: Kind,
    pub args: Rc<[Bx]>,
    pub simple: bool,
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.args == other.args
    }
}

impl Eq for Operator {}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Constant(Kind),
    Literal(Lit),
    Operator(Operator),
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Constant(kind) => *kind,
            Node::Literal(lit) => {
                if lit.is_positive() {
                    Kind::Variable
                } else {
                    Kind::Complement
                }
            }
            Node::Operator(op) => op.kind,
        }
    }

    /// Operator arguments, empty for atoms.
    pub fn args(&self) -> &[Bx] {
        match self {
            Node::Operator(op) => &op.args,
            _ => &[],
        }
    }

    /// Atoms are always simple.
    pub fn is_simple(&self) -> bool {
        match self {
            Node::Operator(op) => op.simple,
            _ => true,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Constant(Kind::Zero)
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        let kind = self.kind().bits() as u64;
        match self {
            Node::Constant(_) => kind,
            Node::Literal(lit) => pairing2(kind, lit.id() as u64),
            Node::Operator(op) => pairing_seq(kind, op.args.iter().map(|a| a.get() as u64)),
        }
    }
}
