use std::fmt::{Display, Formatter};

/// Handle of an expression node stored in a [`Context`][crate::context::Context].
///
/// Handles are plain arena indices: copying or dropping one never affects
/// any other handle sharing the same node. Since the node table is
/// hash-consed, two handles from the same context are equal iff the
/// expressions are structurally identical.
///
/// The derived ordering is the arena order (creation order), not the
/// canonical expression order, see [`Context::cmp`][crate::context::Context::cmp].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Bx(u32);

impl Bx {
    pub(crate) const fn new(index: u32) -> Self {
        assert!(index != 0, "Index 0 is reserved");
        Self(index)
    }

    /// Return the arena index of the node.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the internal representation of the handle.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for Bx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
