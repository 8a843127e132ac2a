//! Literal identities.
//!
//! A [`Context`][crate::context::Context] issues variables by index, in order
//! of their first request. The literal id packs that index with a polarity
//! bit, so a variable and its complement are derived from one another by
//! flipping the lowest bit:
//!
//! ```text
//! id = 2 * index + 1   (Variable)
//! id = 2 * index       (Complement)
//! ```
//!
//! Sorting by id interleaves the polarities: `~a < a < ~b < b`.

use std::fmt;
use std::ops::Neg;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(u32);

impl Lit {
    /// Creates a literal from its raw id.
    pub const fn from_id(id: u32) -> Self {
        Lit(id)
    }

    /// Positive literal (the variable itself) of the variable with the given index.
    pub const fn positive(index: u32) -> Self {
        Lit((index << 1) | 1)
    }

    /// Negative literal (the complement) of the variable with the given index.
    pub const fn negative(index: u32) -> Self {
        Lit(index << 1)
    }

    /// Returns the raw literal id.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the index of the underlying variable.
    pub const fn index(self) -> u32 {
        self.0 >> 1
    }

    pub const fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }

    pub const fn is_negative(self) -> bool {
        !self.is_positive()
    }

    /// Returns the literal of opposite polarity.
    pub const fn negate(self) -> Self {
        Lit(self.0 ^ 1)
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", if self.is_negative() { "~" } else { "" }, self.index())
    }
}
