//! Expression kinds.
//!
//! Each kind is a 5-bit tag whose layout encodes category membership,
//! so that every classification used by the rewrite passes is a bit test:
//!
//! ```text
//! 0 0 0 0 *   known constants (Zero, One)
//! 0 0 1 * 0   unknown constants (Logical, Illogical)
//! 0 1 0 0 *   literals (Complement, Variable)
//! 1 0 * * *   n-ary operators (Nor/Or, Nand/And, Xnor/Xor, Unequal/Equal)
//! 1 1 * * *   fixed-arity operators (NotImplies/Implies, NotIfThenElse/IfThenElse)
//! ```
//!
//! The lowest bit is the polarity bit: it pairs every connective with its dual.

use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Kind {
    Zero = 0x00,
    One = 0x01,

    Logical = 0x04,
    Illogical = 0x06,

    Complement = 0x08,
    Variable = 0x09,

    Nor = 0x10,
    Or = 0x11,
    Nand = 0x12,
    And = 0x13,

    Xnor = 0x14,
    Xor = 0x15,
    Unequal = 0x16,
    Equal = 0x17,

    NotImplies = 0x18,
    Implies = 0x19,

    NotIfThenElse = 0x1A,
    IfThenElse = 0x1B,
}

impl Kind {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn from_bits(bits: u8) -> Option<Self> {
        let kind = match bits {
            0x00 => Kind::Zero,
            0x01 => Kind::One,
            0x04 => Kind::Logical,
            0x06 => Kind::Illogical,
            0x08 => Kind::Complement,
            0x09 => Kind::Variable,
            0x10 => Kind::Nor,
            0x11 => Kind::Or,
            0x12 => Kind::Nand,
            0x13 => Kind::And,
            0x14 => Kind::Xnor,
            0x15 => Kind::Xor,
            0x16 => Kind::Unequal,
            0x17 => Kind::Equal,
            0x18 => Kind::NotImplies,
            0x19 => Kind::Implies,
            0x1A => Kind::NotIfThenElse,
            0x1B => Kind::IfThenElse,
            _ => return None,
        };
        Some(kind)
    }

    // 0 ****
    pub const fn is_atom(self) -> bool {
        self.bits() >> 4 == 0
    }
    // 1 ****
    pub const fn is_op(self) -> bool {
        self.bits() >> 4 == 1
    }
    // 0 0***
    pub const fn is_const(self) -> bool {
        self.bits() >> 3 == 0
    }
    // 0 00**
    pub const fn is_known(self) -> bool {
        self.bits() >> 2 == 0
    }
    // 0 01**
    pub const fn is_unknown(self) -> bool {
        self.bits() >> 2 == 1
    }
    // 0 1***
    pub const fn is_lit(self) -> bool {
        self.bits() >> 3 == 1
    }
    // 1 0***
    pub const fn is_nary(self) -> bool {
        self.bits() >> 3 == 2
    }
    // * ***0
    pub const fn is_neg(self) -> bool {
        self.bits() & 1 == 0
    }
    // * ***1
    pub const fn is_pos(self) -> bool {
        self.bits() & 1 == 1
    }

    /// Returns the dual kind, flipping the polarity bit.
    ///
    /// Unknown constants are self-dual.
    pub const fn dual(self) -> Self {
        if self.is_unknown() {
            return self;
        }
        match Kind::from_bits(self.bits() ^ 1) {
            Some(kind) => kind,
            None => self,
        }
    }

    /// Returns the positive member of the dual pair.
    pub const fn positive(self) -> Self {
        if self.is_neg() {
            self.dual()
        } else {
            self
        }
    }

    /// Number of arguments required by fixed-arity operators.
    pub const fn arity(self) -> Option<usize> {
        match self {
            Kind::NotImplies | Kind::Implies => Some(2),
            Kind::NotIfThenElse | Kind::IfThenElse => Some(3),
            _ => None,
        }
    }

    /// Operator name used for rendering.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Zero => "Zero",
            Kind::One => "One",
            Kind::Logical => "Logical",
            Kind::Illogical => "Illogical",
            Kind::Complement => "Complement",
            Kind::Variable => "Variable",
            Kind::Nor => "Nor",
            Kind::Or => "Or",
            Kind::Nand => "Nand",
            Kind::And => "And",
            Kind::Xnor => "Xnor",
            Kind::Xor => "Xor",
            Kind::Unequal => "Unequal",
            Kind::Equal => "Equal",
            Kind::NotImplies => "NotImplies",
            Kind::Implies => "Implies",
            Kind::NotIfThenElse => "NotIfThenElse",
            Kind::IfThenElse => "IfThenElse",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Kind> for u8 {
    fn from(kind: Kind) -> Self {
        kind.bits()
    }
}
