//! Single balanced-ternary digits and their 2-bit field codes.

use std::fmt;

/// A balanced-ternary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trit {
    Neg,
    Zero,
    Pos,
}

/// 2-bit field code that no trit maps to. Decodes as [`Trit::Zero`].
pub const RESERVED_FIELD: u8 = 0b11;

impl Trit {
    /// Decode a 2-bit field. The reserved pattern has no trit.
    pub fn from_field(bits: u8) -> Option<Trit> {
        match bits & 0b11 {
            0b00 => Some(Trit::Neg),
            0b01 => Some(Trit::Zero),
            0b10 => Some(Trit::Pos),
            _ => None,
        }
    }

    /// The 2-bit field code of this trit.
    pub fn field(self) -> u8 {
        match self {
            Trit::Neg => 0b00,
            Trit::Zero => 0b01,
            Trit::Pos => 0b10,
        }
    }

    pub fn value(self) -> i8 {
        match self {
            Trit::Neg => -1,
            Trit::Zero => 0,
            Trit::Pos => 1,
        }
    }

    /// Map an integer in {-1, 0, 1}. Anything else is `None`.
    pub fn from_value(value: i64) -> Option<Trit> {
        match value {
            -1 => Some(Trit::Neg),
            0 => Some(Trit::Zero),
            1 => Some(Trit::Pos),
            _ => None,
        }
    }

    /// The sign of an integer as a trit.
    pub fn sign_of(value: i128) -> Trit {
        match value.signum() {
            -1 => Trit::Neg,
            0 => Trit::Zero,
            _ => Trit::Pos,
        }
    }

    pub fn negate(self) -> Trit {
        match self {
            Trit::Neg => Trit::Pos,
            Trit::Zero => Trit::Zero,
            Trit::Pos => Trit::Neg,
        }
    }

    /// Three-valued AND.
    pub fn min(self, other: Trit) -> Trit {
        Ord::min(self, other)
    }

    /// Three-valued OR.
    pub fn max(self, other: Trit) -> Trit {
        Ord::max(self, other)
    }

    /// The trit congruent to `self + other` modulo 3.
    pub fn xor(self, other: Trit) -> Trit {
        match (self.value() + other.value()).rem_euclid(3) {
            0 => Trit::Zero,
            1 => Trit::Pos,
            _ => Trit::Neg,
        }
    }

    /// Majority of three; zero when all three differ.
    pub fn majority(a: Trit, b: Trit, c: Trit) -> Trit {
        if a == b || a == c {
            a
        } else if b == c {
            b
        } else {
            Trit::Zero
        }
    }

    /// Three-valued implication `antecedent -> consequent`.
    pub fn implies(self, consequent: Trit) -> Trit {
        match self {
            Trit::Neg => Trit::Pos,
            Trit::Zero | Trit::Pos => consequent,
        }
    }

    /// Full adder step: returns `(sum, carry)` for `self + other + carry_in`.
    pub(crate) fn add_with_carry(self, other: Trit, carry_in: Trit) -> (Trit, Trit) {
        match self.value() + other.value() + carry_in.value() {
            3 => (Trit::Zero, Trit::Pos),
            2 => (Trit::Neg, Trit::Pos),
            1 => (Trit::Pos, Trit::Zero),
            0 => (Trit::Zero, Trit::Zero),
            -1 => (Trit::Neg, Trit::Zero),
            -2 => (Trit::Pos, Trit::Neg),
            _ => (Trit::Zero, Trit::Neg),
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::Neg => write!(f, "-"),
            Trit::Zero => write!(f, "0"),
            Trit::Pos => write!(f, "+"),
        }
    }
}
