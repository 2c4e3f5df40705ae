//! Types as the lowering pass sees them.
//!
//! Host types are translated once into [`TypeKind`]; every "is this a ternary
//! type" question is answered from the tag.

use std::fmt;

use tritium_core::Width;

/// A plain scalar type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Signed integer of the given bit precision
    Signed(u32),
    /// Unsigned integer of the given bit precision
    Unsigned(u32),
    /// Floating point of the given bit precision
    Float(u32),
}

impl ScalarKind {
    pub fn bits(self) -> u32 {
        match self {
            ScalarKind::Signed(bits) | ScalarKind::Unsigned(bits) | ScalarKind::Float(bits) => bits,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, ScalarKind::Float(_))
    }

    /// Naming letter used by select helpers: `i`, `u` or `f`.
    pub fn letter(self) -> char {
        match self {
            ScalarKind::Signed(_) => 'i',
            ScalarKind::Unsigned(_) => 'u',
            ScalarKind::Float(_) => 'f',
        }
    }

    /// Wrap an integer to this type's precision. Floats are returned as is.
    pub fn wrap(self, value: i128) -> i128 {
        match self {
            ScalarKind::Signed(bits) if (1..128).contains(&bits) => {
                let shift = 128 - bits;
                (value << shift) >> shift
            }
            ScalarKind::Unsigned(bits) if (1..128).contains(&bits) => value & ((1i128 << bits) - 1),
            _ => value,
        }
    }
}

/// Type tag attached to every expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Packed ternary value of the given width
    Ternary(Width),
    /// Two-lane vector of ternary values
    TernaryVector(Width),
    /// Boolean result of a comparison
    Bool,
    /// Plain scalar
    Scalar(ScalarKind),
    /// Pointer to a value of the inner type
    Pointer(Box<TypeKind>),
    /// No value
    Void,
}

impl TypeKind {
    pub fn ternary(width: Width) -> Self {
        TypeKind::Ternary(width)
    }

    pub fn signed(bits: u32) -> Self {
        TypeKind::Scalar(ScalarKind::Signed(bits))
    }

    pub fn unsigned(bits: u32) -> Self {
        TypeKind::Scalar(ScalarKind::Unsigned(bits))
    }

    pub fn float(bits: u32) -> Self {
        TypeKind::Scalar(ScalarKind::Float(bits))
    }

    pub fn pointer_to(pointee: TypeKind) -> Self {
        TypeKind::Pointer(Box::new(pointee))
    }

    /// Width of a ternary scalar or vector type.
    pub fn ternary_width(&self) -> Option<Width> {
        match self {
            TypeKind::Ternary(width) | TypeKind::TernaryVector(width) => Some(*width),
            _ => None,
        }
    }

    pub fn is_ternary(&self) -> bool {
        matches!(self, TypeKind::Ternary(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, TypeKind::TernaryVector(_))
    }

    /// Ternary scalar or vector.
    pub fn is_ternary_like(&self) -> bool {
        self.ternary_width().is_some()
    }

    pub fn scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeKind::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Integer-like: integer scalars and booleans.
    pub fn is_integer(&self) -> bool {
        match self {
            TypeKind::Scalar(kind) => kind.is_integer(),
            TypeKind::Bool => true,
            _ => false,
        }
    }

    pub fn pointee(&self) -> Option<&TypeKind> {
        match self {
            TypeKind::Pointer(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.bits())
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Ternary(width) => write!(f, "t{}", width.trits()),
            TypeKind::TernaryVector(width) => write!(f, "tv{}", width.trits()),
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Scalar(kind) => write!(f, "{kind}"),
            TypeKind::Pointer(inner) => write!(f, "*{inner}"),
            TypeKind::Void => write!(f, "void"),
        }
    }
}
