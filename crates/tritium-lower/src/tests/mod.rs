//! Unit tests for the lowering pass.

mod test_resolver;

use tritium_core::{encode, Width};

use crate::ir::{BinOp, Expr, TypeKind};

pub fn width(trits: u32) -> Width {
    Width::new(trits).expect("valid test width")
}

pub fn tern(trits: u32) -> TypeKind {
    TypeKind::Ternary(width(trits))
}

pub fn t32() -> TypeKind {
    tern(32)
}

/// A ternary constant of the given width.
pub fn lit(value: i128, trits: u32) -> Expr {
    Expr::ternary(encode(value, width(trits)))
}

/// A binary node typed like its left operand.
pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let ty = lhs.ty.clone();
    Expr::binary(op, lhs, rhs, ty)
}
