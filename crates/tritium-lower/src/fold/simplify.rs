//! Algebraic identities and statically known selects.

use tritium_core::Operation;

use super::{operand_value, zero_of};
use crate::ir::{Constant, Expr, TypeKind};

/// The integer value of a constant operand, reading ternary constants through
/// their packed form.
fn known_value(expr: &Expr) -> Option<i128> {
    match (&expr.ty, expr.as_constant()?) {
        (TypeKind::Ternary(_), _) => super::try_unpack(expr).ok(),
        (_, Constant::Int(value)) if expr.ty.is_integer() => Some(*value),
        _ => None,
    }
}

fn is_zero(expr: &Expr) -> bool {
    known_value(expr) == Some(0)
}

fn is_one(expr: &Expr) -> bool {
    known_value(expr) == Some(1)
}

/// `kept` if it already has the node's type.
fn keep(kept: &Expr, ty: &TypeKind) -> Option<Expr> {
    (kept.ty == *ty).then(|| kept.clone())
}

/// Simplify a two-operand arithmetic node.
///
/// Returns `None` when no identity applies. An operand is only discarded when
/// evaluating it has no effects.
pub fn simplify_binary(op: Operation, lhs: &Expr, rhs: &Expr, ty: &TypeKind) -> Option<Expr> {
    match op {
        Operation::Add if is_zero(rhs) => keep(lhs, ty),
        Operation::Add if is_zero(lhs) => keep(rhs, ty),
        Operation::Sub if is_zero(rhs) => keep(lhs, ty),
        Operation::Mul if is_zero(rhs) && !lhs.has_side_effects() => zero_of(ty),
        Operation::Mul if is_zero(lhs) && !rhs.has_side_effects() => zero_of(ty),
        Operation::Mul if is_one(rhs) => keep(lhs, ty),
        Operation::Mul if is_one(lhs) => keep(rhs, ty),
        _ => None,
    }
}

/// Two branches that produce the same value.
fn same_branch(then: &Expr, otherwise: &Expr) -> bool {
    if then == otherwise {
        return true;
    }
    if then.ty != otherwise.ty {
        return false;
    }
    let width = then.ty.ternary_width();
    match (operand_value(then, width), operand_value(otherwise, width)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Simplify `cond ? then : otherwise`.
pub fn simplify_select(cond: &Expr, then: &Expr, otherwise: &Expr, ty: &TypeKind) -> Option<Expr> {
    if !cond.has_side_effects() && same_branch(then, otherwise) {
        return keep(then, ty);
    }
    let truthy = match (&cond.ty, cond.as_constant()?) {
        (TypeKind::Ternary(_), _) => super::try_unpack(cond).ok()? != 0,
        (_, Constant::Int(value)) => *value != 0,
        (_, Constant::Float(value)) => *value != 0.0,
        _ => return None,
    };
    keep(if truthy { then } else { otherwise }, ty)
}
