//! Which IR nodes stand for which ternary operation.

use tritium_core::{Operation, ResultShape};

use crate::fold::is_value_operand;
use crate::ir::{BinOp, Callee, Expr, ExprKind, TypeKind, UnOp};

pub fn binary_operation(op: BinOp) -> Operation {
    match op {
        BinOp::Add => Operation::Add,
        BinOp::Sub => Operation::Sub,
        BinOp::Mul => Operation::Mul,
        BinOp::Div => Operation::Div,
        BinOp::Rem => Operation::Mod,
        BinOp::BitAnd => Operation::And,
        BinOp::BitOr => Operation::Or,
        BinOp::BitXor => Operation::Xor,
        BinOp::Shl => Operation::Shl,
        BinOp::Shr => Operation::Shr,
        BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => Operation::Cmp,
    }
}

pub fn unary_operation(op: UnOp) -> Operation {
    match op {
        UnOp::Neg => Operation::Neg,
        UnOp::Not => Operation::Not,
    }
}

/// The conversion helper a cast between `from` and `to` needs.
///
/// Casts between two ternary types are not conversions: the widths either
/// agree and the cast is a no-op, or they do not and nothing can lower it.
pub fn cast_operation(from: &TypeKind, to: &TypeKind) -> Option<Operation> {
    match (from, to) {
        (TypeKind::Scalar(kind), TypeKind::Ternary(_)) if kind.is_integer() => Some(Operation::Tb2t),
        (TypeKind::Bool, TypeKind::Ternary(_)) => Some(Operation::Tb2t),
        (TypeKind::Scalar(_), TypeKind::Ternary(_)) => Some(Operation::F2t),
        (TypeKind::Ternary(_), TypeKind::Scalar(kind)) if kind.is_integer() => Some(Operation::Tt2b),
        (TypeKind::Ternary(_), TypeKind::Bool) => Some(Operation::Tt2b),
        (TypeKind::Ternary(_), TypeKind::Scalar(_)) => Some(Operation::T2f),
        _ => None,
    }
}

/// The operation a recognised builtin call names.
pub fn builtin_operation(callee: &Callee) -> Option<Operation> {
    match callee {
        Callee::Named(name) => Operation::from_builtin_name(name),
        Callee::Helper(_) => None,
    }
}

/// The operation `expr` stands for, looking only at the node itself.
///
/// Arithmetic, logic, shift and comparison nodes qualify when an operand is
/// of ternary type; every conditional qualifies.
pub fn classify(expr: &Expr) -> Option<Operation> {
    match &expr.kind {
        ExprKind::Binary { op, lhs, rhs } => {
            let ternary = lhs.ty.is_ternary_like() || (!op_is_shift(*op) && rhs.ty.is_ternary_like());
            ternary.then(|| binary_operation(*op))
        }
        ExprKind::Unary { op, operand } => operand.ty.is_ternary_like().then(|| unary_operation(*op)),
        ExprKind::Cast(operand) => cast_operation(&operand.ty, &expr.ty),
        ExprKind::Cond { .. } => Some(Operation::Select),
        ExprKind::Call { callee, .. } => builtin_operation(callee),
        ExprKind::Const(_) | ExprKind::Local(_) | ExprKind::Load(_) => None,
    }
}

fn op_is_shift(op: BinOp) -> bool {
    matches!(op, BinOp::Shl | BinOp::Shr)
}

/// The type the helper for `op` is keyed on: the first ternary value operand,
/// or the result for operations producing a ternary value from plain inputs.
pub fn key_type<'a>(op: Operation, args: &'a [Expr], ty: &'a TypeKind) -> &'a TypeKind {
    let from_operand = || {
        args.iter()
            .enumerate()
            .find(|(index, arg)| is_value_operand(op, *index) && arg.ty.is_ternary_like())
            .map(|(_, arg)| &arg.ty)
    };
    match op {
        Operation::Select | Operation::Tb2t | Operation::F2t | Operation::Tquant => ty,
        Operation::Tbranch => args.first().map_or(ty, |arg| &arg.ty),
        _ => from_operand()
            .or_else(|| args.first().map(|arg| &arg.ty))
            .unwrap_or(ty),
    }
}

/// The type a builtin call statement without a destination produces.
pub fn builtin_result_type(op: Operation, args: &[Expr]) -> Option<TypeKind> {
    match op.result_shape() {
        ResultShape::Ternary => {
            let unknown = TypeKind::Void;
            let ty = key_type(op, args, &unknown);
            ty.is_ternary_like().then(|| ty.clone())
        }
        ResultShape::Integer if op == Operation::Tt2b => Some(TypeKind::signed(64)),
        ResultShape::Integer => Some(TypeKind::signed(32)),
        ResultShape::Float => Some(TypeKind::float(64)),
        ResultShape::Operand(index) => args.get(index).map(|arg| arg.ty.clone()),
        ResultShape::Pointee => args.first().and_then(|arg| arg.ty.pointee()).cloned(),
        ResultShape::Unit => Some(TypeKind::Void),
    }
}
