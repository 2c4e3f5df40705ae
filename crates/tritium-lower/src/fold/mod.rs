//! Compile-time evaluation and algebraic simplification of candidate nodes.

pub mod pack;
pub mod simplify;

pub use pack::{try_pack_bits, try_pack_logical, try_pack_vector, try_unpack, PackError};
pub use simplify::{simplify_binary, simplify_select};

use log::debug;
use tritium_core::{evaluate, Operation, PackedValue, Value, Width};

use crate::ir::{Constant, Expr, TypeKind};

/// Whether operand `index` of `op` is one of its ternary values, as opposed
/// to a count, a condition or a plain input.
pub(crate) fn is_value_operand(op: Operation, index: usize) -> bool {
    match op {
        Operation::Select => index > 0,
        Operation::Tb2t | Operation::F2t | Operation::Tquant | Operation::Tbranch => false,
        Operation::Tsignjmp => index == 0,
        _ => op.count_operand() != Some(index),
    }
}

/// The width of the ternary operands of `op`: the first ternary value
/// operand, or else the result type.
pub(crate) fn operation_width(op: Operation, args: &[Expr], ty: &TypeKind) -> Option<Width> {
    args.iter()
        .enumerate()
        .filter(|(index, _)| is_value_operand(op, *index))
        .find_map(|(_, arg)| arg.ty.ternary_width())
        .or_else(|| ty.ternary_width())
}

/// The constant value of `expr`, if it is one.
///
/// With `ternary` set, a plain integer literal is packed into that width.
pub fn operand_value(expr: &Expr, ternary: Option<Width>) -> Option<Value> {
    let constant = expr.as_constant()?;
    match (&expr.ty, constant) {
        (TypeKind::Ternary(_), _) => try_pack_bits(expr).ok().map(Value::Ternary),
        (TypeKind::TernaryVector(_), _) => try_pack_vector(expr).ok().map(Value::Vector),
        (_, Constant::Int(value)) => match ternary {
            Some(width) if expr.ty.is_integer() => try_pack_logical(expr, width).ok().map(Value::Ternary),
            _ => Some(Value::Int(*value)),
        },
        (_, Constant::Float(value)) => Some(Value::Float(*value)),
        (_, Constant::Ternary(value)) => Some(Value::Ternary(*value)),
        (_, Constant::Vector(value)) => Some(Value::Vector(*value)),
    }
}

/// Turn an evaluated value into a constant expression of type `ty`.
pub fn constant_expr(value: Value, ty: &TypeKind) -> Option<Expr> {
    match (value, ty) {
        (Value::Ternary(packed), TypeKind::Ternary(width)) if packed.width() == *width => {
            Some(Expr::ternary(packed))
        }
        (Value::Vector(vector), TypeKind::TernaryVector(width)) if vector.width() == *width => {
            Some(Expr::vector(vector))
        }
        (Value::Int(value), TypeKind::Scalar(kind)) if kind.is_integer() => {
            Some(Expr::int(kind.wrap(value), ty.clone()))
        }
        (Value::Int(value), TypeKind::Scalar(_)) => Some(Expr::float(value as f64, ty.clone())),
        (Value::Int(value), TypeKind::Bool) => Some(Expr::int((value != 0) as i128, TypeKind::Bool)),
        (Value::Float(value), TypeKind::Scalar(kind)) if !kind.is_integer() => {
            let value = if kind.bits() == 32 { value as f32 as f64 } else { value };
            Some(Expr::float(value, ty.clone()))
        }
        (Value::Float(value), TypeKind::Scalar(kind)) => {
            Some(Expr::int(kind.wrap(value as i128), ty.clone()))
        }
        _ => None,
    }
}

/// The zero constant of `ty`.
pub fn zero_of(ty: &TypeKind) -> Option<Expr> {
    match ty {
        TypeKind::Ternary(width) => Some(Expr::ternary(PackedValue::zero(*width))),
        TypeKind::TernaryVector(width) => Some(Expr::vector(tritium_core::LaneVector::splat(
            PackedValue::zero(*width),
        ))),
        TypeKind::Scalar(kind) if kind.is_integer() => Some(Expr::int(0, ty.clone())),
        TypeKind::Scalar(_) => Some(Expr::float(0.0, ty.clone())),
        TypeKind::Bool => Some(Expr::int(0, TypeKind::Bool)),
        _ => None,
    }
}

/// Evaluate `op` when every argument is a constant.
pub fn fold_operation(op: Operation, args: &[Expr], ty: &TypeKind) -> Option<Expr> {
    let width = operation_width(op, args, ty);
    let values = args
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            let ternary = if is_value_operand(op, index) { width } else { None };
            operand_value(arg, ternary)
        })
        .collect::<Option<Vec<_>>>()?;

    let result_width = ty.ternary_width().or(width);
    match evaluate(op, result_width, &values) {
        Ok(value) => {
            let folded = constant_expr(value, ty);
            if folded.is_none() {
                debug!("`{op}` folded to a value that does not fit {ty}");
            }
            folded
        }
        Err(err) => {
            debug!("not folding `{op}`: {err}");
            None
        }
    }
}
