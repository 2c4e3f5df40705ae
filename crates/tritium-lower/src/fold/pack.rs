//! Reinterpreting literal operands as packed ternary constants and back.

use thiserror::Error;
use tritium_core::{checked_decode, encode, LaneVector, PackedValue, TritError, Width};

use crate::ir::{Constant, ExprView, TypeKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error("operand is not a constant")]
    NotConstant,

    #[error("operand of type {0} is not a ternary value")]
    NotTernary(TypeKind),

    #[error("operand of type {0} is not a plain integer")]
    NotInteger(TypeKind),

    #[error("value {value} is outside the range of t{width}")]
    OutOfRange { value: i128, width: u32 },

    #[error("constant of width t{found} used where t{expected} is expected")]
    WidthMismatch { expected: u32, found: u32 },

    #[error(transparent)]
    Trit(#[from] TritError),
}

/// A constant of ternary type as a packed value.
///
/// Integer constants of ternary type are the host's raw bit patterns and must
/// fit in `2 * N` bits.
pub fn try_pack_bits<E: ExprView + ?Sized>(expr: &E) -> Result<PackedValue, PackError> {
    let width = match expr.ty() {
        TypeKind::Ternary(width) => *width,
        other => return Err(PackError::NotTernary(other.clone())),
    };
    match expr.constant().ok_or(PackError::NotConstant)? {
        Constant::Ternary(value) => {
            if value.width() != width {
                return Err(PackError::WidthMismatch {
                    expected: width.trits(),
                    found: value.width().trits(),
                });
            }
            Ok(*value)
        }
        Constant::Int(bits) => {
            let bits = u128::try_from(*bits).map_err(|_| TritError::BitsOutOfRange {
                width: width.trits(),
            })?;
            Ok(PackedValue::from_bits(width, bits)?)
        }
        _ => Err(PackError::NotConstant),
    }
}

/// A plain integer literal used where a `width`-trit operand is expected.
///
/// Values outside the representable range are rejected rather than wrapped.
pub fn try_pack_logical<E: ExprView + ?Sized>(expr: &E, width: Width) -> Result<PackedValue, PackError> {
    if !expr.ty().is_integer() {
        return Err(PackError::NotInteger(expr.ty().clone()));
    }
    match expr.constant().ok_or(PackError::NotConstant)? {
        Constant::Int(value) if width.contains(*value) => Ok(encode(*value, width)),
        Constant::Int(value) => Err(PackError::OutOfRange {
            value: *value,
            width: width.trits(),
        }),
        _ => Err(PackError::NotConstant),
    }
}

/// A ternary constant where a plain integer is expected.
pub fn try_unpack<E: ExprView + ?Sized>(expr: &E) -> Result<i128, PackError> {
    let packed = try_pack_bits(expr)?;
    Ok(checked_decode(&packed)?)
}

/// A constant of ternary vector type.
pub fn try_pack_vector<E: ExprView + ?Sized>(expr: &E) -> Result<LaneVector, PackError> {
    let width = match expr.ty() {
        TypeKind::TernaryVector(width) => *width,
        other => return Err(PackError::NotTernary(other.clone())),
    };
    match expr.constant().ok_or(PackError::NotConstant)? {
        Constant::Vector(vector) if vector.width() == width => Ok(*vector),
        Constant::Vector(vector) => Err(PackError::WidthMismatch {
            expected: width.trits(),
            found: vector.width().trits(),
        }),
        Constant::Int(bits) => {
            let bits = u128::try_from(*bits).map_err(|_| TritError::BitsOutOfRange {
                width: width.trits(),
            })?;
            Ok(LaneVector::from_bits(width, bits)?)
        }
        _ => Err(PackError::NotConstant),
    }
}
