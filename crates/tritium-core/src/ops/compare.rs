//! Ordering of packed values.

use std::cmp::Ordering;

use crate::error::TritError;
use crate::ops::common_width;
use crate::packed::PackedValue;
use crate::trit::Trit;

/// Compare logical values, most significant trit first.
pub fn compare(a: &PackedValue, b: &PackedValue) -> Result<Ordering, TritError> {
    let width = common_width(a, b)?;
    for index in (0..width.trits()).rev() {
        match a.trit(index).cmp(&b.trit(index)) {
            Ordering::Equal => continue,
            ordering => return Ok(ordering),
        }
    }
    Ok(Ordering::Equal)
}

/// Three-way comparison as `-1`, `0` or `1`.
pub fn cmp(a: &PackedValue, b: &PackedValue) -> Result<i8, TritError> {
    Ok(compare(a, b)? as i8)
}

pub fn eq(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_eq())
}

pub fn ne(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_ne())
}

pub fn lt(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_lt())
}

pub fn le(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_le())
}

pub fn gt(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_gt())
}

pub fn ge(a: &PackedValue, b: &PackedValue) -> Result<bool, TritError> {
    Ok(compare(a, b)?.is_ge())
}

fn encoded(width: crate::width::Width, trit: Trit) -> PackedValue {
    PackedValue::zero(width).with_trit(0, trit)
}

/// `-1` when `a < b`, else `0`.
pub fn cmplt(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let trit = if lt(a, b)? { Trit::Neg } else { Trit::Zero };
    Ok(encoded(a.width(), trit))
}

/// `1` when `a == b`, else `0`.
pub fn cmpeq(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let trit = if eq(a, b)? { Trit::Pos } else { Trit::Zero };
    Ok(encoded(a.width(), trit))
}

/// `1` when `a > b`, else `0`.
pub fn cmpgt(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let trit = if gt(a, b)? { Trit::Pos } else { Trit::Zero };
    Ok(encoded(a.width(), trit))
}

/// `1` when `a != b`, else `0`.
pub fn cmpneq(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let trit = if ne(a, b)? { Trit::Pos } else { Trit::Zero };
    Ok(encoded(a.width(), trit))
}

/// Three-way dispatch on the sign of a plain integer.
pub fn tbranch<T>(cond: i128, neg: T, zero: T, pos: T) -> T {
    match cond.signum() {
        -1 => neg,
        0 => zero,
        _ => pos,
    }
}

/// Three-way dispatch on the sign of a packed value.
pub fn tsignjmp<T>(reg: &PackedValue, neg: T, zero: T, pos: T) -> T {
    match reg.sign() {
        Trit::Neg => neg,
        Trit::Zero => zero,
        Trit::Pos => pos,
    }
}
