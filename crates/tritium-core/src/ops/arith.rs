//! Balanced-ternary arithmetic.
//!
//! Addition, subtraction and multiplication run on the trit vectors with
//! balanced carries, so they are exact modulo `3^N` at every width. Division
//! works on decoded values and therefore needs operands that fit an `i128`.

use log::debug;

use crate::codec::{checked_decode, decode, encode, normalize};
use crate::error::TritError;
use crate::ops::common_width;
use crate::packed::PackedValue;
use crate::trit::Trit;

pub fn add(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let mut out = PackedValue::zero(width);
    let mut carry = Trit::Zero;
    for index in 0..width.trits() {
        let (sum, next) = a.trit(index).add_with_carry(b.trit(index), carry);
        out.set_trit(index, sum);
        carry = next;
    }
    Ok(out)
}

pub fn sub(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    add(a, &neg(b))
}

/// Negate every trit. Equal to `encode(-decode(a))`.
pub fn neg(a: &PackedValue) -> PackedValue {
    let mut out = PackedValue::zero(a.width());
    for (index, trit) in a.trits().enumerate() {
        out.set_trit(index as u32, trit.negate());
    }
    out
}

pub fn mul(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let mut acc = PackedValue::zero(width);
    for (index, digit) in b.trits().enumerate() {
        if digit == Trit::Zero {
            continue;
        }
        let shifted = super::shift::shl(a, index as u32);
        acc = match digit {
            Trit::Pos => add(&acc, &shifted)?,
            _ => sub(&acc, &shifted)?,
        };
    }
    Ok(acc)
}

/// Truncating division. A zero divisor yields the zero value.
pub fn div(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let divisor = checked_decode(b)?;
    if divisor == 0 {
        debug!("ternary division by zero at {width}, yielding zero");
        return Ok(PackedValue::zero(width));
    }
    Ok(encode(checked_decode(a)?.wrapping_div(divisor), width))
}

/// Remainder of truncating division; takes the sign of the dividend. A zero
/// divisor yields the zero value.
pub fn rem(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let divisor = checked_decode(b)?;
    if divisor == 0 {
        debug!("ternary remainder by zero at {width}, yielding zero");
        return Ok(PackedValue::zero(width));
    }
    Ok(encode(checked_decode(a)?.wrapping_rem(divisor), width))
}

/// `a * b + c`.
pub fn muladd(a: &PackedValue, b: &PackedValue, c: &PackedValue) -> Result<PackedValue, TritError> {
    add(&mul(a, b)?, c)
}

/// `a + bias`, with `bias` wrapped into the width of `a`.
pub fn bias(a: &PackedValue, bias: i64) -> PackedValue {
    let offset = encode(bias as i128, a.width());
    let mut out = PackedValue::zero(a.width());
    let mut carry = Trit::Zero;
    for index in 0..a.width().trits() {
        let (sum, next) = a.trit(index).add_with_carry(offset.trit(index), carry);
        out.set_trit(index, sum);
        carry = next;
    }
    out
}

/// Divide by `3^drop`, truncating toward zero.
///
/// Dropping the low trits alone rounds to nearest; the quotient is nudged
/// back toward zero when the dropped part points away from it.
pub fn tround(a: &PackedValue, drop: u32) -> PackedValue {
    let width = a.width();
    if drop >= width.trits() {
        return PackedValue::zero(width);
    }
    if drop == 0 {
        return normalize(a);
    }

    let mut quotient = super::shift::shr_logical(a, drop);
    let mut dropped = PackedValue::zero(width);
    for index in 0..drop {
        dropped.set_trit(index, a.trit(index));
    }

    let sign = a.sign();
    let low = dropped.sign();
    let nudge = match (sign, low) {
        (Trit::Pos, Trit::Neg) => Some(-1),
        (Trit::Neg, Trit::Pos) => Some(1),
        _ => None,
    };
    if let Some(step) = nudge {
        quotient = bias(&quotient, step);
    }
    quotient
}

pub fn tnormalize(a: &PackedValue) -> PackedValue {
    normalize(a)
}

/// The logical value as a plain integer. Wraps for values outside `i128`.
pub fn tnet(a: &PackedValue) -> i128 {
    decode(a)
}
