//! Helpers for plain integer operands.
//!
//! When a recognised builtin is applied to ordinary integers the lowering pass
//! calls the width-less `<prefix>_<op>` helpers, which treat the integers as
//! logical values. Results wrap; callers narrow them to the operand type.

pub fn add(a: i128, b: i128) -> i128 {
    a.wrapping_add(b)
}

pub fn sub(a: i128, b: i128) -> i128 {
    a.wrapping_sub(b)
}

pub fn mul(a: i128, b: i128) -> i128 {
    a.wrapping_mul(b)
}

/// Zero divisor yields zero.
pub fn div(a: i128, b: i128) -> i128 {
    if b == 0 {
        0
    } else {
        a.wrapping_div(b)
    }
}

/// Zero divisor yields zero.
pub fn rem(a: i128, b: i128) -> i128 {
    if b == 0 {
        0
    } else {
        a.wrapping_rem(b)
    }
}

pub fn neg(a: i128) -> i128 {
    a.wrapping_neg()
}

pub fn and(a: i128, b: i128) -> i128 {
    a.min(b)
}

pub fn or(a: i128, b: i128) -> i128 {
    a.max(b)
}

/// `a + b` reduced into a single trit.
pub fn xor(a: i128, b: i128) -> i128 {
    match a.wrapping_add(b).rem_euclid(3) {
        0 => 0,
        1 => 1,
        _ => -1,
    }
}

/// Multiply by `3^shift`. Negative shifts leave the value alone.
pub fn shl(a: i128, shift: i128) -> i128 {
    let shift = u32::try_from(shift.max(0)).unwrap_or(u32::MAX);
    a.wrapping_mul(3i128.wrapping_pow(shift))
}

/// Divide by `3^shift`, truncating. Negative shifts leave the value alone.
pub fn shr(a: i128, shift: i128) -> i128 {
    let shift = u32::try_from(shift.max(0)).unwrap_or(u32::MAX);
    match 3i128.checked_pow(shift) {
        Some(power) => a / power,
        None => 0,
    }
}

/// Plain integers have no trit layout to rotate.
pub fn rol(a: i128, _shift: i128) -> i128 {
    a
}

pub fn ror(a: i128, _shift: i128) -> i128 {
    a
}

pub fn cmp(a: i128, b: i128) -> i128 {
    a.cmp(&b) as i128
}
