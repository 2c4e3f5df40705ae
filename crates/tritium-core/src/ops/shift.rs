//! Trit shifts and rotations.

use crate::packed::PackedValue;
use crate::trit::Trit;

/// Move trits towards the most significant end, filling with zero trits.
/// Amounts of at least the width give the zero value.
pub fn shl(a: &PackedValue, amount: u32) -> PackedValue {
    let width = a.width().trits();
    let mut out = PackedValue::zero(a.width());
    for index in amount.min(width)..width {
        out.set_trit(index, a.trit(index - amount));
    }
    out
}

/// Arithmetic shift right: vacated high trits repeat the most significant
/// trit. Amounts of at least the width fill every trit with it.
pub fn shr(a: &PackedValue, amount: u32) -> PackedValue {
    let width = a.width().trits();
    let fill = a.trit(width - 1);
    shift_down(a, amount, fill)
}

/// Shift right filling with zero trits.
pub(crate) fn shr_logical(a: &PackedValue, amount: u32) -> PackedValue {
    shift_down(a, amount, Trit::Zero)
}

fn shift_down(a: &PackedValue, amount: u32, fill: Trit) -> PackedValue {
    let width = a.width().trits();
    let mut out = PackedValue::splat(a.width(), fill);
    for index in 0..width.saturating_sub(amount) {
        out.set_trit(index, a.trit(index + amount));
    }
    out
}

/// Rotate towards the most significant end by `amount % width`.
pub fn rol(a: &PackedValue, amount: u32) -> PackedValue {
    let width = a.width().trits();
    let amount = amount % width;
    let mut out = PackedValue::zero(a.width());
    for index in 0..width {
        out.set_trit((index + amount) % width, a.trit(index));
    }
    out
}

/// Rotate towards the least significant end by `amount % width`.
pub fn ror(a: &PackedValue, amount: u32) -> PackedValue {
    let width = a.width().trits();
    rol(a, width - amount % width)
}
