//! Three-valued logic.
//!
//! `tmin`, `tmax`, `xor`, `tmaj` and `tlimp` work trit by trit. `tequiv` and
//! `txor` reduce two whole values to a single ternary result.

use crate::error::TritError;
use crate::ops::{arith, common_width, zip_trits};
use crate::packed::PackedValue;
use crate::trit::Trit;

/// Trit-wise minimum (three-valued AND).
pub fn tmin(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    zip_trits(a, b, Trit::min)
}

/// Trit-wise maximum (three-valued OR).
pub fn tmax(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    zip_trits(a, b, Trit::max)
}

/// Trit-wise sum modulo 3.
pub fn xor(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    zip_trits(a, b, Trit::xor)
}

/// Trit-wise majority vote.
pub fn tmaj(a: &PackedValue, b: &PackedValue, c: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    common_width(a, c)?;
    let mut out = PackedValue::zero(width);
    for index in 0..width.trits() {
        out.set_trit(index, Trit::majority(a.trit(index), b.trit(index), c.trit(index)));
    }
    Ok(out)
}

/// Trit-wise implication `a -> b`.
pub fn tlimp(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    zip_trits(a, b, Trit::implies)
}

/// Ternary inversion: every non-zero trit flips. Same as negating the value.
pub fn tnot(a: &PackedValue) -> PackedValue {
    arith::neg(a)
}

/// Pick `neg`, `zero` or `pos` by the sign of `selector`.
pub fn tmux(
    selector: &PackedValue,
    neg: &PackedValue,
    zero: &PackedValue,
    pos: &PackedValue,
) -> Result<PackedValue, TritError> {
    common_width(selector, neg)?;
    common_width(neg, zero)?;
    common_width(zero, pos)?;
    Ok(match selector.sign() {
        Trit::Neg => *neg,
        Trit::Zero => *zero,
        Trit::Pos => *pos,
    })
}

/// `1` when the values are equal, `-1` when their signs are opposite and
/// non-zero, `0` otherwise.
pub fn tequiv(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let result = if a.same_value(b) {
        Trit::Pos
    } else if a.sign().value() * b.sign().value() < 0 {
        Trit::Neg
    } else {
        Trit::Zero
    };
    Ok(PackedValue::zero(width).with_trit(0, result))
}

/// `-1` when the values are equal, otherwise the trit-xor of their signs.
pub fn txor(a: &PackedValue, b: &PackedValue) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let result = if a.same_value(b) {
        Trit::Neg
    } else {
        a.sign().xor(b.sign())
    };
    Ok(PackedValue::zero(width).with_trit(0, result))
}
