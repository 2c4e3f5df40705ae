//! Conversion between packed trit vectors and logical integers.

use crate::error::TritError;
use crate::packed::PackedValue;
use crate::trit::{Trit, RESERVED_FIELD};
use crate::width::Width;

/// Encode `value` as `width` balanced trits, least significant first.
///
/// Digits beyond `width` are dropped, so out-of-range values wrap modulo
/// `3^width`. The result never contains a reserved field.
pub fn encode(value: i128, width: Width) -> PackedValue {
    let mut packed = PackedValue::zero(width);
    let mut rest = value;
    for index in 0..width.trits() {
        if rest == 0 {
            break;
        }
        let mut quotient = rest / 3;
        let digit = match rest % 3 {
            2 => {
                quotient += 1;
                Trit::Neg
            }
            -2 => {
                quotient -= 1;
                Trit::Pos
            }
            1 => Trit::Pos,
            -1 => Trit::Neg,
            _ => Trit::Zero,
        };
        packed.set_trit(index, digit);
        rest = quotient;
    }
    packed
}

/// Decode the logical value of `packed`. Reserved fields count as zero.
///
/// Exact for widths up to 80 trits; wider values that leave the `i128`
/// range wrap modulo `2^128`. See [`checked_decode`].
pub fn decode(packed: &PackedValue) -> i128 {
    let mut acc: i128 = 0;
    let mut power: i128 = 1;
    for trit in packed.trits() {
        match trit {
            Trit::Pos => acc = acc.wrapping_add(power),
            Trit::Neg => acc = acc.wrapping_sub(power),
            Trit::Zero => {}
        }
        power = power.wrapping_mul(3);
    }
    acc
}

/// Decode the logical value of `packed`, failing if it leaves the `i128` range.
pub fn checked_decode(packed: &PackedValue) -> Result<i128, TritError> {
    let overflow = || TritError::DecodeOverflow {
        width: packed.width().trits(),
    };
    let mut acc: i128 = 0;
    for (index, trit) in packed.trits().enumerate() {
        if trit == Trit::Zero {
            continue;
        }
        let power = 3i128.checked_pow(index as u32).ok_or_else(overflow)?;
        acc = match trit {
            Trit::Pos => acc.checked_add(power),
            _ => acc.checked_sub(power),
        }
        .ok_or_else(overflow)?;
    }
    Ok(acc)
}

/// Rewrite every reserved field to the zero-trit pattern.
pub fn normalize(packed: &PackedValue) -> PackedValue {
    let mut out = *packed;
    for index in 0..packed.width().trits() {
        if packed.field(index) == RESERVED_FIELD {
            out.set_trit(index, Trit::Zero);
        }
    }
    out
}
