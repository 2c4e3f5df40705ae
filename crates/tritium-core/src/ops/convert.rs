//! Conversions between packed values and plain numbers.

use crate::codec::{decode, encode};
use crate::packed::PackedValue;
use crate::trit::Trit;
use crate::width::Width;

/// Binary to ternary.
pub fn tb2t(value: i128, width: Width) -> PackedValue {
    encode(value, width)
}

/// Ternary to binary.
pub fn tt2b(a: &PackedValue) -> i128 {
    decode(a)
}

/// Ternary to floating point. Summed in `f64`, so wide values do not wrap.
pub fn t2f(a: &PackedValue) -> f64 {
    let mut acc = 0.0;
    let mut power = 1.0;
    for trit in a.trits() {
        acc += f64::from(trit.value()) * power;
        power *= 3.0;
    }
    acc
}

/// Floating point to ternary: truncate toward zero into an `i64`, saturating
/// at its bounds (NaN becomes zero), then encode.
pub fn f2t(value: f64, width: Width) -> PackedValue {
    encode(value as i64 as i128, width)
}

/// Quantise `value` against `threshold` and broadcast the resulting trit.
pub fn tquant(value: f64, threshold: f64, width: Width) -> PackedValue {
    let trit = if value > threshold {
        Trit::Pos
    } else if value < -threshold {
        Trit::Neg
    } else {
        Trit::Zero
    };
    PackedValue::splat(width, trit)
}
