//! Unit tests for the ternary engine.

mod arith;
mod compare;
mod eval;
mod literal;

use crate::codec::{decode, encode};
use crate::packed::PackedValue;
use crate::width::Width;

pub fn width(trits: u32) -> Width {
    Width::new(trits).expect("valid test width")
}

/// `value` encoded at `trits` width.
pub fn t(value: i128, trits: u32) -> PackedValue {
    encode(value, width(trits))
}

/// Shorthand for 32-trit values.
pub fn t32(value: i128) -> PackedValue {
    t(value, 32)
}

pub fn val(packed: &PackedValue) -> i128 {
    decode(packed)
}
