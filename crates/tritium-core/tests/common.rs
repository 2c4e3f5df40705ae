// Common helpers for the engine integration tests

use tritium_core::{decode, encode, PackedValue, Width};

/// Widths every property is checked at.
pub const WIDTHS: [u32; 4] = [32, 40, 64, 128];

pub fn width(trits: u32) -> Width {
    Width::new(trits).expect("valid test width")
}

pub fn t(value: i128, trits: u32) -> PackedValue {
    encode(value, width(trits))
}

pub fn val(packed: &PackedValue) -> i128 {
    decode(packed)
}

// A spread of small values that stay in range at every width in WIDTHS
pub fn sample_values() -> Vec<i128> {
    let mut values = vec![0, 1, -1, 2, -2, 3, 8, -8, 13, -13, 40, -121, 364, 9841];
    values.extend([1 << 20, -(1 << 20), 123_456_789, -987_654_321]);
    values
}
