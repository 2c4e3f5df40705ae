//! Tests for balanced-ternary arithmetic.

use crate::codec::{checked_decode, encode};
use crate::error::TritError;
use crate::ops::{add, bias, div, mul, muladd, neg, rem, sub, tnet, tnormalize, tround};
use crate::packed::PackedValue;
use crate::tests::{t, t32, val, width};
use crate::trit::Trit;

#[test]
fn test_add_and_mul_small_values() {
    for trits in [32, 64, 128] {
        let two = t(2, trits);
        let three = t(3, trits);
        assert_eq!(val(&add(&two, &three).unwrap()), 5);
        assert_eq!(val(&mul(&two, &three).unwrap()), 6);
        assert_eq!(val(&sub(&two, &three).unwrap()), -1);
    }
}

#[test]
fn test_arithmetic_matches_integer_arithmetic() {
    let values = [-1000, -91, -13, -1, 0, 1, 4, 13, 40, 777];
    for a in values {
        for b in values {
            assert_eq!(val(&add(&t32(a), &t32(b)).unwrap()), a + b);
            assert_eq!(val(&sub(&t32(a), &t32(b)).unwrap()), a - b);
            assert_eq!(val(&mul(&t32(a), &t32(b)).unwrap()), a * b);
        }
    }
}

#[test]
fn test_arithmetic_wraps_modulo_power_of_three() {
    // 2 trits hold -4..=4
    assert_eq!(val(&add(&t(4, 2), &t(1, 2)).unwrap()), -4);
    assert_eq!(val(&sub(&t(-4, 2), &t(1, 2)).unwrap()), 4);
    // 3 trits: 35 wraps to 8
    assert_eq!(val(&mul(&t(5, 3), &t(7, 3)).unwrap()), 8);
}

#[test]
fn test_wide_arithmetic_is_exact() {
    let w = width(128);
    let half = encode(i128::MAX / 2, w);
    let sum = add(&half, &half).unwrap();
    assert_eq!(checked_decode(&sum), Ok(i128::MAX - 1));

    let big = encode(1i128 << 100, w);
    let product = mul(&big, &encode(-3, w)).unwrap();
    assert_eq!(checked_decode(&product), Ok(-3 * (1i128 << 100)));
}

#[test]
fn test_neg_is_value_negation() {
    for value in [-40, -1, 0, 1, 4, 1234] {
        assert_eq!(val(&neg(&t32(value))), -value);
    }
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(val(&div(&t32(7), &t32(2)).unwrap()), 3);
    assert_eq!(val(&div(&t32(-7), &t32(2)).unwrap()), -3);
    assert_eq!(val(&rem(&t32(-7), &t32(2)).unwrap()), -1);
    assert_eq!(val(&rem(&t32(7), &t32(-2)).unwrap()), 1);
}

#[test]
fn test_division_by_zero_yields_zero() {
    let zero = PackedValue::zero(width(32));
    assert_eq!(div(&t32(9), &zero).unwrap(), zero);
    assert_eq!(rem(&t32(9), &zero).unwrap(), zero);

    // A reserved-only divisor is zero too.
    let reserved = PackedValue::from_bits(width(2), 0b1111).unwrap();
    assert_eq!(val(&div(&t(3, 2), &reserved).unwrap()), 0);
}

#[test]
fn test_division_needs_decodable_operands() {
    let huge = PackedValue::splat(width(100), Trit::Pos);
    assert_eq!(
        div(&huge, &t(3, 100)),
        Err(TritError::DecodeOverflow { width: 100 })
    );
}

#[test]
fn test_muladd_and_bias() {
    assert_eq!(val(&muladd(&t32(2), &t32(3), &t32(4)).unwrap()), 10);
    assert_eq!(val(&muladd(&t32(-5), &t32(5), &t32(1)).unwrap()), -24);
    assert_eq!(val(&bias(&t32(1), 3)), 4);
    assert_eq!(val(&bias(&t32(0), -5)), -5);
    assert_eq!(val(&bias(&t(4, 2), 1)), -4);
}

#[test]
fn test_tround_truncates() {
    assert_eq!(val(&tround(&t32(8), 1)), 2);
    assert_eq!(val(&tround(&t32(-8), 1)), -2);
    assert_eq!(val(&tround(&t32(13), 1)), 4);
    assert_eq!(val(&tround(&t32(-13), 1)), -4);
    assert_eq!(val(&tround(&t32(5), 1)), 1);
    assert_eq!(val(&tround(&t32(4), 1)), 1);
    assert_eq!(val(&tround(&t32(-40), 2)), -4);
    assert_eq!(val(&tround(&t32(27), 3)), 1);
    assert_eq!(val(&tround(&t32(26), 3)), 0);
    for value in -200..=200 {
        assert_eq!(val(&tround(&t32(value), 2)), value / 9, "{value}");
    }
}

#[test]
fn test_tround_drop_at_least_width_is_zero() {
    let zero = PackedValue::zero(width(32));
    assert_eq!(tround(&t32(1234), 32), zero);
    assert_eq!(tround(&t32(-5), 500), zero);
    assert_eq!(val(&tround(&t32(-5), 0)), -5);
}

#[test]
fn test_tnormalize_and_tnet() {
    let packed = PackedValue::from_bits(width(3), 0b10_11_00).unwrap();
    assert_eq!(val(&tnormalize(&packed)), 8);
    assert!(!tnormalize(&packed).has_reserved());
    assert_eq!(tnet(&t32(-77)), -77);
}

#[test]
fn test_mixed_widths_rejected() {
    assert_eq!(
        add(&t(1, 32), &t(1, 64)),
        Err(TritError::WidthMismatch {
            expected: 32,
            found: 64
        })
    );
    assert!(muladd(&t32(1), &t32(1), &t(1, 64)).is_err());
}
