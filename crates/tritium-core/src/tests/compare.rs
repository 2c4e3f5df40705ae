//! Tests for comparisons and conversions.

use std::cmp::Ordering;

use crate::ops::compare::{eq, ge, gt, le, lt, ne};
use crate::ops::scalar;
use crate::ops::{
    cmp, cmpeq, cmpgt, cmplt, cmpneq, compare, f2t, t2f, tb2t, tbranch, tquant, tsignjmp, tt2b,
};
use crate::packed::PackedValue;
use crate::tests::{t32, val, width};

#[test]
fn test_cmp_orders_logical_values() {
    let values = [-121, -13, -5, -1, 0, 1, 3, 4, 13, 40];
    for a in values {
        for b in values {
            assert_eq!(compare(&t32(a), &t32(b)).unwrap(), a.cmp(&b), "{a} vs {b}");
        }
    }
    assert_eq!(cmp(&t32(-5), &t32(3)), Ok(-1));
    assert_eq!(cmp(&t32(3), &t32(3)), Ok(0));
    assert_eq!(cmp(&t32(4), &t32(-13)), Ok(1));
}

#[test]
fn test_cmp_ignores_reserved_encoding() {
    let reserved_one = PackedValue::from_bits(width(2), 0b11_10).unwrap();
    let one = PackedValue::from_bits(width(2), 0b01_10).unwrap();
    assert_eq!(compare(&reserved_one, &one), Ok(Ordering::Equal));
}

#[test]
fn test_derived_comparisons() {
    let (a, b) = (t32(2), t32(5));
    assert_eq!(eq(&a, &b), Ok(false));
    assert_eq!(ne(&a, &b), Ok(true));
    assert_eq!(lt(&a, &b), Ok(true));
    assert_eq!(le(&a, &a), Ok(true));
    assert_eq!(gt(&a, &b), Ok(false));
    assert_eq!(ge(&b, &a), Ok(true));
}

#[test]
fn test_ternary_valued_comparisons() {
    assert_eq!(val(&cmplt(&t32(1), &t32(2)).unwrap()), -1);
    assert_eq!(val(&cmplt(&t32(2), &t32(1)).unwrap()), 0);
    assert_eq!(val(&cmpeq(&t32(2), &t32(2)).unwrap()), 1);
    assert_eq!(val(&cmpgt(&t32(1), &t32(2)).unwrap()), 0);
    assert_eq!(val(&cmpgt(&t32(3), &t32(2)).unwrap()), 1);
    assert_eq!(val(&cmpneq(&t32(1), &t32(2)).unwrap()), 1);
    assert_eq!(val(&cmpneq(&t32(2), &t32(2)).unwrap()), 0);
}

#[test]
fn test_three_way_dispatch() {
    assert_eq!(tbranch(-5, "neg", "zero", "pos"), "neg");
    assert_eq!(tbranch(0, "neg", "zero", "pos"), "zero");
    assert_eq!(tbranch(9, "neg", "zero", "pos"), "pos");
    assert_eq!(tsignjmp(&t32(0), 10, 20, 30), 20);
    assert_eq!(tsignjmp(&t32(-8), 10, 20, 30), 10);
    assert_eq!(tsignjmp(&t32(8), 10, 20, 30), 30);
}

#[test]
fn test_conversions() {
    assert_eq!(tt2b(&tb2t(-77, width(32))), -77);
    assert_eq!(t2f(&t32(-7)), -7.0);
    assert_eq!(val(&f2t(3.9, width(32))), 3);
    assert_eq!(val(&f2t(-3.9, width(32))), -3);
    assert_eq!(val(&f2t(f64::NAN, width(32))), 0);
    assert_eq!(val(&f2t(1e30, width(64))), i64::MAX as i128);
}

#[test]
fn test_tquant_broadcasts_sign() {
    let w = width(3);
    assert_eq!(val(&tquant(0.6, 0.5, w)), 13);
    assert_eq!(val(&tquant(-0.6, 0.5, w)), -13);
    assert_eq!(val(&tquant(0.2, 0.5, w)), 0);
    assert_eq!(val(&tquant(0.5, 0.5, w)), 0);
}

#[test]
fn test_scalar_helpers() {
    assert_eq!(scalar::div(9, 0), 0);
    assert_eq!(scalar::rem(9, 0), 0);
    assert_eq!(scalar::div(-9, 2), -4);
    assert_eq!(scalar::xor(1, 1), -1);
    assert_eq!(scalar::xor(1, -1), 0);
    assert_eq!(scalar::and(3, -2), -2);
    assert_eq!(scalar::or(3, -2), 3);
    assert_eq!(scalar::shl(2, 3), 54);
    assert_eq!(scalar::shr(-10, 1), -3);
    assert_eq!(scalar::shr(10, 500), 0);
    assert_eq!(scalar::rol(10, 4), 10);
    assert_eq!(scalar::cmp(-1, 4), -1);
    assert_eq!(scalar::neg(5), -5);
}
