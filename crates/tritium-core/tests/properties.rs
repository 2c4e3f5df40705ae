use tritium_core::ops;
use tritium_core::{checked_decode, normalize, PackedValue, Trit};

mod common;
use common::{sample_values, t, val, width, WIDTHS};

#[test]
fn test_round_trip_at_every_width() {
    for trits in WIDTHS {
        for value in sample_values() {
            assert_eq!(checked_decode(&t(value, trits)), Ok(value), "{value} at t{trits}");
        }
    }
}

#[test]
fn test_documented_arithmetic_examples() {
    for trits in WIDTHS {
        let add = ops::add(&t(2, trits), &t(3, trits)).unwrap();
        let mul = ops::mul(&t(2, trits), &t(3, trits)).unwrap();
        assert_eq!(val(&add), 5);
        assert_eq!(val(&mul), 6);
        assert_eq!(val(&ops::tround(&t(8, trits), 1)), 2);
        assert_eq!(val(&ops::bias(&t(1, trits), 3)), 4);
        assert_eq!(val(&ops::tnot(&t(4, trits))), -4);
    }
}

#[test]
fn test_documented_logic_examples() {
    for trits in WIDTHS {
        let maj = ops::tmaj(&t(1, trits), &t(1, trits), &t(-1, trits)).unwrap();
        assert_eq!(val(&maj), 1);
        let maj = ops::tmaj(&t(1, trits), &t(0, trits), &t(-1, trits)).unwrap();
        assert_eq!(val(&maj), 0);

        assert_eq!(val(&ops::tlimp(&t(-1, trits), &t(1, trits)).unwrap()), 1);
        assert_eq!(val(&ops::tlimp(&t(0, trits), &t(-1, trits)).unwrap()), -1);
        assert_eq!(val(&ops::tlimp(&t(1, trits), &t(0, trits)).unwrap()), 0);

        let lanes = (t(-4, trits), t(0, trits), t(7, trits));
        let mux = ops::tmux(&t(-1, trits), &lanes.0, &lanes.1, &lanes.2).unwrap();
        assert_eq!(val(&mux), -4);
        let mux = ops::tmux(&t(0, trits), &lanes.0, &lanes.1, &lanes.2).unwrap();
        assert_eq!(mux, lanes.1);
    }
}

#[test]
fn test_operations_agree_with_integer_arithmetic() {
    for trits in WIDTHS {
        for a in sample_values() {
            for b in [1, -2, 3, 40, -121] {
                let (pa, pb) = (t(a, trits), t(b, trits));
                assert_eq!(val(&ops::add(&pa, &pb).unwrap()), a + b);
                assert_eq!(val(&ops::sub(&pa, &pb).unwrap()), a - b);
                assert_eq!(val(&ops::mul(&pa, &pb).unwrap()), a * b);
                assert_eq!(val(&ops::div(&pa, &pb).unwrap()), a / b);
                assert_eq!(val(&ops::rem(&pa, &pb).unwrap()), a % b);
                assert_eq!(ops::cmp(&pa, &pb).unwrap() as i128, (a.cmp(&b) as i8) as i128);
            }
        }
    }
}

#[test]
fn test_tnot_matches_negated_decode() {
    for trits in WIDTHS {
        for value in sample_values() {
            assert_eq!(val(&ops::tnot(&t(value, trits))), -value);
        }
    }
}

#[test]
fn test_normalize_all_reserved_fields() {
    for trits in [1, 7, 32] {
        let bits = (1u128 << (2 * trits)) - 1;
        let packed = PackedValue::from_bits(width(trits), bits).unwrap();
        assert_eq!(val(&normalize(&packed)), 0);
        assert_eq!(normalize(&packed), PackedValue::splat(width(trits), Trit::Zero));
    }
}
