//! Tests for operation evaluation and the lane adapter.

use crate::error::TritError;
use crate::eval::{evaluate, Value};
use crate::lanes::{apply, LaneVector};
use crate::operation::{Category, Operation, ResultShape};
use crate::tests::{t32, val, width};

fn ternary(value: i128) -> Value {
    Value::Ternary(t32(value))
}

fn vector(low: i128, high: i128) -> Value {
    Value::Vector(LaneVector::new(t32(low), t32(high)).unwrap())
}

fn lanes_of(value: Value) -> (i128, i128) {
    match value {
        Value::Vector(vector) => (val(&vector.lanes()[0]), val(&vector.lanes()[1])),
        other => panic!("expected a vector, got {other:?}"),
    }
}

#[test]
fn test_operation_names_round_trip() {
    for op in Operation::ALL {
        assert_eq!(Operation::from_name(op.name()), Some(*op));
        assert_eq!(Operation::from_builtin_name(&op.builtin_name()), Some(*op));
    }
    assert_eq!(
        Operation::from_builtin_name("__builtin_ternary_tmaj"),
        Some(Operation::Tmaj)
    );
    assert_eq!(Operation::from_builtin_name("__builtin_ternary_nope"), None);
    assert_eq!(Operation::from_builtin_name("add"), None);
}

#[test]
fn test_operation_table() {
    assert_eq!(Operation::Tmux.arity(), 4);
    assert_eq!(Operation::Select.arity(), 3);
    assert_eq!(Operation::Neg.arity(), 1);
    assert_eq!(Operation::Shl.category(), Category::Shift);
    assert_eq!(Operation::Tquant.category(), Category::Conv);
    assert_eq!(Operation::Tsignjmp.category(), Category::Cmp);
    assert_eq!(Operation::Store.category(), Category::Mem);
    assert_eq!(Operation::Cmp.result_shape(), ResultShape::Integer);
    assert!(Operation::Tmaj.is_lane_wise());
    assert!(Operation::CmpLt.is_lane_wise());
    assert!(!Operation::Cmp.is_lane_wise());
    assert!(!Operation::Tnet.is_lane_wise());
}

#[test]
fn test_evaluate_ternary_operands() {
    let sum = evaluate(Operation::Add, None, &[ternary(2), ternary(3)]).unwrap();
    assert_eq!(sum, ternary(5));
    let cmp = evaluate(Operation::Cmp, None, &[ternary(2), ternary(3)]).unwrap();
    assert_eq!(cmp, Value::Int(-1));
    let rounded = evaluate(Operation::Tround, None, &[ternary(8), Value::Int(1)]).unwrap();
    assert_eq!(rounded, ternary(2));
    let mux = evaluate(
        Operation::Tmux,
        None,
        &[ternary(-1), ternary(-4), ternary(0), ternary(7)],
    )
    .unwrap();
    assert_eq!(mux, ternary(-4));
}

#[test]
fn test_evaluate_plain_integers_uses_scalar_helpers() {
    let sum = evaluate(Operation::Add, None, &[Value::Int(2), Value::Int(3)]).unwrap();
    assert_eq!(sum, Value::Int(5));
    let quotient = evaluate(Operation::Div, None, &[Value::Int(2), Value::Int(0)]).unwrap();
    assert_eq!(quotient, Value::Int(0));
    let shifted = evaluate(Operation::Shl, None, &[Value::Int(2), Value::Int(2)]).unwrap();
    assert_eq!(shifted, Value::Int(18));
    let negated = evaluate(Operation::Not, None, &[Value::Int(4)]).unwrap();
    assert_eq!(negated, Value::Int(-4));
}

#[test]
fn test_evaluate_conversions_need_width() {
    assert_eq!(
        evaluate(Operation::Tb2t, None, &[Value::Int(4)]),
        Err(TritError::MissingWidth(Operation::Tb2t))
    );
    let packed = evaluate(Operation::Tb2t, Some(width(32)), &[Value::Int(4)]).unwrap();
    assert_eq!(packed, ternary(4));
    let float = evaluate(Operation::T2f, None, &[ternary(-3)]).unwrap();
    assert_eq!(float, Value::Float(-3.0));
    let quant = evaluate(
        Operation::Tquant,
        Some(width(2)),
        &[Value::Float(-0.9), Value::Float(0.5)],
    )
    .unwrap();
    assert_eq!(quant.to_string(), "-4t2");
}

#[test]
fn test_evaluate_select_and_branch() {
    let args = [Value::Int(0), ternary(1), ternary(2)];
    assert_eq!(evaluate(Operation::Select, None, &args).unwrap(), ternary(2));
    let args = [ternary(-3), ternary(1), ternary(2)];
    assert_eq!(evaluate(Operation::Select, None, &args).unwrap(), ternary(1));

    let targets = [Value::Int(-2), Value::Int(10), Value::Int(20), Value::Int(30)];
    assert_eq!(evaluate(Operation::Tbranch, None, &targets).unwrap(), Value::Int(10));
    let targets = [ternary(0), Value::Int(10), Value::Int(20), Value::Int(30)];
    assert_eq!(evaluate(Operation::Tsignjmp, None, &targets).unwrap(), Value::Int(20));
}

#[test]
fn test_evaluate_errors() {
    assert_eq!(
        evaluate(Operation::Add, None, &[ternary(1)]),
        Err(TritError::Arity {
            op: Operation::Add,
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        evaluate(Operation::Load, None, &[Value::Int(0)]),
        Err(TritError::NotEvaluable(Operation::Load))
    );
    assert!(matches!(
        evaluate(Operation::Shl, None, &[ternary(1), Value::Int(-1)]),
        Err(TritError::OperandKind { index: 1, .. })
    ));
    assert!(matches!(
        evaluate(Operation::Add, None, &[ternary(1), Value::Int(1)]),
        Err(TritError::OperandKind { index: 1, .. })
    ));
    assert!(matches!(
        evaluate(Operation::Tbias, None, &[ternary(1), Value::Int(i128::MAX)]),
        Err(TritError::OperandKind { index: 1, .. })
    ));
}

#[test]
fn test_lanes_apply_per_lane() {
    let sum = evaluate(Operation::Add, None, &[vector(2, 5), vector(3, -1)]).unwrap();
    assert_eq!(lanes_of(sum), (5, 4));

    let biased = evaluate(Operation::Tbias, None, &[vector(1, 2), Value::Int(3)]).unwrap();
    assert_eq!(lanes_of(biased), (4, 5));

    let maj = evaluate(
        Operation::Tmaj,
        None,
        &[vector(1, 1), vector(1, 0), vector(-1, -1)],
    )
    .unwrap();
    assert_eq!(lanes_of(maj), (1, 0));

    let mux = evaluate(
        Operation::Tmux,
        None,
        &[vector(-1, 1), ternary(-4), ternary(0), ternary(7)],
    )
    .unwrap();
    assert_eq!(lanes_of(mux), (-4, 7));
}

#[test]
fn test_lanes_reject_non_ternary_results() {
    assert_eq!(
        apply(Operation::Cmp, None, &[vector(1, 2), vector(2, 1)]),
        Err(TritError::NotLaneWise(Operation::Cmp))
    );
    assert!(matches!(
        LaneVector::new(t32(1), crate::tests::t(1, 64)),
        Err(TritError::WidthMismatch { .. })
    ));
}

#[test]
fn test_lane_layout() {
    let vector = LaneVector::new(t32(1), t32(-1)).unwrap();
    let bits = vector.to_bits().unwrap();
    assert_eq!(bits & u64::MAX as u128, t32(1).to_bits().unwrap());
    assert_eq!(bits >> 64, t32(-1).to_bits().unwrap());
    assert_eq!(LaneVector::from_bits(width(32), bits), Ok(vector));
    assert!(LaneVector::new(crate::tests::t(0, 33), crate::tests::t(0, 33))
        .unwrap()
        .to_bits()
        .is_none());
}
