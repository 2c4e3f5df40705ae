use std::sync::Arc;

use tritium_core::{Operation, Width};

use super::{t32, width};
use crate::ir::{ScalarKind, TypeKind};
use crate::resolver::{HelperKey, OperandKind, Resolver, CONDITION_TYPE};

fn ternary(op: Operation, trits: u32) -> HelperKey {
    HelperKey::new(op, OperandKind::Ternary(width(trits)))
}

#[test]
fn test_repeated_queries_share_one_handle() {
    let mut resolver = Resolver::default();
    let first = resolver.resolve(ternary(Operation::Add, 32)).unwrap();
    let second = resolver.resolve(ternary(Operation::Add, 32)).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.misses(), 1);
    assert_eq!(resolver.hits(), 1);

    let other = resolver.resolve(ternary(Operation::Add, 64)).unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(resolver.misses(), 2);
}

#[test]
fn test_ternary_helper_names() {
    let mut resolver = Resolver::default();

    let add = resolver.resolve(ternary(Operation::Add, 32)).unwrap();
    assert_eq!(add.name, "__ternary_add_t32");
    assert_eq!(add.params, vec![t32(), t32()]);
    assert_eq!(add.ret, t32());

    let cmp = resolver.resolve(ternary(Operation::Cmp, 64)).unwrap();
    assert_eq!(cmp.name, "__ternary_cmp_t64");
    assert_eq!(cmp.ret, TypeKind::signed(32));

    let shl = resolver.resolve(ternary(Operation::Shl, 32)).unwrap();
    assert_eq!(shl.params, vec![t32(), TypeKind::signed(32)]);

    let tround = resolver.resolve(ternary(Operation::Tround, 32)).unwrap();
    assert_eq!(tround.params[1], TypeKind::unsigned(32));

    let tt2b = resolver.resolve(ternary(Operation::Tt2b, 128)).unwrap();
    assert_eq!(tt2b.to_string(), "declare i64 __ternary_tt2b_t128(t128)");
}

#[test]
fn test_select_helpers() {
    let mut resolver = Resolver::default();
    let select = |resolver: &mut Resolver, kind: ScalarKind| {
        resolver
            .resolve(HelperKey::new(Operation::Select, OperandKind::Scalar(kind)))
            .map(|decl| decl.name.clone())
    };

    assert_eq!(select(&mut resolver, ScalarKind::Signed(32)).as_deref(), Some("__ternary_select_i32"));
    assert_eq!(select(&mut resolver, ScalarKind::Unsigned(64)).as_deref(), Some("__ternary_select_u64"));
    assert_eq!(select(&mut resolver, ScalarKind::Float(32)).as_deref(), Some("__ternary_select_f32"));
    assert_eq!(select(&mut resolver, ScalarKind::Float(16)), None);
    assert_eq!(select(&mut resolver, ScalarKind::Signed(128)), None);

    let ternary_select = resolver.resolve(ternary(Operation::Select, 32)).unwrap();
    assert_eq!(ternary_select.name, "__ternary_select_t32");
    assert_eq!(ternary_select.params, vec![CONDITION_TYPE, t32(), t32()]);
}

#[test]
fn test_float_conversion_helpers() {
    let mut resolver = Resolver::default();

    let t2f = resolver
        .resolve(ternary(Operation::T2f, 32).with_companion(ScalarKind::Float(64)))
        .unwrap();
    assert_eq!(t2f.name, "__ternary_t2f64_t32");
    assert_eq!(t2f.ret, TypeKind::float(64));

    let f2t = resolver
        .resolve(ternary(Operation::F2t, 32).with_companion(ScalarKind::Float(32)))
        .unwrap();
    assert_eq!(f2t.name, "__ternary_f2t32_t32");
    assert_eq!(f2t.params, vec![TypeKind::float(32)]);

    let half = ternary(Operation::T2f, 32).with_companion(ScalarKind::Float(16));
    assert!(resolver.resolve(half).is_none());
    let missing = ternary(Operation::F2t, 32);
    assert!(resolver.resolve(missing).is_none());
}

#[test]
fn test_unsupported_width_has_no_helper() {
    let mut resolver = Resolver::default();
    assert!(resolver.resolve(ternary(Operation::Add, 7)).is_none());
    assert_eq!(resolver.misses(), 0);
    assert_eq!(resolver.declarations().count(), 0);

    assert!(resolver.supports_width(Width::T64));
    assert!(!resolver.supports_width(width(40)));
}

#[test]
fn test_vector_helpers() {
    let mut resolver = Resolver::default();
    let vector = |op| HelperKey::new(op, OperandKind::TernaryVector(Width::T32));

    let add = resolver.resolve(vector(Operation::Add)).unwrap();
    assert_eq!(add.name, "__ternary_add_tv32");
    assert_eq!(add.ret, TypeKind::TernaryVector(Width::T32));

    assert!(resolver.resolve(vector(Operation::Select)).is_none());
    assert!(resolver.resolve(vector(Operation::Cmp)).is_none());
}

#[test]
fn test_plain_scalar_helpers() {
    let mut resolver = Resolver::default();
    let int = OperandKind::Scalar(ScalarKind::Signed(32));

    let add = resolver.resolve(HelperKey::new(Operation::Add, int)).unwrap();
    assert_eq!(add.name, "__ternary_add");
    assert_eq!(add.params, vec![TypeKind::signed(32), TypeKind::signed(32)]);

    let tbranch = resolver.resolve(HelperKey::new(Operation::Tbranch, int)).unwrap();
    assert_eq!(tbranch.name, "__ternary_tbranch");
    assert_eq!(tbranch.params[0], CONDITION_TYPE);

    let float = OperandKind::Scalar(ScalarKind::Float(64));
    assert!(resolver.resolve(HelperKey::new(Operation::Add, float)).is_none());
}

#[test]
fn test_memory_operations_have_no_helper() {
    let mut resolver = Resolver::default();
    assert!(resolver.resolve(ternary(Operation::Load, 64)).is_none());
    assert!(resolver.resolve(ternary(Operation::Store, 64)).is_none());
    assert_eq!(resolver.declarations().count(), 0);
}

#[test]
fn test_quantiser_precision_follows_width() {
    let mut resolver = Resolver::default();

    let narrow = resolver.resolve(ternary(Operation::Tquant, 32)).unwrap();
    assert_eq!(narrow.to_string(), "declare t32 __ternary_tquant_t32(f32, f32)");

    let wide = resolver.resolve(ternary(Operation::Tquant, 64)).unwrap();
    assert_eq!(wide.to_string(), "declare t64 __ternary_tquant_t64(f64, f64)");

    let widest = resolver.resolve(ternary(Operation::Tquant, 128)).unwrap();
    assert_eq!(widest.params, vec![TypeKind::float(64), TypeKind::float(64)]);
}

#[test]
fn test_declarations_keep_first_use_order() {
    let mut resolver = Resolver::new("rt", vec![width(12), Width::T32]);
    resolver.resolve(ternary(Operation::Mul, 12));
    resolver.resolve(ternary(Operation::Add, 32));
    resolver.resolve(ternary(Operation::Mul, 12));

    let names: Vec<_> = resolver.declarations().map(|decl| decl.name.as_str()).collect();
    assert_eq!(names, ["rt_mul_t12", "rt_add_t32"]);
    assert_eq!(resolver.prefix(), "rt");
}
