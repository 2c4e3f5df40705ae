mod common;

use common::{binary, count, init_logger, lit, returning, t};
use tritium_core::{decode, encode, Operation, Width};
use tritium_lower::ir::{BinOp, Constant, Expr, Function, Statement, TypeKind};
use tritium_lower::{lower_function, PassConfig, RewritePass};

fn returned_constant(function: &Function) -> i128 {
    match &function.blocks[0].statements[..] {
        [Statement::Return(Some(value))] => match value.as_constant() {
            Some(Constant::Ternary(packed)) => decode(packed),
            other => panic!("expected a ternary constant, got {other:?}"),
        },
        other => panic!("expected a single return, got {other:?}"),
    }
}

#[test]
fn test_constant_expressions_need_no_helpers() {
    init_logger();
    for trits in [6, 12, 24, 32, 64, 128] {
        let sum = binary(BinOp::Add, lit(1000, trits), lit(-1, trits));
        let mut function = returning("sum", binary(BinOp::Mul, sum, lit(3, trits)));

        let stats = lower_function(&mut function, &PassConfig::all()).unwrap();
        assert_eq!(stats.folded, 2, "t{trits}");
        assert_eq!(count(&function).helper_calls, 0, "t{trits}");

        let expected = decode(&encode(2997, Width::new(trits).unwrap()));
        assert_eq!(returned_constant(&function), expected, "t{trits}");
    }
}

#[test]
fn test_folding_matches_the_engine() {
    init_logger();
    let cases = [
        (Operation::Sub, 5, 9, -4),
        (Operation::Div, -7, 2, -3),
        (Operation::Mod, -7, 2, -1),
        (Operation::Tmin, 1, -1, -1),
        (Operation::Tmax, 1, -1, 1),
    ];
    for (op, a, b, expected) in cases {
        let call = Expr::named_call(op.builtin_name(), vec![lit(a, 32), lit(b, 32)], t(32));
        let mut function = returning("fold", call);
        let stats = lower_function(&mut function, &PassConfig::all()).unwrap();
        assert_eq!(stats.folded, 1, "{op}");
        assert_eq!(returned_constant(&function), expected, "{op}");
    }
}

#[test]
fn test_tround_folds_like_division() {
    let call = Expr::named_call(
        Operation::Tround.builtin_name(),
        vec![lit(8, 32), Expr::int(1, TypeKind::signed(32))],
        t(32),
    );
    let mut function = returning("round", call);
    lower_function(&mut function, &PassConfig::all()).unwrap();
    assert_eq!(returned_constant(&function), 2);
}

#[test]
fn test_identities_with_unknown_operand() {
    init_logger();
    let mut function = Function::new("ident", t(32));
    let x = function.add_param("x", t(32));
    let bb0 = function.add_block();
    let value = binary(
        BinOp::Sub,
        binary(BinOp::Mul, Expr::local(x, t(32)), lit(1, 32)),
        lit(0, 32),
    );
    function.push(bb0, Statement::Return(Some(value)));

    let stats = lower_function(&mut function, &PassConfig::all()).unwrap();
    assert_eq!(stats.folded, 2);
    assert_eq!(stats.lowered, 0);
    assert_eq!(
        function.blocks[0].statements,
        [Statement::Return(Some(Expr::local(x, t(32))))]
    );
}

#[test]
fn test_every_candidate_reaches_a_terminal_state() {
    init_logger();
    let mut function = Function::new("mixed", t(32));
    let a = function.add_param("a", t(32));
    let b = function.add_param("b", t(64));
    let bb0 = function.add_block();
    let local = function.add_local("r", t(32));
    function.push(
        bb0,
        Statement::assign(
            local,
            binary(BinOp::Add, Expr::local(a, t(32)), binary(BinOp::Mul, lit(2, 32), lit(3, 32))),
        ),
    );
    function.push(
        bb0,
        Statement::Return(Some(binary(BinOp::Sub, Expr::local(a, t(32)), Expr::local(b, t(64))))),
    );

    let config = PassConfig {
        warn: true,
        stats: true,
        ..PassConfig::all()
    };
    let mut pass = RewritePass::new(config).unwrap();
    let stats = pass.run_on_function(&mut function).unwrap();

    assert_eq!(stats.candidates, 3);
    assert_eq!(stats.folded + stats.lowered + stats.unresolved, stats.candidates);
    assert_eq!(stats.width_mismatches, 1);
    assert_eq!(pass.sites().len(), 3);
    assert!(pass.sites().iter().all(|site| site.state.is_terminal()));
}

#[test]
fn test_helper_declarations_are_stable_across_functions() {
    let mut pass = RewritePass::new(PassConfig::all()).unwrap();
    for name in ["f", "g", "h"] {
        let mut function = Function::new(name, t(64));
        let x = function.add_param("x", t(64));
        let bb0 = function.add_block();
        let doubled = binary(BinOp::Add, Expr::local(x, t(64)), Expr::local(x, t(64)));
        function.push(bb0, Statement::Return(Some(doubled)));
        pass.run_on_function(&mut function).unwrap();
    }

    let declarations: Vec<String> = pass.resolver().declarations().map(ToString::to_string).collect();
    assert_eq!(declarations, ["declare t64 __ternary_add_t64(t64, t64)"]);
    assert_eq!(pass.resolver().hits(), 2);
    assert_eq!(pass.totals().lowered, 3);
}
