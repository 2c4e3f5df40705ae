// Common helpers for the lowering integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tritium_core::{encode, Width};
use tritium_lower::ir::{BinOp, Expr, Function, IrCounter, IrVisitor, Statement, TypeKind};

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn t(trits: u32) -> TypeKind {
    TypeKind::Ternary(Width::new(trits).expect("valid test width"))
}

pub fn lit(value: i128, trits: u32) -> Expr {
    Expr::ternary(encode(value, Width::new(trits).expect("valid test width")))
}

pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let ty = lhs.ty.clone();
    Expr::binary(op, lhs, rhs, ty)
}

/// A function returning `value`, with no parameters.
pub fn returning(name: &str, value: Expr) -> Function {
    let mut function = Function::new(name, value.ty.clone());
    let bb0 = function.add_block();
    function.push(bb0, Statement::Return(Some(value)));
    function
}

pub fn count(function: &Function) -> IrCounter {
    let mut counter = IrCounter::default();
    counter.visit_function(function);
    counter
}

/// Writes `contents` to a file in a fresh temporary directory.
///
/// # Panics
/// Panics if the directory or the file cannot be created.
pub fn write_config(contents: &str) -> (PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let path = dir.path().join("tritium.toml");
    fs::write(&path, contents).unwrap_or_else(|err| panic!("Failed to write {path:?}: {err}"));
    (path, dir)
}
