//! IR visitor
//!
//! This module provides a visitor for traversing functions, statements and
//! expression trees.

use super::expr::{Callee, Constant, Expr, ExprKind};
use super::function::{BasicBlock, Function};
use super::statement::{Place, Statement};
use super::types::TypeKind;

/// A visitor over the IR. Every method recurses by default.
pub trait IrVisitor {
    /// Visit a function
    fn visit_function(&mut self, function: &Function) {
        for block in &function.blocks {
            self.visit_block(block);
        }
    }

    /// Visit a basic block
    fn visit_block(&mut self, block: &BasicBlock) {
        for statement in &block.statements {
            self.visit_statement(statement);
        }
    }

    /// Visit a statement
    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assign { dest, value } => {
                self.visit_place(dest);
                self.visit_expr(value);
            }
            Statement::Call { callee, args, dest } => {
                if let Some(dest) = dest {
                    self.visit_place(dest);
                }
                self.visit_call(callee, args);
            }
            Statement::Branch { predicate, .. } => self.visit_expr(predicate),
            Statement::Return(value) => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
        }
    }

    /// Visit a place
    fn visit_place(&mut self, _place: &Place) {}

    /// Visit an expression and its children
    fn visit_expr(&mut self, expr: &Expr) {
        self.visit_type(&expr.ty);
        match &expr.kind {
            ExprKind::Const(constant) => self.visit_constant(constant, &expr.ty),
            ExprKind::Call { callee, args } => self.visit_call(callee, args),
            _ => {
                for child in expr.children() {
                    self.visit_expr(child);
                }
            }
        }
    }

    /// Visit a call target and its arguments
    fn visit_call(&mut self, _callee: &Callee, args: &[Expr]) {
        for arg in args {
            self.visit_expr(arg);
        }
    }

    /// Visit a constant
    fn visit_constant(&mut self, _constant: &Constant, _ty: &TypeKind) {}

    /// Visit a type
    fn visit_type(&mut self, _ty: &TypeKind) {}
}

/// Counts IR elements
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IrCounter {
    pub statements: usize,
    pub expressions: usize,
    pub constants: usize,
    /// Calls to resolved helpers
    pub helper_calls: usize,
    /// Calls to anything else
    pub other_calls: usize,
    /// Expressions of ternary or ternary vector type
    pub ternary_exprs: usize,
}

impl IrVisitor for IrCounter {
    fn visit_statement(&mut self, statement: &Statement) {
        self.statements += 1;
        match statement {
            Statement::Assign { dest, value } => {
                self.visit_place(dest);
                self.visit_expr(value);
            }
            Statement::Call { callee, args, .. } => self.visit_call(callee, args),
            Statement::Branch { predicate, .. } => self.visit_expr(predicate),
            Statement::Return(value) => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.expressions += 1;
        if expr.ty.is_ternary_like() {
            self.ternary_exprs += 1;
        }
        match &expr.kind {
            ExprKind::Const(_) => self.constants += 1,
            ExprKind::Call { callee, args } => self.visit_call(callee, args),
            _ => {
                for child in expr.children() {
                    self.visit_expr(child);
                }
            }
        }
    }

    fn visit_call(&mut self, callee: &Callee, args: &[Expr]) {
        if callee.is_helper() {
            self.helper_calls += 1;
        } else {
            self.other_calls += 1;
        }
        for arg in args {
            self.visit_expr(arg);
        }
    }
}
