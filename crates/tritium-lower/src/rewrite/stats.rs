//! Rewrite counters and the post-pass survivor scan.

use std::fmt;
use std::ops::AddAssign;

use tritium_core::Operation;

use super::builtins::classify;
use crate::ir::{Expr, ExprKind, IrVisitor, Statement};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Nodes recognised as ternary operations with their category enabled
    pub candidates: usize,
    pub folded: usize,
    pub lowered: usize,
    pub unresolved: usize,
    /// Operations whose operand widths disagree
    pub width_mismatches: usize,
}

impl RewriteStats {
    pub fn is_empty(&self) -> bool {
        *self == RewriteStats::default()
    }
}

impl AddAssign for RewriteStats {
    fn add_assign(&mut self, other: Self) {
        self.candidates += other.candidates;
        self.folded += other.folded;
        self.lowered += other.lowered;
        self.unresolved += other.unresolved;
        self.width_mismatches += other.width_mismatches;
    }
}

impl fmt::Display for RewriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates: {} folded, {} lowered, {} unresolved, {} width mismatches",
            self.candidates, self.folded, self.lowered, self.unresolved, self.width_mismatches
        )
    }
}

/// Finds ternary operations still present in a function.
///
/// Conditionals only count when they involve a ternary type, since plain
/// conditionals are left alone unless conditional lowering is on.
#[derive(Debug, Default)]
pub struct SurvivorScan {
    pub survivors: Vec<(Operation, String)>,
}

impl SurvivorScan {
    fn record(&mut self, expr: &Expr) {
        let Some(op) = classify(expr) else {
            return;
        };
        let builtin = matches!(&expr.kind, ExprKind::Call { .. });
        let ternary = expr.ty.is_ternary_like()
            || expr.children().iter().any(|child| child.ty.is_ternary_like());
        if builtin || ternary {
            self.survivors.push((op, expr.to_string()));
        }
    }
}

impl IrVisitor for SurvivorScan {
    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Call { callee, args, .. } => {
                if let Some(op) = super::builtins::builtin_operation(callee) {
                    self.survivors.push((op, statement.to_string()));
                }
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Statement::Assign { value, .. } => self.visit_expr(value),
            Statement::Branch { predicate, .. } => self.visit_expr(predicate),
            Statement::Return(value) => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.record(expr);
        for child in expr.children() {
            self.visit_expr(child);
        }
    }
}
