//! Expression trees.

use std::fmt;
use std::sync::Arc;

use tritium_core::{decode, LaneVector, PackedValue};

use super::types::TypeKind;
use crate::resolver::HelperDecl;

/// Index of a local in its function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId(pub u32);

/// A constant value
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Integer constant; for ternary-typed expressions this is the raw bit pattern
    Int(i128),
    /// Floating-point constant
    Float(f64),
    /// Packed ternary constant
    Ternary(PackedValue),
    /// Two-lane ternary constant
    Vector(LaneVector),
}

/// Unary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// Negation
    Neg,
    /// Bitwise NOT
    Not,
}

/// Binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Remainder
    Rem,
    /// Bitwise AND
    BitAnd,
    /// Bitwise OR
    BitOr,
    /// Bitwise XOR
    BitXor,
    /// Left shift
    Shl,
    /// Right shift
    Shr,
    /// Equality comparison
    Eq,
    /// Inequality comparison
    Ne,
    /// Less than comparison
    Lt,
    /// Less than or equal comparison
    Le,
    /// Greater than comparison
    Gt,
    /// Greater than or equal comparison
    Ge,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    /// Apply a comparison to the result of a three-way compare against zero.
    pub fn compare_to_zero(self, cmp: i128) -> Option<bool> {
        Some(match self {
            BinOp::Eq => cmp == 0,
            BinOp::Ne => cmp != 0,
            BinOp::Lt => cmp < 0,
            BinOp::Le => cmp <= 0,
            BinOp::Gt => cmp > 0,
            BinOp::Ge => cmp >= 0,
            _ => return None,
        })
    }
}

/// The target of a call
#[derive(Debug, Clone)]
pub enum Callee {
    /// A function known only by name, such as a host function or a builtin
    Named(String),
    /// A runtime helper handed out by the resolver
    Helper(Arc<HelperDecl>),
}

impl Callee {
    pub fn name(&self) -> &str {
        match self {
            Callee::Named(name) => name,
            Callee::Helper(decl) => &decl.name,
        }
    }

    pub fn is_helper(&self) -> bool {
        matches!(self, Callee::Helper(_))
    }
}

impl PartialEq for Callee {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callee::Named(a), Callee::Named(b)) => a == b,
            (Callee::Helper(a), Callee::Helper(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

/// Expression node kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Constant value
    Const(Constant),
    /// Read of a local
    Local(LocalId),
    /// Read through a pointer held in a local
    Load(LocalId),
    /// Unary operation
    Unary {
        /// Operation kind
        op: UnOp,
        /// Operand
        operand: Box<Expr>,
    },
    /// Binary operation
    Binary {
        /// Operation kind
        op: BinOp,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand
        rhs: Box<Expr>,
    },
    /// Conversion of the operand to the node's type
    Cast(Box<Expr>),
    /// `cond ? then : otherwise`
    Cond {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Call with a result
    Call { callee: Callee, args: Vec<Expr> },
}

/// A typed expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeKind,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: TypeKind) -> Self {
        Self { kind, ty }
    }

    pub fn int(value: i128, ty: TypeKind) -> Self {
        Self::new(ExprKind::Const(Constant::Int(value)), ty)
    }

    pub fn float(value: f64, ty: TypeKind) -> Self {
        Self::new(ExprKind::Const(Constant::Float(value)), ty)
    }

    /// A packed ternary constant typed with its own width.
    pub fn ternary(value: PackedValue) -> Self {
        let ty = TypeKind::Ternary(value.width());
        Self::new(ExprKind::Const(Constant::Ternary(value)), ty)
    }

    pub fn vector(value: LaneVector) -> Self {
        let ty = TypeKind::TernaryVector(value.width());
        Self::new(ExprKind::Const(Constant::Vector(value)), ty)
    }

    pub fn local(local: LocalId, ty: TypeKind) -> Self {
        Self::new(ExprKind::Local(local), ty)
    }

    pub fn load(pointer: LocalId, ty: TypeKind) -> Self {
        Self::new(ExprKind::Load(pointer), ty)
    }

    pub fn unary(op: UnOp, operand: Expr, ty: TypeKind) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
        )
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr, ty: TypeKind) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ty,
        )
    }

    pub fn cast(operand: Expr, ty: TypeKind) -> Self {
        Self::new(ExprKind::Cast(Box::new(operand)), ty)
    }

    pub fn cond(cond: Expr, then: Expr, otherwise: Expr, ty: TypeKind) -> Self {
        Self::new(
            ExprKind::Cond {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            ty,
        )
    }

    pub fn call(callee: Callee, args: Vec<Expr>, ty: TypeKind) -> Self {
        Self::new(ExprKind::Call { callee, args }, ty)
    }

    pub fn named_call(name: impl Into<String>, args: Vec<Expr>, ty: TypeKind) -> Self {
        Self::call(Callee::Named(name.into()), args, ty)
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match &self.kind {
            ExprKind::Const(constant) => Some(constant),
            _ => None,
        }
    }

    /// A call whose target is a resolved helper.
    pub fn is_helper_call(&self) -> bool {
        matches!(&self.kind, ExprKind::Call { callee, .. } if callee.is_helper())
    }

    /// Whether evaluating the expression may have effects beyond its value.
    /// Calls to anything but a resolved helper are assumed to.
    pub fn has_side_effects(&self) -> bool {
        match &self.kind {
            ExprKind::Const(_) | ExprKind::Local(_) | ExprKind::Load(_) => false,
            ExprKind::Unary { operand, .. } | ExprKind::Cast(operand) => operand.has_side_effects(),
            ExprKind::Binary { lhs, rhs, .. } => lhs.has_side_effects() || rhs.has_side_effects(),
            ExprKind::Cond {
                cond,
                then,
                otherwise,
            } => cond.has_side_effects() || then.has_side_effects() || otherwise.has_side_effects(),
            ExprKind::Call { callee, args } => {
                !callee.is_helper() || args.iter().any(Expr::has_side_effects)
            }
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Const(_) | ExprKind::Local(_) | ExprKind::Load(_) => Vec::new(),
            ExprKind::Unary { operand, .. } | ExprKind::Cast(operand) => vec![&**operand],
            ExprKind::Binary { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            ExprKind::Cond {
                cond,
                then,
                otherwise,
            } => vec![&**cond, &**then, &**otherwise],
            ExprKind::Call { args, .. } => args.iter().collect(),
        }
    }
}

/// Read-only view of an expression node.
///
/// The folding helpers only need operand access, the type tag and constant
/// access, so they are written against this trait rather than [`Expr`].
pub trait ExprView {
    fn ty(&self) -> &TypeKind;

    fn operands(&self) -> Vec<&Self>;

    fn constant(&self) -> Option<&Constant>;

    fn is_pure(&self) -> bool;

    fn ternary_width(&self) -> Option<tritium_core::Width> {
        self.ty().ternary_width()
    }
}

impl ExprView for Expr {
    fn ty(&self) -> &TypeKind {
        &self.ty
    }

    fn operands(&self) -> Vec<&Self> {
        self.children()
    }

    fn constant(&self) -> Option<&Constant> {
        self.as_constant()
    }

    fn is_pure(&self) -> bool {
        !self.has_side_effects()
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(value) => write!(f, "{value}"),
            Constant::Float(value) => write!(f, "{value:?}"),
            Constant::Ternary(value) => write!(f, "{}t{}", decode(value), value.width().trits()),
            Constant::Vector(value) => write!(
                f,
                "<{}, {}>tv{}",
                decode(&value.lanes()[0]),
                decode(&value.lanes()[1]),
                value.width().trits()
            ),
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Rem => write!(f, "%"),
            BinOp::BitAnd => write!(f, "&"),
            BinOp::BitOr => write!(f, "|"),
            BinOp::BitXor => write!(f, "^"),
            BinOp::Shl => write!(f, "<<"),
            BinOp::Shr => write!(f, ">>"),
            BinOp::Eq => write!(f, "=="),
            BinOp::Ne => write!(f, "!="),
            BinOp::Lt => write!(f, "<"),
            BinOp::Le => write!(f, "<="),
            BinOp::Gt => write!(f, ">"),
            BinOp::Ge => write!(f, ">="),
        }
    }
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Const(constant) => write!(f, "{constant}"),
            ExprKind::Local(local) => write!(f, "{local}"),
            ExprKind::Load(pointer) => write!(f, "*{pointer}"),
            ExprKind::Unary { op, operand } => write!(f, "{op}{operand}"),
            ExprKind::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            ExprKind::Cast(operand) => write!(f, "({operand} as {})", self.ty),
            ExprKind::Cond {
                cond,
                then,
                otherwise,
            } => write!(f, "({cond} ? {then} : {otherwise})"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
