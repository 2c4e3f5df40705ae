//! A small statement IR standing in for the host compiler's.

pub mod cursor;
pub mod expr;
pub mod function;
pub mod statement;
pub mod types;
pub mod visit;

pub use cursor::{BlockCursor, StatementSink};
pub use expr::{BinOp, Callee, Constant, Expr, ExprKind, ExprView, LocalId, UnOp};
pub use function::{BasicBlock, BlockId, Function, LocalDecl};
pub use statement::{Place, Statement};
pub use types::{ScalarKind, TypeKind};
pub use visit::{IrCounter, IrVisitor};
