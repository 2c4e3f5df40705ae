//! Lowering of ternary operations to runtime helper calls.
//!
//! The pass works on a small statement IR ([`ir`]) standing in for a host
//! compiler's. It recognises ternary-typed arithmetic, logic, comparisons,
//! shifts, conversions, conditionals and `__builtin_ternary_*` calls, folds
//! what is known at compile time and replaces the rest with calls to helpers
//! such as `__ternary_add_t32`.
//!
//! ```
//! use tritium_lower::ir::{Expr, Function, Statement, TypeKind};
//! use tritium_lower::{lower_function, PassConfig};
//! use tritium_core::Width;
//!
//! let t32 = TypeKind::Ternary(Width::T32);
//! let mut function = Function::new("sum", t32.clone());
//! let a = function.add_param("a", t32.clone());
//! let b = function.add_param("b", t32.clone());
//! let bb0 = function.add_block();
//! let sum = Expr::binary(
//!     tritium_lower::ir::BinOp::Add,
//!     Expr::local(a, t32.clone()),
//!     Expr::local(b, t32.clone()),
//!     t32.clone(),
//! );
//! function.push(bb0, Statement::Return(Some(sum)));
//!
//! let stats = lower_function(&mut function, &PassConfig::all()).unwrap();
//! assert_eq!(stats.lowered, 1);
//! ```

pub mod config;
pub mod error;
pub mod fold;
pub mod ir;
pub mod resolver;
pub mod rewrite;

pub use config::{Features, PassConfig};
pub use error::{ConfigError, LowerError};
pub use resolver::{HelperDecl, HelperKey, OperandKind, Resolver};
pub use rewrite::{lower_function, NodeState, RewritePass, RewriteStats, Site};

#[cfg(test)]
mod tests;
