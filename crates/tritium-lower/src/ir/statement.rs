//! Statements.

use std::fmt;

use super::expr::{Callee, Expr, LocalId};
use super::function::BlockId;

/// A storage location: a local, or the memory a local points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Place {
    pub local: LocalId,
    pub deref: bool,
}

impl Place {
    pub fn local(local: LocalId) -> Self {
        Self {
            local,
            deref: false,
        }
    }

    pub fn deref(local: LocalId) -> Self {
        Self { local, deref: true }
    }
}

/// A statement in a basic block
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Assignment of a value to a place
    Assign {
        /// Destination place
        dest: Place,
        /// Source value
        value: Expr,
    },
    /// Function call, optionally storing its result
    Call {
        /// Function to call
        callee: Callee,
        /// Arguments to the function
        args: Vec<Expr>,
        /// Where the result goes, if anywhere
        dest: Option<Place>,
    },
    /// Two-way conditional branch
    Branch {
        /// Condition
        predicate: Expr,
        /// Target when the condition holds
        then_block: BlockId,
        /// Target otherwise
        else_block: BlockId,
    },
    /// Return from the function
    Return(Option<Expr>),
}

impl Statement {
    pub fn assign(dest: LocalId, value: Expr) -> Self {
        Statement::Assign {
            dest: Place::local(dest),
            value,
        }
    }

    pub fn call(callee: Callee, args: Vec<Expr>, dest: Option<LocalId>) -> Self {
        Statement::Call {
            callee,
            args,
            dest: dest.map(Place::local),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deref {
            write!(f, "*{}", self.local)
        } else {
            write!(f, "{}", self.local)
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assign { dest, value } => write!(f, "{dest} = {value}"),
            Statement::Call { callee, args, dest } => {
                if let Some(dest) = dest {
                    write!(f, "{dest} = ")?;
                }
                write!(f, "call {callee}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Statement::Branch {
                predicate,
                then_block,
                else_block,
            } => write!(f, "if {predicate} goto {then_block} else {else_block}"),
            Statement::Return(Some(value)) => write!(f, "return {value}"),
            Statement::Return(None) => write!(f, "return"),
        }
    }
}
