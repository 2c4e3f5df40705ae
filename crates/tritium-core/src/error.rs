//! Error types for the ternary engine.

use thiserror::Error;

use crate::operation::Operation;
use crate::width::MAX_WIDTH;

/// Errors raised by the packed-value engine and the evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TritError {
    #[error("trit width {0} is outside the supported range 1..={MAX_WIDTH}")]
    WidthOutOfRange(u32),

    #[error("operand width mismatch: expected {expected} trits, found {found}")]
    WidthMismatch { expected: u32, found: u32 },

    #[error("{width}-trit value does not fit in a 128-bit signed integer")]
    DecodeOverflow { width: u32 },

    #[error("bit pattern does not fit in {width} trits")]
    BitsOutOfRange { width: u32 },

    #[error("`{op}` expects {expected} operands, found {found}")]
    Arity {
        op: Operation,
        expected: usize,
        found: usize,
    },

    #[error("`{op}` cannot be applied to operand {index}: {reason}")]
    OperandKind {
        op: Operation,
        index: usize,
        reason: &'static str,
    },

    #[error("`{0}` needs a result width")]
    MissingWidth(Operation),

    #[error("`{0}` has no compile-time semantics")]
    NotEvaluable(Operation),

    #[error("`{0}` does not produce a ternary value per lane")]
    NotLaneWise(Operation),
}

impl TritError {
    pub(crate) fn check_widths(expected: u32, found: u32) -> Result<(), TritError> {
        if expected == found {
            Ok(())
        } else {
            Err(TritError::WidthMismatch { expected, found })
        }
    }
}

/// Errors from parsing a balanced-ternary literal string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("balanced-ternary literal contains no trits")]
    Empty,

    #[error("unknown token at byte offset {offset} in balanced-ternary literal")]
    UnknownToken { offset: usize },

    #[error("balanced-ternary literal overflows a 64-bit signed integer")]
    Overflow,
}
