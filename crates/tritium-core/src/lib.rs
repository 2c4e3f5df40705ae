//! Balanced-ternary numeric engine.
//!
//! Values are packed two bits per trit (`00` = -1, `01` = 0, `10` = +1, `11`
//! reserved and read as 0), least significant trit first. Every operation is
//! closed over its operand width and wraps modulo `3^N`.

pub mod codec;
pub mod error;
pub mod eval;
pub mod lanes;
pub mod literal;
pub mod operation;
pub mod ops;
pub mod packed;
pub mod trit;
pub mod width;

pub use codec::{checked_decode, decode, encode, normalize};
pub use error::{LiteralError, TritError};
pub use eval::{evaluate, Value};
pub use lanes::LaneVector;
pub use literal::{parse_literal, parse_packed};
pub use operation::{Category, Operation, ResultShape};
pub use packed::PackedValue;
pub use trit::Trit;
pub use width::{Width, MAX_WIDTH};

#[cfg(test)]
mod tests;
