//! Value-level evaluation of an [`Operation`].
//!
//! This is what constant folding runs: ternary operands go to the packed
//! engine, plain integers to the scalar helpers, and vectors through the lane
//! adapter.

use std::fmt;

use crate::codec::decode;
use crate::error::TritError;
use crate::lanes::{self, LaneVector};
use crate::operation::Operation;
use crate::ops::{self, scalar};
use crate::packed::PackedValue;
use crate::width::Width;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Ternary(PackedValue),
    Int(i128),
    Float(f64),
    Vector(LaneVector),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Ternary(_) => "ternary",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Vector(_) => "vector",
        }
    }

    /// Whether the value counts as true in a condition.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Ternary(value) => !value.is_zero(),
            Value::Int(value) => *value != 0,
            Value::Float(value) => *value != 0.0,
            Value::Vector(vector) => vector.lanes().iter().any(|lane| !lane.is_zero()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Ternary(value) => write!(f, "{}{}", decode(value), value.width()),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Vector(vector) => write!(f, "{vector}"),
        }
    }
}

/// Evaluate `op` on constant arguments.
///
/// `width` is the result width; it is only consulted by operations whose
/// operands carry none (`tb2t`, `f2t`, `tquant`).
pub fn evaluate(op: Operation, width: Option<Width>, args: &[Value]) -> Result<Value, TritError> {
    if args.len() != op.arity() {
        return Err(TritError::Arity {
            op,
            expected: op.arity(),
            found: args.len(),
        });
    }
    if args.iter().any(|arg| matches!(arg, Value::Vector(_))) {
        return lanes::apply(op, width, args).map(Value::Vector);
    }

    let args = Args { op, args };
    match op {
        Operation::Add
        | Operation::Sub
        | Operation::Mul
        | Operation::Div
        | Operation::Mod
        | Operation::And
        | Operation::Or
        | Operation::Xor
        | Operation::Cmp => binary(op, &args),

        Operation::Tmin => Ok(Value::Ternary(ops::tmin(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::Tmax => Ok(Value::Ternary(ops::tmax(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::Tlimp => Ok(Value::Ternary(ops::tlimp(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::Tequiv => Ok(Value::Ternary(ops::tequiv(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::Txor => Ok(Value::Ternary(ops::txor(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::CmpLt => Ok(Value::Ternary(ops::cmplt(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::CmpEq => Ok(Value::Ternary(ops::cmpeq(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::CmpGt => Ok(Value::Ternary(ops::cmpgt(args.ternary(0)?, args.ternary(1)?)?)),
        Operation::CmpNeq => Ok(Value::Ternary(ops::cmpneq(args.ternary(0)?, args.ternary(1)?)?)),

        Operation::Neg | Operation::Not => match &args.args[0] {
            Value::Int(value) => Ok(Value::Int(scalar::neg(*value))),
            _ => Ok(Value::Ternary(ops::neg(args.ternary(0)?))),
        },
        Operation::Tnot | Operation::Tinv => Ok(Value::Ternary(ops::tnot(args.ternary(0)?))),
        Operation::Tnormalize => Ok(Value::Ternary(ops::tnormalize(args.ternary(0)?))),
        Operation::Tnet => Ok(Value::Int(ops::tnet(args.ternary(0)?))),

        Operation::Shl | Operation::Shr | Operation::Rol | Operation::Ror => shift(op, &args),

        Operation::Select => {
            let chosen = if args.args[0].is_truthy() { 1 } else { 2 };
            Ok(args.args[chosen].clone())
        }

        Operation::Tb2t => {
            let width = width.ok_or(TritError::MissingWidth(op))?;
            Ok(Value::Ternary(ops::tb2t(args.integer(0)?, width)))
        }
        Operation::Tt2b => Ok(Value::Int(ops::tt2b(args.ternary(0)?))),
        Operation::T2f => Ok(Value::Float(ops::t2f(args.ternary(0)?))),
        Operation::F2t => {
            let width = width.ok_or(TritError::MissingWidth(op))?;
            Ok(Value::Ternary(ops::f2t(args.float(0)?, width)))
        }
        Operation::Tquant => {
            let width = width.ok_or(TritError::MissingWidth(op))?;
            Ok(Value::Ternary(ops::tquant(args.float(0)?, args.float(1)?, width)))
        }

        Operation::Tmaj => Ok(Value::Ternary(ops::tmaj(
            args.ternary(0)?,
            args.ternary(1)?,
            args.ternary(2)?,
        )?)),
        Operation::Tmuladd => Ok(Value::Ternary(ops::muladd(
            args.ternary(0)?,
            args.ternary(1)?,
            args.ternary(2)?,
        )?)),
        Operation::Tround => Ok(Value::Ternary(ops::tround(args.ternary(0)?, args.count(1)?))),
        Operation::Tbias => {
            let bias = i64::try_from(args.integer(1)?).map_err(|_| TritError::OperandKind {
                op,
                index: 1,
                reason: "bias does not fit in 64 bits",
            })?;
            Ok(Value::Ternary(ops::bias(args.ternary(0)?, bias)))
        }
        Operation::Tmux => Ok(Value::Ternary(ops::tmux(
            args.ternary(0)?,
            args.ternary(1)?,
            args.ternary(2)?,
            args.ternary(3)?,
        )?)),

        Operation::Tbranch => {
            let chosen = ops::tbranch(args.integer(0)?, 1, 2, 3);
            Ok(args.args[chosen].clone())
        }
        Operation::Tsignjmp => {
            let chosen = ops::tsignjmp(args.ternary(0)?, 1, 2, 3);
            Ok(args.args[chosen].clone())
        }

        Operation::Load | Operation::Store => Err(TritError::NotEvaluable(op)),
    }
}

fn binary(op: Operation, args: &Args<'_>) -> Result<Value, TritError> {
    if let (Value::Int(a), Value::Int(b)) = (&args.args[0], &args.args[1]) {
        let (a, b) = (*a, *b);
        let result = match op {
            Operation::Add => scalar::add(a, b),
            Operation::Sub => scalar::sub(a, b),
            Operation::Mul => scalar::mul(a, b),
            Operation::Div => scalar::div(a, b),
            Operation::Mod => scalar::rem(a, b),
            Operation::And => scalar::and(a, b),
            Operation::Or => scalar::or(a, b),
            Operation::Xor => scalar::xor(a, b),
            _ => scalar::cmp(a, b),
        };
        return Ok(Value::Int(result));
    }

    let (a, b) = (args.ternary(0)?, args.ternary(1)?);
    let result = match op {
        Operation::Add => ops::add(a, b)?,
        Operation::Sub => ops::sub(a, b)?,
        Operation::Mul => ops::mul(a, b)?,
        Operation::Div => ops::div(a, b)?,
        Operation::Mod => ops::rem(a, b)?,
        Operation::And => ops::tmin(a, b)?,
        Operation::Or => ops::tmax(a, b)?,
        Operation::Xor => ops::xor(a, b)?,
        _ => return Ok(Value::Int(ops::cmp(a, b)? as i128)),
    };
    Ok(Value::Ternary(result))
}

fn shift(op: Operation, args: &Args<'_>) -> Result<Value, TritError> {
    if let (Value::Int(a), Value::Int(n)) = (&args.args[0], &args.args[1]) {
        let result = match op {
            Operation::Shl => scalar::shl(*a, *n),
            Operation::Shr => scalar::shr(*a, *n),
            Operation::Rol => scalar::rol(*a, *n),
            _ => scalar::ror(*a, *n),
        };
        return Ok(Value::Int(result));
    }

    let (a, amount) = (args.ternary(0)?, args.count(1)?);
    let result = match op {
        Operation::Shl => ops::shl(a, amount),
        Operation::Shr => ops::shr(a, amount),
        Operation::Rol => ops::rol(a, amount),
        _ => ops::ror(a, amount),
    };
    Ok(Value::Ternary(result))
}

struct Args<'a> {
    op: Operation,
    args: &'a [Value],
}

impl Args<'_> {
    fn ternary(&self, index: usize) -> Result<&PackedValue, TritError> {
        match &self.args[index] {
            Value::Ternary(value) => Ok(value),
            _ => Err(self.kind_error(index, "expected a ternary value")),
        }
    }

    fn integer(&self, index: usize) -> Result<i128, TritError> {
        match &self.args[index] {
            Value::Int(value) => Ok(*value),
            _ => Err(self.kind_error(index, "expected an integer")),
        }
    }

    fn float(&self, index: usize) -> Result<f64, TritError> {
        match &self.args[index] {
            Value::Float(value) => Ok(*value),
            Value::Int(value) => Ok(*value as f64),
            _ => Err(self.kind_error(index, "expected a number")),
        }
    }

    /// A non-negative shift or drop count. Counts beyond `u32` saturate.
    fn count(&self, index: usize) -> Result<u32, TritError> {
        let count = self.integer(index)?;
        if count < 0 {
            return Err(self.kind_error(index, "negative count"));
        }
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn kind_error(&self, index: usize, reason: &'static str) -> TritError {
        TritError::OperandKind {
            op: self.op,
            index,
            reason,
        }
    }
}
