//! Two-lane vectors of packed values.
//!
//! Lane 0 occupies the low half of the container, lane 1 the high half.

use std::fmt;

use crate::error::TritError;
use crate::eval::{evaluate, Value};
use crate::operation::Operation;
use crate::packed::PackedValue;
use crate::width::Width;

pub const LANES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneVector {
    lanes: [PackedValue; LANES],
}

impl LaneVector {
    pub fn new(low: PackedValue, high: PackedValue) -> Result<LaneVector, TritError> {
        TritError::check_widths(low.width().trits(), high.width().trits())?;
        Ok(LaneVector { lanes: [low, high] })
    }

    pub fn splat(value: PackedValue) -> LaneVector {
        LaneVector {
            lanes: [value, value],
        }
    }

    pub fn width(&self) -> Width {
        self.lanes[0].width()
    }

    pub fn lane(&self, index: usize) -> Option<&PackedValue> {
        self.lanes.get(index)
    }

    pub fn lanes(&self) -> &[PackedValue; LANES] {
        &self.lanes
    }

    /// The container bit pattern, for lanes of at most 32 trits.
    pub fn to_bits(&self) -> Option<u128> {
        if self.width().trits() > 32 {
            return None;
        }
        let low = self.lanes[0].to_bits()?;
        let high = self.lanes[1].to_bits()?;
        Some(low | high << 64)
    }

    pub fn from_bits(width: Width, bits: u128) -> Result<LaneVector, TritError> {
        if width.trits() > 32 {
            return Err(TritError::BitsOutOfRange {
                width: width.trits(),
            });
        }
        let low = PackedValue::from_bits(width, bits & u64::MAX as u128)?;
        let high = PackedValue::from_bits(width, bits >> 64)?;
        Ok(LaneVector { lanes: [low, high] })
    }
}

impl fmt::Display for LaneVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.lanes[0], self.lanes[1])
    }
}

/// Apply `op` to each lane independently.
///
/// Vector arguments contribute their own lane; every other argument is passed
/// unchanged to both lanes. Each lane must produce a ternary value.
pub fn apply(op: Operation, width: Option<Width>, args: &[Value]) -> Result<LaneVector, TritError> {
    if !op.is_lane_wise() {
        return Err(TritError::NotLaneWise(op));
    }

    let lane_width = args
        .iter()
        .find_map(|arg| match arg {
            Value::Vector(vector) => Some(vector.width()),
            _ => None,
        })
        .or(width);

    let mut results = Vec::with_capacity(LANES);
    for lane in 0..LANES {
        let lane_args: Vec<Value> = args
            .iter()
            .map(|arg| match arg {
                Value::Vector(vector) => Value::Ternary(vector.lanes[lane]),
                other => other.clone(),
            })
            .collect();
        match evaluate(op, lane_width, &lane_args)? {
            Value::Ternary(value) => results.push(value),
            _ => return Err(TritError::NotLaneWise(op)),
        }
    }
    LaneVector::new(results[0], results[1])
}
