//! Packed ternary operations.
//!
//! Every operation is closed over the width of its operands: `N`-trit inputs
//! produce an `N`-trit result, wrapping modulo `3^N`. Operands of different
//! widths are rejected.

pub mod arith;
pub mod compare;
pub mod convert;
pub mod logic;
pub mod scalar;
pub mod shift;

pub use arith::{add, bias, div, muladd, mul, neg, rem, tnet, tnormalize, tround, sub};
pub use compare::{cmp, cmpeq, cmpgt, cmplt, cmpneq, compare, tbranch, tsignjmp};
pub use convert::{f2t, t2f, tb2t, tquant, tt2b};
pub use logic::{tequiv, tlimp, tmaj, tmax, tmin, tmux, tnot, txor, xor};
pub use shift::{rol, ror, shl, shr};

use crate::error::TritError;
use crate::packed::PackedValue;
use crate::width::Width;

/// The shared width of two operands.
pub(crate) fn common_width(a: &PackedValue, b: &PackedValue) -> Result<Width, TritError> {
    TritError::check_widths(a.width().trits(), b.width().trits())?;
    Ok(a.width())
}

/// Combine two operands trit by trit.
pub(crate) fn zip_trits(
    a: &PackedValue,
    b: &PackedValue,
    f: impl Fn(crate::trit::Trit, crate::trit::Trit) -> crate::trit::Trit,
) -> Result<PackedValue, TritError> {
    let width = common_width(a, b)?;
    let mut out = PackedValue::zero(width);
    for index in 0..width.trits() {
        out.set_trit(index, f(a.trit(index), b.trit(index)));
    }
    Ok(out)
}
