//! Trit widths.

use std::fmt;

use crate::error::TritError;

/// Largest supported trit count (256 bits of packed storage).
pub const MAX_WIDTH: u32 = 128;

/// Largest width whose every value decodes exactly into an `i128`.
pub const MAX_EXACT_WIDTH: u32 = 80;

/// Number of trits a ternary type holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Width(u32);

impl Width {
    pub const T32: Width = Width(32);
    pub const T64: Width = Width(64);
    pub const T128: Width = Width(128);

    pub fn new(trits: u32) -> Result<Width, TritError> {
        if (1..=MAX_WIDTH).contains(&trits) {
            Ok(Width(trits))
        } else {
            Err(TritError::WidthOutOfRange(trits))
        }
    }

    pub fn trits(self) -> u32 {
        self.0
    }

    /// Size of the packed representation in bits.
    pub fn bits(self) -> u32 {
        self.0 * 2
    }

    /// Whether every value of this width decodes exactly into an `i128`.
    pub fn is_exact(self) -> bool {
        self.0 <= MAX_EXACT_WIDTH
    }

    /// Largest representable logical value, `(3^N - 1) / 2`, when it fits.
    pub fn max_value(self) -> Option<i128> {
        if !self.is_exact() {
            return None;
        }
        let pow = 3i128.checked_pow(self.0)?;
        Some((pow - 1) / 2)
    }

    /// Whether `value` lies in the representable range of this width.
    pub fn contains(self, value: i128) -> bool {
        match self.max_value() {
            Some(max) => (-max..=max).contains(&value),
            // Wider than the i128 range: every i128 is representable.
            None => true,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = TritError;

    fn try_from(trits: u32) -> Result<Self, Self::Error> {
        Width::new(trits)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
