//! Packed trit vectors: 2 bits per trit, trit 0 in the least significant field.

use std::fmt;

use crate::error::TritError;
use crate::trit::{Trit, RESERVED_FIELD};
use crate::width::Width;

const WORDS: usize = 4;
const TRITS_PER_WORD: u32 = 32;

/// A fixed-width packed ternary value.
///
/// Equality compares the raw bit pattern. Use [`PackedValue::same_value`] to
/// compare logical values (reserved fields count as zero trits there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedValue {
    width: Width,
    words: [u64; WORDS],
}

impl PackedValue {
    /// The zero value: every field holds the zero-trit pattern `01`.
    pub fn zero(width: Width) -> PackedValue {
        PackedValue::splat(width, Trit::Zero)
    }

    /// Every trit set to `trit`.
    pub fn splat(width: Width, trit: Trit) -> PackedValue {
        let mut value = PackedValue {
            width,
            words: [0; WORDS],
        };
        for index in 0..width.trits() {
            value.set_trit(index, trit);
        }
        value
    }

    /// Build from trits, least significant first. Missing trits are zero.
    pub fn from_trits(width: Width, trits: &[Trit]) -> PackedValue {
        let mut value = PackedValue::zero(width);
        for (index, trit) in trits.iter().take(width.trits() as usize).enumerate() {
            value.set_trit(index as u32, *trit);
        }
        value
    }

    /// Reinterpret a raw bit pattern. Fails if bits above `2 * width` are set.
    pub fn from_bits(width: Width, bits: u128) -> Result<PackedValue, TritError> {
        if width.bits() < 128 && bits >> width.bits() != 0 {
            return Err(TritError::BitsOutOfRange {
                width: width.trits(),
            });
        }
        let mut words = [0; WORDS];
        words[0] = bits as u64;
        words[1] = (bits >> 64) as u64;
        Ok(PackedValue { width, words })
    }

    /// Raw bit pattern for widths of at most 64 trits.
    pub fn to_bits(&self) -> Option<u128> {
        if self.width.trits() > 64 {
            return None;
        }
        Some(self.words[0] as u128 | (self.words[1] as u128) << 64)
    }

    pub fn from_words(width: Width, words: [u64; WORDS]) -> PackedValue {
        let mut value = PackedValue { width, words };
        value.clear_unused();
        value
    }

    pub fn words(&self) -> [u64; WORDS] {
        self.words
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// The raw 2-bit field at `index`.
    pub fn field(&self, index: u32) -> u8 {
        debug_assert!(index < self.width.trits());
        let word = self.words[(index / TRITS_PER_WORD) as usize];
        ((word >> (2 * (index % TRITS_PER_WORD))) & 0b11) as u8
    }

    /// The trit at `index`; reserved fields read as zero.
    pub fn trit(&self, index: u32) -> Trit {
        Trit::from_field(self.field(index)).unwrap_or(Trit::Zero)
    }

    pub fn set_trit(&mut self, index: u32, trit: Trit) {
        self.set_field(index, trit.field());
    }

    pub fn with_trit(mut self, index: u32, trit: Trit) -> PackedValue {
        self.set_trit(index, trit);
        self
    }

    pub(crate) fn set_field(&mut self, index: u32, bits: u8) {
        debug_assert!(index < self.width.trits());
        let word = &mut self.words[(index / TRITS_PER_WORD) as usize];
        let shift = 2 * (index % TRITS_PER_WORD);
        *word = (*word & !(0b11 << shift)) | ((bits as u64 & 0b11) << shift);
    }

    /// Trits, least significant first.
    pub fn trits(&self) -> impl Iterator<Item = Trit> + '_ {
        (0..self.width.trits()).map(move |index| self.trit(index))
    }

    pub fn has_reserved(&self) -> bool {
        (0..self.width.trits()).any(|index| self.field(index) == RESERVED_FIELD)
    }

    /// Sign of the logical value: the most significant non-zero trit.
    pub fn sign(&self) -> Trit {
        (0..self.width.trits())
            .rev()
            .map(|index| self.trit(index))
            .find(|trit| *trit != Trit::Zero)
            .unwrap_or(Trit::Zero)
    }

    pub fn is_zero(&self) -> bool {
        self.sign() == Trit::Zero
    }

    /// Logical equality, ignoring reserved-field encodings.
    pub fn same_value(&self, other: &PackedValue) -> bool {
        self.width == other.width && self.trits().eq(other.trits())
    }

    fn clear_unused(&mut self) {
        let used = self.width.bits();
        for (index, word) in self.words.iter_mut().enumerate() {
            let start = index as u32 * 64;
            if start >= used {
                *word = 0;
            } else if used - start < 64 {
                *word &= (1u64 << (used - start)) - 1;
            }
        }
    }
}

impl fmt::Display for PackedValue {
    /// Most significant trit first, e.g. `+0-` for 8.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..self.width.trits()).rev() {
            write!(f, "{}", self.trit(index))?;
        }
        Ok(())
    }
}
