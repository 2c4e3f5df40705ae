//! Balanced-ternary literal strings such as `"+1 0 -1"`.
//!
//! Tokens are `0`, `1`, `+1` and `-1`, most significant trit first. They may
//! be separated by whitespace or commas, or written adjacently (`1-10`).

use crate::codec::encode;
use crate::error::LiteralError;
use crate::packed::PackedValue;
use crate::width::Width;

/// Parse a literal into its logical value.
pub fn parse_literal(text: &str) -> Result<i64, LiteralError> {
    let bytes = text.as_bytes();
    let mut acc: i64 = 0;
    let mut seen = false;
    let mut offset = 0;

    while offset < bytes.len() {
        let byte = bytes[offset];
        if byte.is_ascii_whitespace() || byte == b',' {
            offset += 1;
            continue;
        }
        let (trit, len) = match (byte, bytes.get(offset + 1)) {
            (b'0', _) => (0, 1),
            (b'1', _) => (1, 1),
            (b'+', Some(b'1')) => (1, 2),
            (b'-', Some(b'1')) => (-1, 2),
            _ => return Err(LiteralError::UnknownToken { offset }),
        };
        acc = acc
            .checked_mul(3)
            .and_then(|acc| acc.checked_add(trit))
            .ok_or(LiteralError::Overflow)?;
        seen = true;
        offset += len;
    }

    if seen {
        Ok(acc)
    } else {
        Err(LiteralError::Empty)
    }
}

/// Parse a literal and encode it at `width`.
pub fn parse_packed(text: &str, width: Width) -> Result<PackedValue, LiteralError> {
    parse_literal(text).map(|value| encode(value as i128, width))
}
