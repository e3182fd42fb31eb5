//! Enumerant literal filtering.

/// Maximum number of hex digits accepted after the `0x` prefix.
const MAX_HEX_DIGITS: usize = 8;

/// Returns true if an enumerant literal fits in an unsigned 32-bit integer.
///
/// Accepts plain decimal digit strings and `0x`-prefixed hex strings of at most
/// eight digits. Longer hex bodies are rejected without being parsed.
#[must_use]
pub fn fits_u32(literal: &str) -> bool {
    match literal.strip_prefix("0x") {
        Some(digits) => {
            if digits.len() > MAX_HEX_DIGITS {
                return false;
            }
            !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_hexdigit())
                && u32::from_str_radix(digits, 16).is_ok()
        }
        None => {
            !literal.is_empty()
                && literal.bytes().all(|b| b.is_ascii_digit())
                && literal.parse::<u32>().is_ok()
        }
    }
}
