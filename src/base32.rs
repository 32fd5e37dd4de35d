//! The 32-symbol geohash alphabet.
//!
//! Geohash strings use the digits and lowercase letters except `a`, `i`,
//! `l`, and `o`. The alphabet is part of the wire contract: it must match
//! other geohash implementations exactly for the strings to interoperate.

use crate::error::{GeohashError, Result};
use once_cell::sync::Lazy;

/// Geohash alphabet, indexed by 5-bit group value.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Reverse lookup table, built once on first use and never mutated.
static SYMBOL_VALUES: Lazy<[i8; 256]> = Lazy::new(|| {
    let mut table = [-1i8; 256];
    for (value, &symbol) in ALPHABET.iter().enumerate() {
        table[symbol as usize] = value as i8;
    }
    table
});

/// Translate one geohash character to its 5-bit value.
///
/// Matching is case-sensitive: uppercase input is rejected, as are the four
/// excluded letters.
///
/// # Errors
///
/// Returns [`GeohashError::InvalidSymbol`] for any character outside the
/// alphabet.
pub fn symbol_to_value(symbol: char) -> Result<u8> {
    if symbol.is_ascii() {
        let value = SYMBOL_VALUES[symbol as usize];
        if value >= 0 {
            return Ok(value as u8);
        }
    }
    Err(GeohashError::InvalidSymbol(symbol))
}

/// Translate a 5-bit value back to its geohash character.
///
/// Total over `0..32`; only the low five bits of `value` are significant.
pub fn value_to_symbol(value: u8) -> char {
    ALPHABET[(value & 0x1f) as usize] as char
}
