//! Morton (Z-order) bit interleaving for the 64-bit geohash form.
//!
//! Longitude and latitude codes are interleaved bit-by-bit starting with
//! longitude in the most significant position: bit `63 - 2i` of the result
//! is bit `31 - i` of the longitude code, bit `63 - 2i - 1` is bit
//! `31 - i` of the latitude code. Shared prefixes of the interleaved value
//! correspond to spatially nearby, similarly sized cells, which is what
//! makes the codes useful as range-scannable index keys.
//!
//! Both directions are total functions processed in fixed nibble rounds;
//! no recursion, no error cases.

/// A nibble with its three low bits spread to even positions (0, 2, 4).
/// The first four entries double as the 2-bit spread used for the other
/// axis, and the full 16 entries as the 4-bit spread for [`interleave`].
const SPREAD: [u64; 16] = [0, 1, 4, 5, 16, 17, 20, 21, 64, 65, 68, 69, 80, 81, 84, 85];

/// Nibble of an interleaved value split back into its (longitude,
/// latitude) 2-bit halves.
const UNSPREAD: [(u64, u64); 16] = [
    (0, 0),
    (0, 1),
    (1, 0),
    (1, 1),
    (0, 2),
    (0, 3),
    (1, 2),
    (1, 3),
    (2, 0),
    (2, 1),
    (3, 0),
    (3, 1),
    (2, 2),
    (2, 3),
    (3, 2),
    (3, 3),
];

/// Interleave two 32-bit axis codes into one 64-bit Morton code, longitude
/// first.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::{deinterleave, interleave};
///
/// assert_eq!(interleave(0, u32::MAX), 0xAAAA_AAAA_AAAA_AAAA);
/// assert_eq!(interleave(u32::MAX, 0), 0x5555_5555_5555_5555);
/// assert_eq!(deinterleave(interleave(1234, 56789)), (1234, 56789));
/// ```
pub fn interleave(lat_code: u32, lon_code: u32) -> u64 {
    let mut interleaved = 0u64;
    for round in 0..8 {
        let shift = 28 - round * 4;
        let lon_nibble = ((lon_code >> shift) & 0xf) as usize;
        let lat_nibble = ((lat_code >> shift) & 0xf) as usize;
        interleaved = (interleaved << 8) | (SPREAD[lon_nibble] << 1) | SPREAD[lat_nibble];
    }
    interleaved
}

/// Split a 64-bit Morton code back into its `(lat_code, lon_code)` pair.
/// Exact inverse of [`interleave`] over all inputs.
pub fn deinterleave(code: u64) -> (u32, u32) {
    let mut lat_code = 0u64;
    let mut lon_code = 0u64;
    for round in 0..16 {
        let (lon_pair, lat_pair) = UNSPREAD[((code >> (60 - round * 4)) & 0xf) as usize];
        lon_code = (lon_code << 2) | lon_pair;
        lat_code = (lat_code << 2) | lat_pair;
    }
    (lat_code as u32, lon_code as u32)
}
