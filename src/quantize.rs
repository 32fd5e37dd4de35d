//! Coordinate quantization by binary interval subdivision.
//!
//! A coordinate is mapped to a fixed-width integer code by repeatedly
//! bisecting its axis range: each step emits bit 1 and keeps the upper half
//! when the value is at or above the midpoint, bit 0 and the lower half
//! otherwise. Intervals are half-open, matching the axis domains
//! `[-90, 90)` and `[-180, 180)`. Replaying the bits recovers the final
//! interval, whose midpoint and half-width are the decoded value and its
//! error margin.

/// Quantize `value` within `[low, high)` to a `bit_length`-bit code.
///
/// The result is a big-endian bit sequence packed into the low
/// `bit_length` bits of the return value; the invariant
/// `code < 2^bit_length` always holds. `bit_length` may be 0 (the code is
/// 0) and at most 64.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::quantize;
///
/// assert_eq!(quantize(42.6, -90.0, 90.0, 12), 3017);
/// assert_eq!(quantize(-90.0, -90.0, 90.0, 4), 0);
/// ```
pub fn quantize(value: f64, low: f64, high: f64, bit_length: u32) -> u64 {
    let (mut low, mut high) = (low, high);
    let mut code = 0u64;
    for _ in 0..bit_length {
        let mid = (low + high) / 2.0;
        code <<= 1;
        if value >= mid {
            code |= 1;
            low = mid;
        } else {
            high = mid;
        }
    }
    code
}

/// Replay the bits of `code` over `[low, high)` and return the exact
/// sub-interval `(min, max)` the code denotes.
///
/// `bit_length = 0` returns the full range untouched.
pub fn cell_bounds(code: u64, low: f64, high: f64, bit_length: u32) -> (f64, f64) {
    let (mut low, mut high) = (low, high);
    for bit in (0..bit_length).rev() {
        let mid = (low + high) / 2.0;
        if (code >> bit) & 1 == 1 {
            low = mid;
        } else {
            high = mid;
        }
    }
    (low, high)
}

/// Decode a quantized code to the center of its interval plus the
/// half-width error margin.
///
/// Exact inverse of [`quantize`] in the round-trip sense: the returned
/// center re-quantizes to the same code at the same bit length, and the
/// original value lies within `center ± half_width`.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::dequantize;
///
/// let (center, error) = dequantize(3017, -90.0, 90.0, 12);
/// assert_eq!(center, 42.60498046875);
/// assert_eq!(error, 0.02197265625);
/// ```
pub fn dequantize(code: u64, low: f64, high: f64, bit_length: u32) -> (f64, f64) {
    let (min, max) = cell_bounds(code, low, high, bit_length);
    ((min + max) / 2.0, (max - min) / 2.0)
}
