//! Textual geohash encoding and decoding.
//!
//! A geohash string carries interleaved quantized latitude/longitude bits,
//! five per character, longitude first. Encoding quantizes each axis
//! independently (see [`crate::quantize`]) and merges the bits character by
//! character; decoding splits the characters back into per-axis codes and
//! replays the bisection. The per-axis code form `(lat_code, lon_code,
//! lat_bits, lon_bits)` produced by `hash_to_codes` is also what the
//! neighbor engine operates on.

use crate::base32;
use crate::error::{GeohashError, Result};
use crate::quantize::{cell_bounds, dequantize, quantize};
use geo::{Point, Rect};

/// Number of characters produced when callers have no stated preference.
pub const DEFAULT_PRECISION: usize = 12;

/// Longest supported geohash. 24 characters is 60 bits per axis, far past
/// f64 resolution and close to where per-axis codes would outgrow `u64`.
pub const MAX_PRECISION: usize = 24;

/// A nibble with its three low bits spread to even positions (0, 2, 4);
/// the first four entries double as the 2-bit spread for the other axis.
const SPREAD: [u64; 8] = [0, 1, 4, 5, 16, 17, 20, 21];

/// Wrap a longitude into `[-180.0, 180.0)` by repeated ±360 adjustment.
///
/// Finite values arbitrarily far outside the range are legal and wrap;
/// non-finite values are rejected.
pub(crate) fn normalize_longitude(longitude: f64) -> Result<f64> {
    if !longitude.is_finite() {
        log::warn!("Rejecting non-finite longitude: {}", longitude);
        return Err(GeohashError::InvalidLongitude(longitude));
    }

    let mut longitude = longitude;
    // fmod is exact in IEEE-754; one pass keeps the wrap loop bounded for
    // astronomical magnitudes.
    if longitude.abs() >= 1.0e6 {
        longitude %= 360.0;
    }
    while longitude < -180.0 {
        longitude += 360.0;
    }
    while longitude >= 180.0 {
        longitude -= 360.0;
    }
    Ok(longitude)
}

fn validate_latitude(latitude: f64) -> Result<f64> {
    // NaN fails the range test and is rejected with the same error.
    if !(-90.0..90.0).contains(&latitude) {
        return Err(GeohashError::InvalidLatitude(latitude));
    }
    Ok(latitude)
}

/// Split a geohash string into `(lat_code, lon_code, lat_bits, lon_bits)`.
///
/// Characters at even positions contribute three longitude bits and two
/// latitude bits; odd positions the reverse. The empty string yields all
/// zeros, denoting the whole world.
pub(crate) fn hash_to_codes(hash: &str) -> Result<(u64, u64, u32, u32)> {
    if hash.chars().count() > MAX_PRECISION {
        return Err(GeohashError::InvalidPrecision(hash.chars().count()));
    }

    let mut lat_code = 0u64;
    let mut lon_code = 0u64;
    let mut lat_bits = 0u32;
    let mut lon_bits = 0u32;
    for (position, symbol) in hash.chars().enumerate() {
        let value = u64::from(base32::symbol_to_value(symbol)?);
        if position % 2 == 0 {
            lon_code = (lon_code << 3) | ((value >> 2) & 4) | ((value >> 1) & 2) | (value & 1);
            lat_code = (lat_code << 2) | ((value >> 2) & 2) | ((value >> 1) & 1);
            lon_bits += 3;
            lat_bits += 2;
        } else {
            lon_code = (lon_code << 2) | ((value >> 2) & 2) | ((value >> 1) & 1);
            lat_code = (lat_code << 3) | ((value >> 2) & 4) | ((value >> 1) & 2) | (value & 1);
            lon_bits += 2;
            lat_bits += 3;
        }
    }
    Ok((lat_code, lon_code, lat_bits, lon_bits))
}

/// Merge per-axis codes back into a geohash string of
/// `(lat_bits + lon_bits) / 5` characters.
///
/// Inverse of [`hash_to_codes`]; only the low `lat_bits`/`lon_bits` bits of
/// each code are read, so offset arithmetic may hand in unmasked values.
pub(crate) fn codes_to_hash(lat_code: u64, lon_code: u64, lat_bits: u32, lon_bits: u32) -> String {
    let precision = ((lat_bits + lon_bits) / 5) as usize;
    // The axis holding more bits contributes three of the last character's
    // five.
    let (mut three, mut two) = if lat_bits < lon_bits {
        (lon_code, lat_code)
    } else {
        (lat_code, lon_code)
    };

    let mut symbols = [0u8; MAX_PRECISION];
    for slot in symbols[..precision].iter_mut().rev() {
        let value = (SPREAD[(three & 7) as usize] | (SPREAD[(two & 3) as usize] << 1)) & 0x1f;
        *slot = base32::ALPHABET[value as usize];
        let carry = three >> 3;
        three = two >> 2;
        two = carry;
    }
    symbols[..precision].iter().map(|&s| char::from(s)).collect()
}

/// Encode a coordinate as a geohash string of `precision` characters.
///
/// Latitude must lie in `[-90.0, 90.0)`; longitude may be any finite value
/// and wraps into `[-180.0, 180.0)`. Total bit count is `precision * 5`,
/// with longitude taking the extra bit when that is odd (longitude is
/// encoded first).
///
/// # Errors
///
/// [`GeohashError::InvalidLatitude`], [`GeohashError::InvalidLongitude`],
/// or [`GeohashError::InvalidPrecision`] for `precision` outside
/// `1..=`[`MAX_PRECISION`].
///
/// # Examples
///
/// ```rust
/// use spatio_hash::encode;
///
/// assert_eq!(encode(42.6, -5.6, 5)?, "ezs42");
/// assert_eq!(encode(57.64911, 10.40744, 11)?, "u4pruydqqvj");
///
/// // Longitude wraps; 370°E is 10°E.
/// assert_eq!(encode(57.64911, 370.40744, 11)?, encode(57.64911, 10.40744, 11)?);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Result<String> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeohashError::InvalidPrecision(precision));
    }
    let latitude = validate_latitude(latitude)?;
    let longitude = normalize_longitude(longitude)?;

    let total_bits = (precision * 5) as u32;
    let lat_bits = total_bits / 2;
    let lon_bits = total_bits - lat_bits;
    let lat_code = quantize(latitude, -90.0, 90.0, lat_bits);
    let lon_code = quantize(longitude, -180.0, 180.0, lon_bits);
    Ok(codes_to_hash(lat_code, lon_code, lat_bits, lon_bits))
}

/// Decode a geohash to the center coordinate of its cell.
///
/// The numeric counterpart of [`decode_to_string`]. The empty string is
/// legal and decodes to `(0.0, 0.0)`.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::decode;
///
/// let (lat, lon) = decode("ezs42")?;
/// assert_eq!(lat, 42.60498046875);
/// assert_eq!(lon, -5.60302734375);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn decode(hash: &str) -> Result<(f64, f64)> {
    let (latitude, longitude, _, _) = decode_exactly(hash)?;
    Ok((latitude, longitude))
}

/// Decode a geohash to its cell center plus per-axis error margins.
///
/// Returns `(latitude, longitude, lat_error, lon_error)`; the cell spans
/// `center ± error` on each axis. The empty string yields the maximal
/// margins `(0.0, 0.0, 90.0, 180.0)`.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::decode_exactly;
///
/// let (lat, lon, lat_err, lon_err) = decode_exactly("ezs42")?;
/// assert_eq!(lat, 42.60498046875);
/// assert_eq!(lon, -5.60302734375);
/// assert_eq!(lat_err, 0.02197265625);
/// assert_eq!(lon_err, 0.02197265625);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn decode_exactly(hash: &str) -> Result<(f64, f64, f64, f64)> {
    let (lat_code, lon_code, lat_bits, lon_bits) = hash_to_codes(hash)?;
    let (latitude, lat_error) = dequantize(lat_code, -90.0, 90.0, lat_bits);
    let (longitude, lon_error) = dequantize(lon_code, -180.0, 180.0, lon_bits);
    Ok((latitude, longitude, lat_error, lon_error))
}

/// Round a decoded center to the digits its error margin justifies.
fn round_coordinate(value: f64, error: f64) -> String {
    let digits = ((-error.log10()).round() as i64).max(1) - 1;
    let mut formatted = format!("{:.*}", digits as usize, value);
    if formatted.contains('.') {
        let trimmed = formatted.trim_end_matches('0').len();
        formatted.truncate(trimmed);
    }
    formatted
}

/// Decode a geohash to latitude/longitude decimal strings carrying only
/// the digits the cell size justifies.
///
/// The textual counterpart of [`decode`]: a 5-character hash is only
/// accurate to about two hundredths of a degree, so its center renders as
/// `"42.6"` rather than `42.60498046875`. Trailing zeros after the decimal
/// point are stripped.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::decode_to_string;
///
/// let (lat, lon) = decode_to_string("ezs42")?;
/// assert_eq!(lat, "42.6");
/// assert_eq!(lon, "-5.6");
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn decode_to_string(hash: &str) -> Result<(String, String)> {
    let (latitude, longitude, lat_error, lon_error) = decode_exactly(hash)?;
    Ok((
        round_coordinate(latitude, lat_error),
        round_coordinate(longitude, lon_error),
    ))
}

/// Compute the exact rectangle a geohash cell covers.
///
/// The returned [`Rect`] has the south-west corner as `min` and the
/// north-east corner as `max` (x = longitude, y = latitude). The empty
/// string covers the whole world.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::bbox;
///
/// // One of the 32 top-level cells: 45° × 45°.
/// let rect = bbox("u")?;
/// assert_eq!(rect.min().x, 0.0);
/// assert_eq!(rect.min().y, 45.0);
/// assert_eq!(rect.max().x, 45.0);
/// assert_eq!(rect.max().y, 90.0);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn bbox(hash: &str) -> Result<Rect> {
    let (lat_code, lon_code, lat_bits, lon_bits) = hash_to_codes(hash)?;
    let (south, north) = cell_bounds(lat_code, -90.0, 90.0, lat_bits);
    let (west, east) = cell_bounds(lon_code, -180.0, 180.0, lon_bits);
    Ok(Rect::new(
        geo::coord! { x: west, y: south },
        geo::coord! { x: east, y: north },
    ))
}

/// Encode a [`Point`] (x = longitude, y = latitude) as a geohash string.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use spatio_hash::encode_point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert_eq!(encode_point(&nyc, 8)?, "dr5regw3");
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn encode_point(point: &Point, precision: usize) -> Result<String> {
    encode(point.y(), point.x(), precision)
}

/// Decode a geohash to the center of its cell as a [`Point`]
/// (x = longitude, y = latitude).
pub fn decode_point(hash: &str) -> Result<Point> {
    let (latitude, longitude) = decode(hash)?;
    Ok(Point::new(longitude, latitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vectors() {
        assert_eq!(encode(42.6, -5.6, 5).unwrap(), "ezs42");
        assert_eq!(encode(57.64911, 10.40744, 11).unwrap(), "u4pruydqqvj");
        assert_eq!(encode(37.8324, 112.5584, 9).unwrap(), "ww8p1r4t8");
    }

    #[test]
    fn test_midpoints_take_the_upper_cell() {
        assert_eq!(encode(0.0, 0.0, 12).unwrap(), "s00000000000");
        assert_eq!(encode(-90.0, -180.0, 12).unwrap(), "000000000000");
    }

    #[test]
    fn test_axis_code_split() {
        assert_eq!(hash_to_codes("ezs42").unwrap(), (3017, 3968, 12, 13));
        assert_eq!(codes_to_hash(3017, 3968, 12, 13), "ezs42");
    }

    #[test]
    fn test_decode_exactly_reference() {
        let (lat, lon, lat_err, lon_err) = decode_exactly("ezs42").unwrap();
        assert_eq!(lat, 42.60498046875);
        assert_eq!(lon, -5.60302734375);
        assert_eq!(lat_err, 0.02197265625);
        assert_eq!(lon_err, 0.02197265625);
    }

    #[test]
    fn test_decode_to_string_reference() {
        let (lat, lon) = decode_to_string("ezs42").unwrap();
        assert_eq!(lat, "42.6");
        assert_eq!(lon, "-5.6");
    }

    #[test]
    fn test_empty_hash_is_the_whole_world() {
        assert_eq!(decode("").unwrap(), (0.0, 0.0));
        assert_eq!(decode_exactly("").unwrap(), (0.0, 0.0, 90.0, 180.0));

        let world = bbox("").unwrap();
        assert_eq!(world.min().x, -180.0);
        assert_eq!(world.min().y, -90.0);
        assert_eq!(world.max().x, 180.0);
        assert_eq!(world.max().y, 90.0);
    }

    #[test]
    fn test_longitude_wrapping() {
        assert_eq!(normalize_longitude(190.0).unwrap(), -170.0);
        assert_eq!(normalize_longitude(-190.0).unwrap(), 170.0);
        assert_eq!(normalize_longitude(180.0).unwrap(), -180.0);
        assert_eq!(normalize_longitude(-180.0).unwrap(), -180.0);
        assert_eq!(normalize_longitude(720.5).unwrap(), 0.5);
        assert_eq!(normalize_longitude(-720.5).unwrap(), -0.5);
        // Far outside the range still lands on the same cell.
        assert_eq!(
            encode(10.0, 370.0, 8).unwrap(),
            encode(10.0, 10.0, 8).unwrap()
        );
        assert_eq!(
            encode(0.0, -540.0, 6).unwrap(),
            encode(0.0, -180.0, 6).unwrap()
        );
        assert_eq!(
            encode(33.0, 360.0 * 5.0e6 + 12.0, 8).unwrap(),
            encode(33.0, 12.0, 8).unwrap()
        );
    }

    #[test]
    fn test_invalid_latitude() {
        assert_eq!(
            encode(90.0, 0.0, 12),
            Err(GeohashError::InvalidLatitude(90.0))
        );
        assert!(encode(-90.0, 0.0, 12).is_ok());
        assert!(matches!(
            encode(f64::NAN, 0.0, 12),
            Err(GeohashError::InvalidLatitude(_))
        ));
        assert!(matches!(
            encode(f64::INFINITY, 0.0, 12),
            Err(GeohashError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(matches!(
            encode(0.0, f64::NAN, 12),
            Err(GeohashError::InvalidLongitude(_))
        ));
        assert!(matches!(
            encode(0.0, f64::NEG_INFINITY, 12),
            Err(GeohashError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_invalid_precision() {
        assert_eq!(encode(0.0, 0.0, 0), Err(GeohashError::InvalidPrecision(0)));
        assert_eq!(
            encode(0.0, 0.0, MAX_PRECISION + 1),
            Err(GeohashError::InvalidPrecision(MAX_PRECISION + 1))
        );
        let too_long = "0".repeat(MAX_PRECISION + 1);
        assert_eq!(
            decode(&too_long),
            Err(GeohashError::InvalidPrecision(MAX_PRECISION + 1))
        );
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(decode("ezs4a"), Err(GeohashError::InvalidSymbol('a')));
        assert_eq!(decode("EZS42"), Err(GeohashError::InvalidSymbol('E')));
    }

    #[test]
    fn test_point_round_trip() {
        let nyc = Point::new(-74.0060, 40.7128);
        let hash = encode_point(&nyc, 12).unwrap();
        let decoded = decode_point(&hash).unwrap();
        assert!((decoded.x() - nyc.x()).abs() < 1e-6);
        assert!((decoded.y() - nyc.y()).abs() < 1e-6);
    }

    #[test]
    fn test_precision_controls_length() {
        for precision in 1..=MAX_PRECISION {
            let hash = encode(48.8566, 2.3522, precision).unwrap();
            assert_eq!(hash.len(), precision);
        }
    }
}
