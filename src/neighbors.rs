//! Adjacent-cell computation over the per-axis code form.
//!
//! A cell's neighbors are found by offsetting its quantized axis codes by
//! ±1 and re-encoding. Longitude wraps modulo its bit width (the
//! antimeridian is an ordinary cell boundary), while latitude offsets past
//! either pole are dropped, so cells in the top or bottom row have five
//! neighbors instead of eight.

use crate::codec::{codes_to_hash, hash_to_codes};
use crate::error::Result;

/// Compute the adjacent cells of a geohash, at the same precision.
///
/// Returns up to 8 hashes: the west and east neighbors first, then the
/// northern row, then the southern row. Rows beyond a pole are omitted.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::neighbors;
///
/// assert_eq!(neighbors("ezs42")?.len(), 8);
///
/// // "b" sits in the top latitude row, so the northern row is dropped.
/// assert_eq!(neighbors("b")?.len(), 5);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn neighbors(hash: &str) -> Result<Vec<String>> {
    let (lat_code, lon_code, lat_bits, lon_bits) = hash_to_codes(hash)?;
    let lon_mask = (1u64 << lon_bits) - 1;
    let west = lon_code.wrapping_sub(1) & lon_mask;
    let east = (lon_code + 1) & lon_mask;

    let mut cells = Vec::with_capacity(8);
    for lon in [west, east] {
        let cell = codes_to_hash(lat_code, lon, lat_bits, lon_bits);
        if !cell.is_empty() {
            cells.push(cell);
        }
    }

    let north = lat_code + 1;
    if north >> lat_bits == 0 {
        for lon in [west, lon_code, east] {
            cells.push(codes_to_hash(north, lon, lat_bits, lon_bits));
        }
    }

    if lat_code > 0 {
        let south = lat_code - 1;
        for lon in [west, lon_code, east] {
            cells.push(codes_to_hash(south, lon, lat_bits, lon_bits));
        }
    }

    Ok(cells)
}

/// A cell and its full neighborhood: [`neighbors`] plus the hash itself,
/// appended last. At most 9 cells.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::{expand, neighbors};
///
/// let cells = expand("ezs42")?;
/// assert_eq!(cells.len(), neighbors("ezs42")?.len() + 1);
/// assert_eq!(cells.last().map(String::as_str), Some("ezs42"));
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn expand(hash: &str) -> Result<Vec<String>> {
    let mut cells = neighbors(hash)?;
    cells.push(hash.to_string());
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeohashError;

    /// Difference between two axis codes, accounting for wraparound.
    fn wrapped_step(from: u64, to: u64, bits: u32) -> i64 {
        let span = 1i64 << bits;
        let mut step = to as i64 - from as i64;
        if step > span / 2 {
            step -= span;
        }
        if step < -span / 2 {
            step += span;
        }
        step
    }

    #[test]
    fn test_neighbors_are_unit_steps() {
        let (lat_code, lon_code, lat_bits, lon_bits) = hash_to_codes("ezs42").unwrap();
        let cells = neighbors("ezs42").unwrap();
        assert_eq!(cells.len(), 8);

        let mut steps = Vec::new();
        for cell in &cells {
            assert_eq!(cell.len(), 5);
            assert_ne!(cell, "ezs42");
            let (lat, lon, bits_lat, bits_lon) = hash_to_codes(cell).unwrap();
            assert_eq!((bits_lat, bits_lon), (lat_bits, lon_bits));
            let dlat = wrapped_step(lat_code, lat, lat_bits);
            let dlon = wrapped_step(lon_code, lon, lon_bits);
            assert!(dlat.abs() <= 1 && dlon.abs() <= 1);
            assert!((dlat, dlon) != (0, 0));
            steps.push((dlat, dlon));
        }

        // All eight offset combinations are present exactly once.
        steps.sort_unstable();
        assert_eq!(
            steps,
            vec![
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1)
            ]
        );
    }

    #[test]
    fn test_polar_rows_are_clipped() {
        // "b" is in the top latitude row, "0" in the bottom one.
        assert_eq!(neighbors("b").unwrap().len(), 5);
        assert_eq!(neighbors("0").unwrap().len(), 5);

        // Longer hashes at the poles clip the same way.
        let north = crate::codec::encode(89.9999999, 10.0, 10).unwrap();
        assert_eq!(neighbors(&north).unwrap().len(), 5);
        let south = crate::codec::encode(-90.0, 10.0, 10).unwrap();
        assert_eq!(neighbors(&south).unwrap().len(), 5);
    }

    #[test]
    fn test_latitude_codes_stay_in_range() {
        for hash in ["b", "0", "zzzz", "pbpbp", "00000"] {
            for cell in neighbors(hash).unwrap() {
                let (lat, _, lat_bits, _) = hash_to_codes(&cell).unwrap();
                assert!(lat < 1 << lat_bits);
            }
        }
    }

    #[test]
    fn test_antimeridian_wraps() {
        let hash = crate::codec::encode(0.0, -179.9999, 6).unwrap();
        let cells = neighbors(&hash).unwrap();
        assert_eq!(cells.len(), 8);

        // The western neighbors decode to the far side of the antimeridian.
        let east_side = cells
            .iter()
            .filter(|cell| crate::codec::decode(cell).unwrap().1 > 179.0)
            .count();
        assert_eq!(east_side, 3);
    }

    #[test]
    fn test_empty_hash_has_no_neighbors() {
        assert_eq!(neighbors("").unwrap(), Vec::<String>::new());
        assert_eq!(expand("").unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_expand_contains_origin() {
        let cells = expand("u4pruyd").unwrap();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&"u4pruyd".to_string()));
    }

    #[test]
    fn test_invalid_symbol_propagates() {
        assert_eq!(neighbors("ezs4!"), Err(GeohashError::InvalidSymbol('!')));
    }
}
