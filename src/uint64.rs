//! Fixed-width 64-bit geohashes and precision-limited range covering.
//!
//! The integer form quantizes each axis to 32 bits and interleaves them
//! (see [`crate::morton`]); no base-32 step is involved. `expand_uint64`
//! produces the minimal set of contiguous code ranges covering a cell and
//! its neighbors at a given bit precision, which is the shape a range scan
//! over uint64-keyed storage wants.
//!
//! Unlike the string-form neighbor engine, this layer does not treat the
//! antimeridian or the poles geographically: latitude candidates past the
//! poles are suppressed outright and longitude arithmetic simply wraps in
//! code space.

use crate::codec::normalize_longitude;
use crate::error::{GeohashError, Result};
use crate::morton::{deinterleave, interleave};
use crate::quantize::{dequantize, quantize};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One past the largest 64-bit code, representable only in u128.
const CODE_SPACE_END: u128 = 1 << 64;

/// A half-open interval `[low, high)` over the uint64 code space.
///
/// A `None` bound means the interval runs to the corresponding extreme of
/// the space (0 below, 2^64 above), where an explicit bound would be
/// redundant for a range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRange {
    /// Inclusive lower bound; `None` is unbounded below.
    pub low: Option<u64>,
    /// Exclusive upper bound; `None` is unbounded above.
    pub high: Option<u64>,
}

impl CodeRange {
    /// Whether `code` falls inside the interval.
    pub fn contains(&self, code: u64) -> bool {
        self.low.is_none_or(|low| code >= low) && self.high.is_none_or(|high| code < high)
    }
}

/// Encode a coordinate as a 64-bit geohash at full 32-bits-per-axis
/// precision.
///
/// Validation and longitude wrapping match [`crate::codec::encode`].
///
/// # Examples
///
/// ```rust
/// use spatio_hash::{decode_uint64, encode_uint64};
///
/// let code = encode_uint64(42.6, -5.6)?;
/// let (lat, lon) = decode_uint64(code);
/// assert!((lat - 42.6).abs() < 1e-7);
/// assert!((lon + 5.6).abs() < 1e-7);
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn encode_uint64(latitude: f64, longitude: f64) -> Result<u64> {
    if !(-90.0..90.0).contains(&latitude) {
        return Err(GeohashError::InvalidLatitude(latitude));
    }
    let longitude = normalize_longitude(longitude)?;
    let lat_code = quantize(latitude, -90.0, 90.0, 32) as u32;
    let lon_code = quantize(longitude, -180.0, 180.0, 32) as u32;
    Ok(interleave(lat_code, lon_code))
}

/// Decode a 64-bit geohash to the center of its cell.
///
/// Total over all inputs; precision is implicitly the full 32 bits per
/// axis, so no error margins are returned (they are the constants
/// 90/2^32 degrees of latitude and 180/2^32 of longitude).
pub fn decode_uint64(code: u64) -> (f64, f64) {
    let (lat_code, lon_code) = deinterleave(code);
    let (latitude, _) = dequantize(u64::from(lat_code), -90.0, 90.0, 32);
    let (longitude, _) = dequantize(u64::from(lon_code), -180.0, 180.0, 32);
    (latitude, longitude)
}

/// Candidate interval before merging: aligned start plus an exclusive end
/// that may be exactly 2^64.
type Candidate = (u64, u128);

fn candidate(lat_code: u32, lon_code: u32, precision: u32, widen: u32) -> Candidate {
    let start = interleave(lat_code, lon_code);
    (start, u128::from(start) + (1u128 << (64 - precision + widen)))
}

/// Cover a cell and its neighbors at `precision` bits with the minimal set
/// of contiguous code ranges.
///
/// `code` is masked down to its top `precision` bits (the cell's canonical
/// representative). Up to 9 candidate sub-ranges are enumerated: the cell
/// itself plus its neighbors one level coarser, spanning
/// `2^(64 - precision + k)` codes for `k` in 0..=2 depending on how many
/// axis-quadrant boundaries the neighbor shares with the cell. Candidates
/// are sorted and merged wherever one range ends exactly where the next
/// begins, and merged bounds touching 0 or 2^64 come back as `None`.
///
/// For `precision <= 2` the covering is the whole code space, returned as
/// an empty list: callers must read "no ranges" as "no filter needed",
/// not "no results".
///
/// # Errors
///
/// [`GeohashError::InvalidPrecision`] unless `1 <= precision <= 64`.
///
/// # Examples
///
/// ```rust
/// use spatio_hash::{encode_uint64, expand_uint64};
///
/// let code = encode_uint64(42.6, -5.6)?;
/// let ranges = expand_uint64(code, 50)?;
/// assert!(!ranges.is_empty());
/// assert!(ranges.iter().any(|range| range.contains(code)));
///
/// // Coarse precisions cover everything; no filter is needed.
/// assert!(expand_uint64(code, 2)?.is_empty());
/// # Ok::<(), spatio_hash::GeohashError>(())
/// ```
pub fn expand_uint64(code: u64, precision: u32) -> Result<Vec<CodeRange>> {
    if !(1..=64).contains(&precision) {
        return Err(GeohashError::InvalidPrecision(precision as usize));
    }
    if precision <= 2 {
        return Ok(Vec::new());
    }

    let code = code & (u64::MAX << (64 - precision));
    let (lat, lon) = deinterleave(code);
    let lat_grid: u32 = 1 << (32 - precision / 2);
    let lon_grid: u32 = lat_grid >> (precision % 2);

    let even = precision % 2 == 0;
    // The original guards: the row above must stay clear of the top of the
    // axis (note the strict < 2^32 - 1), the row below must exist at all.
    let can_go_north = u64::from(lat) + u64::from(lat_grid) < 0xFFFF_FFFF;
    let can_go_south = lat > 0;
    let lat_hi = lat.wrapping_add(lat_grid);
    let lat_lo = lat.wrapping_sub(lat_grid);
    let lon_hi = lon.wrapping_add(lon_grid);
    let lon_lo = lon.wrapping_sub(lon_grid);

    // Which half of the enclosing quadrant the cell occupies on each axis
    // decides which neighbors collapse into the coarser spans.
    let mut candidates: SmallVec<[Candidate; 9]> = SmallVec::new();
    if lat & lat_grid != 0 {
        if lon & lon_grid != 0 {
            candidates.push(candidate(lat_lo, lon_lo, precision, 2));
            if even {
                candidates.push(candidate(lat_lo, lon_hi, precision, 1));
                if can_go_north {
                    candidates.push(candidate(lat_hi, lon_lo, precision, 0));
                    candidates.push(candidate(lat_hi, lon, precision, 0));
                    candidates.push(candidate(lat_hi, lon_hi, precision, 0));
                }
            } else {
                if can_go_north {
                    candidates.push(candidate(lat_hi, lon_lo, precision, 1));
                    candidates.push(candidate(lat_hi, lon_hi, precision, 0));
                }
                candidates.push(candidate(lat, lon_hi, precision, 0));
                candidates.push(candidate(lat_lo, lon_hi, precision, 0));
            }
        } else {
            candidates.push(candidate(lat_lo, lon, precision, 2));
            if even {
                candidates.push(candidate(lat_lo, lon_lo, precision, 1));
                if can_go_north {
                    candidates.push(candidate(lat_hi, lon_lo, precision, 0));
                    candidates.push(candidate(lat_hi, lon, precision, 0));
                    candidates.push(candidate(lat_hi, lon_hi, precision, 0));
                }
            } else {
                if can_go_north {
                    candidates.push(candidate(lat_hi, lon, precision, 1));
                    candidates.push(candidate(lat_hi, lon_lo, precision, 0));
                }
                candidates.push(candidate(lat, lon_lo, precision, 0));
                candidates.push(candidate(lat_lo, lon_lo, precision, 0));
            }
        }
    } else if lon & lon_grid != 0 {
        candidates.push(candidate(lat, lon_lo, precision, 2));
        if even {
            candidates.push(candidate(lat, lon_hi, precision, 1));
            if can_go_south {
                candidates.push(candidate(lat_lo, lon_lo, precision, 0));
                candidates.push(candidate(lat_lo, lon, precision, 0));
                candidates.push(candidate(lat_lo, lon_hi, precision, 0));
            }
        } else {
            if can_go_south {
                candidates.push(candidate(lat_lo, lon_lo, precision, 1));
                candidates.push(candidate(lat_lo, lon_hi, precision, 0));
            }
            candidates.push(candidate(lat, lon_hi, precision, 0));
            candidates.push(candidate(lat_hi, lon_hi, precision, 0));
        }
    } else {
        candidates.push(candidate(lat, lon, precision, 2));
        if even {
            candidates.push(candidate(lat, lon_lo, precision, 1));
            if can_go_south {
                candidates.push(candidate(lat_lo, lon_lo, precision, 0));
                candidates.push(candidate(lat_lo, lon, precision, 0));
                candidates.push(candidate(lat_lo, lon_hi, precision, 0));
            }
        } else {
            if can_go_south {
                candidates.push(candidate(lat_lo, lon, precision, 1));
                candidates.push(candidate(lat_lo, lon_lo, precision, 0));
            }
            candidates.push(candidate(lat, lon_lo, precision, 0));
            candidates.push(candidate(lat_hi, lon_lo, precision, 0));
        }
    }

    // At most 9 inputs: sort and fold touching intervals in one pass.
    candidates.sort_unstable();
    let mut merged: SmallVec<[Candidate; 9]> = SmallVec::new();
    for (low, high) in candidates {
        match merged.last_mut() {
            Some(previous) if previous.1 == u128::from(low) => previous.1 = high,
            _ => merged.push((low, high)),
        }
    }

    Ok(merged
        .into_iter()
        .map(|(low, high)| CodeRange {
            low: (low != 0).then_some(low),
            high: (high != CODE_SPACE_END).then(|| high as u64),
        })
        .collect())
}
