//! Error types for geohash operations.

use thiserror::Error;

/// Errors surfaced by encode, decode, and expand operations.
///
/// Every error is detected synchronously at the offending input; nothing is
/// retried or recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeohashError {
    /// Latitude outside the valid `[-90.0, 90.0)` range, or non-finite.
    #[error("latitude out of range [-90.0, 90.0): {0}")]
    InvalidLatitude(f64),

    /// Non-finite longitude. Finite out-of-range longitudes are not an
    /// error; they wrap into `[-180.0, 180.0)`.
    #[error("longitude must be finite: {0}")]
    InvalidLongitude(f64),

    /// Character outside the 32-symbol geohash alphabet (case-sensitive).
    #[error("invalid geohash symbol: {0:?}")]
    InvalidSymbol(char),

    /// Precision outside the supported range for the operation: `1..=24`
    /// characters for the string form, `1..=64` bits for the uint64 form.
    #[error("unsupported precision: {0}")]
    InvalidPrecision(usize),
}

/// Result type alias for geohash operations.
pub type Result<T> = std::result::Result<T, GeohashError>;
