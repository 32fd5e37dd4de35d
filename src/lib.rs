//! Proximity-preserving geohash codec.
//!
//! Encodes (latitude, longitude) coordinates into base-32 strings or
//! 64-bit integers whose shared prefixes indicate spatial proximity, and
//! decodes them back with explicit error margins. Everything is a pure
//! function over its inputs; the only process-wide state is an immutable
//! alphabet table built once on first use, so every operation is safe to
//! call from any number of threads.
//!
//! ```rust
//! use spatio_hash::{decode_exactly, encode, expand, neighbors};
//!
//! let hash = encode(42.6, -5.6, 5)?;
//! assert_eq!(hash, "ezs42");
//!
//! let (lat, lon, lat_err, lon_err) = decode_exactly(&hash)?;
//! assert!((lat - 42.6).abs() <= lat_err);
//! assert!((lon + 5.6).abs() <= lon_err);
//!
//! // A cell and its eight neighbors, for boundary-safe region queries.
//! assert_eq!(neighbors(&hash)?.len(), 8);
//! assert_eq!(expand(&hash)?.len(), 9);
//! # Ok::<(), spatio_hash::GeohashError>(())
//! ```
//!
//! The 64-bit integer form trades variable precision for fixed-width keys
//! that sort by locality, plus range coverings for scan-style lookups:
//!
//! ```rust
//! use spatio_hash::{encode_uint64, expand_uint64};
//!
//! let code = encode_uint64(42.6, -5.6)?;
//! let ranges = expand_uint64(code, 40)?;
//! assert!(ranges.iter().any(|range| range.contains(code)));
//! # Ok::<(), spatio_hash::GeohashError>(())
//! ```

pub mod base32;
pub mod codec;
pub mod error;
pub mod morton;
pub mod neighbors;
pub mod quantize;
pub mod uint64;

pub use codec::{
    DEFAULT_PRECISION, MAX_PRECISION, bbox, decode, decode_exactly, decode_point,
    decode_to_string, encode, encode_point,
};
pub use error::{GeohashError, Result};
pub use morton::{deinterleave, interleave};
pub use neighbors::{expand, neighbors};
pub use quantize::{cell_bounds, dequantize, quantize};
pub use uint64::{CodeRange, decode_uint64, encode_uint64, expand_uint64};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeohashError, Result};

    pub use crate::{DEFAULT_PRECISION, MAX_PRECISION, bbox, decode, decode_exactly, encode};

    pub use crate::{expand, neighbors};

    pub use crate::{CodeRange, decode_uint64, encode_uint64, expand_uint64};

    pub use geo::{Point, Rect};
}
