//! Error types for almanac kernel operations.

use crate::Value;

/// Errors arising from malformed almanac data or an impossible reduction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlmanacError {
    /// No seeds to reduce over; a minimum does not exist.
    #[error("empty input: the almanac has no seeds")]
    EmptyInput,

    /// A range with non-positive length, or whose end overflows.
    #[error(
        "malformed range: destination {destination_start}, source {source_start}, length {length}"
    )]
    MalformedRange {
        destination_start: Value,
        source_start: Value,
        length: Value,
    },

    /// Seed ranges come in `(start, length)` pairs.
    #[error("seed ranges need an even number of seed values, got {count}")]
    UnpairedSeed { count: usize },

    /// A seed range with non-positive length, or whose end overflows.
    #[error("malformed seed range: start {start}, length {length}")]
    MalformedSeedRange { start: Value, length: Value },
}
