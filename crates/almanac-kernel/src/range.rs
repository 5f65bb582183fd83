//! A single interval rule within a stage.
//!
//! A range maps the contiguous source interval
//! `[source_start, source_start + length)` onto
//! `[destination_start, destination_start + length)` by a constant offset.

use crate::error::AlmanacError;
use crate::span::Span;
use crate::Value;
use serde::{Deserialize, Serialize};

/// One `<dest> <src> <len>` rule.
///
/// # Invariants
/// `length > 0`, and both interval ends are representable as [`Value`].
/// Enforced by [`Range::new`], which deserialization also goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", rename_all = "camelCase")]
pub struct Range {
    destination_start: Value,
    source_start: Value,
    length: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeRepr {
    destination_start: Value,
    source_start: Value,
    length: Value,
}

impl TryFrom<RangeRepr> for Range {
    type Error = AlmanacError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        Range::new(repr.destination_start, repr.source_start, repr.length)
    }
}

impl Range {
    /// Build a range, rejecting non-positive lengths and overflowing ends.
    pub fn new(
        destination_start: Value,
        source_start: Value,
        length: Value,
    ) -> Result<Self, AlmanacError> {
        let representable = length > 0
            && source_start.checked_add(length).is_some()
            && destination_start.checked_add(length).is_some();
        if !representable {
            return Err(AlmanacError::MalformedRange {
                destination_start,
                source_start,
                length,
            });
        }
        Ok(Self {
            destination_start,
            source_start,
            length,
        })
    }

    pub fn destination_start(&self) -> Value {
        self.destination_start
    }

    pub fn source_start(&self) -> Value {
        self.source_start
    }

    pub fn length(&self) -> Value {
        self.length
    }

    /// Exclusive end of the source interval.
    pub fn source_end(&self) -> Value {
        self.source_start + self.length
    }

    /// Whether `value` falls in `[source_start, source_end)`.
    #[inline]
    pub fn covers(&self, value: Value) -> bool {
        self.source_start <= value && value < self.source_end()
    }

    /// Map `value` if covered, `None` otherwise.
    #[inline]
    pub fn apply(&self, value: Value) -> Option<Value> {
        self.covers(value)
            .then(|| self.destination_start + (value - self.source_start))
    }

    /// Map a span lying entirely inside the source interval.
    pub(crate) fn shift_span(&self, span: Span) -> Span {
        debug_assert!(self.covers(span.start()) && span.end() <= self.source_end());
        let start = self.destination_start + (span.start() - self.source_start);
        Span::new_unchecked(start, start + span.len())
    }

    /// Whether two ranges share at least one source value.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.source_start < other.source_end() && other.source_start < self.source_end()
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.destination_start, self.source_start, self.length
        )
    }
}
