//! Half-open value intervals for whole-interval propagation.

use crate::error::AlmanacError;
use crate::Value;
use serde::Serialize;

/// A non-empty half-open interval `[start, end)`.
///
/// # Invariants
/// `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    start: Value,
    end: Value,
}

impl Span {
    /// Creates a span, returning `None` when `start >= end`.
    ///
    /// ```rust
    /// # use almanac_kernel::Span;
    /// assert!(Span::new(0, 10).is_some());
    /// assert!(Span::new(10, 10).is_none());
    /// ```
    pub fn new(start: Value, end: Value) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Creates a span from a `(start, length)` seed pair.
    pub fn from_start_len(start: Value, length: Value) -> Result<Self, AlmanacError> {
        start
            .checked_add(length)
            .and_then(|end| Self::new(start, end))
            .ok_or(AlmanacError::MalformedSeedRange { start, length })
    }

    #[inline]
    pub(crate) fn new_unchecked(start: Value, end: Value) -> Self {
        debug_assert!(start < end, "Invalid span: start must be less than end");
        Self { start, end }
    }

    pub fn start(&self) -> Value {
        self.start
    }

    pub fn end(&self) -> Value {
        self.end
    }

    /// Number of values covered; always positive.
    pub fn len(&self) -> Value {
        self.end - self.start
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_start_len_rejects_empty_and_overflow() {
        assert_eq!(Span::from_start_len(79, 14).unwrap(), Span::new(79, 93).unwrap());
        assert_eq!(
            Span::from_start_len(5, 0),
            Err(AlmanacError::MalformedSeedRange {
                start: 5,
                length: 0
            })
        );
        assert!(Span::from_start_len(Value::MAX, 1).is_err());
    }

    #[test]
    fn len_and_display_are_half_open() {
        let span = Span::new(0, 10).unwrap();
        assert_eq!(span.len(), 10);
        assert_eq!(span.to_string(), "[0, 10)");
        assert!(Span::new(10, 0).is_none());
    }
}
