//! Mapping tables: one conversion stage of the almanac.
//!
//! A table resolves a value through whichever of its ranges covers it, and
//! passes uncovered values through unchanged (identity fallback).
//!
//! Ranges are sorted by `(source_start, source_end)` once, at construction,
//! alongside a running maximum of their ends, so lookups are a binary
//! search. The index is never mutated afterwards, which keeps tables
//! shareable across threads without locking.
//!
//! ## Overlapping ranges
//!
//! Well-formed tables have pairwise disjoint ranges on the source axis.
//! When ranges do overlap, the covering range that sorts first answers:
//! [`resolve`](MappingTable::resolve),
//! [`resolve_linear`](MappingTable::resolve_linear) and
//! [`resolve_span`](MappingTable::resolve_span) all follow that rule.
//! [`MappingTable::first_overlap`] reports overlaps for callers that want
//! to reject such input.

use crate::range::Range;
use crate::span::Span;
use crate::Value;
use serde::{Deserialize, Serialize};

/// The `<source>-to-<destination>` label of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageName {
    pub source: String,
    pub destination: String,
}

impl StageName {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-to-{}", self.source, self.destination)
    }
}

impl std::str::FromStr for StageName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("-to-") {
            Some((source, destination)) if !source.is_empty() && !destination.is_empty() => {
                Ok(Self::new(source, destination))
            }
            _ => Err(format!(
                "stage name `{s}` is not of the form <source>-to-<destination>"
            )),
        }
    }
}

/// One stage's set of ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TableRepr")]
pub struct MappingTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<StageName>,

    /// Sorted by `(source_start, source_end)`.
    ranges: Vec<Range>,

    /// `reach[i]` is the largest `source_end` among `ranges[..=i]`.
    #[serde(skip)]
    reach: Vec<Value>,
}

#[derive(Deserialize)]
struct TableRepr {
    #[serde(default)]
    name: Option<StageName>,
    ranges: Vec<Range>,
}

impl From<TableRepr> for MappingTable {
    fn from(repr: TableRepr) -> Self {
        Self::build(repr.name, repr.ranges)
    }
}

impl MappingTable {
    /// Create an unnamed table.
    pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
        Self::build(None, ranges.into_iter().collect())
    }

    /// Create a table labelled with its stage name.
    pub fn named(name: StageName, ranges: impl IntoIterator<Item = Range>) -> Self {
        Self::build(Some(name), ranges.into_iter().collect())
    }

    fn build(name: Option<StageName>, mut ranges: Vec<Range>) -> Self {
        ranges.sort_by_key(|r| (r.source_start(), r.source_end()));
        let reach = ranges
            .iter()
            .scan(Value::MIN, |widest, r| {
                *widest = (*widest).max(r.source_end());
                Some(*widest)
            })
            .collect();
        Self {
            name,
            ranges,
            reach,
        }
    }

    pub fn name(&self) -> Option<&StageName> {
        self.name.as_ref()
    }

    /// The ranges, sorted by source start.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Resolve `value` through this stage.
    ///
    /// Binary search on the running end maximum for the first range whose
    /// end lies past `value`. No earlier range reaches `value`, and if this
    /// one starts after it, no later one covers it either.
    pub fn resolve(&self, value: Value) -> Value {
        let idx = self.reach.partition_point(|&end| end <= value);
        self.ranges
            .get(idx)
            .and_then(|r| r.apply(value))
            .unwrap_or(value)
    }

    /// Reference lookup scanning every range in order.
    ///
    /// Agrees with [`resolve`](Self::resolve), overlapping tables included.
    pub fn resolve_linear(&self, value: Value) -> Value {
        self.ranges
            .iter()
            .find_map(|r| r.apply(value))
            .unwrap_or(value)
    }

    /// Resolve a whole span, splitting it at range boundaries.
    ///
    /// Covered pieces are shifted, uncovered pieces pass through. The
    /// output spans partition the input's values, in source order.
    pub fn resolve_span(&self, span: Span) -> Vec<Span> {
        let mut out = Vec::new();
        let mut cursor = span.start();
        let first = self.reach.partition_point(|&end| end <= cursor);

        for range in &self.ranges[first..] {
            if range.source_start() >= span.end() {
                break;
            }
            if cursor < range.source_start() {
                out.push(Span::new_unchecked(cursor, range.source_start()));
                cursor = range.source_start();
            }
            let stop = range.source_end().min(span.end());
            if cursor < stop {
                out.push(range.shift_span(Span::new_unchecked(cursor, stop)));
                cursor = stop;
            }
            if cursor >= span.end() {
                break;
            }
        }

        if cursor < span.end() {
            out.push(Span::new_unchecked(cursor, span.end()));
        }
        out
    }

    /// The first pair of ranges sharing a source value, if any.
    pub fn first_overlap(&self) -> Option<(Range, Range)> {
        let mut widest = *self.ranges.first()?;
        for range in &self.ranges[1..] {
            if range.overlaps(&widest) {
                return Some((widest, *range));
            }
            if range.source_end() > widest.source_end() {
                widest = *range;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(d: Value, s: Value, l: Value) -> Range {
        Range::new(d, s, l).unwrap()
    }

    fn seed_to_soil() -> MappingTable {
        MappingTable::named(
            StageName::new("seed", "soil"),
            [range(50, 98, 2), range(52, 50, 48)],
        )
    }

    #[test]
    fn single_range_boundary() {
        let table = MappingTable::new([range(50, 98, 2)]);
        assert_eq!(table.resolve(97), 97);
        assert_eq!(table.resolve(98), 50);
        assert_eq!(table.resolve(99), 51);
        assert_eq!(table.resolve(100), 100);
    }

    #[test]
    fn identity_fallback_outside_every_range() {
        let table = seed_to_soil();
        for v in [-10, 0, 13, 49, 100, 1_000_000] {
            assert_eq!(table.resolve(v), v);
        }
        assert_eq!(MappingTable::new([]).resolve(42), 42);
    }

    #[test]
    fn every_covered_value_is_shifted() {
        let table = seed_to_soil();
        for r in table.ranges() {
            for v in r.source_start()..r.source_end() {
                assert_eq!(
                    table.resolve(v),
                    r.destination_start() + (v - r.source_start())
                );
            }
        }
    }

    #[test]
    fn binary_search_matches_linear_scan() {
        let table = MappingTable::new([
            range(49, 53, 8),
            range(0, 11, 42),
            range(42, 0, 7),
            range(57, 7, 4),
        ]);
        for v in -5..80 {
            assert_eq!(table.resolve(v), table.resolve_linear(v), "value {v}");
        }
    }

    #[test]
    fn ranges_are_sorted_on_construction() {
        let table = seed_to_soil();
        let starts: Vec<Value> = table.ranges().iter().map(|r| r.source_start()).collect();
        assert_eq!(starts, vec![50, 98]);
        assert_eq!(
            table.name().map(ToString::to_string).as_deref(),
            Some("seed-to-soil")
        );
    }

    #[test]
    fn resolve_span_splits_at_boundaries() {
        let table = seed_to_soil();
        let out = table.resolve_span(Span::new(40, 105).unwrap());
        assert_eq!(
            out,
            vec![
                Span::new(40, 50).unwrap(),
                Span::new(52, 100).unwrap(),
                Span::new(50, 52).unwrap(),
                Span::new(100, 105).unwrap(),
            ]
        );
        let total: Value = out.iter().map(Span::len).sum();
        assert_eq!(total, 65);
    }

    #[test]
    fn resolve_span_agrees_with_pointwise_resolve() {
        let table = seed_to_soil();
        let span = Span::new(45, 101).unwrap();
        let mut pointwise: Vec<Value> = (span.start()..span.end())
            .map(|v| table.resolve(v))
            .collect();
        let mut spanwise: Vec<Value> = table
            .resolve_span(span)
            .iter()
            .flat_map(|s| s.start()..s.end())
            .collect();
        pointwise.sort_unstable();
        spanwise.sort_unstable();
        assert_eq!(pointwise, spanwise);
    }

    #[test]
    fn first_overlap_detects_nested_ranges() {
        assert_eq!(seed_to_soil().first_overlap(), None);

        let outer = range(0, 0, 100);
        let inner = range(500, 10, 5);
        let table = MappingTable::new([range(900, 200, 1), inner, outer]);
        assert_eq!(table.first_overlap(), Some((outer, inner)));
    }

    #[test]
    fn nested_range_still_answers_for_outer_values() {
        let table = MappingTable::new([range(1000, 0, 100), range(500, 10, 5)]);
        assert_eq!(table.resolve(50), 1050);
        assert_eq!(table.resolve(12), 1012);
        assert_eq!(table.resolve(99), 1099);
        assert_eq!(table.resolve(100), 100);
        assert_eq!(table.resolve(-1), -1);
    }

    #[test]
    fn overlapping_lookups_agree_with_linear_scan_and_spans() {
        let table = MappingTable::new([
            range(1000, 0, 100),
            range(500, 10, 5),
            range(-40, 5, 30),
            range(7000, 90, 20),
            range(300, 200, 10),
            range(400, 205, 3),
        ]);
        let span = Span::new(-10, 230).unwrap();
        for v in span.start()..span.end() {
            assert_eq!(table.resolve(v), table.resolve_linear(v), "value {v}");
        }

        let mut pointwise: Vec<Value> = (span.start()..span.end())
            .map(|v| table.resolve(v))
            .collect();
        let mut spanwise: Vec<Value> = table
            .resolve_span(span)
            .iter()
            .flat_map(|s| s.start()..s.end())
            .collect();
        pointwise.sort_unstable();
        spanwise.sort_unstable();
        assert_eq!(pointwise, spanwise);
    }

    #[test]
    fn stage_name_parses_header_form() {
        let name: StageName = "light-to-temperature".parse().unwrap();
        assert_eq!(name, StageName::new("light", "temperature"));
        assert!("lighttemperature".parse::<StageName>().is_err());
        assert!("-to-soil".parse::<StageName>().is_err());
    }

    #[test]
    fn deserialized_tables_are_indexed() {
        let table: MappingTable = serde_json::from_str(
            r#"{"ranges":[
                {"destinationStart":50,"sourceStart":98,"length":2},
                {"destinationStart":52,"sourceStart":50,"length":48}
            ]}"#,
        )
        .unwrap();
        assert_eq!(table.ranges()[0].source_start(), 50);
        assert_eq!(table.resolve(79), 81);
    }
}
