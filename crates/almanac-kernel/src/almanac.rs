//! The almanac: seeds plus the pipeline they are routed through.
//!
//! The only reduction is a minimum, which is associative and commutative,
//! so the parallel variants fold per-seed results on a rayon pool in any
//! order and still agree with the sequential ones.

use crate::error::AlmanacError;
use crate::pipeline::Pipeline;
use crate::span::Span;
use crate::Value;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How the seed sequence is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedLayout {
    /// Every token is one seed.
    #[default]
    Values,

    /// Tokens pair up as `(start, length)`; each pair is a span of seeds,
    /// propagated through the pipeline as a whole interval.
    Ranges,
}

impl std::fmt::Display for SeedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Values => write!(f, "values"),
            Self::Ranges => write!(f, "ranges"),
        }
    }
}

/// Seeds plus the pipeline that routes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Almanac {
    pub seeds: Vec<Value>,
    pub pipeline: Pipeline,
}

impl Almanac {
    pub fn new(seeds: Vec<Value>, pipeline: Pipeline) -> Self {
        Self { seeds, pipeline }
    }

    /// Every seed paired with its routed value, in seed order.
    pub fn routed_values(&self) -> Vec<(Value, Value)> {
        self.seeds
            .iter()
            .map(|&seed| (seed, self.pipeline.route(seed)))
            .collect()
    }

    /// The seed tokens read as `(start, length)` spans.
    pub fn seed_spans(&self) -> Result<Vec<Span>, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::UnpairedSeed {
                count: self.seeds.len(),
            });
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| Span::from_start_len(pair[0], pair[1]))
            .collect()
    }

    /// Smallest routed value over the seeds, read as individual values.
    pub fn minimum_routed_value(&self) -> Result<Value, AlmanacError> {
        self.minimum_routed_value_with(SeedLayout::Values)
    }

    /// Smallest routed value under an explicit seed layout.
    pub fn minimum_routed_value_with(&self, layout: SeedLayout) -> Result<Value, AlmanacError> {
        let _span = tracing::debug_span!(
            "minimum_routed_value",
            %layout,
            seeds = self.seeds.len(),
            stages = self.pipeline.len(),
        )
        .entered();

        let minimum = match layout {
            SeedLayout::Values => self
                .seeds
                .iter()
                .map(|&seed| self.pipeline.route(seed))
                .min(),
            SeedLayout::Ranges => self
                .seed_spans()?
                .into_iter()
                .flat_map(|span| self.pipeline.route_span(span))
                .map(|span| span.start())
                .min(),
        };
        let minimum = minimum.ok_or(AlmanacError::EmptyInput)?;
        tracing::debug!(minimum, "reduced routed seeds");
        Ok(minimum)
    }

    /// [`minimum_routed_value_with`](Self::minimum_routed_value_with) on the
    /// rayon pool, one task per seed or seed span.
    pub fn par_minimum_routed_value_with(
        &self,
        layout: SeedLayout,
    ) -> Result<Value, AlmanacError> {
        let _span = tracing::debug_span!(
            "par_minimum_routed_value",
            %layout,
            seeds = self.seeds.len(),
            threads = rayon::current_num_threads(),
        )
        .entered();

        let pipeline = &self.pipeline;
        let minimum = match layout {
            SeedLayout::Values => self.seeds.par_iter().map(|&seed| pipeline.route(seed)).min(),
            SeedLayout::Ranges => self
                .seed_spans()?
                .into_par_iter()
                .flat_map_iter(|span| pipeline.route_span(span))
                .map(|span| span.start())
                .min(),
        };
        let minimum = minimum.ok_or(AlmanacError::EmptyInput)?;
        tracing::debug!(minimum, "reduced routed seeds");
        Ok(minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;
    use crate::table::MappingTable;

    fn small_pipeline() -> Pipeline {
        Pipeline::new(vec![
            MappingTable::new([
                Range::new(50, 98, 2).unwrap(),
                Range::new(52, 50, 48).unwrap(),
            ]),
            MappingTable::new([
                Range::new(0, 15, 37).unwrap(),
                Range::new(37, 52, 2).unwrap(),
                Range::new(39, 0, 15).unwrap(),
            ]),
        ])
    }

    #[test]
    fn empty_seeds_have_no_minimum() {
        let almanac = Almanac::new(vec![], small_pipeline());
        assert_eq!(almanac.minimum_routed_value(), Err(AlmanacError::EmptyInput));
        assert_eq!(
            almanac.minimum_routed_value_with(SeedLayout::Ranges),
            Err(AlmanacError::EmptyInput)
        );
        assert_eq!(
            almanac.par_minimum_routed_value_with(SeedLayout::Values),
            Err(AlmanacError::EmptyInput)
        );
    }

    #[test]
    fn minimum_is_smallest_routed_value() {
        let almanac = Almanac::new(vec![79, 14, 55, 13], small_pipeline());
        let smallest = almanac.routed_values().into_iter().map(|(_, v)| v).min();
        assert_eq!(almanac.minimum_routed_value().ok(), smallest);
        assert_eq!(almanac.minimum_routed_value(), Ok(52));
    }

    #[test]
    fn parallel_agrees_with_sequential() {
        let seeds: Vec<Value> = (0..400).map(|i| (i * 37) % 131).collect();
        let almanac = Almanac::new(seeds, small_pipeline());
        for layout in [SeedLayout::Values, SeedLayout::Ranges] {
            assert_eq!(
                almanac.par_minimum_routed_value_with(layout),
                almanac.minimum_routed_value_with(layout),
                "layout {layout}"
            );
        }
    }

    #[test]
    fn ranges_layout_matches_enumeration() {
        let almanac = Almanac::new(vec![79, 14, 55, 13, 0, 3], small_pipeline());
        let enumerated = almanac
            .seed_spans()
            .unwrap()
            .iter()
            .flat_map(|s| s.start()..s.end())
            .map(|v| almanac.pipeline.route(v))
            .min();
        assert_eq!(
            almanac.minimum_routed_value_with(SeedLayout::Ranges).ok(),
            enumerated
        );
    }

    #[test]
    fn ranges_layout_rejects_bad_pairs() {
        let odd = Almanac::new(vec![1, 2, 3], small_pipeline());
        assert_eq!(
            odd.minimum_routed_value_with(SeedLayout::Ranges),
            Err(AlmanacError::UnpairedSeed { count: 3 })
        );

        let empty_span = Almanac::new(vec![10, 0], small_pipeline());
        assert_eq!(
            empty_span.minimum_routed_value_with(SeedLayout::Ranges),
            Err(AlmanacError::MalformedSeedRange {
                start: 10,
                length: 0
            })
        );
    }

    #[test]
    fn seed_layout_names_match_serde() {
        assert_eq!(SeedLayout::default(), SeedLayout::Values);
        for layout in [SeedLayout::Values, SeedLayout::Ranges] {
            let encoded = serde_json::to_string(&layout).unwrap();
            assert_eq!(encoded, format!("\"{layout}\""));
            assert_eq!(serde_json::from_str::<SeedLayout>(&encoded).unwrap(), layout);
        }
        for alias in ["\"flat\"", "\"pairs\"", "\"Ranges\""] {
            assert!(serde_json::from_str::<SeedLayout>(alias).is_err(), "{alias}");
        }
    }
}
