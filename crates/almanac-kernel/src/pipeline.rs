//! Pipelines: the ordered chain of stages a seed travels through.

use crate::span::Span;
use crate::table::{MappingTable, StageName};
use crate::Value;
use serde::{Deserialize, Serialize};

/// Ordered sequence of mapping tables, e.g. seed→soil→…→location.
///
/// Stage order is significant: swapping two stages generally changes the
/// routed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    stages: Vec<MappingTable>,
}

/// Two adjacent named stages whose categories do not line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBreak {
    /// Index of the earlier stage.
    pub stage: usize,
    pub produces: String,
    pub next_consumes: String,
}

impl Pipeline {
    pub fn new(stages: Vec<MappingTable>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[MappingTable] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Thread `value` through every stage in declared order.
    pub fn route(&self, value: Value) -> Value {
        self.stages.iter().fold(value, |v, stage| stage.resolve(v))
    }

    /// The input followed by every stage's output.
    pub fn trace(&self, value: Value) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.stages.len() + 1);
        values.push(value);
        let mut current = value;
        for stage in &self.stages {
            current = stage.resolve(current);
            values.push(current);
        }
        values
    }

    /// Propagate a whole span, splitting at every stage's range boundaries.
    ///
    /// The union of the returned spans is exactly the image of `span` under
    /// [`route`](Self::route); spans may be adjacent or unordered.
    pub fn route_span(&self, span: Span) -> Vec<Span> {
        self.stages.iter().fold(vec![span], |spans, stage| {
            spans
                .into_iter()
                .flat_map(|s| stage.resolve_span(s))
                .collect()
        })
    }

    /// Adjacent named stages where one's destination is not the next's source.
    ///
    /// Unnamed stages never break the chain.
    pub fn chain_breaks(&self) -> Vec<ChainBreak> {
        self.stages
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let (a, b): (&StageName, &StageName) = (pair[0].name()?, pair[1].name()?);
                (a.destination != b.source).then(|| ChainBreak {
                    stage: i,
                    produces: a.destination.clone(),
                    next_consumes: b.source.clone(),
                })
            })
            .collect()
    }
}

impl FromIterator<MappingTable> for Pipeline {
    fn from_iter<I: IntoIterator<Item = MappingTable>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
