//! Text adapter: turns almanac text into a tokenized [`Almanac`].
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! ```
//!
//! Blank lines separate blocks and `#` lines are comments. Every range row
//! belongs to the most recent `<name> map:` header.

use almanac_kernel::{Almanac, AlmanacError, MappingTable, Pipeline, Range, StageName, Value};

const SEEDS_PREFIX: &str = "seeds:";
const MAP_SUFFIX: &str = "map:";

/// Errors from reading almanac text. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing `seeds:` line")]
    MissingSeeds,

    #[error("line {line}: expected `seeds:` before any map, found `{found}`")]
    SeedsNotFirst { line: usize, found: String },

    #[error("line {line}: duplicate `seeds:` line")]
    DuplicateSeeds { line: usize },

    #[error("line {line}: invalid integer `{token}`")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: {message}")]
    InvalidHeader { line: usize, message: String },

    #[error("line {line}: range row appears before any `<name> map:` header")]
    RowOutsideStage { line: usize },

    #[error("line {line}: expected `<dest> <src> <len>`, found {found} field(s)")]
    WrongFieldCount { line: usize, found: usize },

    #[error("line {line}: {source}")]
    Range {
        line: usize,
        #[source]
        source: AlmanacError,
    },
}

struct StageBuilder {
    name: StageName,
    ranges: Vec<Range>,
}

impl StageBuilder {
    fn finish(self) -> MappingTable {
        MappingTable::named(self.name, self.ranges)
    }
}

/// Parse a whole almanac.
pub fn parse_almanac(text: &str) -> Result<Almanac, ParseError> {
    let mut seeds: Option<Vec<Value>> = None;
    let mut stages = Vec::new();
    let mut current: Option<StageBuilder> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix(SEEDS_PREFIX) {
            if seeds.is_some() {
                return Err(ParseError::DuplicateSeeds { line: line_no });
            }
            seeds = Some(parse_numbers(rest, line_no)?);
            continue;
        }

        if seeds.is_none() {
            return Err(ParseError::SeedsNotFirst {
                line: line_no,
                found: line.to_string(),
            });
        }

        if let Some(header) = line.strip_suffix(MAP_SUFFIX) {
            let name = header
                .trim()
                .parse::<StageName>()
                .map_err(|message| ParseError::InvalidHeader {
                    line: line_no,
                    message,
                })?;
            if let Some(done) = current.replace(StageBuilder {
                name,
                ranges: Vec::new(),
            }) {
                stages.push(done.finish());
            }
            continue;
        }

        let stage = current
            .as_mut()
            .ok_or(ParseError::RowOutsideStage { line: line_no })?;
        let fields = parse_numbers(line, line_no)?;
        let [dest, src, len] = fields[..] else {
            return Err(ParseError::WrongFieldCount {
                line: line_no,
                found: fields.len(),
            });
        };
        let range = Range::new(dest, src, len).map_err(|source| ParseError::Range {
            line: line_no,
            source,
        })?;
        stage.ranges.push(range);
    }

    if let Some(done) = current {
        stages.push(done.finish());
    }
    let seeds = seeds.ok_or(ParseError::MissingSeeds)?;
    tracing::debug!(seeds = seeds.len(), stages = stages.len(), "parsed almanac");
    Ok(Almanac::new(seeds, Pipeline::new(stages)))
}

fn parse_numbers(text: &str, line: usize) -> Result<Vec<Value>, ParseError> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| ParseError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}
