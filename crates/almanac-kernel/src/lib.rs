//! # Almanac Kernel
//!
//! Routes seeds through a chain of interval maps and reduces the routed
//! values to a minimum.
//!
//! This crate is **text-free**: it never parses input or touches the
//! filesystem. Callers hand it an already tokenized [`Almanac`] and get a
//! value back.
//!
//! ## Architecture
//!
//! ```text
//! Almanac               ← Seeds + pipeline, minimum reduction
//!     │
//! Pipeline              ← Ordered stages, route / trace / route_span
//!     │
//! MappingTable          ← One stage, sorted index, identity fallback
//!     │
//! Range                 ← [source, source+len) ↦ [dest, dest+len)
//! ```

pub mod almanac;
pub mod error;
pub mod pipeline;
pub mod range;
pub mod span;
pub mod table;

pub use almanac::{Almanac, SeedLayout};
pub use error::AlmanacError;
pub use pipeline::{ChainBreak, Pipeline};
pub use range::Range;
pub use span::Span;
pub use table::{MappingTable, StageName};

/// Integer domain every stage operates over.
pub type Value = i64;
