// src/specs/mod.rs
//! # Payload "specs" module
//!
//! Endpoint-specific extraction: each spec knows the shape of one remote payload
//! and how to pull the fields the rest of the pipeline needs out of it.
//!
//! ## What lives here
//! - **Wire schemas** for remote JSON (`/v1/observations`, wiki page summaries).
//! - **Tolerant extraction**: missing or `null` fields degrade to documented
//!   sentinels field by field; a result that is not an object decodes empty.
//! - **Normalization** of one raw record into a [`NormalizedObservation`].
//!
//! ## What does **not** live here
//! - Network calls and paging (`scrape`).
//! - Grouping by species (`aggregate`).
//! - Anything HTML (`render`).
//!
//! ## Conventions & invariants
//! - Pure functions only; the same input always yields the same output.
//! - Coordinates leave this module as `(latitude, longitude)`.

pub mod observations;
pub mod summary;

pub use observations::{normalize, NormalizedObservation, ObservationsPage, RawRecord};
pub use summary::PageSummary;
