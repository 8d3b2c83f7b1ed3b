// src/lib.rs
//! Fetch research-grade observations for one place from iNaturalist, group them
//! by species and render static heatmap pages.
//!
//! ```text
//! scrape::fetch_all ─▶ specs::normalize ─▶ Aggregate ─▶ scrape::fetch_summaries
//!                                              │                 │
//!                                              └──▶ render ◀─────┘ ─▶ file::write_site
//! ```

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod aggregate;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod progress;
pub mod render;
pub mod runner;
pub mod scrape;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use aggregate::{Aggregate, SpeciesAggregate};
pub use error::{AppError, SourceError};
pub use specs::{normalize, NormalizedObservation, RawRecord};
