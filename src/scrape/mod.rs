// src/scrape/mod.rs
mod enrich;
mod inat;
mod pager;

pub use enrich::{fetch_summaries, SummarySource, WikipediaSummaries};
pub use inat::INatSource;
pub use pager::{fetch_all, PageQuery, PageSource, PagerOutcome, PagerReport};
