// src/scrape/pager.rs
//
// Cursor paging over the observation source.
//
// The source returns records newest-first. Each follow-up request asks for
// records with an id below the last one seen. A page shorter than `per_page`
// is the only end-of-data signal; `total_results` is never cross-checked.
//
// Liveness assumes the ordering is stable and nothing is deleted between
// requests. That is not verified here.

use crate::{
    aggregate::Aggregate,
    config::FetchOptions,
    error::SourceError,
    progress::Progress,
    specs::{normalize, ObservationsPage},
};

/// One request against the paginated source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub place_id: u64,
    pub iconic_taxa: String,
    pub quality_grade: String,
    pub captive: bool,
    pub per_page: usize,
    /// Fetch only records with an id below this one.
    pub id_below: Option<u64>,
}

impl PageQuery {
    pub fn from_options(opts: &FetchOptions) -> Self {
        Self {
            place_id: opts.place_id,
            iconic_taxa: opts.iconic_taxa.clone(),
            quality_grade: opts.quality_grade.clone(),
            captive: opts.captive,
            per_page: opts.page_size,
            id_below: None,
        }
    }

    pub fn with_cursor(&self, id: u64) -> Self {
        Self { id_below: Some(id), ..self.clone() }
    }

    /// Query-string pairs, in a fixed order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut p = vec![
            ("place_id", self.place_id.to_string()),
            ("iconic_taxa", self.iconic_taxa.clone()),
            ("order", s!("desc")),
            ("order_by", s!("created_at")),
            ("quality_grade", self.quality_grade.clone()),
            ("captive", self.captive.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(id) = self.id_below {
            p.push(("id_below", id.to_string()));
        }
        p
    }
}

/// Anything that can answer a [`PageQuery`].
pub trait PageSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<ObservationsPage, SourceError>;
}

#[derive(Debug)]
enum PagerState {
    Start,
    HasPage(ObservationsPage),
    Done,
    Failed(SourceError),
}

#[derive(Debug)]
pub enum PagerOutcome {
    /// A short or empty page was seen.
    Done,
    /// A request failed; everything before it was kept.
    Failed(SourceError),
}

#[derive(Debug)]
pub struct PagerReport {
    pub outcome: PagerOutcome,
    pub requests: usize,
    /// Non-empty pages processed.
    pub pages: usize,
    pub records_seen: usize,
    pub accepted: usize,
    /// As reported with the first page. Informational.
    pub total_results: Option<u64>,
}

impl PagerReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, PagerOutcome::Done)
    }

    pub fn rejected(&self) -> usize {
        self.records_seen - self.accepted
    }

    pub fn error(&self) -> Option<&SourceError> {
        match &self.outcome {
            PagerOutcome::Failed(e) => Some(e),
            PagerOutcome::Done => None,
        }
    }
}

#[derive(Default)]
struct Counters {
    requests: usize,
    pages: usize,
    records_seen: usize,
    accepted: usize,
    total_results: Option<u64>,
}

impl Counters {
    fn finish(self, outcome: PagerOutcome) -> PagerReport {
        PagerReport {
            outcome,
            requests: self.requests,
            pages: self.pages,
            records_seen: self.records_seen,
            accepted: self.accepted,
            total_results: self.total_results,
        }
    }
}

/// Fetch every page for `base`, folding accepted records into `aggregate` as
/// each page arrives. Strictly sequential: the next request is only issued
/// after the current page is ingested.
pub fn fetch_all<S: PageSource + ?Sized>(
    source: &mut S,
    base: &PageQuery,
    aggregate: &mut Aggregate,
    progress: &mut dyn Progress,
) -> PagerReport {
    let page_size = base.per_page.max(1);
    let mut c = Counters::default();
    let mut state = PagerState::Start;

    loop {
        state = match state {
            PagerState::Start => request(source, base, &mut c, progress),

            PagerState::HasPage(page) if page.results.is_empty() => PagerState::Done,

            PagerState::HasPage(page) => {
                c.pages += 1;
                let batch = page.results.len();
                let cursor = page.results.last().and_then(|r| r.id);

                let mut accepted = 0usize;
                for raw in &page.results {
                    if let Some(obs) = normalize(raw) {
                        aggregate.ingest(obs);
                        accepted += 1;
                    }
                }
                c.records_seen += batch;
                c.accepted += accepted;
                logd!("page {}: {batch} records, {accepted} kept", c.pages);
                progress.item_done(&format!("page {} ({} observations so far)", c.pages, c.accepted));

                if batch < page_size {
                    PagerState::Done
                } else {
                    match cursor {
                        Some(id) => request(source, &base.with_cursor(id), &mut c, progress),
                        None => PagerState::Failed(SourceError::MissingCursor { page: c.pages }),
                    }
                }
            }

            PagerState::Done => {
                logf!(
                    "Fetched {} records in {} requests; {} kept",
                    c.records_seen, c.requests, c.accepted
                );
                progress.finish();
                return c.finish(PagerOutcome::Done);
            }

            PagerState::Failed(err) => {
                logw!("Paging stopped after {} requests: {err}", c.requests);
                progress.item_failed(&format!("request {}", c.requests));
                progress.finish();
                return c.finish(PagerOutcome::Failed(err));
            }
        };
    }
}

fn request<S: PageSource + ?Sized>(
    source: &mut S,
    query: &PageQuery,
    c: &mut Counters,
    progress: &mut dyn Progress,
) -> PagerState {
    c.requests += 1;
    match source.fetch_page(query) {
        Ok(page) => {
            if c.requests == 1 {
                c.total_results = page.total_results;
                let expected = page
                    .total_results
                    .map(|t| (t as usize).div_ceil(query.per_page.max(1)))
                    .unwrap_or(0);
                progress.begin(expected);
                if let Some(total) = page.total_results {
                    logf!("Source reports {total} matching records");
                }
            }
            PagerState::HasPage(page)
        }
        Err(e) => PagerState::Failed(e),
    }
}
