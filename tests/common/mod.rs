// tests/common/mod.rs
//
// Scripted sources and synthetic records shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use inat_heatmap::{
    scrape::{PageQuery, PageSource},
    specs::{ObservationsPage, RawRecord},
    SourceError,
};
use serde_json::json;

pub const SPECIES: [&str; 5] = [
    "Pitangus sulphuratus",
    "Turdus rufiventris",
    "Columba livia",
    "Brotogeris tirica",
    "Coragyps atratus",
];

/// A record that passes the normalizer.
pub fn record(id: u64, species: &str) -> RawRecord {
    RawRecord::from(json!({
        "id": id,
        "geojson": { "type": "Point", "coordinates": [-46.73 + id as f64 * 1e-6, -23.56] },
        "taxon": { "id": 1000 + species.len(), "name": species },
        "photos": [ { "url": format!("https://static.inaturalist.org/photos/{id}/square.jpg"), "license_code": "cc-by-nc" } ],
        "user": { "login": format!("user{}", id % 3) },
        "observed_on": format!("2024-{:02}-{:02}", id % 12 + 1, id % 28 + 1),
        "uri": format!("https://www.inaturalist.org/observations/{id}")
    }))
}

/// A record the normalizer drops: no photos when `id` is even, no coordinates when odd.
pub fn rejected(id: u64, species: &str) -> RawRecord {
    let mut r = record(id, species);
    if id % 2 == 0 {
        r.photos = Some(vec![]);
    } else {
        r.geojson = None;
    }
    r
}

/// `n` accepted records with ids counting down from `first_id`, cycling through [`SPECIES`].
pub fn page(first_id: u64, n: usize) -> ObservationsPage {
    let results = (0..n as u64)
        .map(|i| record(first_id - i, SPECIES[(i as usize) % SPECIES.len()]))
        .collect();
    ObservationsPage { total_results: None, results }
}

pub enum Step {
    Page(ObservationsPage),
    Fail(u16),
}

/// Answers requests from a script and remembers every query it saw.
/// Once the script runs out it answers with empty pages.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    pub queries: Vec<PageQuery>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps: steps.into(), queries: Vec::new() }
    }

    pub fn pages(pages: Vec<ObservationsPage>) -> Self {
        Self::new(pages.into_iter().map(Step::Page).collect())
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<ObservationsPage, SourceError> {
        self.queries.push(query.clone());
        match self.steps.pop_front() {
            Some(Step::Page(p)) => Ok(p),
            Some(Step::Fail(status)) => Err(SourceError::Status {
                url: format!("mock://observations?id_below={:?}", query.id_below),
                status,
            }),
            None => Ok(ObservationsPage::default()),
        }
    }
}
