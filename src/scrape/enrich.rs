// src/scrape/enrich.rs
use std::{
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
    sync::{atomic::{AtomicUsize, Ordering}, mpsc, Arc},
    thread,
};

use reqwest::blocking::Client;
use url::Url;

use crate::{
    core::{net, sanitize::underscore_spaces},
    error::SourceError,
    progress::Progress,
    specs::PageSummary,
};

/// Per-species text lookup. `Ok(None)` means the source has nothing for this key.
pub trait SummarySource: Send + Sync {
    fn summary(&self, species_key: &str) -> Result<Option<String>, SourceError>;
}

/// Wikipedia REST `page/summary/{title}` for one language edition.
pub struct WikipediaSummaries {
    client: Client,
    base: Url,
}

impl WikipediaSummaries {
    pub fn new(client: Client, lang: &str) -> Result<Self, SourceError> {
        let base = Url::parse(&format!("https://{lang}.wikipedia.org/api/rest_v1/page/summary/"))?;
        Ok(Self { client, base })
    }

    /// Title is the species name with spaces as underscores, percent-encoded as one segment.
    pub fn url_for(&self, species_key: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segs) = url.path_segments_mut() {
            segs.pop_if_empty().push(&underscore_spaces(species_key));
        }
        url
    }
}

impl SummarySource for WikipediaSummaries {
    fn summary(&self, species_key: &str) -> Result<Option<String>, SourceError> {
        match net::get_json::<PageSummary>(&self.client, self.url_for(species_key)) {
            Ok(s) => Ok(s.into_text()),
            Err(SourceError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

enum Lookup {
    Found(String),
    Absent,
    Failed(String),
}

/// Look up every key on a fixed pool of `workers` threads.
///
/// Every key ends up in the map: lookups that fail, find nothing or panic get
/// `fallback`. Only this thread writes the map; workers send results back over
/// a channel. Completion order is arbitrary.
pub fn fetch_summaries(
    source: Arc<dyn SummarySource>,
    keys: &[String],
    workers: usize,
    fallback: &str,
    progress: &mut dyn Progress,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if keys.is_empty() {
        return out;
    }

    progress.begin(keys.len());
    progress.log("Fetching species summaries…");

    let keys_arc: Arc<Vec<String>> = Arc::new(keys.to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Lookup)>();

    let workers = workers.min(keys.len()).max(1);

    for _ in 0..workers {
        let keys = Arc::clone(&keys_arc);
        let idx = Arc::clone(&counter);
        let source = Arc::clone(&source);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= keys.len() {
                    break;
                }
                let key = &keys[i];
                let result = match panic::catch_unwind(AssertUnwindSafe(|| source.summary(key))) {
                    Ok(Ok(Some(text))) => Lookup::Found(text),
                    Ok(Ok(None)) => Lookup::Absent,
                    Ok(Err(e)) => Lookup::Failed(e.to_string()),
                    Err(_) => Lookup::Failed(s!("lookup panicked")),
                };
                if tx.send((i, result)).is_err() {
                    break;
                }
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    for _ in 0..keys_arc.len() {
        match res_rx.recv() {
            Ok((i, lookup)) => {
                let key = &keys_arc[i];
                let text = match lookup {
                    Lookup::Found(text) => {
                        progress.item_done(key);
                        text
                    }
                    Lookup::Absent => {
                        logd!("No summary for {key}");
                        progress.item_done(key);
                        s!(fallback)
                    }
                    Lookup::Failed(msg) => {
                        logw!("Summary lookup for {key} failed: {msg}");
                        progress.item_failed(key);
                        s!(fallback)
                    }
                };
                out.insert(key.clone(), text);
            }
            Err(_) => break, // workers ended early; fill the gaps below
        }
    }

    for key in keys_arc.iter() {
        out.entry(key.clone()).or_insert_with(|| s!(fallback));
    }

    progress.finish();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiki_url_uses_underscored_title() {
        let w = WikipediaSummaries::new(Client::new(), "pt").unwrap();
        assert_eq!(
            w.url_for("Turdus rufiventris").as_str(),
            "https://pt.wikipedia.org/api/rest_v1/page/summary/Turdus_rufiventris"
        );
    }

    #[test]
    fn wiki_url_escapes_slashes_in_title() {
        let w = WikipediaSummaries::new(Client::new(), "en").unwrap();
        let url = w.url_for("A/B c");
        assert!(url.as_str().ends_with("/page/summary/A%2FB_c"));
    }
}
