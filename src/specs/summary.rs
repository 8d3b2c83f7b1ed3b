// src/specs/summary.rs
use serde::Deserialize;

/// The slice of a wiki REST `page/summary` response we read.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageSummary {
    pub extract_html: Option<String>,
}

impl PageSummary {
    /// Summary text, if the page has a non-blank one.
    pub fn into_text(self) -> Option<String> {
        self.extract_html.filter(|s| !s.trim().is_empty())
    }
}
