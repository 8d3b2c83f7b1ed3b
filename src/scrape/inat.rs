// src/scrape/inat.rs
use reqwest::blocking::Client;
use url::Url;

use super::pager::{PageQuery, PageSource};
use crate::{core::net, error::SourceError, specs::ObservationsPage};

/// Live `/v1/observations` endpoint.
pub struct INatSource {
    client: Client,
    base: Url,
}

impl INatSource {
    pub fn new(client: Client, api_base: &str) -> Result<Self, SourceError> {
        Ok(Self { client, base: Url::parse(api_base)? })
    }

    pub fn url_for(&self, query: &PageQuery) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }
}

impl PageSource for INatSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<ObservationsPage, SourceError> {
        net::get_json(&self.client, self.url_for(query))
    }
}
