// src/core/net.rs
// Blocking HTTPS GET + JSON decode. One client per run, shared by reference or clone.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::consts::USER_AGENT;
use crate::error::{AppError, SourceError};

pub fn build_client(timeout_secs: u64) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(AppError::Client)
}

/// GET `url` and decode the body as JSON. Any non-2xx status is an error.
pub fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T, SourceError> {
    let shown = url.to_string();
    logd!("GET {shown}");

    let resp = client
        .get(url)
        .send()
        .map_err(|source| {
            if source.is_timeout() {
                SourceError::Timeout { url: shown.clone() }
            } else {
                SourceError::Transport { url: shown.clone(), source }
            }
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status { url: shown, status: status.as_u16() });
    }

    resp.json::<T>().map_err(|source| {
        if source.is_timeout() {
            SourceError::Timeout { url: shown }
        } else {
            SourceError::Decode { url: shown, source }
        }
    })
}
