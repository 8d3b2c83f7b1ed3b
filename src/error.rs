// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// A request to a remote source (observation pages or summaries) did not yield data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// No answer within the client timeout, while connecting or reading the body.
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    /// A full page ended with a record that has no id, so there is no cursor to continue from.
    #[error("last record of page {page} has no id; cannot request the next page")]
    MissingCursor { page: usize },
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid option: {0}")]
    Option(String),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
