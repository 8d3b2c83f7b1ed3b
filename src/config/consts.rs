// src/config/consts.rs

// Source API
pub const API_BASE: &str = "https://api.inaturalist.org/v1/observations";
pub const SITE_BASE: &str = "https://www.inaturalist.org/observations";
pub const PLACE_ID: u64 = 125852; // USP campus
pub const ICONIC_TAXA: &str = "Aves";
pub const QUALITY_GRADE: &str = "research";
pub const PAGE_SIZE: usize = 200; // max the API allows per request

// Enrichment
pub const WIKI_LANG: &str = "pt";
pub const SUMMARY_FALLBACK: &str = "Descrição não disponível.";

// Net
pub const USER_AGENT: &str = concat!("inat_heatmap/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Concurrency
pub const WORKERS: usize = 10;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const SINGLE_PAGE_FILE: &str = "heatmaps_by_species.html";
pub const PAGE_FILE_PREFIX: &str = "heatmaps_page_";
pub const ABOUT_FILE: &str = "sobre_o_projeto.html";
pub const README_FILE: &str = "README.md";
pub const SPECIES_PER_PAGE: usize = 10;
pub const HEATMAP_RADIUS: u32 = 30;

// Sentinels for missing record fields
pub const UNKNOWN: &str = "Unknown";
pub const NO_LICENSE: &str = "N/A";
