// src/config/options.rs
use std::{fs, path::{Path, PathBuf}};

use serde::Deserialize;

use super::consts::*;
use crate::error::AppError;

/// Everything one run needs. Loadable from TOML; every field has a default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub enrich: EnrichOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(AppError::Config)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Query filters for the observation source.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchOptions {
    pub api_base: String,
    pub place_id: u64,
    pub iconic_taxa: String,
    pub quality_grade: String,
    pub captive: bool,
    pub page_size: usize,
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_base: s!(API_BASE),
            place_id: PLACE_ID,
            iconic_taxa: s!(ICONIC_TAXA),
            quality_grade: s!(QUALITY_GRADE),
            captive: false,
            page_size: PAGE_SIZE,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnrichOptions {
    pub enabled: bool,
    pub wiki_lang: String,
    pub workers: usize,
    pub fallback: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            wiki_lang: s!(WIKI_LANG),
            workers: WORKERS,
            fallback: s!(SUMMARY_FALLBACK),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One page: complete heatmap, then every species with its first observation.
    Single,
    /// `species_per_page` species per page with navigation.
    Paginated,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub layout: Layout,
    pub species_per_page: usize,
    /// Write the about page and README next to the heatmaps (paginated layout only).
    pub about_pages: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            layout: Layout::Paginated,
            species_per_page: SPECIES_PER_PAGE,
            about_pages: true,
        }
    }
}

impl ExportOptions {
    /// File name of the `n`th (1-based) paginated page.
    pub fn page_file_name(n: usize) -> String {
        join!(PAGE_FILE_PREFIX, &n.to_string(), ".html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let opts = AppOptions::from_toml_str("").unwrap();
        assert_eq!(opts, AppOptions::default());
        assert_eq!(opts.fetch.page_size, 200);
        assert_eq!(opts.enrich.workers, 10);
        assert_eq!(opts.export.layout, Layout::Paginated);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let text = r#"
            [fetch]
            place_id = 42
            [export]
            layout = "single"
            out_dir = "site"
        "#;
        let opts = AppOptions::from_toml_str(text).unwrap();
        assert_eq!(opts.fetch.place_id, 42);
        assert_eq!(opts.fetch.iconic_taxa, "Aves");
        assert_eq!(opts.export.layout, Layout::Single);
        assert_eq!(opts.export.out_dir, PathBuf::from("site"));
        assert!(opts.enrich.enabled);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = AppOptions::from_toml_str("[fetch]\nplace = 1\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn page_file_names_are_one_based() {
        assert_eq!(ExportOptions::page_file_name(1), "heatmaps_page_1.html");
        assert_eq!(ExportOptions::page_file_name(12), "heatmaps_page_12.html");
    }
}
