// src/runner.rs
use std::{path::PathBuf, sync::Arc};

use crate::{
    aggregate::Aggregate,
    config::{consts::PAGE_SIZE, AppOptions},
    core::net,
    error::AppError,
    file,
    progress::Progress,
    render::{self, RenderContext},
    scrape::{self, INatSource, PageQuery, PageSource, PagerReport, SummarySource, WikipediaSummaries},
};

/// Summary of what one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub pager: PagerReport,
    pub species: usize,
    pub observations: usize,
    /// Species whose summary lookup came back with real text.
    pub summaries_found: usize,
    pub files_written: Vec<PathBuf>,
}

impl RunReport {
    /// `false` when paging stopped early and the pages cover only part of the source.
    pub fn is_complete(&self) -> bool {
        self.pager.is_complete()
    }
}

/// Reject option values that would make the run meaningless.
pub fn validate(opts: &AppOptions) -> Result<(), AppError> {
    // the source silently caps larger pages, which would end paging after one request
    if opts.fetch.page_size == 0 || opts.fetch.page_size > PAGE_SIZE {
        return Err(AppError::Option(format!("page size must be between 1 and {PAGE_SIZE}")));
    }
    if opts.export.species_per_page == 0 {
        return Err(AppError::Option(s!("species per page must be at least 1")));
    }
    if opts.enrich.enabled && opts.enrich.workers == 0 {
        return Err(AppError::Option(s!("enrichment needs at least 1 worker")));
    }
    Ok(())
}

/// Full run against the live API and wiki.
pub fn run(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunReport, AppError> {
    validate(opts)?;
    let client = net::build_client(opts.fetch.timeout_secs)?;

    let mut source = INatSource::new(client.clone(), &opts.fetch.api_base)
        .map_err(|e| AppError::Option(format!("api_base: {e}")))?;

    let summaries: Option<Arc<dyn SummarySource>> = if opts.enrich.enabled {
        let wiki: Arc<dyn SummarySource> = Arc::new(
            WikipediaSummaries::new(client, &opts.enrich.wiki_lang)
                .map_err(|e| AppError::Option(format!("wiki_lang: {e}")))?,
        );
        Some(wiki)
    } else {
        None
    };

    let last_update = chrono::Local::now().format("%Y-%m-%d").to_string();
    run_with(opts, &mut source, summaries, &last_update, progress)
}

/// Same pipeline with injectable sources: page → aggregate → sort → enrich → render → write.
pub fn run_with(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    summaries: Option<Arc<dyn SummarySource>>,
    last_update: &str,
    progress: &mut dyn Progress,
) -> Result<RunReport, AppError> {
    validate(opts)?;

    progress.log("Fetching observations…");
    let mut aggregate = Aggregate::new();
    let pager = scrape::fetch_all(source, &PageQuery::from_options(&opts.fetch), &mut aggregate, progress);

    if let Some(err) = pager.error() {
        loge!("Failed to fetch data: {err}");
        progress.log(&format!(
            "Fetch stopped early ({err}); continuing with {} observations",
            aggregate.total_observations()
        ));
    }
    logf!(
        "{} species, {} observations ({} records rejected)",
        aggregate.len(),
        aggregate.total_observations(),
        pager.rejected()
    );

    // aggregation is complete; from here on the aggregate is read-only
    aggregate.sort_chronologically();
    let aggregate = aggregate;

    let descriptions = match summaries {
        Some(src) if !aggregate.is_empty() => Some(scrape::fetch_summaries(
            src,
            &aggregate.species_keys(),
            opts.enrich.workers,
            &opts.enrich.fallback,
            progress,
        )),
        _ => None,
    };
    let summaries_found = descriptions
        .as_ref()
        .map(|d| d.values().filter(|v| **v != opts.enrich.fallback).count())
        .unwrap_or(0);

    let ctx = RenderContext {
        place_id: opts.fetch.place_id,
        iconic_taxa: &opts.fetch.iconic_taxa,
        wiki_lang: &opts.enrich.wiki_lang,
        last_update,
        descriptions: descriptions.as_ref(),
        fallback: &opts.enrich.fallback,
    };

    progress.log("Generating HTML pages…");
    let files = render::render_site(&aggregate, &ctx, &opts.export);
    let files_written = file::write_site(&opts.export.out_dir, &files)?;
    logf!("Wrote {} files to {}", files_written.len(), opts.export.out_dir.display());

    Ok(RunReport {
        species: aggregate.len(),
        observations: aggregate.total_observations(),
        summaries_found,
        files_written,
        pager,
    })
}
