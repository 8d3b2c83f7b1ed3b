// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    config::{AppOptions, Layout},
    error::AppError,
    progress::Progress,
    runner::{self, RunReport},
};

/// Build per-species heatmap pages from iNaturalist observations.
#[derive(Debug, Parser)]
#[command(name = "inat_heatmap", version, about)]
pub struct Args {
    /// TOML file with [fetch], [enrich] and [export] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// iNaturalist place id
    #[arg(long)]
    pub place_id: Option<u64>,

    /// Iconic taxon filter, e.g. Aves
    #[arg(long)]
    pub taxon: Option<String>,

    /// Records per API request (max 200)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Species per output page (paginated layout)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Skip the Wikipedia summaries
    #[arg(long)]
    pub no_wikipedia: bool,

    /// Wikipedia language edition for summaries
    #[arg(long)]
    pub wiki_lang: Option<String>,

    /// Parallel summary lookups
    #[arg(long)]
    pub workers: Option<usize>,

    /// Do not write the about page and README
    #[arg(long)]
    pub no_about: bool,

    /// Debug logging (RUST_LOG wins if set)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Single,
    Paginated,
}

impl From<LayoutArg> for Layout {
    fn from(l: LayoutArg) -> Self {
        match l {
            LayoutArg::Single => Layout::Single,
            LayoutArg::Paginated => Layout::Paginated,
        }
    }
}

impl Args {
    /// Defaults, then the config file, then flags.
    pub fn into_options(self) -> Result<AppOptions, AppError> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)?,
            None => AppOptions::default(),
        };

        if let Some(v) = self.out { opts.export.out_dir = v; }
        if let Some(v) = self.layout { opts.export.layout = v.into(); }
        if let Some(v) = self.place_id { opts.fetch.place_id = v; }
        if let Some(v) = self.taxon { opts.fetch.iconic_taxa = v; }
        if let Some(v) = self.page_size { opts.fetch.page_size = v; }
        if let Some(v) = self.per_page { opts.export.species_per_page = v; }
        if let Some(v) = self.wiki_lang { opts.enrich.wiki_lang = v; }
        if let Some(v) = self.workers { opts.enrich.workers = v; }
        if self.no_wikipedia { opts.enrich.enabled = false; }
        if self.no_about { opts.export.about_pages = false; }

        runner::validate(&opts)?;
        Ok(opts)
    }
}

/// Status lines on stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.done = 0;
        self.failed = 0;
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        if self.total > 0 {
            eprintln!("  [{}/{}] {label}", self.done + self.failed, self.total);
        } else {
            eprintln!("  {label}");
        }
    }
    fn item_failed(&mut self, label: &str) {
        self.failed += 1;
        eprintln!("  failed: {label}");
    }
    fn finish(&mut self) {
        if self.failed > 0 {
            eprintln!("Done ({} ok, {} failed)", self.done, self.failed);
        }
    }
}

pub fn run(args: Args) -> Result<RunReport, AppError> {
    crate::log::init(args.verbose);
    let opts = args.into_options()?;

    let mut progress = ConsoleProgress::default();
    let report = runner::run(&opts, &mut progress)?;

    if let Some(err) = report.pager.error() {
        eprintln!("Warning: fetch incomplete ({err}); pages cover {} observations only", report.observations);
    }
    println!(
        "{} species, {} observations; wrote {} files to {}",
        report.species,
        report.observations,
        report.files_written.len(),
        opts.export.out_dir.display()
    );
    Ok(report)
}
