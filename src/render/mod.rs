// src/render/mod.rs
//! Static output: heatmap component, species pages, about page and README.
//!
//! Rendering is pure: it returns [`RenderedFile`]s and leaves writing to `file`.

pub mod about;
pub mod heatmap;
pub mod pages;

pub use heatmap::HeatmapView;
pub use pages::{page_count, render_paginated, render_single_page, RenderContext, RenderedFile};

use crate::{
    aggregate::Aggregate,
    config::{consts::{ABOUT_FILE, README_FILE, SINGLE_PAGE_FILE}, ExportOptions, Layout},
};

/// Every file one run produces, per the export layout.
pub fn render_site(agg: &Aggregate, ctx: &RenderContext, export: &ExportOptions) -> Vec<RenderedFile> {
    let mut files = match export.layout {
        Layout::Single => vec![RenderedFile {
            name: s!(SINGLE_PAGE_FILE),
            contents: render_single_page(agg, ctx),
        }],
        Layout::Paginated => render_paginated(agg, ctx, export.species_per_page),
    };

    if export.about_pages && export.layout == Layout::Paginated {
        files.push(RenderedFile { name: s!(ABOUT_FILE), contents: about::render_about_page(ctx.last_update) });
        files.push(RenderedFile { name: s!(README_FILE), contents: about::render_readme(ctx.last_update) });
    }
    files
}
