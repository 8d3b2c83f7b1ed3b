// src/render/pages.rs
//
// Heatmap pages. Two layouts:
//   single     one page, complete heatmap first, then every species with its first observation
//   paginated  N species per page, species dropdown, first + most recent observation,
//              optional wiki summary, prev/next links, footer
//
// Both expect each species' observations already sorted chronologically.

use std::collections::BTreeMap;
use std::fmt::Write;

use url::Url;

use super::heatmap::HeatmapView;
use crate::{
    aggregate::{Aggregate, SpeciesAggregate},
    config::{consts::{SITE_BASE, UNKNOWN}, ExportOptions},
    core::sanitize::{escape_html, underscore_spaces},
    specs::NormalizedObservation,
};

pub const LEAFLET_HEAD: &str = r#"<script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js"></script>
    <script src="https://cdn.jsdelivr.net/gh/python-visualization/folium@main/folium/templates/leaflet_heat.min.js"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css"/>"#;

pub const AUTHOR: &str = "Tiago Lubiana";
pub const REPO_URL: &str = "https://github.com/lubianat/inat_heatmap";
pub const CC_BY_URL: &str = "https://creativecommons.org/licenses/by/4.0/";
pub const CC_BY_SA_URL: &str = "https://creativecommons.org/licenses/by-sa/4.0/";

const HEADING: &str = "Observações de aves no campus da USP via iNaturalist";

const BASE_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; text-align: center; }
        .map-container { margin-bottom: 20px; }
        .map-title { font-size: 1.2em; margin-top: 20px; font-style: italic; }
        .species-container { display: flex; justify-content: center; align-items: center; margin-bottom: 20px; }
        .species-info { margin-left: 20px; text-align: left; }
        .species-info img { max-width: 300px; height: auto; }
        .subheader { font-size: 1em; margin-top: 15px; font-style: normal; }"#;

const NAV_STYLE: &str = r#"
        .navbar { display: flex; justify-content: center; margin-bottom: 20px; }
        .navbar select { font-size: 1em; padding: 5px; }
        .bottom-nav { display: flex; justify-content: center; margin-top: 20px; }
        .bottom-nav a { margin: 0 5px; text-decoration: none; font-size: 1.2em; padding: 10px 20px; background-color: #007BFF; color: white; border-radius: 5px; }
        .bottom-nav a:hover { background-color: #0056b3; }
        .image-header { font-weight: bold; margin-top: 10px; }
        .image-row { display: flex; justify-content: space-around; align-items: center; }
        .species-description { margin-top: 20px; text-align: left; max-width: 800px; margin-left: auto; margin-right: auto; }
        .footer { margin-top: 40px; font-size: 0.9em; color: #555; }"#;

const NAV_SCRIPT: &str = r#"
    <script>
        function navigateToSpecies() {
            var select = document.getElementById('species-select');
            var page = select.value;
            if (page) {
                window.location.href = page;
            }
        }
    </script>"#;

/// Everything a page needs besides the aggregate.
#[derive(Clone, Debug)]
pub struct RenderContext<'a> {
    pub place_id: u64,
    pub iconic_taxa: &'a str,
    pub wiki_lang: &'a str,
    /// `YYYY-MM-DD`, shown in footers.
    pub last_update: &'a str,
    /// Species summaries; `None` leaves the description block out entirely.
    pub descriptions: Option<&'a BTreeMap<String, String>>,
    pub fallback: &'a str,
}

impl RenderContext<'_> {
    /// Observation map filtered to this place and taxon, plus `extra` query pairs.
    fn map_url(&self, extra: &[(&str, &str)]) -> String {
        let Ok(mut url) = Url::parse(SITE_BASE) else { return s!() };
        url.query_pairs_mut()
            .append_pair("iconic_taxa", self.iconic_taxa)
            .append_pair("place_id", &self.place_id.to_string())
            .append_pair("subview", "map")
            .extend_pairs(extra);
        url.into()
    }

    pub fn species_url(&self, species_id: &str) -> String {
        self.map_url(&[("taxon_id", species_id)])
    }

    /// Empty for the "Unknown" contributor.
    pub fn user_url(&self, login: &str) -> String {
        if login == UNKNOWN {
            s!()
        } else {
            self.map_url(&[("user_id", login)])
        }
    }

    pub fn wiki_url(&self, species_key: &str) -> String {
        format!("https://{}.wikipedia.org/wiki/{}", self.wiki_lang, underscore_spaces(species_key))
    }

    fn description(&self, species_key: &str) -> Option<&str> {
        let map = self.descriptions?;
        Some(map.get(species_key).map(String::as_str).unwrap_or(self.fallback))
    }
}

/// One output file, not yet written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFile {
    pub name: String,
    pub contents: String,
}

pub fn page_count(species: usize, per_page: usize) -> usize {
    species.div_ceil(per_page.max(1))
}

/// Single-page layout: complete heatmap, then each species with its first observation.
pub fn render_single_page(agg: &Aggregate, ctx: &RenderContext) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Heatmaps</title>
    <style>{BASE_STYLE}
    </style>
    {LEAFLET_HEAD}
</head>
<body>
    <h2>{HEADING}</h2>
"#
    );

    let complete = HeatmapView::from_coordinates(&agg.all_coordinates()).to_html("heatmap_all");
    let _ = write!(
        html,
        r#"
    <div class="species-container">
        <div class="map-container">
            <div class="map-title">Complete Heatmap</div>
            {complete}
        </div>
    </div>
"#
    );

    for (i, (key, species)) in agg.iter().enumerate() {
        let Some(first) = species.first() else { continue };
        let name = escape_html(key);
        let _ = write!(
            html,
            r#"
    <div class="species-container">
        <div class="map-container">
            <div class="map-title"><a href="{url}" target="_blank">{n}. {name}</a></div>
            <div class="subheader">Research Grade observations: {count}</div>
            {map}
        </div>
        <div class="species-info">
            {photo}
        </div>
    </div>
"#,
            url = escape_html(&ctx.species_url(&species.species_id)),
            n = i + 1,
            count = species.len(),
            map = species_map(species, i + 1),
            photo = photo_credit(first, &name, ctx),
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Paginated layout: `ceil(n / per_page)` files named `heatmaps_page_{n}.html`.
pub fn render_paginated(agg: &Aggregate, ctx: &RenderContext, per_page: usize) -> Vec<RenderedFile> {
    let per_page = per_page.max(1);
    let keys = agg.species_keys();
    let total_pages = page_count(keys.len(), per_page);
    let options = species_options(&keys, per_page);

    let mut files = Vec::with_capacity(total_pages);
    for (page_ix, chunk) in keys.chunks(per_page).enumerate() {
        let page_num = page_ix + 1;
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Heatmaps - Página {page_num}</title>
    <style>{BASE_STYLE}{NAV_STYLE}
    </style>
    {LEAFLET_HEAD}
</head>
<body>
    <h2>{HEADING}</h2>
    <div class="navbar">
        <select id="species-select" onchange="navigateToSpecies()">
            <option value="">Selecione uma espécie</option>
{options}        </select>
    </div>
"#
        );

        for (offset, key) in chunk.iter().enumerate() {
            let Some(species) = agg.get(key) else { continue };
            species_section(&mut html, key, species, page_ix * per_page + offset + 1, ctx);
        }

        html.push_str(r#"    <div class="bottom-nav">"#);
        if page_num > 1 {
            let _ = write!(html, r#"<a href="{}">Anterior</a>"#, ExportOptions::page_file_name(page_num - 1));
        }
        if page_num < total_pages {
            let _ = write!(html, r#"<a href="{}">Próxima</a>"#, ExportOptions::page_file_name(page_num + 1));
        }
        html.push_str("</div>\n");

        footer(&mut html, ctx);
        html.push_str(NAV_SCRIPT);
        html.push_str("\n</body>\n</html>\n");

        files.push(RenderedFile { name: ExportOptions::page_file_name(page_num), contents: html });
    }
    files
}

/* ---------- helpers ---------- */

fn species_map(species: &SpeciesAggregate, n: usize) -> String {
    HeatmapView::from_coordinates(species.coordinates()).to_html(&format!("heatmap_{n}"))
}

/// `<option>` for every species, pointing at its page and anchor.
fn species_options(keys: &[String], per_page: usize) -> String {
    let mut out = String::new();
    for (i, key) in keys.iter().enumerate() {
        let page = ExportOptions::page_file_name(i / per_page + 1);
        let _ = writeln!(
            out,
            r#"            <option value="{page}#{anchor}">{name}</option>"#,
            anchor = escape_html(&underscore_spaces(key)),
            name = escape_html(key),
        );
    }
    out
}

fn photo_credit(obs: &NormalizedObservation, alt: &str, ctx: &RenderContext) -> String {
    format!(
        r#"<a href="{obs_url}" target="_blank">
                <img src="{img}" alt="{alt}">
            </a>
            <p><a href="{user_url}" target="_blank">{user}</a>, {license} ({date})</p>"#,
        obs_url = escape_html(&obs.source_url),
        img = escape_html(&obs.photo_url),
        user_url = escape_html(&ctx.user_url(&obs.contributor)),
        user = escape_html(&obs.contributor),
        license = escape_html(&obs.license),
        date = escape_html(&obs.observed_on),
    )
}

fn species_section(html: &mut String, key: &str, species: &SpeciesAggregate, n: usize, ctx: &RenderContext) {
    let (Some(first), Some(latest)) = (species.first(), species.latest()) else { return };
    let name = escape_html(key);

    let _ = write!(
        html,
        r#"
    <div class="species-container" id="{anchor}">
        <div class="map-container">
            <div class="map-title"><a href="{url}" target="_blank">{n}. {name}</a></div>
            <div class="subheader">Observações em Nível de Pesquisa: {count}</div>
            {map}
        </div>
        <div class="species-info">
            <div class="image-row">
                <div>
                    <div class="image-header">Primeira Observação</div>
                    {first_credit}
                </div>
                <div>
                    <div class="image-header">Observação Mais Recente</div>
                    {latest_credit}
                </div>
            </div>
"#,
        anchor = escape_html(&underscore_spaces(key)),
        url = escape_html(&ctx.species_url(&species.species_id)),
        count = species.len(),
        map = species_map(species, n),
        first_credit = photo_credit(first, &name, ctx),
        latest_credit = photo_credit(latest, &name, ctx),
    );

    if let Some(text) = ctx.description(key) {
        // wiki summaries arrive as HTML and are embedded as-is
        let _ = write!(
            html,
            r#"            <div class="species-description">
                <p>{text}</p>
                <p><a href="{wiki}" target="_blank">Link para Wikipedia</a></p>
            </div>
"#,
            wiki = escape_html(&ctx.wiki_url(key)),
        );
    }

    html.push_str("        </div>\n    </div>\n");
}

fn footer(html: &mut String, ctx: &RenderContext) {
    let _ = write!(
        html,
        r#"    <div class="footer">
        <p>Desenvolvido por {AUTHOR}</p>
        <p><a href="{REPO_URL}" target="_blank">Repositório no GitHub</a></p>
        <p>Licença: <a href="{CC_BY_URL}" target="_blank">CC-BY</a></p>
"#
    );
    if ctx.descriptions.is_some() {
        let _ = writeln!(
            html,
            r#"        <p>Conteúdo da Wikipedia licenciado em <a href="{CC_BY_SA_URL}" target="_blank">CC-BY-SA</a></p>"#
        );
    }
    let _ = write!(
        html,
        "        <p>Última atualização: {}</p>\n    </div>\n",
        escape_html(ctx.last_update)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(id: u64, species: &str, date: &str, user: &str) -> NormalizedObservation {
        NormalizedObservation {
            id: Some(id),
            latitude: -23.56,
            longitude: -46.73,
            species_key: s!(species),
            species_id: s!("100"),
            photo_url: format!("https://img/{id}/medium.jpg"),
            license: s!("cc-by"),
            contributor: s!(user),
            observed_on: s!(date),
            source_url: format!("https://www.inaturalist.org/observations/{id}"),
        }
    }

    fn ctx<'a>(descriptions: Option<&'a BTreeMap<String, String>>) -> RenderContext<'a> {
        RenderContext {
            place_id: 125852,
            iconic_taxa: "Aves",
            wiki_lang: "pt",
            last_update: "2026-10-19",
            descriptions,
            fallback: "Descrição não disponível.",
        }
    }

    fn aggregate(n_species: usize) -> Aggregate {
        let mut agg = Aggregate::new();
        for i in 0..n_species {
            let name = format!("Species {i:02}");
            agg.ingest(obs(2 * i as u64, &name, "2024-05-01", "ana"));
            agg.ingest(obs(2 * i as u64 + 1, &name, "2020-01-01", "bia"));
        }
        agg.sort_chronologically();
        agg
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn paginated_navigation_links() {
        let agg = aggregate(23);
        let files = render_paginated(&agg, &ctx(None), 10);
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].name, "heatmaps_page_1.html");

        let first = &files[0].contents;
        assert!(!first.contains("Anterior"));
        assert!(first.contains(r#"<a href="heatmaps_page_2.html">Próxima</a>"#));

        let middle = &files[1].contents;
        assert!(middle.contains(r#"<a href="heatmaps_page_1.html">Anterior</a>"#));
        assert!(middle.contains(r#"<a href="heatmaps_page_3.html">Próxima</a>"#));

        let last = &files[2].contents;
        assert!(last.contains(r#"<a href="heatmaps_page_2.html">Anterior</a>"#));
        assert!(!last.contains("Próxima"));

        // dropdown lists every species on every page, pointing to its own page
        for f in &files {
            assert!(f.contents.contains(r#"<option value="heatmaps_page_3.html#Species_22">Species 22</option>"#));
            assert!(f.contents.contains(r#"<option value="heatmaps_page_1.html#Species_00">Species 00</option>"#));
        }
        // numbering continues across pages
        assert!(last.contains("21. Species 20"));
        assert!(last.contains(r#"id="Species_22""#));
    }

    #[test]
    fn species_section_shows_first_and_latest() {
        let agg = aggregate(1);
        let files = render_paginated(&agg, &ctx(None), 10);
        let html = &files[0].contents;
        let first_pos = html.find("Primeira Observação").unwrap();
        let latest_pos = html.find("Observação Mais Recente").unwrap();
        let bia = html.find("(2020-01-01)").unwrap();
        let ana = html.find("(2024-05-01)").unwrap();
        assert!(first_pos < bia && bia < latest_pos && latest_pos < ana);
        assert!(html.contains("user_id=bia"));
        assert!(html.contains("Observações em Nível de Pesquisa: 2"));
        assert!(!html.contains("species-description"));
        assert!(!html.contains("CC-BY-SA"));
    }

    #[test]
    fn descriptions_use_fallback_for_missing_keys() {
        let mut agg = aggregate(2);
        agg.ingest(obs(99, "Zz top", "2024-01-01", "Unknown"));
        agg.sort_chronologically();
        let mut d = BTreeMap::new();
        d.insert(s!("Species 00"), s!("<p>Um <b>pássaro</b>.</p>"));
        let files = render_paginated(&agg, &ctx(Some(&d)), 10);
        let html = &files[0].contents;
        assert!(html.contains("<p><p>Um <b>pássaro</b>.</p></p>"));
        assert!(html.contains("<p>Descrição não disponível.</p>"));
        assert!(html.contains("https://pt.wikipedia.org/wiki/Zz_top"));
        assert!(html.contains("CC-BY-SA"));
        // unknown contributor gets no profile link
        assert!(html.contains(r#"<a href="" target="_blank">Unknown</a>"#));
    }

    #[test]
    fn single_page_has_complete_map_and_escapes_names() {
        let mut agg = Aggregate::new();
        agg.ingest(obs(1, "A <b>", "2024-01-01", "x&y"));
        agg.ingest(obs(2, "B b", "2023-01-01", "z"));
        agg.sort_chronologically();
        let html = render_single_page(&agg, &ctx(None));
        assert!(html.contains("Complete Heatmap"));
        assert!(html.contains(r#"L.map("heatmap_all")"#));
        assert!(html.contains("1. A &lt;b&gt;"));
        assert!(html.contains("2. B b"));
        assert!(html.contains(">x&amp;y</a>"));
        assert!(html.contains("Research Grade observations: 1"));
        assert!(html.contains("taxon_id=100"));
    }

    #[test]
    fn inat_links_encode_query_values() {
        let mut c = ctx(None);
        c.iconic_taxa = "Aves & Reptilia";
        assert_eq!(
            c.species_url("13858"),
            "https://www.inaturalist.org/observations?iconic_taxa=Aves+%26+Reptilia&place_id=125852&subview=map&taxon_id=13858"
        );
        assert!(c.user_url("ana maria&x=1").ends_with("&subview=map&user_id=ana+maria%26x%3D1"));
        assert_eq!(c.user_url("Unknown"), "");
    }

    #[test]
    fn empty_aggregate_renders_no_pages() {
        assert!(render_paginated(&Aggregate::new(), &ctx(None), 10).is_empty());
        let html = render_single_page(&Aggregate::new(), &ctx(None));
        assert!(html.contains("heatmap_all"));
    }
}
