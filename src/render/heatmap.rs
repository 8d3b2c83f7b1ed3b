// src/render/heatmap.rs
//! Leaflet heatmap for a set of `(lat, lon)` points.
//!
//! The page head must load `leaflet.js`, `leaflet.css` and `leaflet-heat.js`
//! (see [`super::pages::LEAFLET_HEAD`]).
use std::fmt::Write;

use crate::config::consts::HEATMAP_RADIUS;

#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapView {
    /// `[lat, lon, weight]`, every point weighted 1.0.
    pub points: Vec<[f64; 3]>,
    /// Mean of all points, `(0, 0)` when there are none.
    pub center: (f64, f64),
    /// `((min_lat, min_lon), (max_lat, max_lon))`, `(0, 0)` corners when empty.
    pub bounds: ((f64, f64), (f64, f64)),
}

impl HeatmapView {
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Self {
        if coords.is_empty() {
            return Self { points: Vec::new(), center: (0.0, 0.0), bounds: ((0.0, 0.0), (0.0, 0.0)) };
        }

        let n = coords.len() as f64;
        let (mut sum_lat, mut sum_lon) = (0.0, 0.0);
        let (mut min_lat, mut min_lon) = (f64::INFINITY, f64::INFINITY);
        let (mut max_lat, mut max_lon) = (f64::NEG_INFINITY, f64::NEG_INFINITY);

        for &(lat, lon) in coords {
            sum_lat += lat;
            sum_lon += lon;
            min_lat = min_lat.min(lat);
            min_lon = min_lon.min(lon);
            max_lat = max_lat.max(lat);
            max_lon = max_lon.max(lon);
        }

        Self {
            points: coords.iter().map(|&(lat, lon)| [lat, lon, 1.0]).collect(),
            center: (sum_lat / n, sum_lon / n),
            bounds: ((min_lat, min_lon), (max_lat, max_lon)),
        }
    }

    /// A 400px-high map container plus the script that fills it. `dom_id` must
    /// be unique within the page and safe to use as an HTML id.
    pub fn to_html(&self, dom_id: &str) -> String {
        let points = serde_json::to_string(&self.points).unwrap_or_else(|_| s!("[]"));
        let ((s, w), (n, e)) = self.bounds;
        let (clat, clon) = self.center;

        let mut html = String::with_capacity(points.len() + 640);
        let _ = write!(
            html,
            r#"<div id="{dom_id}" style="width: 100%; height: 400px;"></div>
<script>
(function () {{
    var map = L.map("{dom_id}").setView([{clat}, {clon}], 15);
    L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
        maxZoom: 19,
        attribution: "&copy; OpenStreetMap contributors"
    }}).addTo(map);
    L.heatLayer({points}, {{ radius: {HEATMAP_RADIUS} }}).addTo(map);
    map.fitBounds([[{s}, {w}], [{n}, {e}]]);
}})();
</script>"#
        );
        html
    }
}
