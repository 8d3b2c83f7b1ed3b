// src/specs/observations.rs
//
// Shape of `/v1/observations` and the record normalizer.
//
// Ground truth per record (all optional on the wire):
//   id, geojson.coordinates = [lon, lat], taxon.{name,id},
//   photos[].{url,license_code}, user.login, observed_on, uri

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::config::consts::{NO_LICENSE, UNKNOWN};
use crate::core::sanitize::display_photo_url;

/// One page of results as returned by the API.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "PageWire")]
pub struct ObservationsPage {
    /// Informational only; paging never relies on it.
    pub total_results: Option<u64>,
    pub results: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct PageWire {
    total_results: Option<u64>,
    #[serde(default)]
    results: Option<Vec<Value>>,
}

impl From<PageWire> for ObservationsPage {
    fn from(w: PageWire) -> Self {
        Self {
            total_results: w.total_results,
            results: w.results.unwrap_or_default().into_iter().map(RawRecord::from).collect(),
        }
    }
}

/// One result as it came off the wire. Each field is decoded on its own: a
/// field with an unexpected type reads as absent and the rest of the record
/// survives. A result that is not an object at all decodes to an empty record,
/// which [`normalize`] rejects.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub geojson: Option<GeoJson>,
    #[serde(default, deserialize_with = "lenient")]
    pub taxon: Option<Taxon>,
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Option<Vec<Photo>>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "lenient")]
    pub observed_on: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GeoJson {
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Taxon {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Photo {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub license_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient")]
    pub login: Option<String>,
}

/// `null`, a missing field and a value of the wrong type all read as `None`.
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl From<Value> for RawRecord {
    fn from(v: Value) -> Self {
        serde_json::from_value(v).unwrap_or_default()
    }
}

impl RawRecord {
    /// `(lat, lon)` if the record carries at least two finite coordinates.
    fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.geojson.as_ref()?.coordinates.as_deref()? {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some((*lat, *lon)),
            _ => None,
        }
    }

    fn first_photo(&self) -> Option<&Photo> {
        self.photos.as_deref()?.first()
    }
}

/// A record that passed the coordinates + photo filter, with every field resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedObservation {
    pub id: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
    pub species_key: String,
    pub species_id: String,
    pub photo_url: String,
    pub license: String,
    pub contributor: String,
    pub observed_on: String,
    pub source_url: String,
}

/// Validate and extract one record. `None` means the record is filtered out
/// (no usable coordinates or no photos); that is not an error.
pub fn normalize(raw: &RawRecord) -> Option<NormalizedObservation> {
    let (latitude, longitude) = raw.lat_lon()?;
    let photo = raw.first_photo()?;

    let (species_key, species_id) = match &raw.taxon {
        Some(t) => (
            t.name.clone().unwrap_or_else(|| s!(UNKNOWN)),
            t.id.map(|id| id.to_string()).unwrap_or_default(),
        ),
        None => (s!(UNKNOWN), s!()),
    };

    Some(NormalizedObservation {
        id: raw.id,
        latitude,
        longitude,
        species_key,
        species_id,
        photo_url: photo.url.as_deref().map(display_photo_url).unwrap_or_default(),
        license: photo.license_code.clone().unwrap_or_else(|| s!(NO_LICENSE)),
        contributor: raw
            .user
            .as_ref()
            .and_then(|u| u.login.clone())
            .unwrap_or_else(|| s!(UNKNOWN)),
        observed_on: raw.observed_on.clone().unwrap_or_else(|| s!(UNKNOWN)),
        source_url: raw.uri.clone().unwrap_or_default(),
    })
}
