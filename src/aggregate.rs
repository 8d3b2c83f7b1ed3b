// src/aggregate.rs
//! Per-species accumulation of normalized observations.
//!
//! One [`Aggregate`] lives for one run: the pager fills it, the runner sorts each
//! species chronologically, then rendering reads it. Keys are exact strings, so
//! `"Turdus leucomelas"` and `"turdus leucomelas"` are two species.
use std::collections::BTreeMap;

use crate::specs::NormalizedObservation;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeciesAggregate {
    /// Taken from the first observation seen for this species.
    pub species_id: String,
    /// `(lat, lon)`, one per observation, in fetch order.
    coordinates: Vec<(f64, f64)>,
    observations: Vec<NormalizedObservation>,
}

impl SpeciesAggregate {
    fn new(species_id: &str) -> Self {
        Self { species_id: s!(species_id), ..Self::default() }
    }

    pub fn coordinates(&self) -> &[(f64, f64)] {
        &self.coordinates
    }

    pub fn observations(&self) -> &[NormalizedObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Order observations by `observed_on` (lexicographic, stable). Dates are
    /// ISO `YYYY-MM-DD`, so this is chronological; `"Unknown"` sorts last.
    /// Coordinates keep fetch order; they only feed the heatmap.
    pub fn sort_chronologically(&mut self) {
        self.observations.sort_by(|a, b| a.observed_on.cmp(&b.observed_on));
    }

    /// Earliest observation once [`sort_chronologically`](Self::sort_chronologically) ran.
    pub fn first(&self) -> Option<&NormalizedObservation> {
        self.observations.first()
    }

    /// Most recent observation once [`sort_chronologically`](Self::sort_chronologically) ran.
    pub fn latest(&self) -> Option<&NormalizedObservation> {
        self.observations.last()
    }
}

/// species key → accumulated observations. Iterates in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregate {
    species: BTreeMap<String, SpeciesAggregate>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation under its species. No de-duplication: the same
    /// record ingested twice counts twice.
    pub fn ingest(&mut self, obs: NormalizedObservation) {
        let entry = self
            .species
            .entry(obs.species_key.clone())
            .or_insert_with(|| SpeciesAggregate::new(&obs.species_id));
        entry.coordinates.push((obs.latitude, obs.longitude));
        entry.observations.push(obs);
    }

    pub fn get(&self, key: &str) -> Option<&SpeciesAggregate> {
        self.species.get(key)
    }

    /// Species keys, sorted.
    pub fn species_keys(&self) -> Vec<String> {
        self.species.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SpeciesAggregate)> {
        self.species.iter()
    }

    /// Number of distinct species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn total_observations(&self) -> usize {
        self.species.values().map(SpeciesAggregate::len).sum()
    }

    /// Every point of every species, for the complete heatmap.
    pub fn all_coordinates(&self) -> Vec<(f64, f64)> {
        self.species
            .values()
            .flat_map(|s| s.coordinates.iter().copied())
            .collect()
    }

    pub fn sort_chronologically(&mut self) {
        for s in self.species.values_mut() {
            s.sort_chronologically();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(id: u64, species: &str, date: &str, lat: f64) -> NormalizedObservation {
        NormalizedObservation {
            id: Some(id),
            latitude: lat,
            longitude: -46.7,
            species_key: s!(species),
            species_id: format!("{}", species.len()),
            photo_url: s!(),
            license: s!("N/A"),
            contributor: s!("Unknown"),
            observed_on: s!(date),
            source_url: s!(),
        }
    }

    #[test]
    fn lengths_stay_equal_and_match_per_key_counts() {
        let mut agg = Aggregate::new();
        let input = [
            obs(1, "A a", "2024-01-02", -23.0),
            obs(2, "B b", "2024-01-01", -23.1),
            obs(3, "A a", "2023-12-31", -23.2),
            obs(4, "C c", "2024-02-01", -23.3),
            obs(5, "A a", "2024-05-05", -23.4),
        ];
        for o in input.iter().cloned() {
            agg.ingest(o);
        }
        for (key, s) in agg.iter() {
            let expected = input.iter().filter(|o| &o.species_key == key).count();
            assert_eq!(s.coordinates().len(), s.observations().len());
            assert_eq!(s.len(), expected);
        }
        assert_eq!(agg.len(), 3);
        assert_eq!(agg.total_observations(), 5);
        assert_eq!(agg.all_coordinates().len(), 5);
    }

    #[test]
    fn first_observation_seeds_species_id_and_order_is_fetch_order() {
        let mut agg = Aggregate::new();
        let mut first = obs(1, "A a", "2024-01-02", -23.0);
        first.species_id = s!("111");
        let mut second = obs(2, "A a", "2024-01-01", -23.5);
        second.species_id = s!("222");
        agg.ingest(first);
        agg.ingest(second);

        let a = agg.get("A a").unwrap();
        assert_eq!(a.species_id, "111");
        assert_eq!(a.coordinates(), &[(-23.0, -46.7), (-23.5, -46.7)]);
        assert_eq!(a.observations()[0].id, Some(1));
    }

    #[test]
    fn duplicates_are_counted_twice() {
        let mut agg = Aggregate::new();
        let o = obs(9, "A a", "2024-01-01", -23.0);
        agg.ingest(o.clone());
        agg.ingest(o);
        assert_eq!(agg.get("A a").unwrap().len(), 2);
    }

    #[test]
    fn keys_are_case_sensitive_and_sorted() {
        let mut agg = Aggregate::new();
        agg.ingest(obs(1, "b b", "2024-01-01", 0.0));
        agg.ingest(obs(2, "B b", "2024-01-01", 0.0));
        agg.ingest(obs(3, "A a", "2024-01-01", 0.0));
        assert_eq!(agg.species_keys(), vec!["A a", "B b", "b b"]);
    }

    #[test]
    fn chronological_sort_puts_unknown_last() {
        let mut agg = Aggregate::new();
        agg.ingest(obs(1, "A a", "2024-03-01", 0.0));
        agg.ingest(obs(2, "A a", "Unknown", 0.0));
        agg.ingest(obs(3, "A a", "2019-07-15", 0.0));
        agg.sort_chronologically();

        let a = agg.get("A a").unwrap();
        assert_eq!(a.first().unwrap().id, Some(3));
        assert_eq!(a.latest().unwrap().id, Some(2));
        // coordinates untouched
        assert_eq!(a.coordinates().len(), 3);
    }
}
