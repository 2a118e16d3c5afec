//! In-memory catalog and random source used by the pipeline unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::app::ports::{CatalogClientPort, UniformSource};
use crate::error::{CatalogError, Result};
use crate::types::{Measure, MeasuresResponse, Region, Species};

pub fn region(name: &str, identifier: &str) -> Region {
    Region {
        name: name.to_string(),
        identifier: identifier.to_string(),
    }
}

pub fn species(taxon_id: u64, class_name: &str, category: &str) -> Species {
    Species {
        scientific_name: format!("Species {}", taxon_id),
        taxon_id,
        class_name: class_name.to_string(),
        category: category.to_string(),
    }
}

fn unavailable(path: &str) -> CatalogError {
    CatalogError::Status {
        status: 503,
        url: format!("fake://{}", path),
    }
}

fn malformed() -> CatalogError {
    serde_json::from_str::<MeasuresResponse>("\"not an object\"").unwrap_err().into()
}

enum Scripted<T> {
    Ok(T),
    Decode,
}

/// Catalog whose responses are scripted up front. Anything not scripted fails
/// with a transport error.
#[derive(Default)]
pub struct FakeCatalog {
    regions: Option<Scripted<Vec<Region>>>,
    species: HashMap<String, Vec<Species>>,
    measures: HashMap<u64, (Option<Vec<String>>, u64)>,
    calls: Mutex<Vec<String>>,
    completions: Mutex<Vec<u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = Some(Scripted::Ok(regions));
        self
    }

    pub fn with_malformed_regions(mut self) -> Self {
        self.regions = Some(Scripted::Decode);
        self
    }

    pub fn with_species(mut self, region_identifier: &str, species: Vec<Species>) -> Self {
        self.species.insert(region_identifier.to_string(), species);
        self
    }

    pub fn with_measures(mut self, taxon_id: u64, titles: &[&str], delay_ms: u64) -> Self {
        let titles = titles.iter().map(|t| t.to_string()).collect();
        self.measures.insert(taxon_id, (Some(titles), delay_ms));
        self
    }

    pub fn with_failing_measures(mut self, taxon_id: u64, delay_ms: u64) -> Self {
        self.measures.insert(taxon_id, (None, delay_ms));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Taxon ids that received a measures request, sorted.
    pub fn measures_calls(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .calls()
            .iter()
            .filter_map(|c| c.strip_prefix("measures:"))
            .filter_map(|id| id.parse().ok())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn measures_completions(&self) -> Vec<u64> {
        self.completions.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogClientPort for FakeCatalog {
    async fn list_regions(&self) -> Result<Vec<Region>> {
        self.log("regions".into());
        match &self.regions {
            Some(Scripted::Ok(regions)) => Ok(regions.clone()),
            Some(Scripted::Decode) => Err(malformed()),
            None => Err(unavailable("region/list")),
        }
    }

    async fn species_for_region(&self, region_identifier: &str) -> Result<Vec<Species>> {
        self.log(format!("species:{}", region_identifier));
        self.species
            .get(region_identifier)
            .cloned()
            .ok_or_else(|| unavailable(region_identifier))
    }

    async fn measures_for_species(&self, taxon_id: u64) -> Result<MeasuresResponse> {
        self.log(format!("measures:{}", taxon_id));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (titles, delay_ms) = self
            .measures
            .get(&taxon_id)
            .cloned()
            .unwrap_or((None, 0));
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completions.lock().unwrap().push(taxon_id);

        match titles {
            Some(titles) => Ok(MeasuresResponse {
                result: titles.into_iter().map(|title| Measure { title }).collect(),
            }),
            None => Err(unavailable("measures")),
        }
    }
}

/// Always picks the same index, clamped to the list length.
pub struct FixedIndex {
    index: usize,
    calls: usize,
}

impl FixedIndex {
    pub fn new(index: usize) -> Self {
        Self { index, calls: 0 }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl UniformSource for FixedIndex {
    fn pick_index(&mut self, len: usize) -> usize {
        self.calls += 1;
        self.index.min(len - 1)
    }
}
