use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MeasuresResponse, Region, Species};

/// The three catalog reads the pipeline depends on.
#[async_trait]
pub trait CatalogClientPort: Send + Sync {
    async fn list_regions(&self) -> Result<Vec<Region>>;
    async fn species_for_region(&self, region_identifier: &str) -> Result<Vec<Species>>;
    async fn measures_for_species(&self, taxon_id: u64) -> Result<MeasuresResponse>;
}

/// Uniform discrete choice over `0..len`. Callers never pass `len == 0`.
pub trait UniformSource: Send {
    fn pick_index(&mut self, len: usize) -> usize;
}
