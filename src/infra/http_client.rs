use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::app::ports::CatalogClientPort;
use crate::config::Config;
use crate::constants::{measures_by_species_path, species_by_region_path, REGION_LIST_PATH};
use crate::error::{CatalogError, Result};
use crate::types::{MeasuresResponse, Region, RegionListResponse, Species, SpeciesListResponse};

/// Catalog client over HTTP GET with the token passed as a query parameter.
pub struct ReqwestCatalogClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ReqwestCatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url_for(path);
        debug!(url = %url, "GET");

        let resp = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        // Decode from bytes so shape mismatches surface as Decode, not Transport
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogClientPort for ReqwestCatalogClient {
    #[instrument(skip(self))]
    async fn list_regions(&self) -> Result<Vec<Region>> {
        let body: RegionListResponse = self.get_json(REGION_LIST_PATH).await?;
        Ok(body.results)
    }

    #[instrument(skip(self))]
    async fn species_for_region(&self, region_identifier: &str) -> Result<Vec<Species>> {
        let body: SpeciesListResponse = self
            .get_json(&species_by_region_path(region_identifier))
            .await?;
        Ok(body.result)
    }

    #[instrument(skip(self))]
    async fn measures_for_species(&self, taxon_id: u64) -> Result<MeasuresResponse> {
        self.get_json(&measures_by_species_path(taxon_id)).await
    }
}
