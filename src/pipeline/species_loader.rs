use tracing::info;

use super::observed;
use crate::app::ports::CatalogClientPort;
use crate::constants::STAGE_SPECIES;
use crate::request_state::RequestState;
use crate::types::Species;

/// Fetches the species list for one region.
pub async fn load_species<C>(client: &C, region_identifier: &str) -> RequestState<Vec<Species>>
where
    C: CatalogClientPort + ?Sized,
{
    match observed(STAGE_SPECIES, client.species_for_region(region_identifier)).await {
        Ok(species) => {
            info!(region = region_identifier, count = species.len(), "Loaded species");
            RequestState::Ready(species)
        }
        Err(_) => RequestState::Failed,
    }
}
