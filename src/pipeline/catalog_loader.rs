use tracing::info;

use super::observed;
use crate::app::ports::CatalogClientPort;
use crate::constants::STAGE_REGIONS;
use crate::request_state::RequestState;
use crate::types::Region;

/// Fetches the full region list. Transport and decode failures both collapse to `Failed`.
pub async fn load_regions<C>(client: &C) -> RequestState<Vec<Region>>
where
    C: CatalogClientPort + ?Sized,
{
    match observed(STAGE_REGIONS, client.list_regions()).await {
        Ok(regions) => {
            info!(count = regions.len(), "Loaded regions");
            RequestState::Ready(regions)
        }
        Err(_) => RequestState::Failed,
    }
}
