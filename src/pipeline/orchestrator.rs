use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use super::catalog_loader::load_regions;
use super::classifier::classify;
use super::measures::{MeasuresFanoutCoordinator, MeasuresIndex};
use super::region_selector::select_random;
use super::species_loader::load_species;
use crate::app::ports::{CatalogClientPort, UniformSource};
use crate::config::ViewLimit;
use crate::request_state::RequestState;
use crate::types::{Region, Species};

/// Everything the view layer needs, and nothing that touches the network.
///
/// `selected_region` is `Ready(None)` when the catalog has no regions; that is
/// a finished run, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    pub regions: RequestState<Vec<Region>>,
    pub selected_region: RequestState<Option<Region>>,
    pub species: RequestState<Vec<Species>>,
    pub mammals: RequestState<Vec<Species>>,
    pub critically_endangered: RequestState<Vec<Species>>,
    pub measures: MeasuresIndex,
}

/// Drives the cascade once: regions, selection, species, classification, then
/// the measures fan-out. Owns all pipeline state and publishes a copy after
/// every transition, including each measures resolution.
pub struct Orchestrator<C, R> {
    client: C,
    random: R,
    limit: ViewLimit,
    state: PipelineState,
    updates: watch::Sender<PipelineState>,
}

impl<C, R> Orchestrator<C, R>
where
    C: CatalogClientPort,
    R: UniformSource,
{
    pub fn new(client: C, random: R, limit: ViewLimit) -> Self {
        Self {
            client,
            random,
            limit,
            state: PipelineState::default(),
            updates: watch::channel(PipelineState::default()).0,
        }
    }

    /// Receiver for the state as it changes during `run`. Only the latest value
    /// is kept, so a slow reader may skip intermediate states.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn snapshot(&self) -> PipelineState {
        self.state.clone()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs every stage whose trigger fires. Stage failures end the run early
    /// and are recorded in the state; nothing is returned as an error.
    #[instrument(skip(self), fields(limit = %self.limit))]
    pub async fn run(&mut self) -> &PipelineState {
        if !self.state.regions.start() {
            warn!("Pipeline already ran; ignoring");
            return &self.state;
        }
        self.state.selected_region.start();
        self.publish();

        let region = self.load_and_select_region().await;
        self.publish();
        let Some(region) = region else {
            return &self.state;
        };

        let critically_endangered = self.load_and_classify_species(&region).await;
        self.publish();
        let Some(critically_endangered) = critically_endangered else {
            return &self.state;
        };

        let updates = &self.updates;
        MeasuresFanoutCoordinator::new(&self.client)
            .fan_out_with(&critically_endangered, &mut self.state.measures, |index| {
                updates.send_modify(|published| published.measures = index.clone());
            })
            .await;

        info!(
            resolved = self.state.measures.len() - self.state.measures.pending(),
            "Pipeline finished"
        );
        &self.state
    }

    async fn load_and_select_region(&mut self) -> Option<Region> {
        let regions = load_regions(&self.client).await;

        let selected = match &regions {
            RequestState::Ready(list) => {
                let picked = select_random(list, &mut self.random);
                match &picked {
                    Some(region) => info!(region = %region.name, "Selected region"),
                    None => info!("Catalog has no regions; nothing to select"),
                }
                Ok(picked)
            }
            _ => Err(()),
        };

        self.state.regions = regions;
        self.state.selected_region.settle(selected.clone());
        selected.ok().flatten()
    }

    /// Loads species for the region and derives both views together. Returns
    /// the limited critically endangered list that drives the fan-out.
    async fn load_and_classify_species(&mut self, region: &Region) -> Option<Vec<Species>> {
        self.state.species.start();
        self.state.mammals.start();
        self.state.critically_endangered.start();
        self.publish();

        let species = load_species(&self.client, &region.identifier).await;

        let derived = species.ready().map(|all| classify(all, self.limit.get()));
        self.state.species = species;

        match derived {
            Some(classification) => {
                info!(
                    mammals = classification.mammals.len(),
                    critically_endangered = classification.critically_endangered.len(),
                    "Classified species"
                );
                let critically_endangered = classification.critically_endangered.clone();
                self.state.mammals.settle::<()>(Ok(classification.mammals));
                self.state
                    .critically_endangered
                    .settle::<()>(Ok(classification.critically_endangered));
                Some(critically_endangered)
            }
            None => {
                self.state.mammals.fail();
                self.state.critically_endangered.fail();
                None
            }
        }
    }
}
