//! Per-species conservation measures: the fan-out stage and its result index.
//!
//! One fetch is issued per critically endangered species, all at once, and
//! each resolution is written into the [`MeasuresIndex`] as it arrives. A
//! failed fetch only ever touches its own entry.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use super::observed;
use crate::app::ports::CatalogClientPort;
use crate::constants::{GENERIC_ERROR_MESSAGE, STAGE_MEASURES};
use crate::error::CatalogError;
use crate::observability::catalog as metrics;
use crate::request_state::RequestState;
use crate::types::Species;

/// Outcome of each measures fetch, keyed by taxon id.
///
/// An entry exists only once its fetch has been issued. It starts `Pending`
/// and receives exactly one terminal write. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MeasuresIndex {
    entries: BTreeMap<u64, RequestState<String>>,
}

impl MeasuresIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an outgoing fetch. Returns false if the taxon was already issued.
    pub fn issue(&mut self, taxon_id: u64) -> bool {
        if self.entries.contains_key(&taxon_id) {
            return false;
        }
        self.entries.insert(taxon_id, RequestState::Pending);
        true
    }

    /// The single write path for a resolved fetch. Unknown keys and keys that
    /// already hold a terminal value are left untouched.
    pub fn record(&mut self, taxon_id: u64, outcome: Result<String, CatalogError>) -> bool {
        match self.entries.get_mut(&taxon_id) {
            Some(entry) => entry.settle(outcome),
            None => false,
        }
    }

    pub fn get(&self, taxon_id: u64) -> Option<&RequestState<String>> {
        self.entries.get(&taxon_id)
    }

    /// `Ok(titles)` or `Err(user message)` once resolved; `None` while absent or in flight.
    pub fn outcome(&self, taxon_id: u64) -> Option<Result<&str, &'static str>> {
        match self.entries.get(&taxon_id)? {
            RequestState::Ready(titles) => Some(Ok(titles.as_str())),
            RequestState::Failed => Some(Err(GENERIC_ERROR_MESSAGE)),
            RequestState::NotStarted | RequestState::Pending => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.entries.values().filter(|s| s.is_pending()).count()
    }
}

pub struct MeasuresFanoutCoordinator<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C> MeasuresFanoutCoordinator<'a, C>
where
    C: CatalogClientPort + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Issues one fetch per species, concurrently, and records each result as it
    /// lands. `species` is expected to be already limited. Returns the number of
    /// fetches issued.
    pub async fn fan_out(&self, species: &[Species], index: &mut MeasuresIndex) -> usize {
        self.fan_out_with(species, index, |_| {}).await
    }

    /// Like [`fan_out`](Self::fan_out), calling `on_change` once all fetches are
    /// issued and again after every recorded resolution.
    #[instrument(skip_all, fields(species = species.len()))]
    pub async fn fan_out_with(
        &self,
        species: &[Species],
        index: &mut MeasuresIndex,
        mut on_change: impl FnMut(&MeasuresIndex),
    ) -> usize {
        let mut in_flight = FuturesUnordered::new();

        for s in species {
            let taxon_id = s.taxon_id;
            if !index.issue(taxon_id) {
                warn!(taxon_id, "Measures already requested for taxon, skipping");
                continue;
            }
            let client = self.client;
            in_flight.push(async move {
                let outcome = observed(STAGE_MEASURES, client.measures_for_species(taxon_id)).await;
                (taxon_id, outcome.map(|body| body.joined_titles()))
            });
        }

        let issued = in_flight.len();
        metrics::measures_fanout(issued);
        info!(issued, "Measures requests issued");
        on_change(index);

        while let Some((taxon_id, outcome)) = in_flight.next().await {
            debug!(taxon_id, ok = outcome.is_ok(), "Measures resolved");
            if index.record(taxon_id, outcome) {
                on_change(index);
            } else {
                warn!(taxon_id, "Dropped measures result for unknown or settled taxon");
            }
        }

        issued
    }
}
