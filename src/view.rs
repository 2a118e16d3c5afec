//! Plain-text rendering of a pipeline snapshot for the terminal.

use std::fmt::Write;

use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::pipeline::{MeasuresIndex, PipelineState};
use crate::request_state::{RequestState, NOT_STARTED_TEXT, PENDING_TEXT};
use crate::types::Species;

pub const NO_REGION_TEXT: &str = "No regions available.";
pub const NO_SPECIES_TEXT: &str = "None found.";
pub const NO_MEASURES_TEXT: &str = "No conservation measures found.";

pub fn render_text(state: &PipelineState) -> String {
    let mut out = String::new();

    let region: String = state.selected_region.render_or(|selected| match selected {
        Some(region) => format!("{} ({})", region.name, region.identifier),
        None => NO_REGION_TEXT.to_string(),
    });
    let _ = writeln!(out, "Region: {}", region);

    let _ = writeln!(out, "\nMammals:");
    out.push_str(&render_species_list(&state.mammals, |_| None));

    let _ = writeln!(out, "\nCritically endangered:");
    out.push_str(&render_species_list(&state.critically_endangered, |s| {
        Some(render_measures(&state.measures, s.taxon_id))
    }));

    out
}

fn render_species_list(
    list: &RequestState<Vec<Species>>,
    detail: impl Fn(&Species) -> Option<String>,
) -> String {
    list.render_or(|species| {
        if species.is_empty() {
            return format!("  {}\n", NO_SPECIES_TEXT);
        }
        let mut block = String::new();
        for s in species {
            let _ = writeln!(block, "  - {}", s.scientific_name);
            if let Some(line) = detail(s) {
                let _ = writeln!(block, "      Measures: {}", line);
            }
        }
        block
    })
    .lines()
    .map(|line| {
        // stock texts come back bare; indent them like list items
        if line.starts_with(' ') {
            format!("{}\n", line)
        } else {
            format!("  {}\n", line)
        }
    })
    .collect()
}

/// Empty titles and failures render differently.
pub fn render_measures(index: &MeasuresIndex, taxon_id: u64) -> String {
    match index.get(taxon_id) {
        None => NOT_STARTED_TEXT.to_string(),
        Some(entry) => entry.render(
            || GENERIC_ERROR_MESSAGE.to_string(),
            || NOT_STARTED_TEXT.to_string(),
            || PENDING_TEXT.to_string(),
            |titles| {
                if titles.is_empty() {
                    NO_MEASURES_TEXT.to_string()
                } else {
                    titles.clone()
                }
            },
        ),
    }
}
