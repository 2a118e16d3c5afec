/// Catalog endpoint paths, relative to the configured base URL.
pub const REGION_LIST_PATH: &str = "region/list";

pub fn species_by_region_path(region_identifier: &str) -> String {
    format!("species/region/{}/page/0", region_identifier)
}

pub fn measures_by_species_path(taxon_id: u64) -> String {
    format!("measures/species/id/{}", taxon_id)
}

// Classification tags, matched exactly
pub const MAMMAL_CLASS: &str = "MAMMALIA";
pub const CRITICALLY_ENDANGERED_CATEGORY: &str = "CR";

/// User-facing message attached to a failed measures fetch.
pub const GENERIC_ERROR_MESSAGE: &str = "Something happened.";

pub const DEFAULT_VIEW_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variables consumed by Config::load
pub const ENV_API_URL: &str = "CATALOG_API_URL";
pub const ENV_TOKEN: &str = "CATALOG_TOKEN";
pub const ENV_VIEW_LIMIT: &str = "CATALOG_VIEW_LIMIT";
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";

// Stage labels used in logs and metrics
pub const STAGE_REGIONS: &str = "regions";
pub const STAGE_SPECIES: &str = "species";
pub const STAGE_MEASURES: &str = "measures";
