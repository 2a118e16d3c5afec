use serde::{Deserialize, Serialize};

/// A catalog region. Identity is `identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub identifier: String,
}

/// A species assessment as listed for one region. Identity is `taxon_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub scientific_name: String,
    #[serde(rename = "taxonid")]
    pub taxon_id: u64,
    pub class_name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Measure {
    pub title: String,
}

// Wire envelopes

#[derive(Debug, Deserialize)]
pub struct RegionListResponse {
    pub results: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesListResponse {
    pub result: Vec<Species>,
}

#[derive(Debug, Deserialize)]
pub struct MeasuresResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<Measure>,
}

impl MeasuresResponse {
    /// Titles joined for display. No measures yields an empty string.
    pub fn joined_titles(&self) -> String {
        self.result
            .iter()
            .map(|m| m.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Measure>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Measure>>::deserialize(deserializer)?.unwrap_or_default())
}
