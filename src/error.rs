use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Catalog responded with status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON deserialization failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// The request URL carries the API token, so it is stripped before the error
// can reach a log line or the terminal.
impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Transport(e.without_url())
    }
}

impl CatalogError {
    /// Network unreachable, timed out, or answered with a non-2xx status.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport(_) | CatalogError::Status { .. })
    }

    /// Response arrived but did not have the expected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
