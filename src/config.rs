use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_VIEW_LIMIT, ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOKEN,
    ENV_VIEW_LIMIT,
};
use crate::error::{CatalogError, Result};

/// Upper bound on every surfaced list, and on the number of measures fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimit(usize);

impl ViewLimit {
    pub fn new(limit: usize) -> Option<Self> {
        (limit > 0).then_some(Self(limit))
    }

    /// Parses a positive integer; anything else falls back to the default.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<usize>().ok())
            .and_then(Self::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ViewLimit {
    fn default() -> Self {
        Self(DEFAULT_VIEW_LIMIT)
    }
}

impl fmt::Display for ViewLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub token: String,
    pub view_limit: ViewLimit,
    pub timeout: Duration,
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("view_limit", &self.view_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Shape of the optional TOML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    token: Option<String>,
    view_limit: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load from an optional TOML file, then let environment variables override.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Self::read_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |v: String| (!v.trim().is_empty()).then_some(v);

        let api_url = env(ENV_API_URL)
            .and_then(non_empty)
            .or_else(|| file.api_url.and_then(non_empty))
            .ok_or_else(|| CatalogError::Config(format!("{} is required", ENV_API_URL)))?;
        let token = env(ENV_TOKEN)
            .and_then(non_empty)
            .or_else(|| file.token.and_then(non_empty))
            .ok_or_else(|| CatalogError::Config(format!("{} is required", ENV_TOKEN)))?;
        let view_limit = ViewLimit::parse(env(ENV_VIEW_LIMIT).or(file.view_limit).as_deref());
        // A zero timeout would fail every request, so it counts as unset
        let timeout_secs = env(ENV_TIMEOUT_SECS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .or(file.timeout_secs.filter(|secs| *secs > 0))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            token,
            view_limit,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Ensures `base + path` joins with exactly one slash.
pub fn normalize_base_url(raw: &str) -> String {
    format!("{}/", raw.trim().trim_end_matches('/'))
}
