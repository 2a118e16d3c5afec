pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod request_state;
pub mod types;
pub mod view;

// Ports and their adapters
pub mod app;
pub mod infra;

// The cascading fetch pipeline itself
pub mod pipeline;

pub use config::{Config, ViewLimit};
pub use error::{CatalogError, Result};
pub use pipeline::{Orchestrator, PipelineState};
pub use request_state::RequestState;
