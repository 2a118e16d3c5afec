// Adapters implementing the app ports

pub mod http_client;
pub mod random_source;

pub use http_client::ReqwestCatalogClient;
pub use random_source::RngUniformSource;
