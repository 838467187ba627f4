//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_page_size() -> usize {
    20
}

fn default_connect_timeout_secs() -> u64 {
    5
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signs the flash message cookie; at least 64 bytes.
    pub secret: String,
    /// Root of the catalog REST API, e.g. `http://localhost:8080/api`.
    pub backend_url: String,
    /// Products per page in the product list.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ServerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
