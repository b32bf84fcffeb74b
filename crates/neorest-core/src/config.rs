//! Connection configuration.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (NEOREST_ prefix)
//! 2. Config file (neorest.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::GraphError;

const DEFAULT_HOST: &str = "http://127.0.0.1";
const DEFAULT_PORT: u16 = 7474;

/// Configuration for connecting to a Neo4j REST endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl GraphConfig {
    /// Build a config from an explicit host and port.
    ///
    /// An empty host or a zero port falls back to the default
    /// (`http://127.0.0.1:7474`).
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        Self {
            host: if host.is_empty() {
                DEFAULT_HOST.to_string()
            } else {
                host
            },
            port: if port == 0 { DEFAULT_PORT } else { port },
        }
    }

    /// Load configuration from `neorest.toml` and `NEOREST_*` environment
    /// variables, with env taking priority over the file.
    pub fn load() -> Result<Self, GraphError> {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name("neorest").required(false))
            .add_source(config::Environment::with_prefix("NEOREST"))
            .build()?;

        Ok(loaded.try_deserialize()?)
    }

    /// The data-API root this config points at, e.g.
    /// `http://127.0.0.1:7474/db/data`.
    pub fn base_url(&self) -> String {
        format!("{}:{}/db/data", self.host, self.port)
    }
}
