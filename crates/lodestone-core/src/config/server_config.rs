use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP surface and collaborator endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Vector search collaborator (POST JSON).
    pub vector_endpoint: Option<String>,
    /// Graph query collaborator (POST JSON).
    pub graph_endpoint: Option<String>,
    /// Query embedding collaborator. When absent the vector backend embeds itself.
    pub embedding_endpoint: Option<String>,
    /// Language-generation collaborator. When absent answers are extractive digests.
    pub generator_endpoint: Option<String>,
    /// Transport-level timeout for collaborator HTTP clients (milliseconds).
    pub client_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            port: defaults::DEFAULT_PORT,
            vector_endpoint: None,
            graph_endpoint: None,
            embedding_endpoint: None,
            generator_endpoint: None,
            client_timeout_ms: defaults::DEFAULT_CLIENT_TIMEOUT_MS,
        }
    }
}
