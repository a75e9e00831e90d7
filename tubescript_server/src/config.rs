use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tubescript_core::ServiceConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Everything the server needs, resolved once at startup and shared with handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    #[serde(flatten)]
    pub service: ServiceConfig,
}

impl ServerConfig {
    pub fn new(bind: SocketAddr, service: ServiceConfig) -> Self {
        Self { bind, service }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            service: ServiceConfig::default(),
        }
    }
}
