//! Runner configuration
//!
//! Configuration for one scenario run, loaded from runner.yaml. Base URLs
//! for the services under test and the admin credentials are supplied here,
//! never hardcoded in scenarios:
//!
//! ```yaml
//! services:
//!   auth: "http://localhost:5001"
//!   company: "http://localhost:5010"
//!   gateway: "http://localhost:5000"
//!
//! credentials:
//!   email: admin@fintechpsp.com
//!   password: admin123
//!
//! timeout_secs: 10
//! validate_ssl: false
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use super::context::Credentials;
use super::loader::LoadError;
use crate::http::CallerOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Service name -> base URL
    pub services: HashMap<String, String>,

    /// Admin credentials for authentication steps
    pub credentials: Credentials,

    /// Default per-call timeout in seconds (steps may override)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-level HTTP options (default headers, redirects, TLS)
    #[serde(flatten)]
    pub http: CallerOptions,
}

fn default_timeout_secs() -> u64 {
    10
}

impl RunnerConfig {
    pub fn new(services: HashMap<String, String>, credentials: Credentials) -> Self {
        Self {
            services,
            credentials,
            timeout_secs: default_timeout_secs(),
            http: CallerOptions::default(),
        }
    }

    pub fn base_url(&self, service: &str) -> Option<&str> {
        self.services.get(service).map(String::as_str)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: RunnerConfig =
            serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
                file: path.display().to_string(),
                error: e,
            })?;
        Ok(config)
    }
}
