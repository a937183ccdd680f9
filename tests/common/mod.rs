use std::collections::HashMap;

use psp_smoke::{Credentials, RunnerConfig};

/// A runner config pointing every service at the same mock server.
pub fn test_config(base_url: &str) -> RunnerConfig {
    let mut services = HashMap::new();
    services.insert("auth".to_string(), base_url.to_string());
    services.insert("company".to_string(), base_url.to_string());
    services.insert("gateway".to_string(), base_url.to_string());

    let mut config = RunnerConfig::new(
        services,
        Credentials {
            email: "admin@fintechpsp.com".to_string(),
            password: "admin123".to_string(),
        },
    );
    config.timeout_secs = 2;
    config
}
