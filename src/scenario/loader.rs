//! Scenario file loader
//!
//! Load scenario YAML files individually or from a directory.

use std::path::Path;

use super::step::Scenario;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load_directory(dir: &Path) -> Result<Vec<Scenario>, LoadError> {
        let mut scenarios = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() {
                let ext = path.extension().and_then(|e| e.to_str());
                let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

                // Skip runner.yaml - it's a config file, not a scenario
                if filename == "runner.yaml" || filename == "runner.yml" {
                    continue;
                }

                if ext == Some("yaml") || ext == Some("yml") {
                    scenarios.push(Self::load_file(&path)?);
                }
            }
        }

        Ok(scenarios)
    }

    pub fn load_file(path: &Path) -> Result<Scenario, LoadError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
            file: path.display().to_string(),
            error: e,
        })
    }
}
