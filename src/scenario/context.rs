//! Shared context for scenario runtime
//!
//! Named values produced by earlier steps and consumed by later ones,
//! accumulated in execution order. The map is append-only within a run:
//! keys are never removed, and overwrites (which a valid scenario never
//! performs) are logged.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

/// Admin credentials supplied at scenario start.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Named values accumulated across steps in execution order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    values: HashMap<String, String>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an output value. Overwrites are kept but flagged, since each
    /// output name is produced by exactly one step in a valid scenario.
    pub fn insert(&mut self, key: &str, value: String) {
        if let Some(previous) = self.values.insert(key.to_string(), value) {
            warn!(key, "context key overwritten (previous value: {})", previous);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Resolve the first present candidate key, in order.
    pub fn first_present<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Option<&str> {
        candidates.into_iter().find_map(|key| self.get(key))
    }

    /// Merge a step's outputs into the context.
    pub fn merge(&mut self, outputs: &HashMap<String, String>) {
        for (key, value) in outputs {
            self.insert(key, value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
