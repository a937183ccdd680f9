//! HTTP call plumbing
//!
//! This module contains:
//! - `caller` - The HTTP caller wrapping one outbound request per call
//! - `CallOutcome` - The normalized result of one HTTP call
//! - `CallerOptions` - Client-level options (redirects, TLS, default headers)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod caller;

pub use caller::HttpCaller;

/// Errors raised while constructing the HTTP caller.
///
/// Calls themselves never raise; every in-flight failure mode is captured
/// inside a [`CallOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum CallerError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Client-level options applied to every call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerOptions {
    /// Default headers to include in all requests
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Whether to follow redirects (default: true)
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Whether to validate SSL certificates (default: true)
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,
}

fn default_follow_redirects() -> bool {
    true
}

fn default_validate_ssl() -> bool {
    true
}

impl Default for CallerOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            follow_redirects: default_follow_redirects(),
            validate_ssl: default_validate_ssl(),
        }
    }
}

/// Normalized result of one HTTP call
///
/// `success` means a response was received, regardless of its status code.
/// Transport-level failures (DNS, connection refused, timeout, TLS) end up
/// with `success = false` and the description in `error`; they are never
/// propagated as Rust errors.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub success: bool,
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

impl CallOutcome {
    /// A response was received; body parsed as JSON with raw-text fallback.
    pub fn received(status: u16, body: Option<Value>) -> Self {
        Self {
            success: true,
            status: Some(status),
            body,
            error: None,
        }
    }

    /// The call never produced a response.
    pub fn transport(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            body: None,
            error: Some(error.into()),
        }
    }

    /// Compact body rendering for diagnostics.
    pub fn body_text(&self) -> String {
        match &self.body {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}
