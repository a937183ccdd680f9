//! HTTP caller - one outbound request per call, outcome always captured
//!
//! The caller sends a single request with a per-call timeout and folds every
//! possible failure mode into the returned [`CallOutcome`]:
//! - transport failures (DNS, connection refused, timeout, TLS) become
//!   `success = false` with the error description,
//! - any received response becomes `success = true` with its status code and
//!   body, parsed as JSON first and falling back to raw text.
//!
//! Human-readable reporting is the owning step's job; the caller only emits
//! trace events.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::{CallOutcome, CallerError, CallerOptions};

#[derive(Debug)]
pub struct HttpCaller {
    options: CallerOptions,
    client: reqwest::Client,
}

impl HttpCaller {
    pub fn new(options: CallerOptions) -> Result<Self, CallerError> {
        let mut builder = reqwest::Client::builder().redirect(if options.follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        });

        if !options.validate_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| CallerError::ClientBuild(e.to_string()))?;

        Ok(Self { options, client })
    }

    /// Send one request and normalize the result.
    pub async fn call(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
        timeout: Duration,
    ) -> CallOutcome {
        let mut request = match method.to_uppercase().as_str() {
            "GET" => self.client.get(url),
            "POST" => self.client.post(url),
            "PUT" => self.client.put(url),
            "PATCH" => self.client.patch(url),
            "DELETE" => self.client.delete(url),
            "HEAD" => self.client.head(url),
            _ => {
                return CallOutcome::transport(format!("unsupported HTTP method: {}", method));
            }
        };

        request = request.timeout(timeout);

        for (key, value) in &self.options.headers {
            request = request.header(key, value);
        }
        for (key, value) in headers {
            request = request.header(key, value);
        }

        if let Some(body_value) = body {
            request = request.json(body_value);
        }

        debug!("Executing {} {}", method, url);

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();

                let body_text = match response.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to read response body: {}", e);
                        return CallOutcome::transport(e.to_string());
                    }
                };

                let body = if body_text.is_empty() {
                    None
                } else {
                    Some(serde_json::from_str(&body_text).unwrap_or(Value::String(body_text)))
                };

                debug!("{} {} -> {}", method, url, status);
                CallOutcome::received(status, body)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                CallOutcome::transport(e.to_string())
            }
        }
    }
}
