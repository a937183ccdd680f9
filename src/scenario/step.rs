//! Scenario and step definitions
//!
//! A scenario is an ordered list of step descriptors consumed by the generic
//! runner. Steps are plain data: which service to hit, what to send, which
//! statuses count as success, which response fields become context outputs
//! for later steps.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::config::RunnerConfig;
use super::context::ScenarioContext;
use super::expressions::{self, ExpressionError, RenderScope};
use crate::engine::result::{StepError, StepResult};
use crate::http::HttpCaller;
use crate::report::{redact, Reporter};

const KNOWN_METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

// ============================================================================
// Scenario
// ============================================================================

/// An ordered sequence of steps with the data flow between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name (required)
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps to execute, strictly in order
    pub steps: Vec<StepSpec>,
}

/// Errors found while checking a scenario against its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("step '{step}': unknown service '{service}'")]
    UnknownService { step: String, service: String },

    #[error("step '{step}': unsupported method '{method}'")]
    UnknownMethod { step: String, method: String },

    #[error("step '{step}': empty expected-status set")]
    EmptyExpect { step: String },

    #[error("step '{step}': output '{name}' already produced by an earlier step")]
    DuplicateOutput { step: String, name: String },

    #[error("step '{step}': requirement candidate '{key}' is not produced by any earlier step")]
    UndeclaredDependency { step: String, key: String },

    #[error("step '{step}': bearer source '{alias}' is not a declared requirement")]
    UnknownBearerSource { step: String, alias: String },

    #[error("step '{step}': invalid body template: {error}")]
    Template {
        step: String,
        #[source]
        error: ExpressionError,
    },
}

impl Scenario {
    /// Check the data-flow invariants before running anything:
    /// services must be configured, context references must point at outputs
    /// of strictly-earlier steps, and each output name is produced once.
    pub fn validate(&self, config: &RunnerConfig) -> Result<(), ValidationError> {
        let mut produced: HashSet<&str> = HashSet::new();

        for step in &self.steps {
            if config.base_url(&step.service).is_none() {
                return Err(ValidationError::UnknownService {
                    step: step.name.clone(),
                    service: step.service.clone(),
                });
            }

            if !KNOWN_METHODS.contains(&step.method.to_uppercase().as_str()) {
                return Err(ValidationError::UnknownMethod {
                    step: step.name.clone(),
                    method: step.method.clone(),
                });
            }

            if step.expect.is_empty() {
                return Err(ValidationError::EmptyExpect {
                    step: step.name.clone(),
                });
            }

            for req in &step.requires {
                for key in req.candidates() {
                    if !produced.contains(key) {
                        return Err(ValidationError::UndeclaredDependency {
                            step: step.name.clone(),
                            key: key.to_string(),
                        });
                    }
                }
            }

            if let Some(alias) = &step.bearer {
                if !step.requires.iter().any(|r| &r.alias == alias) {
                    return Err(ValidationError::UnknownBearerSource {
                        step: step.name.clone(),
                        alias: alias.clone(),
                    });
                }
            }

            if let Some(template) = &step.body {
                expressions::check_template(template).map_err(|error| {
                    ValidationError::Template {
                        step: step.name.clone(),
                        error,
                    }
                })?;
            }

            for output in &step.outputs {
                if !produced.insert(output.name.as_str()) {
                    return Err(ValidationError::DuplicateOutput {
                        step: step.name.clone(),
                        name: output.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Step
// ============================================================================

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name (for reporting and result lookup)
    pub name: String,

    /// Which configured service base URL to call
    pub service: String,

    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,

    /// Request path, joined onto the service base URL
    pub path: String,

    /// Status codes that count as success (e.g. [201] for creation)
    #[serde(default = "default_expect")]
    pub expect: Vec<u16>,

    /// Abort the whole scenario if this step fails
    #[serde(default)]
    pub fatal: bool,

    /// Context inputs this step needs, with fallback chains
    #[serde(default)]
    pub requires: Vec<Requirement>,

    /// Requirement alias supplying the Authorization bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,

    /// JSON body template; string leaves may use ${{ }} expressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_yaml::Value>,

    /// Response fields to extract into the context on success
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,

    /// Per-step timeout override in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_method() -> String {
    "POST".to_string()
}

fn default_expect() -> Vec<u16> {
    vec![200]
}

/// A named step input with an ordered fallback chain of context keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// Name the resolved value is bound to (`${{ inputs.<alias> }}`)
    pub alias: String,

    /// Candidate context keys, first present wins; defaults to `[alias]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<String>,
}

impl Requirement {
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        if self.from.is_empty() {
            std::slice::from_ref(&self.alias)
        } else {
            self.from.as_slice()
        }
        .iter()
        .map(String::as_str)
    }

    pub fn resolve<'a>(&self, ctx: &'a ScenarioContext) -> Option<&'a str> {
        ctx.first_present(self.candidates())
    }
}

/// One response field to extract into the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Context key the value is stored under
    pub name: String,

    /// Response field (dotted path); defaults to the output name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Redact the value when reporting
    #[serde(default)]
    pub sensitive: bool,
}

impl OutputSpec {
    fn pointer(&self) -> String {
        let field = self.field.as_deref().unwrap_or(&self.name);
        format!("/{}", field.replace('.', "/"))
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Collaborators a step needs to execute.
pub struct StepEnv<'a> {
    pub caller: &'a HttpCaller,
    pub config: &'a RunnerConfig,
    pub reporter: &'a dyn Reporter,
}

impl StepSpec {
    /// Execute this step against the accumulated context.
    ///
    /// All failure modes become a [`StepResult`]; missing inputs skip the
    /// step without making any network call.
    #[instrument(skip(self, ctx, env), fields(step = %self.name))]
    pub async fn execute(&self, ctx: &ScenarioContext, env: &StepEnv<'_>) -> StepResult {
        let reporter = env.reporter;

        let mut inputs = HashMap::new();
        for req in &self.requires {
            match req.resolve(ctx) {
                Some(value) => {
                    inputs.insert(req.alias.clone(), value.to_string());
                }
                None => {
                    let error = StepError::MissingDependency(req.alias.clone());
                    reporter.error(&format!("{}: {}", self.name, error));
                    return StepResult::skipped(&self.name, error);
                }
            }
        }

        let Some(base) = env.config.base_url(&self.service) else {
            // Unreachable after validation; kept for direct execute callers.
            let error =
                StepError::Transport(format!("no base URL configured for '{}'", self.service));
            reporter.error(&format!("{}: {}", self.name, error));
            return StepResult::failed(&self.name, None, error);
        };

        let body = match &self.body {
            Some(template) => {
                let scope = RenderScope {
                    credentials: &env.config.credentials,
                    context: ctx,
                    inputs: &inputs,
                };
                match expressions::render_body(template, &scope) {
                    Ok(rendered) => Some(rendered),
                    Err(ExpressionError::UnknownVariable(name)) => {
                        let error = StepError::MissingDependency(name);
                        reporter.error(&format!("{}: {}", self.name, error));
                        return StepResult::skipped(&self.name, error);
                    }
                    Err(e) => {
                        let error = StepError::MissingDependency(e.to_string());
                        reporter.error(&format!("{}: {}", self.name, error));
                        return StepResult::skipped(&self.name, error);
                    }
                }
            }
            None => None,
        };

        let mut headers = HashMap::new();
        if let Some(alias) = &self.bearer {
            if let Some(token) = inputs.get(alias) {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
        }

        let url = join_url(base, &self.path);
        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(env.config.timeout_secs));

        reporter.info(&format!("{} {}", self.method, url));

        let outcome = env
            .caller
            .call(&self.method, &url, &headers, body.as_ref(), timeout)
            .await;

        if !outcome.success {
            let raw = outcome.error.unwrap_or_else(|| "request failed".to_string());
            let error = StepError::Transport(raw);
            reporter.error(&format!("{}: {}", self.name, error));
            return StepResult::failed(&self.name, None, error);
        }

        let status = outcome.status.unwrap_or_default();
        reporter.info(&format!("status: {}", status));

        if !self.expect.contains(&status) {
            let error = StepError::UnexpectedStatus {
                status,
                body: outcome.body_text(),
            };
            reporter.error(&format!("{}: {}", self.name, error));
            return StepResult::failed(&self.name, Some(status), error);
        }

        let mut outputs = HashMap::new();
        for output in &self.outputs {
            let value = outcome
                .body
                .as_ref()
                .and_then(|body| body.pointer(&output.pointer()))
                .map(value_to_string);

            match value {
                Some(value) => {
                    let shown = if output.sensitive {
                        redact(&value)
                    } else {
                        value.clone()
                    };
                    reporter.info(&format!("{}: {}", output.name, shown));
                    outputs.insert(output.name.clone(), value);
                }
                None => {
                    debug!(output = %output.name, "field absent in response body");
                    reporter.info(&format!("{}: absent in response", output.name));
                }
            }
        }

        reporter.success(&format!("{}: HTTP {}", self.name, status));
        StepResult::passed(&self.name, status, outputs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:5001", "/auth/login"),
            "http://localhost:5001/auth/login"
        );
        assert_eq!(
            join_url("http://localhost:5001/", "auth/login"),
            "http://localhost:5001/auth/login"
        );
    }

    #[test]
    fn test_requirement_candidates_default_to_alias() {
        let req = Requirement {
            alias: "accessToken".to_string(),
            from: vec![],
        };
        let candidates: Vec<_> = req.candidates().collect();
        assert_eq!(candidates, vec!["accessToken"]);
    }

    #[test]
    fn test_requirement_fallback_chain() {
        let req = Requirement {
            alias: "companyId".to_string(),
            from: vec!["companyId".to_string(), "gatewayCompanyId".to_string()],
        };

        let mut ctx = ScenarioContext::new();
        ctx.insert("gatewayCompanyId", "g-1".to_string());
        assert_eq!(req.resolve(&ctx), Some("g-1"));

        ctx.insert("companyId", "c-1".to_string());
        assert_eq!(req.resolve(&ctx), Some("c-1"));
    }

    #[test]
    fn test_output_pointer() {
        let plain = OutputSpec {
            name: "accessToken".to_string(),
            field: None,
            sensitive: true,
        };
        assert_eq!(plain.pointer(), "/accessToken");

        let nested = OutputSpec {
            name: "companyId".to_string(),
            field: Some("data.id".to_string()),
            sensitive: false,
        };
        assert_eq!(nested.pointer(), "/data/id");
    }

    #[test]
    fn test_step_deserialize_defaults() {
        let yaml = r#"
name: authenticate-admin
service: auth
path: /auth/login
"#;
        let step: StepSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(step.method, "POST");
        assert_eq!(step.expect, vec![200]);
        assert!(!step.fatal);
        assert!(step.requires.is_empty());
        assert!(step.timeout_secs.is_none());
    }
}
