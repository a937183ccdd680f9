//! Scenario runner - executes steps in order and manages the shared context
//!
//! This is the engine that:
//! 1. Validates the scenario against the runner configuration
//! 2. Executes steps strictly in order
//! 3. Merges step outputs into the shared context for later steps
//! 4. Stops early when a fatal step fails
//! 5. Produces the final summary

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::engine::error::RunnerError;
use crate::engine::result::{StepStatus, Summary};
use crate::http::HttpCaller;
use crate::report::{ConsoleReporter, Reporter};
use crate::scenario::{RunnerConfig, Scenario, ScenarioContext, StepEnv};

/// Executes scenarios against one configured environment.
pub struct ScenarioRunner {
    caller: HttpCaller,
    config: RunnerConfig,
    reporter: Arc<dyn Reporter>,
}

impl ScenarioRunner {
    /// Create a runner reporting to the console.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        Self::with_reporter(config, Arc::new(ConsoleReporter::new()))
    }

    /// Create a runner with a custom reporter (e.g. a capture for tests).
    pub fn with_reporter(
        config: RunnerConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, RunnerError> {
        let caller = HttpCaller::new(config.http.clone())?;
        Ok(Self {
            caller,
            config,
            reporter,
        })
    }

    /// Run a scenario from a YAML string.
    #[instrument(skip(self, yaml))]
    pub async fn run_yaml(&self, yaml: &str) -> Result<Summary, RunnerError> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        self.run(&scenario).await
    }

    /// Run a scenario to completion (or fatal abort).
    #[instrument(skip(self, scenario), fields(scenario = %scenario.name))]
    pub async fn run(&self, scenario: &Scenario) -> Result<Summary, RunnerError> {
        scenario.validate(&self.config)?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(%run_id, "Starting scenario: {}", scenario.name);

        self.reporter.header(&scenario.name);
        if let Some(description) = &scenario.description {
            self.reporter.info(description);
        }
        self.reporter
            .info(&format!("run {} at {}", run_id, started_at.to_rfc3339()));

        let mut ctx = ScenarioContext::new();
        let mut results = Vec::with_capacity(scenario.steps.len());
        let mut aborted = false;

        let env = StepEnv {
            caller: &self.caller,
            config: &self.config,
            reporter: self.reporter.as_ref(),
        };

        for (idx, step) in scenario.steps.iter().enumerate() {
            self.reporter
                .header(&format!("Step {}: {}", idx + 1, step.name));

            let result = step.execute(&ctx, &env).await;
            ctx.merge(&result.outputs);

            match result.status {
                StepStatus::Passed => info!(step = %step.name, "Step passed"),
                StepStatus::Skipped => warn!(step = %step.name, "Step skipped"),
                StepStatus::Failed => {
                    error!(step = %step.name, error = ?result.error, "Step failed");
                    if step.fatal {
                        self.reporter
                            .error(&format!("fatal step '{}' failed, aborting", step.name));
                        aborted = true;
                        results.push(result);
                        break;
                    }
                }
            }

            results.push(result);
        }

        let success = !aborted
            && results
                .iter()
                .filter(|r| !r.is_skipped())
                .all(|r| r.is_passed());

        self.reporter.header("Summary");
        for result in &results {
            match result.status {
                StepStatus::Passed => self.reporter.success(&result.step),
                StepStatus::Skipped => {
                    let reason = result
                        .error
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    self.reporter
                        .info(&format!("{}: skipped ({})", result.step, reason));
                }
                StepStatus::Failed => {
                    let reason = result
                        .error
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    self.reporter
                        .error(&format!("{}: {}", result.step, reason));
                }
            }
        }
        if success {
            self.reporter.success("scenario passed");
        } else if aborted {
            self.reporter.error("scenario aborted");
        } else {
            self.reporter.error("scenario finished with failures");
        }

        info!(%run_id, success, aborted, "Scenario finished");

        Ok(Summary {
            run_id,
            started_at,
            results,
            success,
            aborted,
        })
    }
}
