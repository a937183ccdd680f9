//! # PSP Smoke
//!
//! A declarative, sequenced HTTP smoke-test harness for multi-service
//! platforms, built around the onboarding flow of a payment service
//! provider (admin login, company creation, API-key issuance).
//!
//! ## Features
//!
//! - **Declarative YAML scenarios** - An ordered list of step descriptors
//!   consumed by one generic runner, no bespoke control flow per scenario
//! - **Dependency passing** - Step outputs become named context values for
//!   later steps, with ordered fallback chains
//! - **Captured failures** - Transport errors, unexpected statuses and
//!   missing dependencies all become step results, never panics
//! - **Fatal steps** - A designated step failure aborts the run; everything
//!   else is reported and execution continues for partial diagnostics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use psp_smoke::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config_yaml = r#"
//! services:
//!   auth: "http://localhost:5001"
//!   company: "http://localhost:5010"
//!   gateway: "http://localhost:5000"
//! credentials:
//!   email: admin@fintechpsp.com
//!   password: admin123
//! "#;
//!
//!     let config: RunnerConfig = serde_yaml::from_str(config_yaml)?;
//!     let runner = ScenarioRunner::new(config)?;
//!     let summary = runner.run(&onboarding_smoke()).await?;
//!
//!     println!("Scenario completed: success={}", summary.success);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod http;
pub mod report;
pub mod scenario;

// Re-export main types
pub use engine::{RunnerError, ScenarioRunner, StepError, StepResult, StepStatus, Summary};
pub use http::{CallOutcome, CallerError, CallerOptions, HttpCaller};
pub use report::{redact, ConsoleReporter, MemoryReporter, Reporter};
pub use scenario::{
    onboarding_smoke, Credentials, LoadError, OutputSpec, Requirement, RunnerConfig, Scenario,
    ScenarioContext, ScenarioLoader, StepEnv, StepSpec, ValidationError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{RunnerError, ScenarioRunner, StepStatus, Summary};
    pub use crate::http::{CallOutcome, HttpCaller};
    pub use crate::report::{ConsoleReporter, MemoryReporter, Reporter};
    pub use crate::scenario::{
        onboarding_smoke, Credentials, RunnerConfig, Scenario, ScenarioLoader, StepSpec,
    };
}
