//! Scenario types and definitions
//!
//! This module contains all types for defining and parsing scenarios:
//! - `step` - Scenario, StepSpec, Requirement, OutputSpec
//! - `context` - ScenarioContext and Credentials
//! - `config` - RunnerConfig loaded from runner.yaml
//! - `expressions` - Expression evaluation for `${{ }}` syntax
//! - `loader` - Load scenarios from files and directories
//! - `flows` - The built-in reference scenario

pub mod config;
pub mod context;
pub mod expressions;
pub mod flows;
pub mod loader;
pub mod step;

pub use config::RunnerConfig;
pub use context::{Credentials, ScenarioContext};
pub use expressions::{evaluate as evaluate_expression, render_body, ExpressionError, RenderScope};
pub use flows::onboarding_smoke;
pub use loader::{LoadError, ScenarioLoader};
pub use step::{OutputSpec, Requirement, Scenario, StepEnv, StepSpec, ValidationError};
