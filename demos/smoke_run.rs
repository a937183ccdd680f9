//! Run the built-in onboarding smoke scenario against local services
//!
//! Run with: cargo run --example smoke_run

use psp_smoke::prelude::*;

const CONFIG_YAML: &str = r#"
services:
  auth: "http://localhost:5001"
  company: "http://localhost:5010"
  gateway: "http://localhost:5000"

credentials:
  email: admin@fintechpsp.com
  password: admin123

timeout_secs: 10
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("psp_smoke=debug")
        .init();

    let config: RunnerConfig = serde_yaml::from_str(CONFIG_YAML)?;
    let runner = ScenarioRunner::new(config)?;

    let summary = runner.run(&onboarding_smoke()).await?;

    println!("\nRun ID: {}", summary.run_id);
    println!("Success: {}", summary.success);
    for result in &summary.results {
        let status = match result.status {
            StepStatus::Passed => "✓",
            StepStatus::Failed => "✗",
            StepStatus::Skipped => "-",
        };
        println!("  [{}] {}", status, result.step);
    }

    Ok(())
}
