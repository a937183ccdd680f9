use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use psp_smoke::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "psp-smoke")]
#[command(about = "Run sequenced HTTP smoke scenarios against a multi-service platform", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Path to the scenario YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the runner config file
        #[arg(short, long, default_value = "runner.yaml")]
        config: PathBuf,
    },

    /// Run the built-in onboarding smoke scenario
    Smoke {
        /// Path to the runner config file
        #[arg(short, long, default_value = "runner.yaml")]
        config: PathBuf,
    },

    /// List the steps of a scenario file
    List {
        /// Path to the scenario YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate scenario files without running them
    Validate {
        /// Path to scenario file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Runner config to validate service references against
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "psp_smoke=debug"
    } else {
        "psp_smoke=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Harness failed");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Run { file, config } => {
            let scenario = load_scenario(&file)?;
            run_scenario(&scenario, &config).await
        }
        Commands::Smoke { config } => run_scenario(&onboarding_smoke(), &config).await,
        Commands::List { file } => list_steps(&file),
        Commands::Validate { path, config } => validate(&path, config.as_deref()),
    }
}

fn load_scenario(file: &PathBuf) -> anyhow::Result<Scenario> {
    if !file.exists() {
        anyhow::bail!("Scenario file not found: {}", file.display());
    }
    Ok(ScenarioLoader::load_file(file)?)
}

async fn run_scenario(scenario: &Scenario, config_path: &PathBuf) -> anyhow::Result<bool> {
    if !config_path.exists() {
        anyhow::bail!("Config file not found: {}", config_path.display());
    }

    let config = RunnerConfig::load(config_path)?;
    let runner = ScenarioRunner::new(config)?;
    let summary = runner.run(scenario).await?;

    // The run only counts as broken when the fatal step failed; downstream
    // failures are diagnostic output, not a harness failure.
    Ok(!summary.aborted)
}

fn list_steps(file: &PathBuf) -> anyhow::Result<bool> {
    let scenario = load_scenario(file)?;

    println!("Scenario: {}", scenario.name);
    if let Some(description) = &scenario.description {
        println!("{}", description);
    }
    println!();

    for (idx, step) in scenario.steps.iter().enumerate() {
        let fatal = if step.fatal { " [fatal]" } else { "" };
        println!(
            "  {}. {} ({} {} -> {:?}){}",
            idx + 1,
            step.name,
            step.method,
            step.path,
            step.expect,
            fatal
        );

        for req in &step.requires {
            let candidates: Vec<_> = req.candidates().collect();
            if candidates.len() == 1 {
                println!("       needs: {}", candidates[0]);
            } else {
                println!("       needs: {} (from {})", req.alias, candidates.join(", "));
            }
        }
    }

    Ok(true)
}

fn validate(path: &PathBuf, config_path: Option<&std::path::Path>) -> anyhow::Result<bool> {
    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }

    let scenarios = if path.is_dir() {
        ScenarioLoader::load_directory(path)?
    } else {
        vec![ScenarioLoader::load_file(path)?]
    };

    if scenarios.is_empty() {
        println!("No scenarios found in: {}", path.display());
        return Ok(true);
    }

    if let Some(config_path) = config_path {
        let config = RunnerConfig::load(config_path)?;
        for scenario in &scenarios {
            scenario.validate(&config)?;
        }
        println!("✓ {} scenarios validated against config", scenarios.len());
    } else {
        println!("✓ {} scenarios parsed", scenarios.len());
    }

    Ok(true)
}
