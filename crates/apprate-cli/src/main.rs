//! apprate - terminal host for the rating prompt.
//!
//! Each invocation behaves like one moment in the life of a host app: it
//! opens the preference file, builds a controller and runs one command.
//!
//! # Configuration
//!
//! - `APPRATE_DATA_DIR` - Optional, defaults to `~/.apprate`
//! - `APPRATE_HOST_PACKAGE` - Optional, defaults to `com.example.app`
//! - `APPRATE_*` thresholds, see `RateConfig::from_env`
//!
//! # Usage
//!
//! ```text
//! apprate --installed com.android.vending launch --answer later
//! apprate check
//! apprate event purchase
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use apprate_core::{
    DialogButton, InstalledPackages, PromptOutcome, RateConfig, RatePrompt, SqlitePreferenceStore,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod presenter;

use presenter::ConsolePresenter;

#[derive(Parser)]
#[command(name = "apprate")]
#[command(about = "Decide when to ask for an app store rating", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML, JSON or YAML); APPRATE_* variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the preference database
    #[arg(long, global = true, env = "APPRATE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Package id of the host app
    #[arg(short, long, global = true, env = "APPRATE_HOST_PACKAGE", default_value = "com.example.app")]
    package: String,

    /// Package reported as installed (repeatable)
    #[arg(short, long, global = true)]
    installed: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an app launch, then show the prompt if it is due
    Launch {
        /// Simulate a button press on the prompt
        #[arg(short, long, value_enum)]
        answer: Option<Answer>,
    },

    /// Print the per-condition verdict
    Check,

    /// Print the stored counters
    Status,

    /// Count a custom event
    Event {
        /// Event name
        name: String,

        /// Overwrite the count instead of incrementing
        #[arg(long)]
        set: Option<u16>,
    },

    /// Show the prompt regardless of the conditions
    Show {
        /// Simulate a button press on the prompt
        #[arg(short, long, value_enum)]
        answer: Option<Answer>,
    },

    /// Forget stored counters
    Reset {
        /// Only allow prompting again after "never"
        #[arg(long)]
        consent_only: bool,
    },

    /// Print where "rate now" leads
    Destination,
}

#[derive(Clone, Copy, ValueEnum)]
enum Answer {
    Rate,
    Later,
    Never,
}

impl From<Answer> for DialogButton {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Rate => DialogButton::Positive,
            Answer::Later => DialogButton::Neutral,
            Answer::Never => DialogButton::Negative,
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let answer = match &cli.command {
        Commands::Launch { answer } | Commands::Show { answer } => answer.map(DialogButton::from),
        _ => None,
    };
    let prompt = build_prompt(&cli, answer)?;
    let now = Utc::now();

    match cli.command {
        Commands::Launch { .. } => {
            let launch_count = prompt.on_launch(now)?;
            let outcome = prompt.maybe_show_prompt(now)?;
            print_outcome(launch_count, outcome);
        }
        Commands::Check => {
            let evaluation = prompt.evaluate(now)?;
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Commands::Status => {
            let snapshot = prompt.snapshot(now)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Event { name, set } => match set {
            Some(count) => {
                prompt.set_event_count(&name, count)?;
                println!("{} = {}", name, count);
            }
            None => {
                let count = prompt.increment_event(&name)?;
                println!("{} = {}", name, count);
            }
        },
        Commands::Show { .. } => {
            if prompt.show_prompt(now)? == PromptOutcome::PresentationFailed {
                anyhow::bail!("the prompt could not be displayed");
            }
        }
        Commands::Reset { consent_only } => {
            if consent_only {
                prompt.clear_consent()?;
                println!("Consent restored");
            } else {
                prompt.clear_all()?;
                println!("All counters cleared");
            }
        }
        Commands::Destination => {
            println!("{}", serde_json::to_string_pretty(&prompt.destination())?);
        }
    }

    Ok(())
}

/// Build the controller from flags, environment and the preference file.
fn build_prompt(cli: &Cli, answer: Option<DialogButton>) -> Result<RatePrompt> {
    let config = match &cli.config {
        Some(path) => RateConfig::from_file(path)
            .and_then(RateConfig::with_env_overrides)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => RateConfig::from_env()?,
    };

    // Determine data directory
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".apprate")
    });
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!("Data directory: {}", data_dir.display());

    let prefs = SqlitePreferenceStore::new(data_dir.join("prefs.db"))?;
    let inspector: InstalledPackages = cli.installed.iter().cloned().collect();

    let prompt = RatePrompt::builder()
        .config(config)
        .preferences(Arc::new(prefs))
        .package_inspector(Arc::new(inspector))
        .presenter(Arc::new(ConsolePresenter::new(answer)))
        .host_package(cli.package.clone())
        .build()?;
    Ok(prompt)
}

fn print_outcome(launch_count: u32, outcome: PromptOutcome) {
    match outcome {
        PromptOutcome::NotEligible => println!("Launch {} recorded, no prompt due", launch_count),
        PromptOutcome::Shown => println!("Launch {} recorded, prompt shown", launch_count),
        PromptOutcome::PresentationFailed => {
            println!("Launch {} recorded, prompt could not be displayed", launch_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_answer() {
        let cli = Cli::try_parse_from([
            "apprate",
            "--installed",
            "com.android.vending",
            "--installed",
            "com.amazon.venezia",
            "launch",
            "--answer",
            "later",
        ])
        .unwrap();

        assert_eq!(cli.installed.len(), 2);
        match cli.command {
            Commands::Launch { answer } => {
                assert_eq!(answer.map(DialogButton::from), Some(DialogButton::Neutral))
            }
            _ => panic!("expected launch"),
        }
    }

    #[test]
    fn test_parse_event_set() {
        let cli = Cli::try_parse_from(["apprate", "event", "purchase", "--set", "3"]).unwrap();
        match cli.command {
            Commands::Event { name, set } => {
                assert_eq!(name, "purchase");
                assert_eq!(set, Some(3));
            }
            _ => panic!("expected event"),
        }
    }
}
