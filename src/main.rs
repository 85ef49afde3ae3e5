//! # Scenario Studio CLI
//!
//! ## Usage
//!
//! ```bash
//! # Show today's and historical scenarios
//! scenario-studio list
//!
//! # Analyze and save a new scenario
//! scenario-studio create --name "Bulk export" --problem "Exports time out" --users "Admins"
//!
//! # Compare two scenarios side by side
//! scenario-studio compare 12 15
//!
//! # Point at another backend for one run
//! scenario-studio --backend-url http://10.0.0.5:8000 health
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scenario_studio::commands;
use scenario_studio::models::notice::NoticeLevel;
use scenario_studio::state::http_backend;
use scenario_studio::storage::ConfigService;
use scenario_studio::{AppState, CommandResponse, SettingsUpdate};
use scenario_studio_backend::ScenarioDraft;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "scenario-studio")]
#[command(about = "Analyze, compare and track feature scenarios")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to ~/.scenario-studio/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL for this run only
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dashboard
    List,
    /// Analyze and save a new scenario
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        problem: String,
        #[arg(long)]
        users: String,
        #[arg(long, default_value = "")]
        metrics: String,
        #[arg(long)]
        timeline: Option<String>,
        #[arg(long)]
        resources: Option<String>,
        /// Repeat for several constraints
        #[arg(long = "constraint")]
        constraints: Vec<String>,
    },
    /// Delete a saved scenario
    Delete { id: String },
    /// Compare the given scenarios
    Compare {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Insight rollup over the given scenarios, or all of them when none
    /// are given; unknown ids are ignored
    Insights { ids: Vec<String> },
    /// Check backend health
    Health,
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Set {
        #[arg(long)]
        backend_url: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        mock_fallback: Option<bool>,
        #[arg(long)]
        log_level: Option<String>,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    }
    .context("loading configuration")?;

    init_tracing(args.verbose, &config.get_config().log_level);

    let mut backend_config = config.get_config_clone();
    if let Some(url) = &args.backend_url {
        backend_config.backend_url = url.clone();
    }
    let backend = http_backend(&backend_config).context("building backend client")?;

    let state = AppState::new();
    state
        .initialize_with(config, backend)
        .await
        .context("initializing application state")?;

    let ok = run(&state, args.command).await?;
    print_notices(&state).await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::List => {
            let init = commands::load_dashboard(state).await;
            if !init.success {
                return print(init);
            }
            print(commands::get_dashboard(state).await)
        }
        Command::Create {
            name,
            problem,
            users,
            metrics,
            timeline,
            resources,
            constraints,
        } => {
            let mut draft = ScenarioDraft::new(name, problem, users).with_success_metrics(metrics);
            draft.timeline = timeline;
            draft.resources = resources;
            draft.constraints = constraints;
            print(commands::create_scenario(state, draft).await)
        }
        Command::Delete { id } => {
            commands::load_dashboard(state).await;
            print(commands::delete_scenario(state, id).await)
        }
        Command::Compare { ids } => {
            select(state, ids).await?;
            print(commands::compare_selected(state).await)
        }
        Command::Insights { ids } => {
            select(state, ids).await?;
            print(commands::get_insights(state).await)
        }
        Command::Health => print(commands::get_health(state).await),
        Command::Settings { action: None } => print(commands::get_settings(state).await),
        Command::Settings {
            action:
                Some(SettingsAction::Set {
                    backend_url,
                    timeout_secs,
                    mock_fallback,
                    log_level,
                }),
        } => {
            let update = SettingsUpdate {
                backend_url,
                request_timeout_secs: timeout_secs,
                mock_fallback_enabled: mock_fallback,
                log_level,
                user_agent: None,
            };
            print(commands::update_settings(state, update).await)
        }
    }
}

/// Load the dashboard, then select each distinct id in `ids`
async fn select(state: &AppState, ids: Vec<String>) -> anyhow::Result<()> {
    commands::load_dashboard(state).await;
    for id in distinct(ids) {
        let response = commands::toggle_selection(state, id).await;
        if let Some(error) = response.error {
            anyhow::bail!(error);
        }
    }
    Ok(())
}

/// Drop repeated ids, keeping first-seen order. Toggling an id twice
/// would deselect it.
fn distinct(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn print<T: Serialize>(response: CommandResponse<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.success)
}

async fn print_notices(state: &AppState) {
    let response = commands::drain_notices(state).await;
    for notice in response.data.unwrap_or_default() {
        let marker = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{}] {}", marker, notice.message);
    }
}
