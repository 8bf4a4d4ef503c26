#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the malaria dashboard.
//!
//! `malaria_dash serve` starts the web server, `summary` prints the
//! exploratory summary and `export` writes every chart as JSON. Without a
//! subcommand an interactive menu asks which one to run.
//!
//! Uses `indicatif-log-bridge` (via [`malaria_dash_cli_utils::init_logger`])
//! so log lines and the dataset loading bar never fight for the terminal.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use malaria_dash_config::DashboardConfig;

#[derive(Parser)]
#[command(
    name = "malaria_dash",
    about = "Malaria mortality and incidence dashboard"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the datasets and serve the dashboard
    Serve,
    /// Print the exploratory summary of the mortality dataset
    Summary {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write every chart specification to a directory as JSON
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

/// Choices offered by the interactive menu.
enum Action {
    Serve,
    Summary,
    Export,
}

impl Action {
    const ALL: &[Self] = &[Self::Serve, Self::Summary, Self::Export];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Serve => "Start server",
            Self::Summary => "Print summary",
            Self::Export => "Export charts as JSON",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = malaria_dash_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref()).inspect_err(|e| {
        log::error!("{e}");
    })?;

    match cli.command {
        Some(Commands::Serve) => commands::serve(&multi, &config)?,
        Some(Commands::Summary { json }) => commands::summary(&multi, &config, json)?,
        Some(Commands::Export { out }) => commands::export(&multi, &config, &out)?,
        None => interactive(&multi, config)?,
    }

    Ok(())
}

fn interactive(
    multi: &malaria_dash_cli_utils::MultiProgress,
    config: DashboardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Malaria Dashboard");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Serve => {
            actix_web::rt::System::new().block_on(malaria_dash_server::interactive::run(config))?;
        }
        Action::Summary => commands::summary(multi, &config, false)?,
        Action::Export => {
            let out: String = Input::new()
                .with_prompt("Output directory")
                .default("data/generated/charts".to_string())
                .interact_text()?;
            commands::export(multi, &config, &PathBuf::from(out))?;
        }
    }

    Ok(())
}
