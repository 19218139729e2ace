#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Operator CLI for the air map dashboard.
//!
//! ```text
//! air_map_cli reports [--limit 20]
//! air_map_cli moderate <id> <verified|rejected>
//! air_map_cli preview [--range live|24h|7d|30d]
//! air_map_cli feed
//! air_map_cli server
//! ```
//!
//! Running with no subcommand opens an interactive menu.

mod feed;
mod preview;
mod reports;

use std::path::PathBuf;

use air_map_air_models::{ReportStatus, TimeRange};
use air_map_database::open_db;
use air_map_server::ServerConfig;
use clap::{Parser, Subcommand};
use dialoguer::Select;

#[derive(Parser)]
#[command(name = "air_map_cli", about = "Operate the air map dashboard")]
struct Cli {
    /// Report database path (defaults to `AIR_MAP_DB_PATH`, then
    /// `data/reports.db`)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent citizen reports
    Reports {
        /// Maximum number of reports to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Verify or reject a pending report
    Moderate {
        /// Report ID
        id: String,
        /// Target status
        status: ReportStatus,
    },
    /// Summarise what the dashboard would show
    Preview {
        /// Time range
        #[arg(long, default_value = "live")]
        range: TimeRange,
    },
    /// Query the live station feed region by region
    Feed,
    /// Start the API server
    Server,
}

/// Top-level actions in the interactive menu.
enum Tool {
    ListReports,
    ModerateReports,
    Preview,
    CheckFeed,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::ListReports,
        Self::ModerateReports,
        Self::Preview,
        Self::CheckFeed,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ListReports => "List citizen reports",
            Self::ModerateReports => "Moderate pending reports",
            Self::Preview => "Preview dashboard",
            Self::CheckFeed => "Check live feed",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let Some(command) = cli.command else {
        return interactive(config).await;
    };

    match command {
        Commands::Reports { limit } => {
            let db = open_db(&config.db_path).await?;
            reports::list(db.as_ref(), limit).await?;
        }
        Commands::Moderate { id, status } => {
            let db = open_db(&config.db_path).await?;
            reports::moderate(db.as_ref(), &id, status).await?;
        }
        Commands::Preview { range } => {
            let db = open_db(&config.db_path).await?;
            preview::run(db.as_ref(), range).await?;
        }
        Commands::Feed => feed::check().await?,
        Commands::Server => serve(config, false).await?,
    }

    Ok(())
}

async fn interactive(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Air Map Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::ListReports => {
            let db = open_db(&config.db_path).await?;
            reports::interactive_list(db.as_ref()).await?;
        }
        Tool::ModerateReports => {
            let db = open_db(&config.db_path).await?;
            reports::interactive_moderate(db.as_ref()).await?;
        }
        Tool::Preview => {
            let db = open_db(&config.db_path).await?;
            preview::interactive(db.as_ref()).await?;
        }
        Tool::CheckFeed => feed::check().await?,
        Tool::Server => serve(config, true).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig, prompt: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(async move {
            if prompt {
                air_map_server::interactive::run(config).await
            } else {
                air_map_server::run_server(config).await
            }
        })
    })
    .await??;

    Ok(())
}
