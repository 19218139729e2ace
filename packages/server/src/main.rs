#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Air map API server binary.

use air_map_server::ServerConfig;
use clap::Parser;

/// Serves the air map API and frontend.
#[derive(Parser, Debug)]
#[command(name = "air_map_server", about = "Air map API server")]
struct Cli {
    /// Prompt for bind address and port before starting.
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let config = ServerConfig::from_env();
    if cli.interactive {
        air_map_server::interactive::run(config).await
    } else {
        air_map_server::run_server(config).await
    }
}
