#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the malaria dashboard server.
//!
//! Reads the optional config file named by `MALARIA_DASH_CONFIG`, applies
//! environment overrides and serves until stopped.

use std::path::PathBuf;

use malaria_dash_config::DashboardConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var("MALARIA_DASH_CONFIG").ok().map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref()).map_err(|e| {
        log::error!("{e}");
        std::io::Error::other(e)
    })?;

    malaria_dash_server::run_server(&config).await
}
