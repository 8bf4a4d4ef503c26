#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the malaria dashboard.
//!
//! Serves the chart API under `/api` and the dashboard page from the
//! configured static directory. All data is loaded into a [`Dashboard`]
//! before the server binds; handlers only read from it, so workers share it
//! without locking.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use malaria_dash_config::DashboardConfig;
use malaria_dash_dashboard::Dashboard;
use malaria_dash_dataset::progress::null_progress;

/// Shared application state.
pub struct AppState {
    /// Loaded datasets and derived charts.
    pub dashboard: Arc<Dashboard>,
}

/// Registers the `/api` routes.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/summary", web::get().to(handlers::summary))
            .route("/years", web::get().to(handlers::years))
            .route("/charts/map", web::get().to(handlers::map_chart))
            .route("/charts/age-groups", web::get().to(handlers::age_group_chart))
            .route("/charts/incidence", web::get().to(handlers::incidence_charts))
            .route(
                "/charts/incidence/{year}",
                web::get().to(handlers::incidence_chart),
            ),
    );
}

/// Serves the dashboard page and its assets from `dir`, with `index.html`
/// at `/`.
#[must_use]
pub fn static_files(dir: &str) -> Files {
    Files::new("/", dir).index_file("index.html")
}

/// Loads the dashboard described by `config` and serves it.
///
/// Loading happens before binding, so a missing or malformed dataset stops
/// startup with an error instead of serving partial charts.
///
/// # Errors
///
/// Returns an `std::io::Result` error if a dataset cannot be loaded, or if
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: &DashboardConfig) -> std::io::Result<()> {
    let dashboard = Dashboard::load(config, &null_progress()).map_err(|e| {
        log::error!("Failed to load dashboard: {e}");
        std::io::Error::other(e)
    })?;

    serve(config, Arc::new(dashboard)).await
}

/// Serves an already-built dashboard.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(config: &DashboardConfig, dashboard: Arc<Dashboard>) -> std::io::Result<()> {
    let state = web::Data::new(AppState { dashboard });
    let static_dir = config.server.static_dir.clone();
    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(api_routes)
            // Serve the dashboard page
            .service(static_files(&static_dir.to_string_lossy()))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
