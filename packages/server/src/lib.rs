#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the air map dashboard.
//!
//! Serves station, sensor and report data for the `MapLibre` frontend,
//! accepts citizen report submissions into a `SQLite` store, and serves the
//! built frontend from `app/dist`. Stations come from the WAQI feed when
//! `WAQI_API_TOKEN` is set and fall back to simulation otherwise.

pub mod auth;
pub mod category;
pub mod config;
mod handlers;
pub mod interactive;
pub mod loader;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, error::InternalError, middleware, web};
use air_map_database::open_db;
use air_map_forecast::{Forecaster, TrendForecaster};
use air_map_server_models::ErrorResponse;
use air_map_source::{LiveFeedConfig, StationFeed, WaqiFeed, waqi_feed};
use switchy_database::Database;

use crate::auth::{InMemorySessionStore, SessionStore};
pub use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Report store.
    pub db: Arc<dyn Database>,
    /// Accounts and sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Live station feed, when a token is configured.
    pub feed: Option<Arc<dyn StationFeed>>,
    /// Model behind the forecast chart.
    pub forecaster: Arc<dyn Forecaster>,
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Registers the `/api` routes.
///
/// Query strings and JSON bodies that fail to parse (such as an unknown
/// `range`) answer 400 with an [`ErrorResponse`] body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| bad_request(err));
    let json_config = web::JsonConfig::default().error_handler(|err, _req| bad_request(err));

    cfg.service(
        web::scope("/api")
            .app_data(query_config)
            .app_data(json_config)
            .route("/health", web::get().to(handlers::health))
            .route("/stations", web::get().to(handlers::stations))
            .route("/sensors", web::get().to(handlers::sensors))
            .route("/reports", web::get().to(handlers::reports))
            .route("/reports", web::post().to(handlers::submit_report))
            .route(
                "/reports/{id}/status",
                web::patch().to(handlers::update_status),
            )
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/sources", web::get().to(handlers::sources))
            .route("/layers/satellite", web::get().to(handlers::satellite_layer))
            .route("/layers/traffic", web::get().to(handlers::traffic_layer))
            .route("/forecast", web::get().to(handlers::forecast))
            .route("/auth/signup", web::post().to(handlers::sign_up))
            .route("/auth/signin", web::post().to(handlers::sign_in))
            .route("/auth/signout", web::post().to(handlers::sign_out)),
    );
}

/// Builds the live feed from `WAQI_API_TOKEN`, if set.
fn live_feed(http: reqwest::Client) -> Option<Arc<dyn StationFeed>> {
    let config = LiveFeedConfig::from_env(waqi_feed());
    if !config.is_enabled() {
        log::info!("WAQI_API_TOKEN not set, serving simulated stations");
        return None;
    }

    match WaqiFeed::from_config(http, &config) {
        Ok(feed) => Some(Arc::new(feed)),
        Err(e) => {
            log::error!("Live feed disabled: {e}");
            None
        }
    }
}

/// Starts the air map API server.
///
/// Opens the report store, configures the live feed, and starts the
/// Actix-Web HTTP server. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`) and initialises logging.
///
/// # Errors
///
/// * If the report store cannot be opened
/// * If the HTTP server fails to bind or encounters a runtime error
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Opening report store at {}...", config.db_path.display());
    let db = open_db(&config.db_path)
        .await
        .map_err(std::io::Error::other)?;

    let feed = live_feed(reqwest::Client::new());

    let state = web::Data::new(AppState {
        db: Arc::from(db),
        sessions: Arc::new(InMemorySessionStore::new()),
        feed,
        forecaster: Arc::new(TrendForecaster::new()),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
