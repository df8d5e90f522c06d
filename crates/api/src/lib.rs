//! # TableBook API
//!
//! The web server for the table-reservation service: guests submit
//! bookings, staff browse a day's floor plan and cancel bookings.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into guest-form and admin-panel operations
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration and storage backend selection
//!
//! Storage is reached only through [`LiveBookingStore`], so the same routes
//! serve the local JSON file and the PostgreSQL backend.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use eyre::Result;
use tablebook_core::store::LiveBookingStore;
use tablebook_db::{feed::Synced, local::LocalStore, postgres::PgStore, schema::initialize_database};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ApiConfig, StorageBackend};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking storage with live change notification
    pub store: Arc<dyn LiveBookingStore>,
}

/// Opens the configured storage backend.
///
/// The local file store is wrapped in [`Synced`] so the server's own writes
/// reach live panel streams. The PostgreSQL store relays database
/// notifications itself, which also covers writes from other processes.
pub async fn open_store(backend: &StorageBackend) -> Result<Arc<dyn LiveBookingStore>> {
    match backend {
        StorageBackend::Local { path } => {
            info!(path = %path.display(), "using local booking file");
            Ok(Arc::new(Synced::new(LocalStore::new(path.clone()))))
        }
        StorageBackend::Postgres { database_url } => {
            info!("using PostgreSQL booking store");
            let store = PgStore::connect(database_url).await?;
            initialize_database(store.pool()).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Builds the router with every route attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot grid and guest bookings
        .merge(routes::booking::routes())
        // Availability lookups
        .merge(routes::availability::routes())
        // Admin panel and live stream
        .merge(routes::panel::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
pub async fn start_server(config: ApiConfig, store: Arc<dyn LiveBookingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState { store });
    let app = app(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(TimeoutLayer::new(config.request_timeout));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
