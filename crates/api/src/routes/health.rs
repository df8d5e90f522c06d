use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tablebook_core::store::BookingStore;
use tracing::warn;

use crate::{handlers::today, ApiState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    storage: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

/// Reports "ok" only if today's bookings can be read.
async fn health_check(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.bookings_for_date(today()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                storage: "ok",
            }),
        ),
        Err(err) => {
            warn!(error = %err, "health check could not read bookings");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    storage: "unavailable",
                }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
