use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/panel", get(handlers::panel::get_panel))
        .route("/api/panel/stream", get(handlers::panel::panel_stream))
        .route(
            "/api/panel/bookings/:id",
            delete(handlers::panel::cancel_from_panel),
        )
}
