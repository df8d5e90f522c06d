use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(handlers::booking::list_slots))
        .route(
            "/api/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route("/api/bookings/:id", delete(handlers::booking::cancel_booking))
}
