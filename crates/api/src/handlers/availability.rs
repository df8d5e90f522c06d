//! # Availability Handlers
//!
//! Answers "which tables are free if I book this slot now?" without
//! reserving anything. The check is the same overlap scan a reservation
//! runs: any booking on the date whose 60-minute window overlaps the
//! requested one holds its table.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tablebook_core::{
    availability::{availability, Availability},
    models::slot::Slot,
    store::BookingStore,
};

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Day to check; today when omitted
    pub date: Option<NaiveDate>,

    /// Requested start slot, `HH:MM` on the grid
    pub time: Slot,
}

/// Lists free tables for a date and start slot
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2026-10-18&time=19:30
/// ```
///
/// `next_table` is the table a booking submitted now would receive, or
/// `null` when all four are taken.
pub async fn check_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Availability>, AppError> {
    let date = query.date.unwrap_or_else(today);
    let bookings = state.store.bookings_for_date(date).await?;

    Ok(Json(availability(&bookings, date, query.time)))
}
