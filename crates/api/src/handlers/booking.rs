use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tablebook_core::{
    errors::BookingError,
    forms::{DateChoice, GuestForm, RESET_DELAY},
    models::{
        booking::{
            BookingsForDateResponse, CancelBookingResponse, CreateBookingRequest,
            CreateBookingResponse, SlotsResponse,
        },
        slot::{Slot, SEATING_MINUTES},
    },
    store::BookingStore,
};
use tracing::info;
use uuid::Uuid;

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

pub async fn list_slots() -> Json<SlotsResponse> {
    Json(SlotsResponse {
        slots: Slot::grid(),
        seating_minutes: SEATING_MINUTES,
    })
}

/// Guest form submission.
///
/// Empty names and unreadable bodies answer 400, a full slot answers 409,
/// and only a confirmed booking is persisted. Failures carry the form's
/// status message as the error text.
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let Json(payload) = payload?;
    let mut form = GuestForm {
        name: payload.name,
        size: payload.size,
        notes: payload.notes.unwrap_or_default(),
        time: payload.time,
        date: payload.date.map_or(DateChoice::Today, |d| DateChoice::Pick(Some(d))),
        status: None,
    };

    let booking = match form.submit(&*state.store, today()).await {
        Ok(booking) => booking,
        Err(err) => {
            return Err(match &form.status {
                Some(status) => AppError::with_message(err, status.message()),
                None => err.into(),
            })
        }
    };
    let message = form
        .status
        .as_ref()
        .map(|status| status.message().to_string())
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking,
            message,
            reset_after_ms: RESET_DELAY.as_millis() as u64,
        }),
    ))
}

pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BookingsForDateResponse>, AppError> {
    let date = query.date.unwrap_or_else(today);
    let mut bookings = state.store.bookings_for_date(date).await?;
    bookings.sort_by_key(|b| (b.time, b.table));

    Ok(Json(BookingsForDateResponse { date, bookings }))
}

pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelBookingResponse>, AppError> {
    let removed = state
        .store
        .cancel(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;
    info!(%id, date = %removed.date, time = %removed.time, "booking cancelled");

    Ok(Json(CancelBookingResponse {
        id,
        cancelled: true,
    }))
}
