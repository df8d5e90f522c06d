//! # Panel Handlers
//!
//! The staff view: a floor plan with one marker per table plus the list of
//! bookings that start in the selected slot.
//!
//! `GET /api/panel/stream` keeps the view live. It subscribes to the store's
//! change feed for the selected date and pushes a freshly rendered
//! [`PanelView`] as a server-sent event on connect and after every booking
//! or cancellation on that date.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::NaiveDate;
use futures::{stream, Stream};
use serde::Deserialize;
use std::sync::Arc;
use tablebook_core::{
    models::slot::Slot,
    panel::{AdminPanel, PanelView},
    store::DateSubscription,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

/// Selected date and slot; today and the first slot when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    pub date: Option<NaiveDate>,
    pub time: Option<Slot>,
}

impl PanelQuery {
    fn panel(&self) -> AdminPanel {
        let mut panel = AdminPanel::new(self.date.unwrap_or_else(today));
        if let Some(slot) = self.time {
            panel.select_slot(slot);
        }
        panel
    }
}

pub async fn get_panel(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<PanelView>, AppError> {
    let mut panel = query.panel();
    panel.refresh(&*state.store).await?;

    Ok(Json(panel.render()))
}

/// Cancels from the panel and returns the re-rendered view.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/panel/bookings/:id?date=2026-10-18&time=19:30
/// ```
pub async fn cancel_from_panel(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<PanelView>, AppError> {
    let mut panel = query.panel();
    panel.cancel(&*state.store, id).await?;

    Ok(Json(panel.render()))
}

/// Live panel as server-sent events
///
/// Each `panel` event carries a JSON [`PanelView`]. A failed re-read is
/// reported as an `error` event and the stream keeps waiting for the next
/// change. The stream ends when the store's feed shuts down.
pub async fn panel_stream(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PanelQuery>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let panel = query.panel();
    let subscription = DateSubscription::new(state.store.clone(), panel.date());
    info!(date = %panel.date(), slot = %panel.slot(), "panel stream opened");

    let events = stream::unfold((subscription, panel), |(mut subscription, mut panel)| async move {
        let event = match subscription.next_snapshot().await {
            Ok(Some(bookings)) => {
                panel.apply_snapshot(subscription.date(), bookings);
                Event::default().event("panel").json_data(panel.render())
            }
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "panel stream refresh failed");
                Ok(Event::default().event("error").data(err.to_string()))
            }
        };
        Some((event, (subscription, panel)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
