use std::time::Duration;

use axum::{body::Body, http::Request};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use tablebook_api::app;
use tablebook_core::{
    models::booking::CreateBookingResponse,
    panel::PanelView,
    store::BookingStore,
};
use tower::ServiceExt;

use crate::test_utils::{booking_body, test_date, TestContext};

#[tokio::test]
async fn test_panel_marks_booked_tables_for_slot() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server.post("/api/bookings").json(&booking_body("Ada Lovelace", 2, "19:00")).await;
    server.post("/api/bookings").json(&booking_body("Grace Brewster Hopper", 6, "19:00")).await;
    server.post("/api/bookings").json(&booking_body("Other Slot", 2, "19:15")).await;

    let response = server
        .get("/api/panel")
        .add_query_param("date", "2026-10-18")
        .add_query_param("time", "19:00")
        .await;

    response.assert_status_ok();
    let view: PanelView = response.json();
    assert_eq!(view.header, "2026-10-18 @ 19:00");
    let badges: Vec<_> = view.tables.iter().map(|t| t.badge.as_str()).collect();
    assert_eq!(badges, vec!["AL • 2", "GBH • 6", "", ""]);
    assert_eq!(view.entries.len(), 2);
}

#[tokio::test]
async fn test_cancel_from_panel_returns_updated_view() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let created: CreateBookingResponse = server
        .post("/api/bookings")
        .json(&booking_body("Leaving Soon", 3, "12:30"))
        .await
        .json();

    let response = server
        .delete(&format!("/api/panel/bookings/{}", created.booking.id))
        .add_query_param("date", "2026-10-18")
        .add_query_param("time", "12:30")
        .await;

    response.assert_status_ok();
    let view: PanelView = response.json();
    assert!(view.entries.is_empty());
    assert!(view.tables.iter().all(|t| !t.booked));
    assert!(ctx.store.bookings_for_date(test_date()).await.unwrap().is_empty());
}

fn panel_from_event(chunk: &[u8]) -> PanelView {
    let text = std::str::from_utf8(chunk).unwrap();
    assert!(text.starts_with("event: panel\n"), "unexpected event: {}", text);
    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("event without data");
    serde_json::from_str(data).unwrap()
}

#[tokio::test]
async fn test_stream_pushes_view_on_connect_and_on_change() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .uri("/api/panel/stream?date=2026-10-18&time=20:00")
        .body(Body::empty())
        .unwrap();

    let response = app(ctx.build_state()).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()["content-type"],
        "text/event-stream"
    );
    let mut body = response.into_body().into_data_stream();

    let first = body.next().await.unwrap().unwrap();
    assert!(panel_from_event(&first).entries.is_empty());

    ctx.server()
        .post("/api/bookings")
        .json(&booking_body("Streamed Guest", 2, "20:00"))
        .await;

    let next = tokio::time::timeout(Duration::from_secs(5), body.next())
        .await
        .expect("no event after booking")
        .unwrap()
        .unwrap();
    let view = panel_from_event(&next);
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.tables[0].badge, "SG • 2");
}
