use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use tablebook_core::availability::Availability;

use crate::test_utils::{booking_body, TestContext};

async fn availability(server: &axum_test::TestServer, time: &str) -> Availability {
    let response = server
        .get("/api/availability")
        .add_query_param("date", "2026-10-18")
        .add_query_param("time", time)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_empty_day_offers_every_table() {
    let ctx = TestContext::new();
    let result = availability(&ctx.server(), "12:00").await;

    assert_eq!(result.next_table.map(|t| t.get()), Some(1));
    assert_eq!(result.free_tables.len(), 4);
}

#[tokio::test]
async fn test_overlapping_bookings_hold_their_tables() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server.post("/api/bookings").json(&booking_body("One", 2, "18:00")).await;
    server.post("/api/bookings").json(&booking_body("Two", 2, "18:30")).await;

    let overlapping = availability(&server, "18:45").await;
    let free: Vec<_> = overlapping.free_tables.iter().map(|t| t.get()).collect();
    assert_eq!(free, vec![3, 4]);

    let after_first = availability(&server, "19:00").await;
    assert_eq!(after_first.next_table.map(|t| t.get()), Some(1));
}

#[tokio::test]
async fn test_full_slot_has_no_next_table() {
    let ctx = TestContext::new();
    let server = ctx.server();
    for name in ["A", "B", "C", "D"] {
        server.post("/api/bookings").json(&booking_body(name, 2, "20:00")).await;
    }

    let result = availability(&server, "20:15").await;
    assert_eq!(result.next_table, None);
    assert!(result.free_tables.is_empty());
}

#[tokio::test]
async fn test_off_grid_time_is_a_bad_request() {
    let ctx = TestContext::new();
    let response = ctx
        .server()
        .get("/api/availability")
        .add_query_param("time", "12:05")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
