use axum::http::StatusCode;
use fake::{faker::name::en::Name, Fake};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tablebook_core::{
    models::booking::{BookingsForDateResponse, CancelBookingResponse, CreateBookingResponse, SlotsResponse},
    store::BookingStore,
};
use uuid::Uuid;

use crate::test_utils::{booking_body, test_date, today, TestContext};

#[tokio::test]
async fn test_slots_cover_the_grid() {
    let ctx = TestContext::new();
    let response = ctx.server().get("/api/slots").await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert_eq!(body.slots.len(), 37);
    assert_eq!(body.slots[0].to_string(), "12:00");
    assert_eq!(body.slots[36].to_string(), "21:00");
    assert_eq!(body.seating_minutes, 60);
}

#[tokio::test]
async fn test_create_booking_confirms_with_table() {
    let ctx = TestContext::new();
    let name: String = Name().fake();

    let response = ctx
        .server()
        .post("/api/bookings")
        .json(&booking_body(&name, 4, "19:00"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: CreateBookingResponse = response.json();
    assert_eq!(body.booking.table.get(), 1);
    assert_eq!(body.booking.name, name.trim());
    assert_eq!(body.reset_after_ms, 1500);
    assert_eq!(
        body.message,
        format!(
            "Thank you {}, your table 1 is booked for 4 at 19:00 on 2026-10-18.",
            name.trim()
        )
    );
    assert_eq!(ctx.store.bookings_for_date(test_date()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_name_is_rejected_without_saving() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .post("/api/bookings")
        .json(&booking_body("   ", 2, "12:00"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please enter the name for the booking.");
    assert!(ctx.store.bookings_for_date(test_date()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fifth_overlapping_booking_conflicts() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for (name, table) in [("A", 1), ("B", 2), ("C", 3), ("D", 4)] {
        let response = server.post("/api/bookings").json(&booking_body(name, 2, "12:00")).await;
        let body: CreateBookingResponse = response.json();
        assert_eq!(body.booking.table.get(), table);
    }

    let response = server.post("/api/bookings").json(&booking_body("E", 2, "12:00")).await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Sorry, all 4 tables are fully booked for this time."
    );

    let later = server.post("/api/bookings").json(&booking_body("F", 2, "13:00")).await;
    later.assert_status(StatusCode::CREATED);
    let body: CreateBookingResponse = later.json();
    assert_eq!(body.booking.table.get(), 1);
}

#[tokio::test]
async fn test_off_grid_time_is_a_json_validation_error() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .post("/api/bookings")
        .json(&booking_body("Late Guest", 2, "21:30"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Validation error:"), "{}", error);
    assert!(error.contains("Invalid time slot: 21:30"), "{}", error);
    assert!(ctx.store.bookings_for_date(test_date()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_bodies_answer_json_errors() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let negative_size = server
        .post("/api/bookings")
        .json(&json!({ "name": "Ada", "size": -1, "date": test_date(), "time": "12:00" }))
        .await;
    let not_json = server.post("/api/bookings").text("name=Ada").await;

    for response in [negative_size, not_json] {
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }
    assert!(ctx.store.bookings_for_date(test_date()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_date_books_today() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .post("/api/bookings")
        .json(&json!({ "name": "Walk In", "size": 1, "time": "12:00" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: CreateBookingResponse = response.json();
    assert_eq!(body.booking.date, today());
}

#[tokio::test]
async fn test_list_bookings_sorted_by_time_then_table() {
    let ctx = TestContext::new();
    let server = ctx.server();
    for (name, time) in [("Late", "20:00"), ("Early", "12:00"), ("Early Two", "12:00")] {
        server.post("/api/bookings").json(&booking_body(name, 2, time)).await;
    }

    let response = server
        .get("/api/bookings")
        .add_query_param("date", "2026-10-18")
        .await;

    response.assert_status_ok();
    let body: BookingsForDateResponse = response.json();
    let names: Vec<_> = body.bookings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Early", "Early Two", "Late"]);
}

#[tokio::test]
async fn test_cancel_booking_then_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let created: CreateBookingResponse = server
        .post("/api/bookings")
        .json(&booking_body("Cancel Me", 2, "18:00"))
        .await
        .json();
    let path = format!("/api/bookings/{}", created.booking.id);

    let response = server.delete(&path).await;
    response.assert_status_ok();
    let body: CancelBookingResponse = response.json();
    assert!(body.cancelled);
    assert!(ctx.store.bookings_for_date(test_date()).await.unwrap().is_empty());

    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
