use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use tablebook_api::middleware::error_handling::AppError;
use tablebook_core::errors::BookingError;
use tablebook_db::mock::repositories::MockBookingRepo;

use crate::test_utils::{booking_body, mock_server};

#[rstest]
#[case(BookingError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(
    BookingError::NoTableAvailable { date: "2026-10-18".into(), time: "12:00".into() },
    StatusCode::CONFLICT
)]
#[case(BookingError::Storage(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError::from(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_becomes_storage_error() {
    let err: AppError = eyre::eyre!("connection refused").into();
    assert!(matches!(err.error, BookingError::Storage(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_attached_message_replaces_error_text() {
    let full = BookingError::NoTableAvailable {
        date: "2026-10-18".into(),
        time: "12:00".into(),
    };
    let err = AppError::with_message(full, "Sorry, all 4 tables are fully booked for this time.");

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.message(), "Sorry, all 4 tables are fully booked for this time.");
    assert_eq!(
        AppError::from(BookingError::NotFound("gone".into())).message(),
        "Resource not found: gone"
    );
}

#[tokio::test]
async fn test_storage_failure_on_submit_is_a_server_error() {
    let mut repo = MockBookingRepo::new();
    repo.expect_reserve()
        .times(1)
        .returning(|_| Err(BookingError::Storage(eyre::eyre!("write failed"))));

    let response = mock_server(repo)
        .post("/api/bookings")
        .json(&booking_body("Unlucky", 2, "12:00"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Could not save the booking, please try again."));
    assert!(error.contains("write failed"));
}

#[tokio::test]
async fn test_cancel_failure_is_a_server_error() {
    let mut repo = MockBookingRepo::new();
    repo.expect_cancel()
        .times(1)
        .returning(|_| Err(BookingError::Storage(eyre::eyre!("delete failed"))));

    let response = mock_server(repo)
        .delete(&format!("/api/bookings/{}", uuid::Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_reports_unreadable_storage() {
    let mut repo = MockBookingRepo::new();
    repo.expect_bookings_for_date()
        .returning(|_| Err(BookingError::Storage(eyre::eyre!("unreachable"))));

    let response = mock_server(repo).get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
}
