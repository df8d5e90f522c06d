use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use tablebook_core::{
    errors::BookingResult,
    models::booking::{Booking, BookingDraft},
    store::{BookingChange, BookingStore, LiveBookingStore},
};
use tokio::sync::broadcast;
use uuid::Uuid;

// Mock store for exercising failure paths without a backend
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>>;
        async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>>;
        async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>>;
    }

    impl LiveBookingStore for BookingRepo {
        fn subscribe(&self) -> broadcast::Receiver<BookingChange>;
    }
}
