#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use tablebook_core::{
    availability::find_free_table,
    errors::BookingResult,
    models::booking::{Booking, BookingDraft},
    store::BookingStore,
};
use uuid::Uuid;

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Store backed by a plain vector, enough to drive the controllers.
#[derive(Default)]
pub struct VecStore {
    pub bookings: Mutex<Vec<Booking>>,
}

impl VecStore {
    pub fn len(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }
}

#[async_trait]
impl BookingStore for VecStore {
    async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        let all = self.bookings.lock().unwrap();
        Ok(all.iter().filter(|b| b.date == date).cloned().collect())
    }

    async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>> {
        let mut all = self.bookings.lock().unwrap();
        let Some(table) = find_free_table(all.iter(), draft.date, draft.time) else {
            return Ok(None);
        };
        let booking = draft.seat(table);
        all.push(booking.clone());
        Ok(Some(booking))
    }

    async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let mut all = self.bookings.lock().unwrap();
        let index = all.iter().position(|b| b.id == id);
        Ok(index.map(|i| all.remove(i)))
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>>;
        async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>>;
        async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>>;
    }
}
