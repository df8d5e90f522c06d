//! # Guest form
//!
//! [`GuestForm`] holds what a guest has typed and the status line shown under
//! the form. Submitting validates the input, asks the store for a table and
//! records the outcome as a [`FormStatus`].

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, BookingDraft},
        slot::Slot,
        table::TABLE_COUNT,
    },
    store::BookingStore,
};

/// How long a confirmation stays up before the form is cleared.
pub const RESET_DELAY: Duration = Duration::from_millis(1500);

pub const DEFAULT_PARTY_SIZE: u32 = 2;

/// Which day the guest is booking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum DateChoice {
    #[default]
    Today,
    /// An explicit date. `None` while the picker is still empty.
    Pick(Option<NaiveDate>),
}

impl DateChoice {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DateChoice::Today | DateChoice::Pick(None) => today,
            DateChoice::Pick(Some(date)) => date,
        }
    }
}

/// Message shown under the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum FormStatus {
    Warning(String),
    Rejected(String),
    Confirmed(String),
    Failed(String),
}

impl FormStatus {
    pub fn message(&self) -> &str {
        match self {
            FormStatus::Warning(m)
            | FormStatus::Rejected(m)
            | FormStatus::Confirmed(m)
            | FormStatus::Failed(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, FormStatus::Confirmed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestForm {
    pub name: String,
    pub size: u32,
    pub notes: String,
    pub time: Slot,
    pub date: DateChoice,
    pub status: Option<FormStatus>,
}

impl Default for GuestForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: DEFAULT_PARTY_SIZE,
            notes: String::new(),
            time: Slot::first(),
            date: DateChoice::Today,
            status: None,
        }
    }
}

impl GuestForm {
    /// Validates the form and books a table through `store`.
    ///
    /// On every path `self.status` is set to what the guest should see.
    /// Empty names and full slots persist nothing.
    pub async fn submit<S>(&mut self, store: &S, today: NaiveDate) -> BookingResult<Booking>
    where
        S: BookingStore + ?Sized,
    {
        self.status = None;

        let draft = match self.draft(today) {
            Ok(draft) => draft,
            Err(err) => {
                self.status = Some(FormStatus::Warning(match &err {
                    BookingError::Validation(message) => message.clone(),
                    other => other.to_string(),
                }));
                return Err(err);
            }
        };
        let (date, time) = (draft.date, draft.time);

        match store.reserve(draft).await {
            Ok(Some(booking)) => {
                info!(
                    id = %booking.id,
                    date = %booking.date,
                    time = %booking.time,
                    table = %booking.table,
                    "booking confirmed"
                );
                self.status = Some(FormStatus::Confirmed(format!(
                    "Thank you {}, your table {} is booked for {} at {} on {}.",
                    booking.name, booking.table, booking.size, booking.time, booking.date
                )));
                Ok(booking)
            }
            Ok(None) => {
                info!(%date, %time, "booking rejected, no table free");
                self.status = Some(FormStatus::Rejected(format!(
                    "Sorry, all {} tables are fully booked for this time.",
                    TABLE_COUNT
                )));
                Err(BookingError::NoTableAvailable {
                    date: date.to_string(),
                    time: time.to_string(),
                })
            }
            Err(err) => {
                self.status = Some(FormStatus::Failed(format!(
                    "Could not save the booking, please try again. ({})",
                    err
                )));
                Err(err)
            }
        }
    }

    /// Clears everything the guest entered, keeping nothing from the last booking.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn draft(&self, today: NaiveDate) -> BookingResult<BookingDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BookingError::Validation(
                "Please enter the name for the booking.".to_string(),
            ));
        }
        if self.size == 0 {
            return Err(BookingError::Validation(
                "Party size must be at least 1.".to_string(),
            ));
        }

        let notes = self.notes.trim();
        Ok(BookingDraft {
            name: name.to_string(),
            size: self.size,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            date: self.date.resolve(today),
            time: self.time,
        })
    }
}
