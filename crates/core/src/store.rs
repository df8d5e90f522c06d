//! # Storage traits
//!
//! Every storage variant implements [`BookingStore`]. Variants that can tell
//! their readers about changes also implement [`LiveBookingStore`], which hands
//! out a broadcast receiver of [`BookingChange`]s. [`DateSubscription`] turns
//! that raw feed into per-date snapshots, the shape a panel re-renders from.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::booking::{Booking, BookingDraft},
};

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All bookings on `date`, in no particular order.
    async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>>;

    /// Assigns the lowest free table and persists the booking.
    ///
    /// The availability check and the insert happen as one step, so two
    /// concurrent reservations cannot both receive the last table.
    /// Returns `Ok(None)` when every table is taken for the window.
    async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>>;

    /// Removes a booking, returning it if it existed.
    async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>>;
}

pub trait LiveBookingStore: BookingStore {
    fn subscribe(&self) -> broadcast::Receiver<BookingChange>;
}

/// A change to the booking set, as delivered to live subscribers.
///
/// Changes name the booking and its date only. Subscribers re-read the
/// date they watch rather than patching a local copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BookingChange {
    Created { id: Uuid, date: NaiveDate },
    Cancelled { id: Uuid, date: NaiveDate },
    /// Changes may have been lost upstream; every date must be re-read.
    Resync,
}

impl BookingChange {
    /// Whether a subscriber watching `date` has to refresh.
    pub fn affects(&self, date: NaiveDate) -> bool {
        match self {
            BookingChange::Created { date: changed, .. }
            | BookingChange::Cancelled { date: changed, .. } => *changed == date,
            BookingChange::Resync => true,
        }
    }
}

/// Live view of one date's bookings.
///
/// The first call to [`next_snapshot`](Self::next_snapshot) returns the
/// current bookings; every later call waits for a change on the same date
/// and returns the refreshed list. Changes on other dates are skipped; a lag
/// or an upstream [`BookingChange::Resync`] forces a re-read.
pub struct DateSubscription {
    store: Arc<dyn LiveBookingStore>,
    changes: broadcast::Receiver<BookingChange>,
    date: NaiveDate,
    primed: bool,
}

impl DateSubscription {
    pub fn new(store: Arc<dyn LiveBookingStore>, date: NaiveDate) -> Self {
        // Subscribe before the first read so nothing between the two is lost.
        let changes = store.subscribe();
        Self {
            store,
            changes,
            date,
            primed: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Waits for the next snapshot. `Ok(None)` means the feed has shut down.
    pub async fn next_snapshot(&mut self) -> BookingResult<Option<Vec<Booking>>> {
        if !self.primed {
            self.primed = true;
            return self.snapshot().await.map(Some);
        }

        loop {
            match self.changes.recv().await {
                Ok(change) if change.affects(self.date) => {
                    debug!(date = %self.date, ?change, "booking change for subscribed date");
                    return self.snapshot().await.map(Some);
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(date = %self.date, skipped, "subscriber lagged, resynchronizing");
                    return self.snapshot().await.map(Some);
                }
                Err(RecvError::Closed) => return Ok(None),
            }
        }
    }

    async fn snapshot(&self) -> BookingResult<Vec<Booking>> {
        self.store.bookings_for_date(self.date).await
    }
}
