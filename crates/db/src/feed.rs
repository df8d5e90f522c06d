//! In-process change feed.
//!
//! [`ChangeFeed`] is a broadcast channel of [`BookingChange`]s shared by a
//! store and its subscribers. [`Synced`] decorates any [`BookingStore`] so
//! that each successful reservation or cancellation is published on the feed.

use async_trait::async_trait;
use chrono::NaiveDate;
use tablebook_core::{
    errors::BookingResult,
    models::booking::{Booking, BookingDraft},
    store::{BookingChange, BookingStore, LiveBookingStore},
};
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Buffered changes per subscriber before it is reported as lagging.
pub const DEFAULT_FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<BookingChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Sends `change` to every current subscriber and returns how many there were.
    pub fn publish(&self, change: BookingChange) -> usize {
        // No subscribers is not an error for a feed.
        let receivers = self.tx.send(change).unwrap_or(0);
        trace!(receivers, "booking change published");
        receivers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookingChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

/// A store whose writes are announced on a [`ChangeFeed`].
pub struct Synced<S> {
    inner: S,
    feed: ChangeFeed,
}

impl<S: BookingStore> Synced<S> {
    pub fn new(inner: S) -> Self {
        Self::with_feed(inner, ChangeFeed::default())
    }

    pub fn with_feed(inner: S, feed: ChangeFeed) -> Self {
        Self { inner, feed }
    }
}

#[async_trait]
impl<S: BookingStore> BookingStore for Synced<S> {
    async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        self.inner.bookings_for_date(date).await
    }

    async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>> {
        let booking = self.inner.reserve(draft).await?;
        if let Some(booking) = &booking {
            self.feed.publish(BookingChange::Created {
                id: booking.id,
                date: booking.date,
            });
        }
        Ok(booking)
    }

    async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let removed = self.inner.cancel(id).await?;
        if let Some(booking) = &removed {
            self.feed.publish(BookingChange::Cancelled {
                id: booking.id,
                date: booking.date,
            });
        }
        Ok(removed)
    }
}

impl<S: BookingStore> LiveBookingStore for Synced<S> {
    fn subscribe(&self) -> broadcast::Receiver<BookingChange> {
        self.feed.subscribe()
    }
}
