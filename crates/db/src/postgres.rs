//! PostgreSQL booking store with live sync.
//!
//! Bookings are rows in the `bookings` table, queried by date. A trigger
//! (see [`crate::schema`]) sends every insert and delete on the
//! [`CHANGE_CHANNEL`] notification channel; [`PgStore::spawn_listener`]
//! relays those notifications into the store's [`ChangeFeed`], so panels see
//! changes made by any process sharing the database.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::postgres::PgListener;
use tablebook_core::{
    availability::find_free_table,
    errors::{BookingError, BookingResult},
    models::booking::{Booking, BookingDraft},
    store::{BookingChange, BookingStore, LiveBookingStore},
};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    create_pool,
    feed::ChangeFeed,
    repositories::booking,
    schema::CHANGE_CHANNEL,
    DbPool,
};

/// Pause before retrying after the listener connection fails.
const LISTENER_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    feed: ChangeFeed,
}

impl PgStore {
    /// Wraps an existing pool. No notifications are relayed until
    /// [`spawn_listener`](Self::spawn_listener) is called.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::default(),
        }
    }

    /// Connects, then starts relaying change notifications.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let store = Self::new(create_pool(database_url).await?);
        store.spawn_listener().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Starts a task that forwards `NOTIFY` payloads into the change feed.
    ///
    /// Returns once the channel is being listened on, so writes made after
    /// this call are guaranteed to be relayed. Notifications sent while the
    /// listener is disconnected are lost; after reconnecting it publishes
    /// [`BookingChange::Resync`] so subscribers re-read. The task ends when
    /// the pool is closed.
    pub async fn spawn_listener(&self) -> Result<JoinHandle<()>> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;
        info!(channel = CHANGE_CHANNEL, "listening for booking changes");

        let feed = self.feed.clone();
        Ok(tokio::spawn(async move {
            loop {
                match listener.try_recv().await {
                    Ok(Some(notification)) => {
                        relay(&feed, notification.payload());
                        continue;
                    }
                    Ok(None) => warn!("booking change listener lost its connection"),
                    Err(sqlx::Error::PoolClosed) => break,
                    Err(err) => error!(error = %err, "booking change listener failed"),
                }
                if !relisten(&mut listener).await {
                    break;
                }
                feed.publish(BookingChange::Resync);
            }
            info!(channel = CHANGE_CHANNEL, "booking change listener stopped");
        }))
    }
}

fn relay(feed: &ChangeFeed, payload: &str) {
    match serde_json::from_str::<BookingChange>(payload) {
        Ok(change) => {
            debug!(?change, "booking change notification");
            feed.publish(change);
        }
        Err(err) => warn!(error = %err, payload, "ignoring malformed booking notification"),
    }
}

/// Re-establishes the `LISTEN`, retrying until it succeeds.
///
/// Returns `false` once the pool has been closed.
async fn relisten(listener: &mut PgListener) -> bool {
    loop {
        // Forget the old registration so the reconnect does not listen twice.
        if let Err(err) = listener.unlisten(CHANGE_CHANNEL).await {
            debug!(error = %err, "unlisten on a broken connection");
        }
        match listener.listen(CHANGE_CHANNEL).await {
            Ok(()) => {
                info!(channel = CHANGE_CHANNEL, "booking change listener reconnected");
                return true;
            }
            Err(sqlx::Error::PoolClosed) => return false,
            Err(err) => {
                error!(error = %err, "reconnecting booking change listener, retrying");
                tokio::time::sleep(LISTENER_RETRY_DELAY).await;
            }
        }
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        let rows = booking::get_bookings_by_date(&self.pool, date).await?;
        rows.into_iter()
            .map(|row| Booking::try_from(row).map_err(BookingError::Storage))
            .collect()
    }

    async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>> {
        let mut tx = self.pool.begin().await.map_err(eyre::Report::from)?;
        booking::lock_date(&mut *tx, draft.date).await?;

        let existing = booking::get_bookings_by_date(&mut *tx, draft.date)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>>>()?;

        let Some(table) = find_free_table(&existing, draft.date, draft.time) else {
            // Nothing written; dropping the transaction releases the lock.
            return Ok(None);
        };

        // The stored row, not the draft: PostgreSQL keeps microseconds only.
        let row = booking::create_booking(&mut *tx, &draft.seat(table)).await?;
        let stored = Booking::try_from(row)?;
        tx.commit().await.map_err(eyre::Report::from)?;

        Ok(Some(stored))
    }

    async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        booking::delete_booking(&self.pool, id)
            .await?
            .map(Booking::try_from)
            .transpose()
            .map_err(BookingError::Storage)
    }
}

impl LiveBookingStore for PgStore {
    fn subscribe(&self) -> broadcast::Receiver<BookingChange> {
        self.feed.subscribe()
    }
}
