//! File-backed booking store.
//!
//! All bookings live in one JSON array on disk. A missing file is an empty
//! book; a file that no longer parses is logged and also read as empty.
//! Writes go to a sibling temp file that is renamed over the original.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use tablebook_core::{
    availability::find_free_table,
    errors::BookingResult,
    models::booking::{Booking, BookingDraft},
    store::BookingStore,
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

/// File name used when none is configured.
pub const DEFAULT_BOOKINGS_FILE: &str = "ppg_bookings_v1.json";

pub struct LocalStore {
    path: PathBuf,
    // Held across read-modify-write so reservations cannot interleave.
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn read_all(&self) -> Result<Vec<Booking>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("reading {}", self.path.display()))
            }
        };

        match serde_json::from_str(&raw) {
            Ok(bookings) => Ok(bookings),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "bookings file unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, bookings: &[Booking]) -> Result<()> {
        let json = serde_json::to_vec_pretty(bookings)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&tmp, json)
            .await
            .wrap_err_with(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("replacing {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = bookings.len(), "bookings written");
        Ok(())
    }
}

#[async_trait]
impl BookingStore for LocalStore {
    async fn bookings_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        let all = self.read_all().await?;
        Ok(all.into_iter().filter(|b| b.date == date).collect())
    }

    async fn reserve(&self, draft: BookingDraft) -> BookingResult<Option<Booking>> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        let Some(table) = find_free_table(&all, draft.date, draft.time) else {
            return Ok(None);
        };

        let booking = draft.seat(table);
        all.push(booking.clone());
        self.write_all(&all).await?;
        Ok(Some(booking))
    }

    async fn cancel(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        let Some(index) = all.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let removed = all.remove(index);
        self.write_all(&all).await?;
        Ok(Some(removed))
    }
}
