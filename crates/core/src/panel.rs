//! # Admin panel
//!
//! Staff pick a date and a slot; the panel shows one marker per table and a
//! list of the bookings starting in that slot. The selected date's bookings
//! are cached in [`AdminPanel`] and refreshed either by re-querying the store
//! or from a live snapshot.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{booking::Booking, slot::Slot, table::TableNumber},
    store::BookingStore,
};

/// Longest badge initials shown on a table marker.
const MAX_INITIALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMarker {
    pub table: TableNumber,
    pub booked: bool,
    /// `"{initials} • {size}"`, empty for a free table.
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub id: Uuid,
    pub name: String,
    pub size: u32,
    pub table: TableNumber,
    pub notes: Option<String>,
}

/// What the panel shows for the selected date and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelView {
    pub header: String,
    pub date: NaiveDate,
    pub time: Slot,
    pub tables: Vec<TableMarker>,
    pub entries: Vec<PanelEntry>,
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    date: NaiveDate,
    slot: Slot,
    bookings: Vec<Booking>,
}

impl AdminPanel {
    /// A panel on `today` at the first slot, with nothing cached yet.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            slot: Slot::first(),
            bookings: Vec::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn select_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }

    /// Switches the day, keeping the selected slot. The cache is dropped
    /// until the next refresh or snapshot.
    pub fn select_date(&mut self, date: NaiveDate) {
        if date != self.date {
            self.date = date;
            self.bookings.clear();
        }
    }

    /// Re-reads the selected date from the store.
    pub async fn refresh<S>(&mut self, store: &S) -> BookingResult<()>
    where
        S: BookingStore + ?Sized,
    {
        self.bookings = store.bookings_for_date(self.date).await?;
        debug!(date = %self.date, count = self.bookings.len(), "panel refreshed");
        Ok(())
    }

    /// Replaces the cache with a live snapshot for `date`.
    /// Snapshots for any other date are ignored.
    pub fn apply_snapshot(&mut self, date: NaiveDate, bookings: Vec<Booking>) {
        if date == self.date {
            self.bookings = bookings;
        }
    }

    /// Cancels a booking and re-reads the day so it drops out of the view.
    pub async fn cancel<S>(&mut self, store: &S, id: Uuid) -> BookingResult<Booking>
    where
        S: BookingStore + ?Sized,
    {
        let removed = store
            .cancel(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;
        info!(%id, date = %removed.date, time = %removed.time, "booking cancelled");

        self.refresh(store).await?;
        Ok(removed)
    }

    pub fn render(&self) -> PanelView {
        let mut in_slot: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.date == self.date && b.time == self.slot)
            .collect();
        in_slot.sort_by_key(|b| b.table);

        let tables = TableNumber::all()
            .map(|table| match in_slot.iter().find(|b| b.table == table) {
                Some(booking) => TableMarker {
                    table,
                    booked: true,
                    badge: format!("{} • {}", initials(&booking.name), booking.size),
                },
                None => TableMarker {
                    table,
                    booked: false,
                    badge: String::new(),
                },
            })
            .collect();

        let entries = in_slot
            .into_iter()
            .map(|b| PanelEntry {
                id: b.id,
                name: b.name.clone(),
                size: b.size,
                table: b.table,
                notes: b.notes.clone(),
            })
            .collect();

        PanelView {
            header: format!("{} @ {}", self.date, self.slot),
            date: self.date,
            time: self.slot,
            tables,
            entries,
        }
    }
}

/// First letter of each name part, uppercased, at most three letters.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS)
        .collect()
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for marker in &self.tables {
            if marker.booked {
                writeln!(f, "  [T{}] {}", marker.table, marker.badge)?;
            } else {
                writeln!(f, "  [T{}] free", marker.table)?;
            }
        }
        if self.entries.is_empty() {
            return writeln!(f, "  no bookings");
        }
        for entry in &self.entries {
            write!(
                f,
                "  - {} ({} people), Table {}",
                entry.name, entry.size, entry.table
            )?;
            if let Some(notes) = &entry.notes {
                write!(f, ", Notes: {}", notes)?;
            }
            writeln!(f, "  [{}]", entry.id)?;
        }
        Ok(())
    }
}
