use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{slot::Slot, table::TableNumber};

/// A stored reservation.
///
/// Field names match the persisted document shape
/// (`id, name, size, notes, date, time, table, createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: Slot,
    pub table: TableNumber,
    pub created_at: DateTime<Utc>,
}

/// A validated booking that has not been given a table yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: String,
    pub size: u32,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: Slot,
}

impl BookingDraft {
    /// Turns the draft into a booking seated at `table`.
    pub fn seat(self, table: TableNumber) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            name: self.name,
            size: self.size,
            notes: self.notes,
            date: self.date,
            time: self.time,
            table,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Absent means "today".
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub time: Slot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub message: String,
    /// How long a client keeps the confirmation up before clearing its form.
    pub reset_after_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsForDateResponse {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    pub id: Uuid,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<Slot>,
    pub seating_minutes: u16,
}
