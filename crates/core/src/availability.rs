//! # Availability
//!
//! Table assignment for a requested date and start slot. A table is taken if
//! any booking on the same date holds it during an overlapping 60-minute
//! window; the lowest untaken table wins.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{booking::Booking, slot::Slot, table::TableNumber};

/// Free tables for one date and start slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    pub time: Slot,
    pub free_tables: Vec<TableNumber>,
    /// The table a booking made now would receive.
    pub next_table: Option<TableNumber>,
}

/// Tables held on `date` by bookings whose window overlaps `slot`'s.
pub fn occupied_tables<'a, I>(bookings: I, date: NaiveDate, slot: Slot) -> BTreeSet<TableNumber>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter(|booking| booking.date == date && booking.time.overlaps(slot))
        .map(|booking| booking.table)
        .collect()
}

/// Lowest-numbered table free for the whole window starting at `slot`.
pub fn find_free_table<'a, I>(bookings: I, date: NaiveDate, slot: Slot) -> Option<TableNumber>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let used = occupied_tables(bookings, date, slot);
    TableNumber::all().find(|table| !used.contains(table))
}

pub fn availability<'a, I>(bookings: I, date: NaiveDate, slot: Slot) -> Availability
where
    I: IntoIterator<Item = &'a Booking>,
{
    let used = occupied_tables(bookings, date, slot);
    let free_tables: Vec<TableNumber> = TableNumber::all().filter(|t| !used.contains(t)).collect();

    Availability {
        date,
        time: slot,
        next_table: free_tables.first().copied(),
        free_tables,
    }
}
