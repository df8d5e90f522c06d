/// Table availability lookups
pub mod availability;
/// Guest bookings: create, list, cancel, and the slot grid
pub mod booking;
/// Admin floor-plan panel, including the live stream
pub mod panel;

use chrono::{Local, NaiveDate};

/// The restaurant's current calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
