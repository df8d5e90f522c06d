//! # TableBook Core
//!
//! Domain types and booking logic shared by every storage variant:
//!
//! - **models**: bookings, the 15-minute slot grid and table numbers
//! - **availability**: the overlap check that assigns the lowest free table
//! - **store**: the storage traits and the live change feed types
//! - **forms** / **panel**: explicit view state for the guest form and the admin panel

pub mod availability;
pub mod errors;
pub mod forms;
pub mod models;
pub mod panel;
pub mod store;
