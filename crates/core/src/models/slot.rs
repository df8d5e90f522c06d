//! The fixed reservation grid: 15-minute start times from 12:00 to 21:00,
//! each booking holding its table for 60 minutes.

use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BookingError;

/// First seating, in minutes since midnight (12:00).
pub const OPENING_MINUTE: u16 = 12 * 60;
/// Last seating, in minutes since midnight (21:00).
pub const LAST_SEATING_MINUTE: u16 = 21 * 60;
/// Distance between two grid points.
pub const SLOT_STEP_MINUTES: u16 = 15;
/// How long a booking occupies its table.
pub const SEATING_MINUTES: u16 = 60;

/// A start time on the reservation grid.
///
/// Values can only be built from grid points, so any `Slot` in hand is
/// already valid. Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

impl Slot {
    /// Builds a slot from minutes since midnight, if that minute is a grid point.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        let on_grid = (OPENING_MINUTE..=LAST_SEATING_MINUTE).contains(&minutes)
            && (minutes - OPENING_MINUTE) % SLOT_STEP_MINUTES == 0;
        on_grid.then_some(Self(minutes))
    }

    /// The first slot of the day (12:00).
    pub fn first() -> Self {
        Self(OPENING_MINUTE)
    }

    /// Every slot of the day in ascending order.
    pub fn grid() -> Vec<Self> {
        (OPENING_MINUTE..=LAST_SEATING_MINUTE)
            .step_by(SLOT_STEP_MINUTES as usize)
            .map(Self)
            .collect()
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Half-open minute interval the booking occupies.
    pub fn window(self) -> Range<u16> {
        self.0..self.0 + SEATING_MINUTES
    }

    /// Whether two bookings starting at these slots would share their table time.
    pub fn overlaps(self, other: Slot) -> bool {
        let (a, b) = (self.window(), other.window());
        a.start < b.end && b.start < a.end
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for Slot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::Validation(format!("Invalid time slot: {}", s));

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        Slot::from_minutes(hours * 60 + minutes).ok_or_else(invalid)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
