use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

/// Number of tables in the dining room.
pub const TABLE_COUNT: u8 = 4;

/// One of the four fixed tables, numbered 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TableNumber(u8);

impl TableNumber {
    pub fn new(number: u8) -> Option<Self> {
        (1..=TABLE_COUNT).contains(&number).then_some(Self(number))
    }

    /// All tables, lowest first. Assignment walks this order.
    pub fn all() -> impl Iterator<Item = TableNumber> {
        (1..=TABLE_COUNT).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TableNumber {
    type Error = BookingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| BookingError::Validation(format!("Table {} does not exist", value)))
    }
}

impl From<TableNumber> for u8 {
    fn from(table: TableNumber) -> Self {
        table.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
