use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablebook_core::models::{booking::Booking, table::TableNumber};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub name: String,
    pub size: i32,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub table_number: i16,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        let table = u8::try_from(row.table_number)
            .ok()
            .and_then(TableNumber::new)
            .ok_or_else(|| eyre!("booking {} has invalid table {}", row.id, row.table_number))?;

        Ok(Booking {
            id: row.id,
            name: row.name,
            size: u32::try_from(row.size)
                .map_err(|_| eyre!("booking {} has invalid size {}", row.id, row.size))?,
            notes: row.notes,
            date: row.date,
            time: row.time.parse()?,
            table,
            created_at: row.created_at,
        })
    }
}
