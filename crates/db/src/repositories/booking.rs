use crate::models::DbBooking;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::PgExecutor;
use tablebook_core::models::booking::Booking;
use uuid::Uuid;

pub async fn create_booking<'e, E>(executor: E, booking: &Booking) -> Result<DbBooking>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, name, size, notes, date, time, table_number, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, size, notes, date, time, table_number, created_at
        "#,
    )
    .bind(booking.id)
    .bind(&booking.name)
    .bind(i32::try_from(booking.size)?)
    .bind(booking.notes.as_deref())
    .bind(booking.date)
    .bind(booking.time.to_string())
    .bind(i16::from(booking.table.get()))
    .bind(booking.created_at)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_bookings_by_date<'e, E>(executor: E, date: NaiveDate) -> Result<Vec<DbBooking>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, name, size, notes, date, time, table_number, created_at
        FROM bookings
        WHERE date = $1
        ORDER BY time ASC, table_number ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn delete_booking<'e, E>(executor: E, id: Uuid) -> Result<Option<DbBooking>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        RETURNING id, name, size, notes, date, time, table_number, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Serializes reservations for one date until the surrounding transaction ends.
pub async fn lock_date<'e, E>(executor: E, date: NaiveDate) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(date.to_string())
        .execute(executor)
        .await?;

    Ok(())
}
