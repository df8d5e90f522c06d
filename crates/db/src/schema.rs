use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

/// `NOTIFY` channel carrying JSON-encoded booking changes.
pub const CHANGE_CHANNEL: &str = "booking_changes";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            size INTEGER NOT NULL CHECK (size > 0),
            notes TEXT NULL,
            date DATE NOT NULL,
            time VARCHAR(5) NOT NULL,
            table_number SMALLINT NOT NULL CHECK (table_number BETWEEN 1 AND 4),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(date);")
        .execute(pool)
        .await?;

    // Change notification trigger. The payload is the serde shape of
    // `BookingChange`: operation, id and date only, since `pg_notify`
    // refuses payloads of 8000 bytes or more.
    pool.execute(
        r#"
        CREATE OR REPLACE FUNCTION notify_booking_change() RETURNS trigger AS $$
        DECLARE
            changed bookings%ROWTYPE;
        BEGIN
            IF TG_OP = 'INSERT' THEN
                changed := NEW;
            ELSE
                changed := OLD;
            END IF;

            PERFORM pg_notify('booking_changes', json_build_object(
                'op', CASE TG_OP WHEN 'INSERT' THEN 'created' ELSE 'cancelled' END,
                'id', changed.id,
                'date', changed.date
            )::text);
            RETURN changed;
        END;
        $$ LANGUAGE plpgsql;

        DROP TRIGGER IF EXISTS bookings_notify ON bookings;
        CREATE TRIGGER bookings_notify
            AFTER INSERT OR DELETE ON bookings
            FOR EACH ROW EXECUTE FUNCTION notify_booking_change();
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
