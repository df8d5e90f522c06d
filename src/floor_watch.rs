//! Terminal floor plan that re-renders whenever a booking on the watched
//! date is made or cancelled.
//!
//! Uses the same storage settings as the server (`STORAGE_BACKEND`, ...).
//! `PANEL_DATE` (YYYY-MM-DD, default today) and `PANEL_SLOT` (HH:MM, default
//! the first slot) choose what to show. Only the postgres backend sees
//! changes made by other processes.

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tablebook_api::config::{parse_log_level, StorageBackend};
use tablebook_core::{models::slot::Slot, panel::AdminPanel, store::DateSubscription};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Initialize logging
    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let date = match std::env::var("PANEL_DATE") {
        Ok(raw) => raw
            .parse::<NaiveDate>()
            .wrap_err_with(|| format!("Invalid PANEL_DATE value: {}", raw))?,
        Err(_) => Local::now().date_naive(),
    };
    let slot = match std::env::var("PANEL_SLOT") {
        Ok(raw) => raw.parse::<Slot>()?,
        Err(_) => Slot::first(),
    };

    let store = tablebook_api::open_store(&StorageBackend::from_env()?).await?;

    let mut panel = AdminPanel::new(date);
    panel.select_slot(slot);
    let mut subscription = DateSubscription::new(store, date);
    info!(%date, %slot, "watching floor plan");

    loop {
        match subscription.next_snapshot().await {
            Ok(Some(bookings)) => {
                panel.apply_snapshot(date, bookings);
                println!("{}", panel.render());
            }
            Ok(None) => {
                info!("change feed closed, exiting");
                break;
            }
            Err(err) => error!(error = %err, "could not refresh floor plan"),
        }
    }

    Ok(())
}
