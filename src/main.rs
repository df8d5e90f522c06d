use color_eyre::eyre::Result;
use dotenv::dotenv;
use tablebook_api::config::ApiConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Open the booking store (and the database schema, for postgres)
    let store = tablebook_api::open_store(&config.storage).await?;

    // Start API server
    tablebook_api::start_server(config, store).await?;

    Ok(())
}
