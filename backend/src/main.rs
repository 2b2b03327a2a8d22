use std::sync::Arc;

use tracing::{info, Level};

use jamiya_backend::storage::JsonFileStorage;
use jamiya_backend::{initialize_backend, spawn_expiry_scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let storage = match std::env::var("JAMIYA_DATA_DIR") {
        Ok(dir) => JsonFileStorage::new(dir)?,
        Err(_) => JsonFileStorage::new_default()?,
    };
    info!("State file: {}", storage.file_path().display());

    let app_state = initialize_backend(Arc::new(storage)).await?;

    let (users, jamiyas, bookings) = app_state.store.read(|state| {
        (
            state.data.users.len(),
            state.data.jamiyas.len(),
            state.data.bookings.len(),
        )
    });
    info!(
        "Backend ready: {} users, {} jamiyas, {} bookings",
        users, jamiyas, bookings
    );

    let scheduler = spawn_expiry_scheduler(&app_state);
    info!("Booking-expiry scheduler running");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    scheduler.abort();

    Ok(())
}
