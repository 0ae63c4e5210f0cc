//! Back-office API Server
//!
//! Main entry point for the review workflow service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use backoffice_api::{AppState, create_router};
use backoffice_core::{BackOffice, fixtures};
use backoffice_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(config.log.json.then(|| fmt::layer().json()))
        .with((!config.log.json).then(fmt::layer))
        .init();

    let mut office = BackOffice::new(config.ledger.currency);
    if config.seed.enabled {
        fixtures::seed(&mut office)?;
        info!(
            accounts = office.accounts.len(),
            deposits = office.deposits.len(),
            "Loaded sample records"
        );
    }

    let state = AppState::new(office);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(currency = %config.ledger.currency, "Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
