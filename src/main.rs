//! Service entry point: tracing, configuration, database, then the server.

use dotenvy::dotenv;
use spendscape::{
    config::{categories, database, settings::Settings},
    errors::Result,
    extract::gemini::GeminiClient,
    server::{self, AppState},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Resolve settings and the category palette
    let settings = Settings::from_env();
    let palette = categories::load_default_palette()
        .inspect_err(|e| error!("Failed to load category configuration: {}", e))?;

    // 4. Initialize database
    std::fs::create_dir_all("data").ok(); // default sqlite path lives here
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Statement storage and the optional AI analyzer
    let store = settings
        .statement_store()
        .inspect_err(|e| error!("Failed to initialize statement storage: {}", e))?;
    let analyzer = GeminiClient::from_env();
    if analyzer.is_none() {
        info!("GEMINI_API_KEY not set; AI statement analysis is disabled.");
    }

    // 6. Run the server
    let state = Arc::new(AppState {
        db,
        store,
        analyzer,
        palette,
        signed_url_expiry: Duration::from_secs(settings.signed_url_expiry_secs),
    });
    server::run_server(state, &settings.bind_addr).await
}
