use anyhow::{Context, Result};
use portfolio_backend::api::{self, AppState};
use portfolio_backend::config::Config;
use portfolio_backend::content::PgContentStore;
use portfolio_backend::db::Database;
use portfolio_backend::i18n::{Language, LanguageRegistry};
use portfolio_backend::translation::PgTranslationStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_backend=info".parse()?),
        )
        .init();

    info!("Starting portfolio backend");

    // Load configuration from environment
    let config = Config::from_env()?;

    let languages: Vec<String> = LanguageRegistry::get()
        .list_enabled()
        .iter()
        .map(|config| {
            Language::from_code(config.code)
                .map(|language| format!("{} ({})", language.code(), language.native_name()))
        })
        .collect::<Result<_>>()?;
    info!(
        "Content languages: {} (default: {})",
        languages.join(", "),
        Language::canonical().name()
    );

    // Database
    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    db.health_check().await?;
    info!("Database connected");

    if config.admin_api_key.is_none() {
        warn!("ADMIN_API_KEY not set, admin endpoints will reject every request");
    }

    let state = AppState::new(
        Arc::new(PgContentStore::new(db.pool().clone())),
        Arc::new(PgTranslationStore::new(db.pool().clone())),
        config.admin_api_key.clone(),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, api::router(state))
        .await
        .context("Server error")?;

    Ok(())
}
