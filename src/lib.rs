pub mod api;
pub mod config;
pub mod crypto;
pub mod db;
pub mod intake;
pub mod masking;
pub mod models;
pub mod validation;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;
use crate::config::{AppConfig, ConfigError};
use crate::crypto::{CryptoError, NameCipher};
use crate::db::{DatabaseError, SqliteQuestionnaireStore};

/// Anything that stops the service from coming up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CryptoError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Signal error: {0}")]
    Signal(#[from] std::io::Error),
}

pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let cipher = NameCipher::new(&config.encryption_key)?;
    let store = Arc::new(SqliteQuestionnaireStore::open(&config.database_path)?);
    let ctx = ApiContext::new(store, cipher);

    let mut server = api::start_api_server(ctx, config.bind_addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    server.shutdown();
    server.wait().await;
    Ok(())
}
