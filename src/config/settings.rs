//! Runtime settings from environment variables.
//!
//! Secrets and deployment knobs come from the environment (usually via a
//! `.env` file loaded at startup); domain data like the category palette
//! lives in config.toml instead.

use crate::{errors::Result, storage::StatementStore};
use std::path::PathBuf;

/// Which blob-storage backend holds uploaded statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Ephemeral in-memory storage
    Memory,
    /// Local directory
    Local(PathBuf),
    /// S3 bucket, credentials from the environment
    Amazon,
}

/// Application settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Storage backend for uploaded statements
    pub storage: StorageBackend,
    /// Signed preview-URL lifetime in seconds
    pub signed_url_expiry_secs: u64,
}

impl Settings {
    /// Reads settings from the environment, applying defaults.
    ///
    /// * `SPENDSCAPE_ADDR` - bind address, default `127.0.0.1:3001`
    /// * `SPENDSCAPE_STORAGE` - `memory`, `local`, or `s3`; default `local`
    /// * `SPENDSCAPE_STORAGE_ROOT` - root directory for local storage,
    ///   default `data/statements`
    /// * `SPENDSCAPE_SIGNED_URL_EXPIRY` - preview expiry seconds, default 3600
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("SPENDSCAPE_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

        let storage = match std::env::var("SPENDSCAPE_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("s3") => StorageBackend::Amazon,
            _ => {
                let root = std::env::var("SPENDSCAPE_STORAGE_ROOT")
                    .unwrap_or_else(|_| "data/statements".to_string());
                StorageBackend::Local(PathBuf::from(root))
            }
        };

        let signed_url_expiry_secs = std::env::var("SPENDSCAPE_SIGNED_URL_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(crate::storage::SIGNED_URL_EXPIRY_SECS);

        Self {
            bind_addr,
            storage,
            signed_url_expiry_secs,
        }
    }

    /// Builds the statement store for the configured backend.
    pub fn statement_store(&self) -> Result<StatementStore> {
        match &self.storage {
            StorageBackend::Memory => Ok(StatementStore::memory()),
            StorageBackend::Local(root) => StatementStore::local(root.clone()),
            StorageBackend::Amazon => StatementStore::amazon(),
        }
    }
}
