/// Suggested spending categories and their colors from config.toml
pub mod categories;

/// Database configuration and connection management
pub mod database;

/// Runtime settings from environment variables
pub mod settings;
