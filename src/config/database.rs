//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    ExtractedTransaction, Session, SpendingAmount, SpendingLocation, Upload, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/spendscape.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set. This function handles connection errors and provides a clean
/// interface for database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically
/// generate proper SQL statements for table creation, ensuring the database
/// schema matches the Rust struct definitions. It creates tables for users,
/// spending locations, spending amounts, uploads, extracted transactions,
/// and sessions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    let mut location_table = schema.create_table_from_entity(SpendingLocation);
    let mut amount_table = schema.create_table_from_entity(SpendingAmount);
    let mut upload_table = schema.create_table_from_entity(Upload);
    let mut extracted_table = schema.create_table_from_entity(ExtractedTransaction);
    let mut session_table = schema.create_table_from_entity(Session);

    // Idempotent so restarts against an existing database file are harmless
    db.execute(builder.build(user_table.if_not_exists())).await?;
    db.execute(builder.build(location_table.if_not_exists())).await?;
    db.execute(builder.build(amount_table.if_not_exists())).await?;
    db.execute(builder.build(upload_table.if_not_exists())).await?;
    db.execute(builder.build(extracted_table.if_not_exists())).await?;
    db.execute(builder.build(session_table.if_not_exists())).await?;

    Ok(())
}
