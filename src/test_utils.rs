//! Shared test utilities for `Spendscape`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{amount, location, user},
    entities,
    errors::Result,
};
use lopdf::{
    Document, Object, Stream,
    content::{Content, Operation},
    dictionary,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * `first_name`/`last_name`: "Test"/"User"
/// * `bank`: "Test Bank"
/// * `current_balance`: 10000.0
/// * `address`: "123 Test Street, Test City, TS 12345"
/// * `password`: "mockPassword123"
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        user::NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            bank: "Test Bank".to_string(),
            current_balance: 10_000.0,
            address: "123 Test Street, Test City, TS 12345".to_string(),
            password: "mockPassword123".to_string(),
        },
    )
    .await
}

/// Creates a test spending location with category "Food".
pub async fn create_test_location(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
) -> Result<entities::spending_location::Model> {
    location::create_location(db, user_id, name, "Food").await
}

/// Creates a test spending amount dated today with no description.
pub async fn create_test_amount(
    db: &DatabaseConnection,
    location_id: &str,
    value: f64,
) -> Result<entities::spending_amount::Model> {
    amount::create_amount(db, location_id, value, None, None).await
}

/// Sets up a complete test environment with a user.
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "test@example.com").await?;
    Ok((db, user))
}

/// Sets up a complete test environment with a user and one location.
/// Returns (db, user, location) for amount-related tests.
pub async fn setup_with_location() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::spending_location::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "test@example.com").await?;
    let location = create_test_location(&db, &user.id, "Test Location").await?;
    Ok((db, user, location))
}

/// Builds a small one-page PDF reading "Hello World!" for pipeline tests.
#[allow(clippy::expect_used)]
pub fn sample_pdf_bytes() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 48.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello World!")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode page content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize sample PDF");
    bytes
}
