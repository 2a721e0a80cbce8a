//! User business logic - account creation and lookups.
//!
//! Provides functions for creating and retrieving user records. All functions
//! are async and return Result types for error handling.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Fields required to create a new user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address used to sign in
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Display name of the user's bank
    pub bank: String,
    /// Self-reported account balance in dollars
    pub current_balance: f64,
    /// Postal address
    pub address: String,
    /// Sign-in password
    pub password: String,
}

/// Creates a new user record, performing input validation.
///
/// The email must be non-blank and contain an `@`; the password must be
/// non-blank. The id is a freshly generated UUID and is stable for the
/// lifetime of the account.
pub async fn create_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    let email = new_user.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::validation("A valid email address is required"));
    }

    if new_user.password.is_empty() {
        return Err(Error::validation("Password cannot be empty"));
    }

    let user = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.to_string()),
        first_name: Set(new_user.first_name),
        last_name: Set(new_user.last_name),
        bank: Set(new_user.bank),
        current_balance: Set(new_user.current_balance),
        address: Set(new_user.address),
        password: Set(new_user.password),
        created_at: Set(chrono::Utc::now()),
    };

    let result = user.insert(db).await?;
    Ok(result)
}

/// Finds a user by their unique id, returning None if not found.
pub async fn get_user_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a user by email address, used for sign-in.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}
