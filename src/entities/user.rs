//! User entity - Represents an account holder.
//!
//! Each user owns spending locations and uploads. The id is assigned at
//! signup and is stable for the lifetime of the account; `current_balance`
//! is a plain numeric field with no enforced non-negativity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user (UUID string, assigned at signup)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
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
    /// Sign-in password (stored as provided)
    pub password: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many spending locations
    #[sea_orm(has_many = "super::spending_location::Entity")]
    SpendingLocations,
    /// One user has many uploads
    #[sea_orm(has_many = "super::upload::Entity")]
    Uploads,
    /// One user has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::spending_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpendingLocations.def()
    }
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploads.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
