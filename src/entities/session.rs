//! Session entity - An opaque token mapping to an authenticated user.
//!
//! Sessions carry no local expiry or refresh logic; they exist from
//! signup/signin until signout.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Opaque session token (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    /// The authenticated user's id
    pub user_id: String,
    /// When the session was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
