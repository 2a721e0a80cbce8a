//! Upload entity - One user-initiated ingestion of a bank-statement file.
//!
//! The `status` field tracks the ingestion lifecycle: `"processing"` on
//! creation, then exactly one transition to `"completed"` or `"failed"`.
//! The terminal-status guard lives in [`crate::core::upload`], not here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Upload database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    /// Unique identifier for the upload (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user's id
    pub user_id: String,
    /// Original file name as selected by the user
    pub file_name: String,
    /// File size in bytes
    pub file_size: i64,
    /// Lifecycle status: `"processing"`, `"completed"`, or `"failed"`
    pub status: String,
    /// Raw analysis JSON produced by the AI extraction plan, if any
    pub analysis_results: Option<Json>,
    /// When the upload was created
    pub created_at: DateTimeUtc,
    /// When the status was last updated
    pub updated_at: Option<DateTimeUtc>,
}

/// Defines relationships between Upload and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each upload belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One upload has many extracted transactions
    #[sea_orm(has_many = "super::extracted_transaction::Entity")]
    ExtractedTransactions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::extracted_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtractedTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
