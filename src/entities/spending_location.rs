//! Spending location entity - A merchant or place tracked for aggregate spend.
//!
//! Each location belongs to exactly one user. The category is free text or
//! one of the suggested set; nothing is enforced at this layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Spending location database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spending_locations")]
pub struct Model {
    /// Unique identifier for the location (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user's id
    pub user_id: String,
    /// Human-readable merchant/place name (e.g., "Corner Grocery")
    pub name: String,
    /// Category for organization (e.g., "Food", "Entertainment")
    pub category: String,
    /// When the location was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between SpendingLocation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each location belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One location has many spending amounts
    #[sea_orm(has_many = "super::spending_amount::Entity")]
    SpendingAmounts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::spending_amount::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpendingAmounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
