//! Spending amount entity - One transaction record attributed to a location.
//!
//! Amounts are positive dollars by convention only; the schema does not
//! enforce it. `transaction_date` is a `YYYY-MM-DD` string so that rows sort
//! chronologically with plain lexicographic ordering.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Spending amount database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spending_amounts")]
pub struct Model {
    /// Unique identifier for the amount (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// ID of the spending location this amount belongs to
    pub spending_location_id: String,
    /// Transaction amount in dollars
    pub amount: f64,
    /// Date of the transaction (`YYYY-MM-DD`)
    pub transaction_date: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between SpendingAmount and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each amount belongs to one spending location
    #[sea_orm(
        belongs_to = "super::spending_location::Entity",
        from = "Column::SpendingLocationId",
        to = "super::spending_location::Column::Id"
    )]
    SpendingLocation,
}

impl Related<super::spending_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpendingLocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
