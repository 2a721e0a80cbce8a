//! Extracted transaction entity - One transaction derived from a statement.
//!
//! Rows are written after a successful AI analysis of an uploaded statement
//! and reference both the upload they came from and the owning user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extracted transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extracted_transactions")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Upload this transaction was extracted from
    pub upload_id: String,
    /// Owning user's id
    pub user_id: String,
    /// Date of the transaction (`YYYY-MM-DD`)
    pub transaction_date: String,
    /// Merchant name as reported by the analysis
    pub merchant_name: String,
    /// Transaction amount in dollars
    pub amount: f64,
    /// Category assigned by the analysis, if any
    pub category: Option<String>,
    /// Street address of the merchant, if reported
    pub location_address: Option<String>,
    /// City of the merchant, if reported
    pub location_city: Option<String>,
    /// State of the merchant, if reported
    pub location_state: Option<String>,
    /// ZIP code of the merchant, if reported
    pub location_zip: Option<String>,
    /// The raw text the transaction was derived from
    pub raw_text: String,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ExtractedTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each extracted transaction belongs to one upload
    #[sea_orm(
        belongs_to = "super::upload::Entity",
        from = "Column::UploadId",
        to = "super::upload::Column::Id"
    )]
    Upload,
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Upload.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
