//! Extracted transaction persistence.
//!
//! After a successful AI analysis, the per-merchant transaction groups are
//! flattened into one row per transaction, each referencing the upload it
//! came from.

use crate::{
    core::analysis::SpendingAnalysis,
    entities::{ExtractedTransaction, extracted_transaction},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Flattens an analysis into extracted-transaction rows and inserts them.
///
/// Each analyzed location contributes one row per transaction; the merchant
/// name and any address details are copied onto every row. Returns the
/// inserted rows in insertion order.
pub async fn insert_extracted_transactions(
    db: &DatabaseConnection,
    upload_id: &str,
    user_id: &str,
    analysis: &SpendingAnalysis,
) -> Result<Vec<extracted_transaction::Model>> {
    let mut inserted = Vec::new();

    for location in &analysis.locations {
        for tx in &location.transactions {
            let raw_text = tx.description.clone().unwrap_or_else(|| {
                format!("{} {} ${:.2}", tx.date, location.name, tx.amount)
            });

            let row = extracted_transaction::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                upload_id: Set(upload_id.to_string()),
                user_id: Set(user_id.to_string()),
                transaction_date: Set(tx.date.clone()),
                merchant_name: Set(location.name.clone()),
                amount: Set(tx.amount),
                category: Set(None),
                location_address: Set(location.address.clone()),
                location_city: Set(location.city.clone()),
                location_state: Set(location.state.clone()),
                location_zip: Set(location.zip.clone()),
                raw_text: Set(raw_text),
                created_at: Set(chrono::Utc::now()),
            };

            inserted.push(row.insert(db).await?);
        }
    }

    Ok(inserted)
}

/// Retrieves all extracted transactions for an upload, oldest date first.
pub async fn get_by_upload_id(
    db: &DatabaseConnection,
    upload_id: &str,
) -> Result<Vec<extracted_transaction::Model>> {
    ExtractedTransaction::find()
        .filter(extracted_transaction::Column::UploadId.eq(upload_id))
        .order_by_asc(extracted_transaction::Column::TransactionDate)
        .all(db)
        .await
        .map_err(Into::into)
}
