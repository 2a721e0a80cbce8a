//! Spending amount business logic.
//!
//! Provides listing, creation, and deletion of individual spending amounts,
//! plus the aggregation helpers the dashboard and neighborhood views use.
//! `get_all_totals_by_location_ids` is the one batch read in the system; it
//! exists purely to avoid N sequential round trips when building the scene.

use crate::{
    entities::{SpendingAmount, spending_amount},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use std::collections::HashMap;

/// Retrieves all amounts for a location, newest transaction first.
pub async fn get_amounts_by_location_id(
    db: &DatabaseConnection,
    location_id: &str,
) -> Result<Vec<spending_amount::Model>> {
    SpendingAmount::find()
        .filter(spending_amount::Column::SpendingLocationId.eq(location_id))
        .order_by_desc(spending_amount::Column::TransactionDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an amount by its unique id.
pub async fn get_amount_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<spending_amount::Model>> {
    SpendingAmount::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sums all amounts recorded against a single location.
///
/// Returns 0.0 when the location has no amounts (or does not exist - the
/// caller cannot tell the difference, matching the provider's behavior).
pub async fn get_total_by_location_id(db: &DatabaseConnection, location_id: &str) -> Result<f64> {
    let rows: Vec<f64> = SpendingAmount::find()
        .select_only()
        .column(spending_amount::Column::Amount)
        .filter(spending_amount::Column::SpendingLocationId.eq(location_id))
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows.into_iter().sum())
}

/// Fetches totals for a set of locations in a single query.
///
/// Every requested id is present in the returned map; ids with no recorded
/// amounts map to 0.0. The fold happens client-side over one filtered select,
/// mirroring how the dashboard assembles `LocationWithTotal` rows.
pub async fn get_all_totals_by_location_ids(
    db: &DatabaseConnection,
    location_ids: &[String],
) -> Result<HashMap<String, f64>> {
    let mut totals: HashMap<String, f64> = location_ids
        .iter()
        .map(|id| (id.clone(), 0.0))
        .collect();

    if location_ids.is_empty() {
        return Ok(totals);
    }

    let rows: Vec<(String, f64)> = SpendingAmount::find()
        .select_only()
        .column(spending_amount::Column::SpendingLocationId)
        .column(spending_amount::Column::Amount)
        .filter(spending_amount::Column::SpendingLocationId.is_in(location_ids.iter().cloned()))
        .into_tuple()
        .all(db)
        .await?;

    for (location_id, amount) in rows {
        *totals.entry(location_id).or_insert(0.0) += amount;
    }

    Ok(totals)
}

/// Creates a new spending amount against a location.
///
/// The amount must be finite (a NaN would silently poison every total it is
/// summed into); positivity is a convention, not a rule. The transaction date
/// defaults to today and is normalized to `YYYY-MM-DD`.
pub async fn create_amount(
    db: &DatabaseConnection,
    location_id: &str,
    amount: f64,
    transaction_date: Option<String>,
    description: Option<String>,
) -> Result<spending_amount::Model> {
    if !amount.is_finite() {
        return Err(Error::validation("Amount must be a finite number"));
    }

    let date = transaction_date.map_or_else(
        || chrono::Utc::now().format("%Y-%m-%d").to_string(),
        |d| crate::core::analysis::normalize_date(&d),
    );

    let row = spending_amount::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        spending_location_id: Set(location_id.to_string()),
        amount: Set(amount),
        transaction_date: Set(date),
        description: Set(description),
        created_at: Set(chrono::Utc::now()),
    };

    let result = row.insert(db).await?;
    Ok(result)
}

/// Deletes a single spending amount by id.
///
/// Deleting an id that does not exist is not an error - the provider reports
/// zero rows affected and we pass that through as success.
pub async fn delete_amount(db: &DatabaseConnection, id: &str) -> Result<()> {
    SpendingAmount::delete_by_id(id).exec(db).await?;
    Ok(())
}
