//! Spending location business logic.
//!
//! Provides functions for listing, creating, and updating a user's spending
//! locations. Locations are never deleted; the dashboard edits them in place.

use crate::{
    entities::{SpendingLocation, spending_location},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all spending locations belonging to a user, oldest first.
///
/// The ascending creation order keeps the neighborhood layout stable: a
/// location keeps its position on the street as new ones are added after it.
pub async fn get_locations_by_user_id(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<spending_location::Model>> {
    SpendingLocation::find()
        .filter(spending_location::Column::UserId.eq(user_id))
        .order_by_asc(spending_location::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a location by its unique id.
pub async fn get_location_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<spending_location::Model>> {
    SpendingLocation::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new spending location for a user, performing input validation.
///
/// The name must be non-blank; whitespace is trimmed. The category is stored
/// as given - free text or one of the suggested set, nothing is enforced.
pub async fn create_location(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    category: &str,
) -> Result<spending_location::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Location name cannot be empty"));
    }

    let location = spending_location::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        name: Set(name.trim().to_string()),
        category: Set(category.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let result = location.insert(db).await?;
    Ok(result)
}

/// Partial update applied to an existing location.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    /// New name, if changing
    pub name: Option<String>,
    /// New category, if changing
    pub category: Option<String>,
}

/// Updates a location's name and/or category, returning the updated row.
///
/// Fails with `NotFound` when the id does not exist. A blank replacement
/// name is rejected the same way as on creation.
pub async fn update_location(
    db: &DatabaseConnection,
    id: &str,
    update: LocationUpdate,
) -> Result<spending_location::Model> {
    let existing = SpendingLocation::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Spending location".to_string(),
        })?;

    if let Some(name) = &update.name
        && name.trim().is_empty()
    {
        return Err(Error::validation("Location name cannot be empty"));
    }

    let mut active: spending_location::ActiveModel = existing.into();
    if let Some(name) = update.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(category) = update.category {
        active.category = Set(category);
    }

    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_location_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_location(&db, "user-1", "   ", "Food").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_locations_integration() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let first = create_location(&db, &user.id, "Corner Grocery", "Food").await?;
        let second = create_location(&db, &user.id, "Record Store", "Entertainment").await?;

        let listed = get_locations_by_user_id(&db, &user.id).await?;
        assert_eq!(listed.len(), 2);
        // Oldest first
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_locations_scoped_to_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice@example.com").await?;
        let bob = create_test_user(&db, "bob@example.com").await?;

        create_location(&db, &alice.id, "Alice's Cafe", "Food").await?;

        let bobs = get_locations_by_user_id(&db, &bob.id).await?;
        assert!(bobs.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_location_integration() -> Result<()> {
        let (db, _user, location) = setup_with_location().await?;

        let updated = update_location(
            &db,
            &location.id,
            LocationUpdate {
                name: Some("Renamed Market".to_string()),
                category: None,
            },
        )
        .await?;

        assert_eq!(updated.name, "Renamed Market");
        assert_eq!(updated.category, location.category);

        let updated = update_location(
            &db,
            &location.id,
            LocationUpdate {
                name: None,
                category: Some("Travel".to_string()),
            },
        )
        .await?;
        assert_eq!(updated.category, "Travel");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_location_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_location(&db, "missing-id", LocationUpdate::default()).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { what: _ }));

        Ok(())
    }
}
