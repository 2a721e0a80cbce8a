//! Upload record lifecycle.
//!
//! An upload row is created with status `processing` the moment a file is
//! accepted, then transitions exactly once to `completed` or `failed`. The
//! terminal-status guard lives here: once a row reaches a terminal status it
//! never regresses, no matter what the pipeline asks for.

use crate::{
    entities::{Upload, upload},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;

/// Lifecycle status of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// The file was accepted and is being stored/extracted
    Processing,
    /// Storage and extraction finished successfully
    Completed,
    /// Storage or extraction failed; the row is preserved for history
    Failed,
}

impl UploadStatus {
    /// The string stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(Error::validation(format!("Unknown upload status: {other}"))),
        }
    }

    /// Whether this status is terminal (`completed` or `failed`).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates a new upload row with status `processing`.
pub async fn create_upload(
    db: &DatabaseConnection,
    user_id: &str,
    file_name: &str,
    file_size: i64,
) -> Result<upload::Model> {
    if file_name.trim().is_empty() {
        return Err(Error::validation("File name cannot be empty"));
    }

    let row = upload::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        file_name: Set(file_name.to_string()),
        file_size: Set(file_size),
        status: Set(UploadStatus::Processing.as_str().to_string()),
        analysis_results: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    let result = row.insert(db).await?;
    Ok(result)
}

/// Retrieves all uploads for a user, newest first.
pub async fn get_uploads_by_user_id(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<upload::Model>> {
    Upload::find()
        .filter(upload::Column::UserId.eq(user_id))
        .order_by_desc(upload::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an upload by its unique id.
pub async fn get_upload_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<upload::Model>> {
    Upload::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Updates an upload's status, enforcing the one-way lifecycle.
///
/// Setting the same status again is a no-op. Moving away from a terminal
/// status is refused; `processing -> completed`, `processing -> failed` are
/// the only real transitions.
pub async fn update_status(
    db: &DatabaseConnection,
    id: &str,
    status: UploadStatus,
) -> Result<upload::Model> {
    let existing = Upload::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Upload".to_string(),
        })?;

    let current = UploadStatus::parse(&existing.status)?;
    if current == status {
        return Ok(existing);
    }
    if current.is_terminal() {
        return Err(Error::validation(format!(
            "Upload is already {current}; status cannot change"
        )));
    }

    let mut active: upload::ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await.map_err(Into::into)
}

/// Stores the raw analysis JSON on an upload row.
pub async fn set_analysis_results(
    db: &DatabaseConnection,
    id: &str,
    results: serde_json::Value,
) -> Result<upload::Model> {
    let existing = Upload::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Upload".to_string(),
        })?;

    let mut active: upload::ActiveModel = existing.into();
    active.analysis_results = Set(Some(results));
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_upload_starts_processing() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let upload = create_upload(&db, &user.id, "statement.pdf", 1024).await?;
        assert_eq!(upload.status, "processing");
        assert!(upload.analysis_results.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_uploads_listed_newest_first() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let first = create_upload(&db, &user.id, "january.pdf", 100).await?;
        let second = create_upload(&db, &user.id, "february.pdf", 200).await?;

        let listed = get_uploads_by_user_id(&db, &user.id).await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_transitions() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let upload = create_upload(&db, &user.id, "statement.pdf", 1024).await?;
        let updated = update_status(&db, &upload.id, UploadStatus::Completed).await?;
        assert_eq!(updated.status, "completed");
        assert!(updated.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_terminal_status_never_regresses() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let upload = create_upload(&db, &user.id, "statement.pdf", 1024).await?;
        update_status(&db, &upload.id, UploadStatus::Failed).await?;

        // failed -> processing refused
        let result = update_status(&db, &upload.id, UploadStatus::Processing).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // failed -> completed refused
        let result = update_status(&db, &upload.id, UploadStatus::Completed).await;
        assert!(result.is_err());

        // Status unchanged in the database
        let row = get_upload_by_id(&db, &upload.id).await?.unwrap();
        assert_eq!(row.status, "failed");

        // Setting the same terminal status again is a no-op, not an error
        let row = update_status(&db, &upload.id, UploadStatus::Failed).await?;
        assert_eq!(row.status, "failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_set_analysis_results() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let upload = create_upload(&db, &user.id, "statement.pdf", 1024).await?;
        let updated = set_analysis_results(
            &db,
            &upload.id,
            serde_json::json!({"summary": {"totalSpent": 12.5}}),
        )
        .await?;

        let stored = updated.analysis_results.unwrap();
        assert_eq!(stored["summary"]["totalSpent"], 12.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_status(&db, "missing", UploadStatus::Completed).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { what: _ }));

        Ok(())
    }
}
