//! Upload ingestion state machine.
//!
//! One attempt walks `Idle -> Selecting -> Uploading -> {Extracting ->
//! Completed} | Failed`. Validation happens before any row or storage call;
//! a storage failure marks the row failed and stops; an extraction failure
//! marks the row failed but keeps the stored file. Nothing is cancellable or
//! retried - each call runs to a terminal phase and reports what happened.

use crate::{
    core::{
        analysis::SpendingAnalysis,
        extracted,
        upload::{self, UploadStatus},
    },
    errors::{Error, Result},
    extract::{gemini::GeminiClient, pdf},
    storage::{StatementStore, statement_path},
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

/// Maximum accepted statement size.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
/// The only accepted content type.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Where an upload attempt currently is (or ended up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Nothing selected yet
    Idle,
    /// File picked, being validated
    Selecting,
    /// Row created, bytes moving to storage
    Uploading,
    /// Stored; text or analysis being derived
    Extracting,
    /// Terminal: everything succeeded
    Completed,
    /// Terminal: validation, storage, or extraction failed
    Failed,
}

/// Which extraction runs after the file is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPlan {
    /// Extract raw text for display only; nothing structured is persisted
    #[default]
    LocalText,
    /// Run the AI analysis and persist derived transaction rows
    AiAnalysis,
}

/// What one upload attempt produced.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Terminal phase of the attempt
    pub phase: UploadPhase,
    /// The upload row, if one was created (validation failures create none)
    pub upload: Option<crate::entities::upload::Model>,
    /// User-facing failure message, if the attempt failed
    pub message: Option<String>,
    /// Raw statement text, for the local-text plan
    pub extracted_text: Option<String>,
    /// Parsed analysis, for the AI plan
    pub analysis: Option<SpendingAnalysis>,
}

impl UploadOutcome {
    fn failed_before_record(message: String) -> Self {
        Self {
            phase: UploadPhase::Failed,
            upload: None,
            message: Some(message),
            extracted_text: None,
            analysis: None,
        }
    }
}

/// Validates a selected file before anything is created.
///
/// The messages are user-facing and the checks run strictly before any
/// provider call: a rejected file leaves no trace anywhere.
pub fn validate_selection(content_type: Option<&str>, size: u64) -> Result<()> {
    if content_type != Some(PDF_CONTENT_TYPE) {
        return Err(Error::validation("Please select a PDF file"));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(Error::validation("File size must be less than 10MB"));
    }
    Ok(())
}

/// Runs one upload attempt to a terminal phase.
///
/// Returns `Err` only when the pipeline's own bookkeeping fails (e.g. the
/// row cannot be created); every expected failure mode lands in the returned
/// outcome with the upload row - if one exists - marked `failed`.
#[instrument(skip(db, store, analyzer, bytes), fields(size = bytes.len()))]
#[allow(clippy::too_many_arguments)]
pub async fn run_upload(
    db: &DatabaseConnection,
    store: &StatementStore,
    analyzer: Option<&GeminiClient>,
    user_id: &str,
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
    plan: ExtractionPlan,
) -> Result<UploadOutcome> {
    // Selecting
    if let Err(e) = validate_selection(content_type, bytes.len() as u64) {
        info!("Rejected selection '{file_name}': {e}");
        return Ok(UploadOutcome::failed_before_record(e.to_string()));
    }

    // Uploading
    #[allow(clippy::cast_possible_wrap)]
    let record = upload::create_upload(db, user_id, file_name, bytes.len() as i64).await?;
    let location = statement_path(user_id, &record.id, file_name);

    if let Err(e) = store.put(&location, bytes.clone()).await {
        warn!("Storage failed for upload {}: {e}", record.id);
        let row = mark_failed(db, &record.id).await;
        return Ok(UploadOutcome {
            phase: UploadPhase::Failed,
            upload: row,
            message: Some(e.to_string()),
            extracted_text: None,
            analysis: None,
        });
    }

    // Extracting
    match extract(db, analyzer, &record, &bytes, plan).await {
        Ok((text, analysis)) => {
            let row = upload::update_status(db, &record.id, UploadStatus::Completed).await?;
            info!("Upload {} completed", record.id);
            Ok(UploadOutcome {
                phase: UploadPhase::Completed,
                upload: Some(row),
                message: None,
                extracted_text: text,
                analysis,
            })
        }
        Err(e) => {
            // The stored file is kept; only the status flips
            warn!("Extraction failed for upload {}: {e}", record.id);
            let row = mark_failed(db, &record.id).await;
            Ok(UploadOutcome {
                phase: UploadPhase::Failed,
                upload: row,
                message: Some("Failed to process PDF file. Please try again.".to_string()),
                extracted_text: None,
                analysis: None,
            })
        }
    }
}

/// Runs the chosen extraction plan against the stored bytes.
async fn extract(
    db: &DatabaseConnection,
    analyzer: Option<&GeminiClient>,
    record: &crate::entities::upload::Model,
    bytes: &[u8],
    plan: ExtractionPlan,
) -> Result<(Option<String>, Option<SpendingAnalysis>)> {
    match plan {
        ExtractionPlan::LocalText => {
            let parsed = pdf::parse_pdf(bytes)?;
            Ok((Some(parsed.text), None))
        }
        ExtractionPlan::AiAnalysis => {
            let analyzer =
                analyzer.ok_or_else(|| Error::extraction("Gemini API key not configured"))?;
            let parsed = pdf::parse_pdf(bytes)?;
            let analysis = analyzer.analyze_statement(&parsed.text).await?;

            let results = serde_json::to_value(&analysis)
                .map_err(|e| Error::extraction(format!("Failed to serialize analysis: {e}")))?;
            upload::set_analysis_results(db, &record.id, results).await?;
            extracted::insert_extracted_transactions(db, &record.id, &record.user_id, &analysis)
                .await?;

            Ok((Some(parsed.text), Some(analysis)))
        }
    }
}

/// Marks an upload failed, best effort, and returns the freshest row.
async fn mark_failed(db: &DatabaseConnection, upload_id: &str) -> Option<crate::entities::upload::Model> {
    match upload::update_status(db, upload_id, UploadStatus::Failed).await {
        Ok(row) => Some(row),
        Err(e) => {
            warn!("Could not mark upload {upload_id} failed: {e}");
            upload::get_upload_by_id(db, upload_id).await.ok().flatten()
        }
    }
}
