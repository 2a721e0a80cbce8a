//! Statement analysis payloads.
//!
//! The generative endpoint is asked for a single JSON object grouping the
//! statement's transactions by merchant. The response is deserialized
//! strictly into [`SpendingAnalysis`]; malformed numbers are rejected rather
//! than stored as NaN, and dates keep only the shallow normalization the
//! prompt already pins down (truncate anything after a `T`).

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// One transaction as reported by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTransaction {
    /// Transaction date (`YYYY-MM-DD` after normalization)
    pub date: String,
    /// Transaction time (`HH:MM`) if the statement shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Transaction amount in dollars
    pub amount: f64,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One merchant with its grouped transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedLocation {
    /// Business/merchant name
    pub name: String,
    /// Total amount spent at this merchant
    pub total_spent: f64,
    /// The individual transactions attributed to this merchant
    pub transactions: Vec<AnalyzedTransaction>,
    /// Street address, if the statement shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City, if the statement shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State, if the statement shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ZIP code, if the statement shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// First/last transaction dates covered by the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest transaction date
    pub start: String,
    /// Latest transaction date
    pub end: String,
}

/// Whole-statement roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Total spent across all merchants
    pub total_spent: f64,
    /// Total number of transactions
    pub transaction_count: u32,
    /// Date range covered by the statement
    pub date_range: DateRange,
}

/// The full analysis of one uploaded statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    /// Per-merchant groupings
    pub locations: Vec<AnalyzedLocation>,
    /// Whole-statement roll-up
    pub summary: AnalysisSummary,
}

/// Truncates an ISO-ish date string to its `YYYY-MM-DD` day part.
///
/// `"2026-03-14T09:26:53.000Z"` becomes `"2026-03-14"`; a bare day string
/// passes through unchanged.
#[must_use]
pub fn normalize_date(date: &str) -> String {
    date.split('T').next().unwrap_or(date).to_string()
}

/// Parses a model response into a [`SpendingAnalysis`].
///
/// Models wrap JSON in Markdown fences often enough that we strip them
/// before deserializing. After deserialization every amount is checked for
/// finiteness and every date is normalized; a payload that fails either
/// check is rejected wholesale so that no NaN row reaches the database.
pub fn parse_analysis(response_text: &str) -> Result<SpendingAnalysis> {
    let trimmed = strip_code_fences(response_text);

    let mut analysis: SpendingAnalysis = serde_json::from_str(trimmed)
        .map_err(|e| Error::extraction(format!("Invalid JSON in analysis response: {e}")))?;

    for location in &mut analysis.locations {
        if !location.total_spent.is_finite() {
            return Err(Error::extraction(format!(
                "Non-finite total for location '{}'",
                location.name
            )));
        }
        for tx in &mut location.transactions {
            if !tx.amount.is_finite() {
                return Err(Error::extraction(format!(
                    "Non-finite transaction amount at '{}'",
                    location.name
                )));
            }
            tx.date = normalize_date(&tx.date);
        }
    }

    if !analysis.summary.total_spent.is_finite() {
        return Err(Error::extraction("Non-finite summary total"));
    }
    analysis.summary.date_range.start = normalize_date(&analysis.summary.date_range.start);
    analysis.summary.date_range.end = normalize_date(&analysis.summary.date_range.end);

    Ok(analysis)
}

/// Strips a leading/trailing Markdown code fence from a model response.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn sample_json() -> String {
        serde_json::json!({
            "locations": [
                {
                    "name": "Corner Grocery",
                    "totalSpent": 54.25,
                    "transactions": [
                        {"date": "2026-03-01T00:00:00Z", "amount": 31.25, "description": "weekly shop"},
                        {"date": "2026-03-08", "time": "14:30", "amount": 23.0}
                    ],
                    "city": "Springfield"
                }
            ],
            "summary": {
                "totalSpent": 54.25,
                "transactionCount": 2,
                "dateRange": {"start": "2026-03-01T00:00:00Z", "end": "2026-03-08"}
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_analysis_normalizes_dates() {
        let analysis = parse_analysis(&sample_json()).unwrap();

        assert_eq!(analysis.locations.len(), 1);
        let location = &analysis.locations[0];
        assert_eq!(location.name, "Corner Grocery");
        assert_eq!(location.total_spent, 54.25);
        assert_eq!(location.transactions[0].date, "2026-03-01");
        assert_eq!(location.transactions[1].date, "2026-03-08");
        assert_eq!(location.transactions[1].time.as_deref(), Some("14:30"));
        assert_eq!(analysis.summary.date_range.start, "2026-03-01");
        assert_eq!(analysis.summary.transaction_count, 2);
    }

    #[test]
    fn test_parse_analysis_strips_code_fences() {
        let fenced = format!("```json\n{}\n```", sample_json());
        let analysis = parse_analysis(&fenced).unwrap();
        assert_eq!(analysis.locations.len(), 1);

        let fenced_plain = format!("```\n{}\n```", sample_json());
        assert!(parse_analysis(&fenced_plain).is_ok());
    }

    #[test]
    fn test_parse_analysis_rejects_invalid_json() {
        let result = parse_analysis("this is not json at all");
        assert!(matches!(
            result.unwrap_err(),
            Error::Extraction { message: _ }
        ));
    }

    #[test]
    fn test_parse_analysis_rejects_missing_fields() {
        // summary.dateRange missing
        let json = r#"{"locations": [], "summary": {"totalSpent": 0, "transactionCount": 0}}"#;
        assert!(parse_analysis(json).is_err());
    }

    #[test]
    fn test_parse_analysis_rejects_non_finite_amounts() {
        // An overflowing literal either parses to infinity or fails outright;
        // both must surface as an extraction error
        let json = r#"{
            "locations": [
                {"name": "Bad", "totalSpent": 1e999, "transactions": []}
            ],
            "summary": {
                "totalSpent": 0.0,
                "transactionCount": 0,
                "dateRange": {"start": "2026-01-01", "end": "2026-01-31"}
            }
        }"#;
        let result = parse_analysis(json);
        assert!(matches!(
            result.unwrap_err(),
            Error::Extraction { message: _ }
        ));
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2026-03-14T09:26:53.000Z"), "2026-03-14");
        assert_eq!(normalize_date("2026-03-14"), "2026-03-14");
        assert_eq!(normalize_date(""), "");
    }
}
