//! Generative-endpoint client for statement analysis.
//!
//! One prompt, one response: the extracted statement text is wrapped in a
//! fixed instruction asking for a single JSON object, and the reply is
//! parsed strictly by [`crate::core::analysis`]. No streaming, no retries,
//! no conversation state.

use crate::{
    core::analysis::{self, SpendingAnalysis},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default API host.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model the analysis prompt is sent to.
const MODEL: &str = "gemini-pro";

/// Client for the external generative endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GeminiClient {
    /// Creates a client with an explicit key and base URL.
    #[must_use]
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Builds a client from `GEMINI_API_KEY` (and optional `GEMINI_BASE_URL`).
    ///
    /// Returns None when no key is configured; the AI extraction plan is
    /// then unavailable and uploads taking it fail with a clear message.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        let base_url = std::env::var("GEMINI_BASE_URL").ok();
        Some(Self::new(api_key, base_url))
    }

    /// Sends statement text through the fixed analysis prompt and parses
    /// the reply into a [`SpendingAnalysis`].
    #[instrument(skip(self, statement_text), fields(chars = statement_text.len()))]
    pub async fn analyze_statement(&self, statement_text: &str) -> Result<SpendingAnalysis> {
        if statement_text.trim().is_empty() {
            return Err(Error::extraction("No text content extracted from PDF"));
        }

        let url = format!(
            "{}/v1beta/models/{MODEL}:generateContent?key={}",
            self.base_url, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: build_prompt(statement_text),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let payload: GenerateContentResponse = response.json().await?;

        let text = response_text(&payload);
        if text.is_empty() {
            warn!("Generative endpoint returned no candidate text");
            return Err(Error::extraction("Empty response from model"));
        }
        debug!("Model responded with {} chars", text.len());

        analysis::parse_analysis(&text)
    }
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// The fixed analysis instruction wrapped around the statement text.
fn build_prompt(statement_text: &str) -> String {
    format!(
        r#"Analyze the following bank statement text and extract all spending information. Group transactions by location and provide a summary.

Format the response as a JSON object with this structure:
{{
  "locations": [
    {{
      "name": string,
      "totalSpent": number,
      "transactions": [
        {{
          "date": string (YYYY-MM-DD),
          "time": string (HH:MM, if available),
          "amount": number,
          "description": string (optional)
        }}
      ],
      "address": string (optional),
      "city": string (optional),
      "state": string (optional),
      "zip": string (optional)
    }}
  ],
  "summary": {{
    "totalSpent": number,
    "transactionCount": number,
    "dateRange": {{
      "start": string (earliest transaction date, YYYY-MM-DD),
      "end": string (latest transaction date, YYYY-MM-DD)
    }}
  }}
}}

Here's the bank statement text to analyze:

{statement_text}

Only respond with the JSON object, no other text."#
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_prompt_embeds_statement_text() {
        let prompt = build_prompt("03/01 CORNER GROCERY $31.25");
        assert!(prompt.contains("03/01 CORNER GROCERY $31.25"));
        assert!(prompt.contains("\"totalSpent\""));
        assert!(prompt.contains("Only respond with the JSON object"));
    }

    #[test]
    fn test_response_text_concatenates_first_candidate() {
        let payload: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(response_text(&payload), "{\"a\":1}");
    }

    #[test]
    fn test_response_text_empty_when_no_candidates() {
        let payload: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(response_text(&payload), "");
    }

    #[tokio::test]
    async fn test_blank_statement_rejected_before_any_call() {
        let client = GeminiClient::new("key".to_string(), None);
        let result = client.analyze_statement("   \n  ").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Extraction { message: _ }
        ));
    }
}
