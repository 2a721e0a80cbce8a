//! PDF text extraction.
//!
//! Wraps the third-party PDF parser: raw bytes in, page text plus document
//! info out. The output mirrors what the parse endpoint returns to clients,
//! including the defaulted metadata block.

use crate::errors::{Error, Result};
use lopdf::{Dictionary, Document, Object};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Raw document-information fields, present only when the PDF carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PdfInfo {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Document subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Document keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Creating application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Producing application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    /// Creation timestamp as stored in the PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    /// Modification timestamp as stored in the PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_date: Option<String>,
}

/// Document info with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfMetadata {
    /// Title, `"Untitled"` when absent
    pub title: String,
    /// Author, `"Unknown"` when absent
    pub author: String,
    /// Subject, empty when absent
    pub subject: String,
    /// Keywords, empty when absent
    pub keywords: String,
    /// Creator, `"Unknown"` when absent
    pub creator: String,
    /// Producer, `"Unknown"` when absent
    pub producer: String,
    /// Creation timestamp, if stored
    pub creation_date: Option<String>,
    /// Modification timestamp, if stored
    pub modification_date: Option<String>,
}

impl PdfMetadata {
    /// Applies the display defaults to raw info fields.
    #[must_use]
    pub fn from_info(info: &PdfInfo) -> Self {
        Self {
            title: info.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            author: info.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            subject: info.subject.clone().unwrap_or_default(),
            keywords: info.keywords.clone().unwrap_or_default(),
            creator: info.creator.clone().unwrap_or_else(|| "Unknown".to_string()),
            producer: info
                .producer
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            creation_date: info.creation_date.clone(),
            modification_date: info.mod_date.clone(),
        }
    }
}

/// A parsed statement: page text plus document info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPdf {
    /// Number of pages in the document
    pub numpages: usize,
    /// Concatenated text of all pages
    pub text: String,
    /// Raw document-information fields
    pub info: PdfInfo,
    /// Info with display defaults applied
    pub metadata: PdfMetadata,
}

/// Parses PDF bytes into text and document info.
///
/// Any parser failure - truncated file, wrong magic, broken xref - comes
/// back as a single `Extraction` error carrying the library's message.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn parse_pdf(bytes: &[u8]) -> Result<ParsedPdf> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| Error::extraction(format!("Failed to parse PDF: {e}")))?;

    let pages = doc.get_pages();
    let numpages = pages.len();
    let page_numbers: Vec<u32> = pages.keys().copied().collect();

    let text = doc
        .extract_text(&page_numbers)
        .map_err(|e| Error::extraction(format!("Failed to extract text: {e}")))?;

    let info = read_document_info(&doc);
    let metadata = PdfMetadata::from_info(&info);
    debug!("Parsed PDF: {numpages} pages, {} chars of text", text.len());

    Ok(ParsedPdf {
        numpages,
        text,
        info,
        metadata,
    })
}

/// Reads the trailer's Info dictionary, if present.
fn read_document_info(doc: &Document) -> PdfInfo {
    let Some(dict) = info_dictionary(doc) else {
        return PdfInfo::default();
    };

    PdfInfo {
        title: dict_string(dict, b"Title"),
        author: dict_string(dict, b"Author"),
        subject: dict_string(dict, b"Subject"),
        keywords: dict_string(dict, b"Keywords"),
        creator: dict_string(dict, b"Creator"),
        producer: dict_string(dict, b"Producer"),
        creation_date: dict_string(dict, b"CreationDate"),
        mod_date: dict_string(dict, b"ModDate"),
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let resolved = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    resolved.as_dict().ok()
}

fn dict_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse_pdf(b"definitely not a pdf");
        assert!(matches!(
            result.unwrap_err(),
            Error::Extraction { message: _ }
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_header() {
        let result = parse_pdf(b"%PDF-1.7\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_sample_document() {
        let parsed = parse_pdf(&crate::test_utils::sample_pdf_bytes()).unwrap();
        assert_eq!(parsed.numpages, 1);
        assert!(parsed.text.contains("Hello World!"), "text: {}", parsed.text);
        assert_eq!(parsed.metadata.title, "Untitled");
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = PdfMetadata::from_info(&PdfInfo::default());
        assert_eq!(metadata.title, "Untitled");
        assert_eq!(metadata.author, "Unknown");
        assert_eq!(metadata.subject, "");
        assert_eq!(metadata.keywords, "");
        assert_eq!(metadata.creator, "Unknown");
        assert_eq!(metadata.producer, "Unknown");
        assert!(metadata.creation_date.is_none());
    }

    #[test]
    fn test_metadata_prefers_stored_info() {
        let info = PdfInfo {
            title: Some("March Statement".to_string()),
            author: Some("Test Bank".to_string()),
            ..PdfInfo::default()
        };
        let metadata = PdfMetadata::from_info(&info);
        assert_eq!(metadata.title, "March Statement");
        assert_eq!(metadata.author, "Test Bank");
        assert_eq!(metadata.producer, "Unknown");
    }
}
