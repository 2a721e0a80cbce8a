//! Statement extraction - PDF text extraction and AI analysis clients.
//!
//! Both halves delegate the hard work: PDF binary parsing to a third-party
//! library, spending analysis to an external generative model. This module
//! only shapes inputs and outputs.

/// External generative-endpoint client for statement analysis
pub mod gemini;
/// PDF text and document-info extraction
pub mod pdf;
