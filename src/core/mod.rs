//! Core business logic - framework-agnostic operations over the data model.
//!
//! All data access flows through the functions in these modules; nothing
//! above this layer talks to the database provider directly.

/// Spending amount data access, including the batch totals fold
pub mod amount;
/// AI analysis payload types and strict parsing
pub mod analysis;
/// Extracted transaction persistence
pub mod extracted;
/// Pure spending-to-geometry transform
pub mod geometry;
/// Spending location data access
pub mod location;
/// Upload ingestion state machine
pub mod pipeline;
/// Scene description and building selection payloads
pub mod scene;
/// Upload record lifecycle and the terminal-status guard
pub mod upload;
/// User data access
pub mod user;
