//! CSV input/output: household profile loading and results export.

/// Results table CSV export.
pub mod export;
/// Household profile CSV reader.
pub mod profile;
