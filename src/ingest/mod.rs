/// Record ingestion.
///
/// Loads the merged JSON record collection from disk and normalizes it
/// into the shared domain model. All structural validation (required
/// fields, date format, city-label collapsing) happens here, so the
/// analysis layer only ever sees well-formed records.

pub mod records;
