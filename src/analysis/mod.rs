/// Record classification, aggregation, and notable-city selection.
///
/// This is the core of the service: a single synchronous pass turns a
/// flat list of normalized records into deterministic per-city rollups
/// and tie-broken extremal picks. No I/O happens here — loading lives
/// in `ingest`, rendering in `render`.
///
/// Submodules:
/// - `classify` — fixed-threshold severity buckets per measurement kind.
/// - `aggregate` — insertion-ordered per-city accumulator table.
/// - `select` — the seven notable-city ranking criteria.

pub mod aggregate;
pub mod classify;
pub mod select;
