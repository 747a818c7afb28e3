//! Geotagged hazard summary and map generation service.
//!
//! Ingests a merged JSON collection of geotagged event records
//! (earthquake magnitudes, daily rain sums, mean temperatures), folds
//! them into per-city summaries, selects the notable cities along a
//! fixed set of ranking criteria, and renders each dataset as a
//! standalone Leaflet heat map with annotated markers.

pub mod analysis;
pub mod config;
pub mod datasets;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
