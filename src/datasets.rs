/// Dataset registry for the hazard map service.
///
/// Defines the canonical list of summary pipelines the service renders
/// from the merged record file, along with their classification targets
/// and output artifacts. This is the single source of truth for dataset
/// keys — configuration and the CLI reference datasets from here rather
/// than hardcoding keys.

use crate::analysis::classify::Bucket;
use crate::model::MeasurementKind;

// ---------------------------------------------------------------------------
// Dataset metadata
// ---------------------------------------------------------------------------

/// How a dataset annotates its map beyond the heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// One marker per city with a first/last-date table popup.
    CityDates,
    /// Seven notable-city markers plus the color legend box.
    NotableCities,
    /// Two markers at the highest- and lowest-measurement cities.
    MeasurementExtremes,
}

/// Metadata for a single summary pipeline.
pub struct DatasetSpec {
    /// Stable key used in configuration and logging.
    pub key: &'static str,
    /// Map page title.
    pub title: &'static str,
    /// Human-readable description of what the dataset shows.
    pub description: &'static str,
    /// Which measurement field of the record this dataset reads.
    pub kind: MeasurementKind,
    /// Records contribute only when classified into this bucket;
    /// `None` folds every record.
    pub target_bucket: Option<Bucket>,
    /// Marker annotation style for the rendered map.
    pub marker_style: MarkerStyle,
    /// Output file name inside the configured output directory.
    pub output_file: &'static str,
}

/// All summary pipelines, in rendering order.
pub static DATASET_REGISTRY: &[DatasetSpec] = &[
    DatasetSpec {
        key: "earthquake_frequency",
        title: "Earthquake Frequency",
        description: "All recorded earthquakes as a density heat layer, \
                      with one marker per city showing its observation \
                      date range.",
        kind: MeasurementKind::Magnitude,
        target_bucket: None,
        marker_style: MarkerStyle::CityDates,
        output_file: "heatmap.html",
    },
    DatasetSpec {
        key: "earthquake_low_mag",
        title: "Low Magnitude Earthquakes",
        description: "Earthquakes classified into the Low magnitude \
                      bucket, with notable-city markers and legend.",
        kind: MeasurementKind::Magnitude,
        target_bucket: Some(Bucket::Low),
        marker_style: MarkerStyle::NotableCities,
        output_file: "heatmap_low_mag.html",
    },
    DatasetSpec {
        key: "rainfall_low",
        title: "Low Rainfall",
        description: "Daily records classified into the Low rain-sum \
                      bucket, with notable-city markers and legend.",
        kind: MeasurementKind::RainSum,
        target_bucket: Some(Bucket::Low),
        marker_style: MarkerStyle::NotableCities,
        output_file: "lowrainfall_heatmap.html",
    },
    DatasetSpec {
        key: "temperature",
        title: "Temperature Variation",
        description: "Mean temperatures as an intensity-weighted heat \
                      layer, with markers at the hottest and coldest \
                      cities.",
        kind: MeasurementKind::TemperatureMean,
        target_bucket: None,
        marker_style: MarkerStyle::MeasurementExtremes,
        output_file: "temperature_heatmap.html",
    },
];

/// Returns the keys of all registered datasets, in rendering order.
pub fn all_dataset_keys() -> Vec<&'static str> {
    DATASET_REGISTRY.iter().map(|d| d.key).collect()
}

/// Looks up a dataset by key. Returns `None` if not registered.
pub fn find_dataset(key: &str) -> Option<&'static DatasetSpec> {
    DATASET_REGISTRY.iter().find(|d| d.key == key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
