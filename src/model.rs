/// Core data types for the hazard map summary service.
///
/// This module defines the shared domain model imported by all other
/// modules. It contains no logic beyond error formatting and no I/O —
/// only types.

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Field names and formats
// ---------------------------------------------------------------------------

/// Calendar-date format used by the merged record files ("2020-01-01").
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Measurement kinds
// ---------------------------------------------------------------------------

/// The domain-specific measurement a dataset summarizes.
///
/// Each kind reads a different field of the raw record and has its own
/// field-presence contract: `magnitude` and `weather.temperature_mean`
/// are required where used, `weather.rain_sum` defaults to 0 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    Magnitude,
    RainSum,
    TemperatureMean,
}

impl MeasurementKind {
    /// Dotted path of the measurement field in the raw JSON record,
    /// used in `MissingField` diagnostics.
    pub fn field_name(&self) -> &'static str {
        match self {
            MeasurementKind::Magnitude => "magnitude",
            MeasurementKind::RainSum => "weather.rain_sum",
            MeasurementKind::TemperatureMean => "weather.temperature_mean",
        }
    }

    /// Human-readable noun for marker labels and legends
    /// ("Highest Magnitude", "Lowest Rainfall", ...).
    pub fn noun(&self) -> &'static str {
        match self {
            MeasurementKind::Magnitude => "Magnitude",
            MeasurementKind::RainSum => "Rainfall",
            MeasurementKind::TemperatureMean => "Temperature",
        }
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single geotagged event record after normalization.
///
/// Produced by `ingest::records::normalize_record` from one raw JSON
/// object. The city label has been collapsed to a single string key;
/// `None` means the record is city-less and participates only in the
/// heat layer, never in per-city aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub city: Option<String>,
    pub measurement: f64,
}

/// One point of the rendered heat layer.
///
/// `weight` is populated only for the temperature dataset, where the
/// heat layer is intensity-weighted by the measurement itself.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: Option<f64>,
}

// ---------------------------------------------------------------------------
// Invalid-record policy
// ---------------------------------------------------------------------------

/// What to do when a record fails structural validation.
///
/// `Fail` aborts the run on the first invalid record; `Skip` drops the
/// record with a warning log line and continues. Selected by the
/// `input.on_invalid` configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    Fail,
    Skip,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while normalizing or aggregating records.
///
/// Every variant carries enough context (record index, field name, or
/// the target bucket with zero matches) to diagnose without re-running.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// A record lacks a field that is structurally required for the
    /// dataset being summarized.
    MissingField { index: usize, field: &'static str },
    /// The record's date string is not a valid ISO `YYYY-MM-DD` date.
    InvalidDate { index: usize, value: String },
    /// After classification, zero records matched the target bucket
    /// (or, for unfiltered datasets, the input contributed no records),
    /// so mean location and extremal selection are undefined.
    NoMatchingRecords { target: Option<&'static str> },
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryError::MissingField { index, field } => {
                write!(f, "record {} is missing required field '{}'", index, field)
            }
            SummaryError::InvalidDate { index, value } => {
                write!(f, "record {} has invalid date '{}'", index, value)
            }
            SummaryError::NoMatchingRecords { target: Some(bucket) } => {
                write!(f, "no records matched target bucket '{}'", bucket)
            }
            SummaryError::NoMatchingRecords { target: None } => {
                write!(f, "no records available for aggregation")
            }
        }
    }
}

impl std::error::Error for SummaryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_index_and_field() {
        let err = SummaryError::MissingField { index: 12, field: "weather.temperature_mean" };
        let msg = err.to_string();
        assert!(msg.contains("12"), "message should include the record index: {}", msg);
        assert!(
            msg.contains("weather.temperature_mean"),
            "message should include the dotted field path: {}",
            msg
        );
    }

    #[test]
    fn test_no_matching_records_message_names_bucket() {
        let err = SummaryError::NoMatchingRecords { target: Some("Low") };
        assert!(err.to_string().contains("Low"));
    }

    #[test]
    fn test_measurement_field_names_match_record_layout() {
        assert_eq!(MeasurementKind::Magnitude.field_name(), "magnitude");
        assert_eq!(MeasurementKind::RainSum.field_name(), "weather.rain_sum");
        assert_eq!(MeasurementKind::TemperatureMean.field_name(), "weather.temperature_mean");
    }
}
