/// Merged-record JSON loading and normalization.
///
/// The merged data file is a single JSON array of heterogeneous event
/// records. Each object carries latitude/longitude, an ISO date, an
/// optional city label (scalar string or list of parts), and whichever
/// measurement fields its source produced: a top-level `magnitude`
/// and/or a nested `weather` object with `rain_sum` and
/// `temperature_mean`.
///
/// Field requirements depend on the dataset being summarized:
/// `magnitude` and `weather.temperature_mean` must be present where
/// used; `weather.rain_sum` defaults to 0 when absent. Latitude,
/// longitude, and date are always required.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::logging;
use crate::model::{
    DATE_FORMAT, InvalidRecordPolicy, MeasurementKind, NormalizedRecord, SummaryError,
};

// ---------------------------------------------------------------------------
// Raw record structures
// ---------------------------------------------------------------------------

/// One entry of the merged data file, exactly as serialized.
///
/// Every field is optional at this layer; presence is enforced per
/// dataset kind by `normalize_record`. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: Option<String>,
    pub city: Option<CityLabel>,
    pub magnitude: Option<f64>,
    pub weather: Option<RawWeather>,
}

/// Nested weather block of a raw record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeather {
    pub rain_sum: Option<f64>,
    pub temperature_mean: Option<f64>,
}

/// City label as found in the wild: a plain string, or a list of parts
/// (district, ward, ...) that may contain nulls and empty strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CityLabel {
    Single(String),
    Parts(Vec<serde_json::Value>),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Reads and deserializes the merged record file.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    let records: Vec<RawRecord> = serde_json::from_str(&text)
        .map_err(|e| format!("failed to parse '{}': {}", path.display(), e))?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Collapses a city label to a single canonical key.
///
/// Scalar strings pass through unchanged, so normalization is
/// idempotent. Lists are joined from their non-empty stringified parts
/// with ", ", order preserved, duplicates kept. Returns `None` when
/// nothing usable remains — the record is then city-less.
pub fn normalize_city(label: &CityLabel) -> Option<String> {
    match label {
        CityLabel::Single(name) => {
            if name.is_empty() {
                None
            } else {
                Some(name.clone())
            }
        }
        CityLabel::Parts(parts) => {
            let joined: Vec<String> = parts
                .iter()
                .filter_map(|part| match part {
                    serde_json::Value::Null => None,
                    serde_json::Value::String(s) if s.is_empty() => None,
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join(", "))
            }
        }
    }
}

/// Validates one raw record against the dataset's field contract and
/// produces its normalized form.
///
/// `index` is the record's position in the input file and is carried
/// into every error for diagnosis.
pub fn normalize_record(
    index: usize,
    raw: &RawRecord,
    kind: MeasurementKind,
) -> Result<NormalizedRecord, SummaryError> {
    let latitude = raw
        .latitude
        .ok_or(SummaryError::MissingField { index, field: "latitude" })?;
    let longitude = raw
        .longitude
        .ok_or(SummaryError::MissingField { index, field: "longitude" })?;

    let date_str = raw
        .date
        .as_deref()
        .ok_or(SummaryError::MissingField { index, field: "date" })?;
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
        SummaryError::InvalidDate { index, value: date_str.to_string() }
    })?;

    let measurement = match kind {
        MeasurementKind::Magnitude => raw
            .magnitude
            .ok_or(SummaryError::MissingField { index, field: kind.field_name() })?,
        MeasurementKind::RainSum => raw
            .weather
            .as_ref()
            .and_then(|w| w.rain_sum)
            .unwrap_or(0.0),
        MeasurementKind::TemperatureMean => raw
            .weather
            .as_ref()
            .and_then(|w| w.temperature_mean)
            .ok_or(SummaryError::MissingField { index, field: kind.field_name() })?,
    };

    Ok(NormalizedRecord {
        latitude,
        longitude,
        date,
        city: raw.city.as_ref().and_then(normalize_city),
        measurement,
    })
}

/// Normalizes a whole batch under the configured invalid-record policy.
///
/// With `Fail` the first invalid record aborts the batch; with `Skip`
/// invalid records are dropped with a warning naming the record index
/// and the violated field.
pub fn normalize_all(
    dataset_key: &str,
    records: &[RawRecord],
    kind: MeasurementKind,
    policy: InvalidRecordPolicy,
) -> Result<Vec<NormalizedRecord>, SummaryError> {
    let mut normalized = Vec::with_capacity(records.len());
    for (index, raw) in records.iter().enumerate() {
        match normalize_record(index, raw, kind) {
            Ok(record) => normalized.push(record),
            Err(err) => match policy {
                InvalidRecordPolicy::Fail => return Err(err),
                InvalidRecordPolicy::Skip => {
                    logging::log_skipped_record(dataset_key, &err);
                }
            },
        }
    }
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeasurementKind::{Magnitude, RainSum, TemperatureMean};

    fn raw(json: &str) -> RawRecord {
        serde_json::from_str(json).expect("test fixture should deserialize")
    }

    // --- City normalization -------------------------------------------------

    #[test]
    fn test_scalar_city_passes_through_unchanged() {
        let record = raw(r#"{"city": "Tokyo"}"#);
        let city = record.city.as_ref().and_then(normalize_city);
        assert_eq!(city.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_city_list_joins_non_empty_parts_with_comma_space() {
        let record = raw(r#"{"city": ["North", "", "Ward"]}"#);
        let city = record.city.as_ref().and_then(normalize_city);
        assert_eq!(city.as_deref(), Some("North, Ward"));
    }

    #[test]
    fn test_city_list_skips_nulls_and_preserves_order_and_duplicates() {
        let record = raw(r#"{"city": ["B", null, "A", "B"]}"#);
        let city = record.city.as_ref().and_then(normalize_city);
        assert_eq!(city.as_deref(), Some("B, A, B"));
    }

    #[test]
    fn test_empty_or_exhausted_city_labels_are_city_less() {
        assert_eq!(raw(r#"{"city": ""}"#).city.as_ref().and_then(normalize_city), None);
        assert_eq!(
            raw(r#"{"city": ["", null]}"#).city.as_ref().and_then(normalize_city),
            None
        );
        assert!(raw(r#"{}"#).city.is_none());
    }

    #[test]
    fn test_normalization_is_idempotent_for_normalized_labels() {
        let once = normalize_city(&CityLabel::Single("North, Ward".to_string())).unwrap();
        let twice = normalize_city(&CityLabel::Single(once.clone())).unwrap();
        assert_eq!(once, twice);
    }

    // --- Field requirements -------------------------------------------------

    fn full_record() -> &'static str {
        r#"{
            "latitude": 35.0, "longitude": 139.0, "date": "2021-03-11",
            "city": "Sendai", "magnitude": 4.1,
            "weather": {"rain_sum": 2.5, "temperature_mean": 12.0}
        }"#
    }

    #[test]
    fn test_normalize_reads_the_measurement_for_each_kind() {
        let record = raw(full_record());
        assert_eq!(normalize_record(0, &record, Magnitude).unwrap().measurement, 4.1);
        assert_eq!(normalize_record(0, &record, RainSum).unwrap().measurement, 2.5);
        assert_eq!(normalize_record(0, &record, TemperatureMean).unwrap().measurement, 12.0);
    }

    #[test]
    fn test_missing_magnitude_is_an_error_with_index_and_field() {
        let record = raw(r#"{"latitude": 1.0, "longitude": 2.0, "date": "2020-01-01"}"#);
        let err = normalize_record(7, &record, Magnitude).unwrap_err();
        assert_eq!(err, SummaryError::MissingField { index: 7, field: "magnitude" });
    }

    #[test]
    fn test_missing_rain_sum_defaults_to_zero() {
        // Explicit default per the field contract — with or without the
        // weather block.
        let no_weather = raw(r#"{"latitude": 1.0, "longitude": 2.0, "date": "2020-01-01"}"#);
        assert_eq!(normalize_record(0, &no_weather, RainSum).unwrap().measurement, 0.0);

        let partial = raw(
            r#"{"latitude": 1.0, "longitude": 2.0, "date": "2020-01-01",
                "weather": {"temperature_mean": 5.0}}"#,
        );
        assert_eq!(normalize_record(0, &partial, RainSum).unwrap().measurement, 0.0);
    }

    #[test]
    fn test_missing_temperature_mean_is_an_error() {
        let record = raw(
            r#"{"latitude": 1.0, "longitude": 2.0, "date": "2020-01-01",
                "weather": {"rain_sum": 3.0}}"#,
        );
        let err = normalize_record(3, &record, TemperatureMean).unwrap_err();
        assert_eq!(
            err,
            SummaryError::MissingField { index: 3, field: "weather.temperature_mean" }
        );
    }

    #[test]
    fn test_missing_coordinates_and_date_are_errors() {
        let no_lat = raw(r#"{"longitude": 2.0, "date": "2020-01-01", "magnitude": 1.0}"#);
        assert_eq!(
            normalize_record(0, &no_lat, Magnitude).unwrap_err(),
            SummaryError::MissingField { index: 0, field: "latitude" }
        );

        let no_date = raw(r#"{"latitude": 1.0, "longitude": 2.0, "magnitude": 1.0}"#);
        assert_eq!(
            normalize_record(0, &no_date, Magnitude).unwrap_err(),
            SummaryError::MissingField { index: 0, field: "date" }
        );
    }

    #[test]
    fn test_malformed_date_is_an_invalid_date_error() {
        let record = raw(
            r#"{"latitude": 1.0, "longitude": 2.0, "date": "01/02/2020", "magnitude": 1.0}"#,
        );
        let err = normalize_record(5, &record, Magnitude).unwrap_err();
        assert_eq!(
            err,
            SummaryError::InvalidDate { index: 5, value: "01/02/2020".to_string() }
        );
    }

    // --- Batch policy -------------------------------------------------------

    fn mixed_batch() -> Vec<RawRecord> {
        vec![
            raw(r#"{"latitude": 1.0, "longitude": 1.0, "date": "2020-01-01", "magnitude": 1.0}"#),
            raw(r#"{"latitude": 2.0, "longitude": 2.0, "date": "2020-01-02"}"#),
            raw(r#"{"latitude": 3.0, "longitude": 3.0, "date": "2020-01-03", "magnitude": 3.0}"#),
        ]
    }

    #[test]
    fn test_fail_policy_aborts_on_first_invalid_record() {
        let err = normalize_all("test", &mixed_batch(), Magnitude, InvalidRecordPolicy::Fail)
            .unwrap_err();
        assert_eq!(err, SummaryError::MissingField { index: 1, field: "magnitude" });
    }

    #[test]
    fn test_skip_policy_drops_exactly_the_invalid_records() {
        let normalized =
            normalize_all("test", &mixed_batch(), Magnitude, InvalidRecordPolicy::Skip)
                .expect("skip mode should not fail on invalid records");
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].measurement, 1.0);
        assert_eq!(normalized[1].measurement, 3.0);
    }

    // --- File loading -------------------------------------------------------

    #[test]
    fn test_load_records_reads_a_json_array() {
        let path = std::env::temp_dir().join("hazmap_test_load_records.json");
        fs::write(
            &path,
            r#"[{"latitude": 1.0, "longitude": 2.0, "date": "2020-01-01", "magnitude": 1.5}]"#,
        )
        .unwrap();
        let records = load_records(&path).expect("valid file should load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].magnitude, Some(1.5));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_records_error_names_the_path() {
        let path = Path::new("/nonexistent/hazmap/merged_data.json");
        let err = load_records(path).unwrap_err();
        assert!(err.to_string().contains("merged_data.json"));
    }
}
