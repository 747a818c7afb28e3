/// Per-city aggregation.
///
/// Folds normalized records into per-city accumulators in a single
/// pass, collecting the heat-layer points and the dataset's mean
/// location along the way.
///
/// For bucketed datasets (low-magnitude earthquakes, low rainfall) a
/// record contributes only when its classification equals the target
/// bucket, so the accumulators describe the bucket-restricted subset of
/// each city's history. Unfiltered datasets (frequency, temperature)
/// fold every record.
///
/// The city table preserves first-insertion order. Extremal selection
/// breaks ties by taking the first city encountered in iteration order,
/// which is only deterministic if that order is stable across runs —
/// a plain `HashMap` does not qualify.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::analysis::classify::{Bucket, classify};
use crate::model::{HeatPoint, MeasurementKind, NormalizedRecord, SummaryError};

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Running per-city summary, built during one aggregation pass.
///
/// `first_latitude`/`first_longitude` anchor the city's marker at its
/// first contributing record; `lat_sum`/`lon_sum` support the mean
/// coordinates used by the temperature markers.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAccumulator {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_measurement: f64,
    pub max_measurement: f64,
    pub bucket_count: u32,
    pub first_latitude: f64,
    pub first_longitude: f64,
    lat_sum: f64,
    lon_sum: f64,
}

impl CityAccumulator {
    fn new(record: &NormalizedRecord) -> Self {
        Self {
            first_date: record.date,
            last_date: record.date,
            min_measurement: record.measurement,
            max_measurement: record.measurement,
            bucket_count: 1,
            first_latitude: record.latitude,
            first_longitude: record.longitude,
            lat_sum: record.latitude,
            lon_sum: record.longitude,
        }
    }

    fn update(&mut self, record: &NormalizedRecord) {
        self.first_date = self.first_date.min(record.date);
        self.last_date = self.last_date.max(record.date);
        self.min_measurement = self.min_measurement.min(record.measurement);
        self.max_measurement = self.max_measurement.max(record.measurement);
        self.bucket_count += 1;
        self.lat_sum += record.latitude;
        self.lon_sum += record.longitude;
    }

    /// Mean coordinates over the city's contributing records.
    pub fn centroid(&self) -> (f64, f64) {
        let n = f64::from(self.bucket_count);
        (self.lat_sum / n, self.lon_sum / n)
    }
}

// ---------------------------------------------------------------------------
// Insertion-ordered city table
// ---------------------------------------------------------------------------

/// Per-city accumulator table keyed by normalized city name.
///
/// Iteration yields cities in the order they were first inserted.
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    entries: Vec<(String, CityAccumulator)>,
    index: HashMap<String, usize>,
}

impl CityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, city: &str) -> Option<&CityAccumulator> {
        self.index.get(city).map(|&i| &self.entries[i].1)
    }

    /// Iterates cities in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CityAccumulator)> {
        self.entries.iter().map(|(city, acc)| (city.as_str(), acc))
    }

    fn fold(&mut self, city: &str, record: &NormalizedRecord) {
        match self.index.get(city).copied() {
            Some(i) => self.entries[i].1.update(record),
            None => {
                self.index.insert(city.to_string(), self.entries.len());
                self.entries.push((city.to_string(), CityAccumulator::new(record)));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Result of one aggregation pass over a dataset.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Map-centering location: the mean over all heat points.
    pub mean_latitude: f64,
    pub mean_longitude: f64,
    /// One point per contributing record, city-less records included.
    pub heat_points: Vec<HeatPoint>,
    /// Per-city accumulators, first-insertion ordered. City-less
    /// records are never keyed here.
    pub cities: CityTable,
}

/// Folds records into a `DatasetSummary` in a single pass.
///
/// With `target` set, a record contributes only if `classify` puts its
/// measurement in that bucket; without it, every record contributes.
/// Temperature heat points carry the measurement as their weight.
///
/// Returns `NoMatchingRecords` if the pass produced zero heat points —
/// the mean location and every extremal selection would be undefined.
pub fn aggregate(
    records: &[NormalizedRecord],
    kind: MeasurementKind,
    target: Option<Bucket>,
) -> Result<DatasetSummary, SummaryError> {
    let weighted = kind == MeasurementKind::TemperatureMean;

    let mut heat_points = Vec::new();
    let mut cities = CityTable::new();
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;

    for record in records {
        if let Some(bucket) = target {
            if classify(record.measurement, kind) != Some(bucket) {
                continue;
            }
        }

        heat_points.push(HeatPoint {
            latitude: record.latitude,
            longitude: record.longitude,
            weight: weighted.then_some(record.measurement),
        });
        lat_sum += record.latitude;
        lon_sum += record.longitude;

        if let Some(city) = &record.city {
            cities.fold(city, record);
        }
    }

    if heat_points.is_empty() {
        return Err(SummaryError::NoMatchingRecords {
            target: target.map(|b| b.name()),
        });
    }

    let n = heat_points.len() as f64;
    Ok(DatasetSummary {
        mean_latitude: lat_sum / n,
        mean_longitude: lon_sum / n,
        heat_points,
        cities,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
