/// Notable-city selection.
///
/// Scans the per-city accumulator table along seven independent ranking
/// criteria and picks one city per criterion. Ties go to the first city
/// in the table's insertion order, so selection is deterministic for a
/// given input order.

use crate::analysis::aggregate::{CityAccumulator, CityTable};

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// The fixed ranking criteria, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotableCriterion {
    MostFrequent,
    LeastFrequent,
    HighestMeasurement,
    LowestMeasurement,
    MostRecentLastDate,
    LeastRecentLastDate,
    LeastRecentFirstDate,
}

impl NotableCriterion {
    /// Marker label, with the dataset's measurement noun spliced into
    /// the measurement criteria ("Highest Magnitude", "Lowest Rainfall").
    pub fn label(&self, measurement_noun: &str) -> String {
        match self {
            NotableCriterion::MostFrequent => "Most Frequent".to_string(),
            NotableCriterion::LeastFrequent => "Least Frequent".to_string(),
            NotableCriterion::HighestMeasurement => format!("Highest {}", measurement_noun),
            NotableCriterion::LowestMeasurement => format!("Lowest {}", measurement_noun),
            NotableCriterion::MostRecentLastDate => "Most Current Last Date".to_string(),
            NotableCriterion::LeastRecentLastDate => "Least Current Last Date".to_string(),
            NotableCriterion::LeastRecentFirstDate => "Least Current First Date".to_string(),
        }
    }

    /// Marker and legend color for this criterion.
    pub fn marker_color(&self) -> &'static str {
        match self {
            NotableCriterion::MostFrequent => "black",
            NotableCriterion::LeastFrequent => "red",
            NotableCriterion::HighestMeasurement => "orange",
            NotableCriterion::LowestMeasurement => "green",
            NotableCriterion::MostRecentLastDate => "gray",
            NotableCriterion::LeastRecentLastDate => "blue",
            NotableCriterion::LeastRecentFirstDate => "purple",
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// One city per criterion, borrowed from the accumulator table.
#[derive(Debug, Clone, PartialEq)]
pub struct NotableCities<'a> {
    pub most_frequent: &'a str,
    pub least_frequent: &'a str,
    pub highest_measurement: &'a str,
    pub lowest_measurement: &'a str,
    pub most_recent_last_date: &'a str,
    pub least_recent_last_date: &'a str,
    pub least_recent_first_date: &'a str,
}

impl<'a> NotableCities<'a> {
    /// The selections as (criterion, city) pairs in legend order.
    pub fn entries(&self) -> [(NotableCriterion, &'a str); 7] {
        [
            (NotableCriterion::MostFrequent, self.most_frequent),
            (NotableCriterion::LeastFrequent, self.least_frequent),
            (NotableCriterion::HighestMeasurement, self.highest_measurement),
            (NotableCriterion::LowestMeasurement, self.lowest_measurement),
            (NotableCriterion::MostRecentLastDate, self.most_recent_last_date),
            (NotableCriterion::LeastRecentLastDate, self.least_recent_last_date),
            (NotableCriterion::LeastRecentFirstDate, self.least_recent_first_date),
        ]
    }
}

enum Extremum {
    Max,
    Min,
}

/// Linear scan for the extremal city of one field. Only a strictly
/// better value displaces the current pick, so the first city in
/// iteration order wins ties.
fn scan<'a, T, F>(table: &'a CityTable, extremum: Extremum, field: F) -> Option<&'a str>
where
    T: PartialOrd,
    F: Fn(&CityAccumulator) -> T,
{
    let mut best: Option<(&str, T)> = None;
    for (city, acc) in table.iter() {
        let value = field(acc);
        let displaces = match &best {
            None => true,
            Some((_, current)) => match extremum {
                Extremum::Max => value > *current,
                Extremum::Min => value < *current,
            },
        };
        if displaces {
            best = Some((city, value));
        }
    }
    best.map(|(city, _)| city)
}

/// Picks the notable city for each of the seven criteria.
///
/// Returns `None` on an empty table; the aggregator guarantees callers
/// never hold one.
pub fn select_notable_cities(table: &CityTable) -> Option<NotableCities<'_>> {
    Some(NotableCities {
        most_frequent: scan(table, Extremum::Max, |a| a.bucket_count)?,
        least_frequent: scan(table, Extremum::Min, |a| a.bucket_count)?,
        highest_measurement: scan(table, Extremum::Max, |a| a.max_measurement)?,
        lowest_measurement: scan(table, Extremum::Min, |a| a.min_measurement)?,
        most_recent_last_date: scan(table, Extremum::Max, |a| a.last_date)?,
        least_recent_last_date: scan(table, Extremum::Min, |a| a.last_date)?,
        least_recent_first_date: scan(table, Extremum::Min, |a| a.first_date)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
