/// Severity-bucket classification.
///
/// Maps a numeric measurement to a named severity bucket using fixed
/// per-domain threshold tables. Magnitude and rainfall each have their
/// own table; temperature is never bucketed and is used directly as a
/// continuous value.
///
/// Rules are evaluated in declaration order and the FIRST match wins.
/// Both tables overlap at their Medium/High boundary (magnitude 5.0,
/// rainfall 10.0 satisfy both rules), so those values classify as
/// Medium. Both tables also leave a gap below Medium (2 < m < 3,
/// 5 < r < 6) where no rule matches.

use crate::model::MeasurementKind;

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Severity buckets, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::Low => "Low",
            Bucket::Medium => "Medium",
            Bucket::High => "High",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies a measurement into a severity bucket.
///
/// Pure and total: every finite input yields the same answer on every
/// call, and values matching no rule yield `None`. Temperature always
/// yields `None` — that dataset has no classifier.
pub fn classify(measurement: f64, kind: MeasurementKind) -> Option<Bucket> {
    match kind {
        MeasurementKind::Magnitude => classify_magnitude(measurement),
        MeasurementKind::RainSum => classify_rainfall(measurement),
        MeasurementKind::TemperatureMean => None,
    }
}

/// Magnitude table: <= 2 Low, 3..=5 Medium, >= 5 High.
fn classify_magnitude(magnitude: f64) -> Option<Bucket> {
    if magnitude <= 2.0 {
        Some(Bucket::Low)
    } else if (3.0..=5.0).contains(&magnitude) {
        Some(Bucket::Medium)
    } else if magnitude >= 5.0 {
        Some(Bucket::High)
    } else {
        None
    }
}

/// Rainfall table: <= 5 Low, 6..=10 Medium, >= 10 High.
fn classify_rainfall(rain_sum: f64) -> Option<Bucket> {
    if rain_sum <= 5.0 {
        Some(Bucket::Low)
    } else if (6.0..=10.0).contains(&rain_sum) {
        Some(Bucket::Medium)
    } else if rain_sum >= 10.0 {
        Some(Bucket::High)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeasurementKind::{Magnitude, RainSum, TemperatureMean};

    // --- Magnitude table ----------------------------------------------------

    #[test]
    fn test_magnitude_low_band() {
        assert_eq!(classify(0.0, Magnitude), Some(Bucket::Low));
        assert_eq!(classify(1.5, Magnitude), Some(Bucket::Low));
        assert_eq!(classify(2.0, Magnitude), Some(Bucket::Low));
    }

    #[test]
    fn test_magnitude_below_zero_is_low() {
        // The Low rule is an upper bound only, so negatives fall in it.
        assert_eq!(classify(-1.0, Magnitude), Some(Bucket::Low));
    }

    #[test]
    fn test_magnitude_gap_between_low_and_medium_is_unclassified() {
        assert_eq!(classify(2.5, Magnitude), None, "2 < m < 3 matches no rule");
        assert_eq!(classify(2.0001, Magnitude), None);
        assert_eq!(classify(2.9999, Magnitude), None);
    }

    #[test]
    fn test_magnitude_medium_band() {
        assert_eq!(classify(3.0, Magnitude), Some(Bucket::Medium));
        assert_eq!(classify(4.2, Magnitude), Some(Bucket::Medium));
    }

    #[test]
    fn test_magnitude_boundary_5_is_medium_not_high() {
        // 5.0 satisfies both the Medium and High rules; the Medium rule
        // is declared first and wins.
        assert_eq!(classify(5.0, Magnitude), Some(Bucket::Medium));
    }

    #[test]
    fn test_magnitude_high_band() {
        assert_eq!(classify(5.1, Magnitude), Some(Bucket::High));
        assert_eq!(classify(9.5, Magnitude), Some(Bucket::High));
    }

    // --- Rainfall table -----------------------------------------------------

    #[test]
    fn test_rainfall_low_band() {
        assert_eq!(classify(0.0, RainSum), Some(Bucket::Low));
        assert_eq!(classify(5.0, RainSum), Some(Bucket::Low));
    }

    #[test]
    fn test_rainfall_gap_between_low_and_medium_is_unclassified() {
        assert_eq!(classify(5.5, RainSum), None, "5 < r < 6 matches no rule");
    }

    #[test]
    fn test_rainfall_medium_band() {
        assert_eq!(classify(6.0, RainSum), Some(Bucket::Medium));
        assert_eq!(classify(8.0, RainSum), Some(Bucket::Medium));
    }

    #[test]
    fn test_rainfall_boundary_10_is_medium_not_high() {
        // Same first-match rule as the magnitude table.
        assert_eq!(classify(10.0, RainSum), Some(Bucket::Medium));
    }

    #[test]
    fn test_rainfall_high_band() {
        assert_eq!(classify(10.1, RainSum), Some(Bucket::High));
        assert_eq!(classify(42.0, RainSum), Some(Bucket::High));
    }

    // --- Temperature --------------------------------------------------------

    #[test]
    fn test_temperature_is_never_bucketed() {
        assert_eq!(classify(-20.0, TemperatureMean), None);
        assert_eq!(classify(0.0, TemperatureMean), None);
        assert_eq!(classify(35.0, TemperatureMean), None);
    }

    // --- Determinism --------------------------------------------------------

    #[test]
    fn test_classification_is_deterministic_across_calls() {
        for value in [-3.0, 0.0, 2.0, 2.5, 3.0, 5.0, 7.0, 10.0, 11.0] {
            let first = classify(value, Magnitude);
            for _ in 0..10 {
                assert_eq!(classify(value, Magnitude), first);
            }
        }
    }
}
