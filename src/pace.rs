//! Pace arithmetic and mm:ss formatting
//!
//! All paces are minutes per kilometer. Rounding to whole seconds happens
//! exactly once, when a value is turned into its `mm:ss` string.

use crate::zones::ZonePaces;
use serde::Serialize;

/// Segment lengths (meters) projected at speed-repetition pace
pub const INTERVAL_DISTANCES: [u32; 4] = [200, 400, 600, 800];

/// Format a duration in seconds as zero-padded `mm:ss`
///
/// Rounds half-up to the nearest whole second first. Minutes are not capped,
/// so durations past an hour read e.g. `75:00`.
pub fn seconds_to_mm_ss(total_seconds: f64) -> String {
    let seconds = total_seconds.round() as u64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a pace in minutes per kilometer as `mm:ss`
pub fn min_per_km_to_mm_ss(min_per_km: f64) -> String {
    seconds_to_mm_ss(min_per_km * 60.0)
}

/// Alias of [`min_per_km_to_mm_ss`]
pub fn format_pace(min_per_km: f64) -> String {
    min_per_km_to_mm_ss(min_per_km)
}

/// Convert a pace in min/km to a velocity in m/s
pub fn min_per_km_to_meters_per_second(min_per_km: f64) -> f64 {
    1000.0 / (min_per_km * 60.0)
}

/// Unrounded time in seconds to cover `distance_meters` at the given pace
pub fn duration_seconds_for_distance(distance_meters: f64, pace_min_per_km: f64) -> f64 {
    distance_meters / min_per_km_to_meters_per_second(pace_min_per_km)
}

/// Time to cover `distance_meters` at the given pace, formatted as `mm:ss`
pub fn duration_for_distance(distance_meters: f64, pace_min_per_km: f64) -> String {
    seconds_to_mm_ss(duration_seconds_for_distance(distance_meters, pace_min_per_km))
}

/// HYROX race pace: mean of the threshold and sub-threshold paces
pub fn hyrox_pace(zones: &ZonePaces) -> f64 {
    (zones.threshold + zones.sub_threshold) / 2.0
}

/// Projected split for one interval segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSplit {
    /// Segment label such as `200m`
    pub distance: String,
    /// Duration as `mm:ss`
    pub duration: String,
}

impl IntervalSplit {
    pub fn new(segment_meters: u32, pace_min_per_km: f64) -> Self {
        Self {
            distance: format!("{}m", segment_meters),
            duration: duration_for_distance(f64::from(segment_meters), pace_min_per_km),
        }
    }
}

/// Splits for each segment in order, run at `speed_reps_pace`
pub fn interval_splits(speed_reps_pace: f64, segments: &[u32]) -> Vec<IntervalSplit> {
    segments
        .iter()
        .map(|&segment| IntervalSplit::new(segment, speed_reps_pace))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{expand_zones, Band};
    use proptest::prelude::*;

    #[test]
    fn test_format_pace_exact() {
        assert_eq!(format_pace(5.5), "05:30");
        assert_eq!(format_pace(4.0), "04:00");
        assert_eq!(format_pace(0.0), "00:00");
    }

    #[test]
    fn test_format_pace_rounds_half_up() {
        // 299.5 seconds -> 300, not truncated to 299
        assert_eq!(format_pace(299.5 / 60.0), "05:00");
        assert_eq!(format_pace(299.4 / 60.0), "04:59");
    }

    #[test]
    fn test_format_rolls_over_minutes() {
        assert_eq!(seconds_to_mm_ss(59.5), "01:00");
        assert_eq!(seconds_to_mm_ss(3599.6), "60:00");
        assert_eq!(seconds_to_mm_ss(4500.0), "75:00");
    }

    #[test]
    fn test_velocity_conversion() {
        // 4:00 min/km == 250m per minute
        let v = min_per_km_to_meters_per_second(4.0);
        assert!((v - 250.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_duration_for_distance() {
        assert_eq!(duration_for_distance(400.0, 4.0), "01:36");
        assert_eq!(duration_for_distance(1000.0, 4.0), "04:00");
    }

    #[test]
    fn test_hyrox_is_average_of_threshold_and_sub_threshold() {
        let zones = expand_zones(4.0, Band::Middle);
        let expected = (4.0 + 4.0 / 0.94) / 2.0;
        assert_eq!(hyrox_pace(&zones), expected);
    }

    #[test]
    fn test_interval_splits_order_and_labels() {
        let splits = interval_splits(4.0, &INTERVAL_DISTANCES);

        let labels: Vec<&str> = splits.iter().map(|s| s.distance.as_str()).collect();
        assert_eq!(labels, vec!["200m", "400m", "600m", "800m"]);

        let durations: Vec<&str> = splits.iter().map(|s| s.duration.as_str()).collect();
        assert_eq!(durations, vec!["00:48", "01:36", "02:24", "03:12"]);
    }

    proptest! {
        #[test]
        fn test_kilometer_duration_equals_pace(pace in 2.0f64..30.0) {
            prop_assert_eq!(duration_for_distance(1000.0, pace), format_pace(pace));
        }

        #[test]
        fn test_seconds_component_below_sixty(seconds in 0.0f64..36_000.0) {
            let formatted = seconds_to_mm_ss(seconds);
            let (_, ss) = formatted.split_once(':').unwrap();
            prop_assert_eq!(ss.len(), 2);
            prop_assert!(ss.parse::<u32>().unwrap() < 60);
        }
    }
}
