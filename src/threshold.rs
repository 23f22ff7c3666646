//! Threshold pace estimation from a 12-minute run test
//!
//! The threshold pace is the 100% reference every training zone is derived
//! from. It is modelled as an exponential decay in the distance covered
//! during the test, approaching a floor of roughly 3:22 min/km.

/// Amplitude of the exponential term (min/km)
pub const THRESHOLD_AMPLITUDE: f64 = 71.4478484;

/// Decay rate per meter of test distance
pub const THRESHOLD_DECAY_RATE: f64 = 0.00143607775;

/// Asymptotic threshold pace for very large distances (min/km)
pub const THRESHOLD_FLOOR: f64 = 3.36187527;

/// Duration of the field test the model is fitted against, in minutes
pub const TEST_DURATION_MINUTES: u32 = 12;

/// Threshold pace in minutes per kilometer for a 12-minute test distance
///
/// `threshold = 71.4478484 * e^(-0.00143607775 * d) + 3.36187527`
///
/// Strictly decreasing in `distance_meters`: covering more ground in the test
/// always yields a faster (smaller) threshold pace. Callers are expected to
/// pass a positive, finite distance.
pub fn threshold_pace(distance_meters: f64) -> f64 {
    THRESHOLD_AMPLITUDE * (-THRESHOLD_DECAY_RATE * distance_meters).exp() + THRESHOLD_FLOOR
}
