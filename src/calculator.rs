//! Pace calculation entry point
//!
//! Turns a 12-minute test distance into formatted training paces:
//! distance -> threshold pace -> band multipliers -> zone paces ->
//! HYROX blend and interval splits -> `mm:ss` strings.

use crate::error::{CalculationError, InputError, Result};
use crate::pace::{self, IntervalSplit, INTERVAL_DISTANCES};
use crate::threshold::threshold_pace;
use crate::zones::{expand_zones, select_band, Band, Zone, ZonePaces};
use serde::Serialize;
use tracing::{debug, instrument};

/// Unformatted result of evaluating the pace model for one distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaceCalculation {
    pub distance: f64,
    pub band: Band,
    /// Threshold pace in min/km at full precision
    pub threshold: f64,
    pub zones: ZonePaces,
    /// HYROX race pace in min/km
    pub hyrox: f64,
}

/// Formatted calculation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceReport {
    pub input: InputSummary,
    /// HYROX race pace as `mm:ss`
    pub hyrox: String,
    /// Training zones from slowest to fastest
    pub zones: Vec<ZoneEntry>,
    #[serde(rename = "speedReps")]
    pub speed_reps: SpeedReps,
    pub debug: DebugInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSummary {
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEntry {
    pub label: String,
    pub pace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedReps {
    pub pace: String,
    pub intervals: Vec<IntervalSplit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    /// Band identifier, e.g. `2600–3400`
    pub band: String,
    /// Raw threshold pace, left unformatted for numeric reuse
    pub threshold_min_per_km: f64,
}

/// Either a full report or an error record, serialized without a tag
///
/// Matches the JSON contract where callers branch on the presence of an
/// `error` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationResponse {
    Ok(PaceReport),
    Error { error: String },
}

impl CalculationResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, CalculationResponse::Error { .. })
    }
}

impl From<Result<PaceReport>> for CalculationResponse {
    fn from(result: Result<PaceReport>) -> Self {
        match result {
            Ok(report) => CalculationResponse::Ok(report),
            Err(err) => CalculationResponse::Error {
                error: err.user_message(),
            },
        }
    }
}

/// Reject non-finite and non-positive distances
pub fn validate_distance(distance_meters: f64) -> std::result::Result<f64, InputError> {
    if !distance_meters.is_finite() {
        return Err(InputError::NotFinite {
            value: distance_meters,
        });
    }
    if distance_meters <= 0.0 {
        return Err(InputError::NotPositive {
            value: distance_meters,
        });
    }
    Ok(distance_meters)
}

/// Parse a distance typed by a user
///
/// Surrounding whitespace is ignored and an empty string reads as zero, so it
/// is rejected as non-positive by [`validate_distance`]. Unsigned integers with
/// a `0x`, `0o` or `0b` prefix are read in that radix.
pub fn parse_distance(raw: &str) -> std::result::Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let parsed = match radix_prefix(trimmed) {
        Some((radix, digits)) => parse_radix_digits(digits, radix),
        None => trimmed.parse::<f64>().ok(),
    };
    parsed.ok_or_else(|| InputError::NotANumber {
        raw: raw.to_string(),
    })
}

fn radix_prefix(value: &str) -> Option<(u32, &str)> {
    let prefix = value.get(..2)?;
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some((radix, &value[2..]))
}

// Folded into f64 so long literals overflow to infinity instead of failing
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Evaluate the pace model without formatting
pub fn evaluate(distance_meters: f64) -> Result<PaceCalculation> {
    let distance = validate_distance(distance_meters)?;

    let band = select_band(distance);
    if !band.contains(distance) {
        return Err(CalculationError::UnresolvedBand { distance }.into());
    }

    let threshold = threshold_pace(distance);
    let zones = expand_zones(threshold, band);
    let hyrox = pace::hyrox_pace(&zones);

    debug!(distance, band = %band, threshold, "Evaluated pace model");

    Ok(PaceCalculation {
        distance,
        band,
        threshold,
        zones,
        hyrox,
    })
}

/// Calculate all formatted paces for a 12-minute test distance
///
/// Non-finite or non-positive distances are rejected with an
/// [`crate::error::PaceCalcError::InvalidInput`]; range checks beyond positivity are left to
/// the caller.
#[instrument(level = "debug")]
pub fn calculate_paces(distance_meters: f64) -> Result<PaceReport> {
    match evaluate(distance_meters) {
        Ok(calculation) => Ok(PaceReport::from(&calculation)),
        Err(err) => {
            err.log_rejection(distance_meters);
            Err(err)
        }
    }
}

/// Parse then calculate, for raw text input
pub fn calculate_paces_from_str(raw: &str) -> Result<PaceReport> {
    let distance = parse_distance(raw)?;
    calculate_paces(distance)
}

/// Calculate and fold any error into the `{ error }` record
pub fn calculate_response(distance_meters: f64) -> CalculationResponse {
    calculate_paces(distance_meters).into()
}

impl From<&PaceCalculation> for PaceReport {
    fn from(calc: &PaceCalculation) -> Self {
        let zones = Zone::TRAINING
            .iter()
            .map(|&zone| ZoneEntry {
                label: zone.label().to_string(),
                pace: pace::format_pace(calc.zones.get(zone)),
            })
            .collect();

        let speed_reps_pace = calc.zones.speed_repetitions;

        PaceReport {
            input: InputSummary {
                distance: calc.distance,
            },
            hyrox: pace::format_pace(calc.hyrox),
            zones,
            speed_reps: SpeedReps {
                pace: pace::format_pace(speed_reps_pace),
                intervals: pace::interval_splits(speed_reps_pace, &INTERVAL_DISTANCES),
            },
            debug: DebugInfo {
                band: calc.band.id().to_string(),
                threshold_min_per_km: calc.threshold,
            },
        }
    }
}

impl PaceReport {
    /// Pace string for a training zone label
    pub fn zone_pace(&self, label: &str) -> Option<&str> {
        self.zones
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.pace.as_str())
    }
}
