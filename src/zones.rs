use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance band of a 12-minute test, selecting which multiplier set applies
///
/// Bands are keyed on the test distance in meters:
/// - Lower: distance <= 2600
/// - Middle: 2600 < distance <= 3400
/// - Upper: distance > 3400
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Lower,
    Middle,
    Upper,
}

impl Band {
    /// All bands in ascending distance order
    pub const ALL: [Band; 3] = [Band::Lower, Band::Middle, Band::Upper];

    /// Stable identifier reported in calculation results
    pub fn id(&self) -> &'static str {
        match self {
            Band::Lower => "≤2600",
            Band::Middle => "2600–3400",
            Band::Upper => ">3400",
        }
    }

    /// Exclusive lower bound of the band in meters
    pub fn lower_limit(&self) -> f64 {
        match self {
            Band::Lower => 0.0,
            Band::Middle => LOWER_BAND_MAX,
            Band::Upper => MIDDLE_BAND_MAX,
        }
    }

    /// Inclusive upper bound of the band in meters
    pub fn upper_limit(&self) -> f64 {
        match self {
            Band::Lower => LOWER_BAND_MAX,
            Band::Middle => MIDDLE_BAND_MAX,
            Band::Upper => f64::INFINITY,
        }
    }

    /// Whether a distance falls within `(lower_limit, upper_limit]`
    pub fn contains(&self, distance_meters: f64) -> bool {
        distance_meters > self.lower_limit() && distance_meters <= self.upper_limit()
    }

    /// Multiplier set for this band
    pub fn multipliers(&self) -> &'static MultiplierSet {
        &ZONE_MULTIPLIERS[*self as usize]
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Upper edge (inclusive) of the lower band
pub const LOWER_BAND_MAX: f64 = 2600.0;

/// Upper edge (inclusive) of the middle band
pub const MIDDLE_BAND_MAX: f64 = 3400.0;

/// Named training intensity zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Aerobic base (zone 2)
    Base,
    /// First ventilatory (aerobic) threshold
    Vt1,
    SubThreshold,
    /// Lactate threshold (LT2), the 100% reference
    Threshold,
    /// Maximal aerobic power
    Vo2Max,
    /// Short repetitions faster than VO2max pace
    SpeedRepetitions,
}

impl Zone {
    /// All zones from slowest to fastest pace
    pub const ALL: [Zone; 6] = [
        Zone::Base,
        Zone::Vt1,
        Zone::SubThreshold,
        Zone::Threshold,
        Zone::Vo2Max,
        Zone::SpeedRepetitions,
    ];

    /// The five zones reported as training zones, in display order.
    /// Speed repetitions are reported separately together with interval splits.
    pub const TRAINING: [Zone; 5] = [
        Zone::Base,
        Zone::Vt1,
        Zone::SubThreshold,
        Zone::Threshold,
        Zone::Vo2Max,
    ];

    /// Short zone name as used in the multiplier table
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Base => "Base",
            Zone::Vt1 => "VT1",
            Zone::SubThreshold => "Sub-Threshold",
            Zone::Threshold => "Threshold",
            Zone::Vo2Max => "VO2max",
            Zone::SpeedRepetitions => "Speed Repetitions",
        }
    }

    /// Human-readable label for result listings
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Base => "Base (Zone 2)",
            Zone::Vt1 => "Aerobic Threshold (VT1)",
            Zone::SubThreshold => "Sub-Threshold",
            Zone::Threshold => "Threshold (LT2)",
            Zone::Vo2Max => "Max. Aerobic Power (VO2max)",
            Zone::SpeedRepetitions => "Speed Repetitions",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Speed-domain multipliers for one band, indexed by [`Zone`]
///
/// Multipliers scale speed, so a zone pace is `threshold / multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultiplierSet {
    pub band: Band,
    /// Multipliers in [`Zone::ALL`] order
    pub values: [f64; 6],
}

impl MultiplierSet {
    /// Multiplier applied to the threshold for a zone
    pub fn get(&self, zone: Zone) -> f64 {
        self.values[zone as usize]
    }

    /// `(zone, multiplier)` pairs in [`Zone::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Zone, f64)> + '_ {
        Zone::ALL.into_iter().map(move |zone| (zone, self.get(zone)))
    }
}

/// Multiplier table, one row per band in [`Band::ALL`] order
///
/// | Zone              | <=2600 | 2600-3400 | >3400 |
/// |-------------------|--------|-----------|-------|
/// | Base              | 0.77   | 0.78      | 0.82  |
/// | VT1               | 0.84   | 0.87      | 0.90  |
/// | Sub-Threshold     | 0.93   | 0.94      | 0.95  |
/// | Threshold         | 1.00   | 1.00      | 1.00  |
/// | VO2max            | 1.06   | 1.08      | 1.10  |
/// | Speed Repetitions | 1.15   | 1.20      | 1.25  |
pub static ZONE_MULTIPLIERS: [MultiplierSet; 3] = [
    MultiplierSet {
        band: Band::Lower,
        values: [0.77, 0.84, 0.93, 1.0, 1.06, 1.15],
    },
    MultiplierSet {
        band: Band::Middle,
        values: [0.78, 0.87, 0.94, 1.0, 1.08, 1.20],
    },
    MultiplierSet {
        band: Band::Upper,
        values: [0.82, 0.90, 0.95, 1.0, 1.10, 1.25],
    },
];

/// Classify a test distance into its band
///
/// Cutoffs are inclusive on the upper edge, so exactly 2600m is in the lower
/// band and exactly 3400m in the middle band.
pub fn select_band(distance_meters: f64) -> Band {
    if distance_meters <= LOWER_BAND_MAX {
        Band::Lower
    } else if distance_meters <= MIDDLE_BAND_MAX {
        Band::Middle
    } else {
        Band::Upper
    }
}

/// Pace for every zone in minutes per kilometer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZonePaces {
    pub base: f64,
    pub vt1: f64,
    pub sub_threshold: f64,
    pub threshold: f64,
    pub vo2max: f64,
    pub speed_repetitions: f64,
}

impl ZonePaces {
    /// Pace of a single zone
    pub fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Base => self.base,
            Zone::Vt1 => self.vt1,
            Zone::SubThreshold => self.sub_threshold,
            Zone::Threshold => self.threshold,
            Zone::Vo2Max => self.vo2max,
            Zone::SpeedRepetitions => self.speed_repetitions,
        }
    }
}

/// Expand a threshold pace into all zone paces using the band's multipliers
pub fn expand_zones(threshold_pace: f64, band: Band) -> ZonePaces {
    let multipliers = band.multipliers();
    let pace = |zone: Zone| threshold_pace / multipliers.get(zone);

    ZonePaces {
        base: pace(Zone::Base),
        vt1: pace(Zone::Vt1),
        sub_threshold: pace(Zone::SubThreshold),
        threshold: pace(Zone::Threshold),
        vo2max: pace(Zone::Vo2Max),
        speed_repetitions: pace(Zone::SpeedRepetitions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(select_band(1000.0), Band::Lower);
        assert_eq!(select_band(2600.0), Band::Lower);
        assert_eq!(select_band(2600.5), Band::Middle);
        assert_eq!(select_band(2601.0), Band::Middle);
        assert_eq!(select_band(3400.0), Band::Middle);
        assert_eq!(select_band(3401.0), Band::Upper);
        assert_eq!(select_band(6000.0), Band::Upper);
    }

    #[test]
    fn test_band_ids() {
        assert_eq!(Band::Lower.id(), "≤2600");
        assert_eq!(Band::Middle.id(), "2600–3400");
        assert_eq!(Band::Upper.to_string(), ">3400");
    }

    #[test]
    fn test_selected_band_contains_distance() {
        for distance in [0.1, 1.0, 2600.0, 2600.0001, 3000.0, 3400.0, 3400.0001, 1e9] {
            assert!(select_band(distance).contains(distance), "distance {}", distance);
        }
    }

    #[test]
    fn test_multiplier_table_rows_match_bands() {
        for band in Band::ALL {
            assert_eq!(band.multipliers().band, band);
            assert_eq!(band.multipliers().get(Zone::Threshold), 1.0);
        }
    }

    #[test]
    fn test_multiplier_lookup() {
        assert_eq!(Band::Lower.multipliers().get(Zone::Base), 0.77);
        assert_eq!(Band::Middle.multipliers().get(Zone::Vt1), 0.87);
        assert_eq!(Band::Upper.multipliers().get(Zone::SpeedRepetitions), 1.25);
        assert_eq!(Band::Middle.multipliers().iter().count(), 6);
    }

    #[test]
    fn test_multipliers_increase_with_intensity() {
        for set in &ZONE_MULTIPLIERS {
            assert!(set.values.windows(2).all(|w| w[0] < w[1]), "band {}", set.band);
        }
    }

    #[test]
    fn test_expand_zones_divides_threshold() {
        let zones = expand_zones(5.0, Band::Middle);

        assert_eq!(zones.threshold, 5.0);
        assert_eq!(zones.base, 5.0 / 0.78);
        assert_eq!(zones.vo2max, 5.0 / 1.08);
        assert_eq!(zones.speed_repetitions, 5.0 / 1.20);
        assert_eq!(zones.get(Zone::SubThreshold), zones.sub_threshold);
    }

    proptest! {
        #[test]
        fn test_zone_paces_ordered(threshold in 3.0f64..30.0, band_index in 0usize..3) {
            let zones = expand_zones(threshold, Band::ALL[band_index]);

            prop_assert!(zones.speed_repetitions < zones.vo2max);
            prop_assert!(zones.vo2max <= zones.threshold);
            prop_assert!(zones.threshold <= zones.sub_threshold);
            prop_assert!(zones.sub_threshold <= zones.vt1);
            prop_assert!(zones.vt1 <= zones.base);
        }
    }
}
