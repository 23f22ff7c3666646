// Library interface for cooperpace: training paces from a 12-minute run test

pub mod calculator;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod pace;
pub mod threshold;
pub mod zones;

// Re-export commonly used types for convenience
pub use calculator::{
    calculate_paces, calculate_paces_from_str, calculate_response, evaluate, CalculationResponse,
    PaceCalculation, PaceReport,
};
pub use config::{AppConfig, InputPolicy, OutputFormat};
pub use error::{PaceCalcError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use pace::{duration_for_distance, format_pace, hyrox_pace, interval_splits, min_per_km_to_mm_ss};
pub use threshold::threshold_pace;
pub use zones::{expand_zones, select_band, Band, MultiplierSet, Zone, ZonePaces};
