//! Error hierarchy for pace calculations
//!
//! Invalid input is the only recoverable condition. It always carries the
//! same user-facing message so callers can show it verbatim.

use thiserror::Error;

/// Message shown to users for any rejected distance
pub const INVALID_DISTANCE_MESSAGE: &str = "Please enter a valid distance in meters.";

/// Top-level error type for all cooperpace operations
#[derive(Debug, Error)]
pub enum PaceCalcError {
    /// Rejected test distance
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Internal invariant violations in the pace model
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),
}

/// Reasons a test distance is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("distance is not a number: {raw:?}")]
    NotANumber { raw: String },

    #[error("distance must be finite, got {value}")]
    NotFinite { value: f64 },

    #[error("distance must be positive, got {value}")]
    NotPositive { value: f64 },

    /// Outside the plausible range enforced by callers
    #[error("distance {value} outside plausible range {min}-{max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// Pace model invariant violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// No band covers the distance; the band table is defective
    #[error("no distance band covers {distance}m")]
    UnresolvedBand { distance: f64 },
}

/// Result type alias for cooperpace operations
pub type Result<T> = std::result::Result<T, PaceCalcError>;

impl PaceCalcError {
    /// Whether this is a rejected input rather than a defect
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PaceCalcError::InvalidInput(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PaceCalcError::InvalidInput(_) => ErrorSeverity::Warning,
            PaceCalcError::Calculation(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PaceCalcError::InvalidInput(_) => INVALID_DISTANCE_MESSAGE.to_string(),
            PaceCalcError::Calculation(_) => {
                "Pace calculation failed unexpectedly. Please report this distance.".to_string()
            }
        }
    }

    /// Emit a log event for a failed calculation at the level its severity calls for
    pub fn log_rejection(&self, input: impl std::fmt::Display) {
        match self.severity() {
            ErrorSeverity::Critical => {
                tracing::error!(input = %input, error = %self, "Pace model invariant violated")
            }
            ErrorSeverity::Warning => {
                tracing::warn!(input = %input, error = %self, "Distance rejected")
            }
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Invariant violation requiring a fix
    Critical,
    /// Rejected input, recovered at the boundary
    Warning,
}
