use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InputError;
use crate::logging::{LogConfig, LogFormat, LogLevel};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Distance checks applied before calculating
    pub input: InputPolicy,

    /// Result rendering preferences
    pub display: DisplaySettings,

    /// Logging setup
    pub logging: LogConfig,
}

/// Plausible-range policy for test distances
///
/// The pace model accepts any positive distance; this is the stricter gate a
/// front end applies so typos such as `320` or `32000` are caught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPolicy {
    /// Smallest accepted distance in meters (inclusive)
    pub min_distance_m: f64,

    /// Largest accepted distance in meters (inclusive)
    pub max_distance_m: f64,

    /// Reject distances outside the range
    pub enforce_range: bool,
}

impl Default for InputPolicy {
    fn default() -> Self {
        InputPolicy {
            min_distance_m: 1000.0,
            max_distance_m: 6000.0,
            enforce_range: true,
        }
    }
}

impl InputPolicy {
    /// Check a distance against the plausible range
    pub fn check(&self, distance_meters: f64) -> std::result::Result<f64, InputError> {
        if !self.enforce_range {
            return Ok(distance_meters);
        }
        if distance_meters.is_nan()
            || distance_meters < self.min_distance_m
            || distance_meters > self.max_distance_m
        {
            return Err(InputError::OutOfRange {
                value: distance_meters,
                min: self.min_distance_m,
                max: self.max_distance_m,
            });
        }
        Ok(distance_meters)
    }
}

/// Output formats for calculation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned tables
    Table,
    /// JSON result record
    Json,
    /// Plain text without colors
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Default output format
    pub format: OutputFormat,

    /// Colorize terminal output
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

/// Keys accepted by [`AppConfig::get_value`] and [`AppConfig::set_value`]
pub const CONFIG_KEYS: [&str; 7] = [
    "input.min_distance_m",
    "input.max_distance_m",
    "input.enforce_range",
    "display.format",
    "display.color",
    "logging.level",
    "logging.format",
];

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cooperpace")
            .join("config.toml")
    }

    /// Load configuration, using defaults only when the file does not exist
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Set one value in the config file at `path`, creating it if absent
    ///
    /// The file is left untouched when it cannot be loaded or the new value is
    /// rejected.
    pub fn update_file<P: AsRef<Path>>(path: P, key: &str, value: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::load(path)?;
        config.set_value(key, value)?;
        config.save_to_file(path)?;
        Ok(config)
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> Result<()> {
        let policy = &self.input;
        if !(policy.min_distance_m.is_finite() && policy.max_distance_m.is_finite()) {
            return Err(anyhow!("input distance limits must be finite"));
        }
        if policy.min_distance_m <= 0.0 {
            return Err(anyhow!("input.min_distance_m must be positive"));
        }
        if policy.min_distance_m > policy.max_distance_m {
            return Err(anyhow!(
                "input.min_distance_m ({}) exceeds input.max_distance_m ({})",
                policy.min_distance_m,
                policy.max_distance_m
            ));
        }
        Ok(())
    }

    /// Read a setting by dotted key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "input.min_distance_m" => self.input.min_distance_m.to_string(),
            "input.max_distance_m" => self.input.max_distance_m.to_string(),
            "input.enforce_range" => self.input.enforce_range.to_string(),
            "display.format" => self.display.format.to_string(),
            "display.color" => self.display.color.to_string(),
            "logging.level" => self.logging.level.to_string(),
            "logging.format" => self.logging.format.to_string(),
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        };
        Ok(value)
    }

    /// Update a setting by dotted key, validating the result
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        let invalid = || format!("Invalid value for {}: {}", key, value);

        match key {
            "input.min_distance_m" => {
                updated.input.min_distance_m = value.parse::<f64>().with_context(invalid)?
            }
            "input.max_distance_m" => {
                updated.input.max_distance_m = value.parse::<f64>().with_context(invalid)?
            }
            "input.enforce_range" => {
                updated.input.enforce_range = value.parse::<bool>().with_context(invalid)?
            }
            "display.format" => {
                updated.display.format = value.parse::<OutputFormat>().map_err(|e| anyhow!(e))?
            }
            "display.color" => updated.display.color = value.parse::<bool>().with_context(invalid)?,
            "logging.level" => {
                updated.logging.level = value.parse::<LogLevel>().map_err(|e| anyhow!(e))?
            }
            "logging.format" => {
                updated.logging.format = value.parse::<LogFormat>().map_err(|e| anyhow!(e))?
            }
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// All settings as `(key, value)` pairs
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|&key| self.get_value(key).ok().map(|value| (key, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[input]\nmax_distance_m = 5000.0\n").unwrap();

        assert_eq!(config.input.max_distance_m, 5000.0);
        assert_eq!(config.input.min_distance_m, 1000.0);
        assert_eq!(config.display.format, OutputFormat::Table);
    }

    #[test]
    fn test_input_policy_bounds_inclusive() {
        let policy = InputPolicy::default();

        assert_eq!(policy.check(1000.0).unwrap(), 1000.0);
        assert_eq!(policy.check(6000.0).unwrap(), 6000.0);
        assert!(policy.check(999.9).is_err());
        assert!(policy.check(6000.1).is_err());
        assert!(policy.check(f64::NAN).is_err());
    }

    #[test]
    fn test_input_policy_disabled() {
        let policy = InputPolicy {
            enforce_range: false,
            ..InputPolicy::default()
        };
        assert_eq!(policy.check(200.0).unwrap(), 200.0);
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = AppConfig::default();

        config.set_value("display.format", "json").unwrap();
        config.set_value("input.max_distance_m", "7000").unwrap();
        config.set_value("logging.level", "debug").unwrap();

        assert_eq!(config.get_value("display.format").unwrap(), "json");
        assert_eq!(config.get_value("input.max_distance_m").unwrap(), "7000");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.entries().len(), CONFIG_KEYS.len());
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = AppConfig::default();

        assert!(config.set_value("input.min_distance_m", "lots").is_err());
        assert!(config.set_value("input.min_distance_m", "9000").is_err());
        assert!(config.set_value("display.theme", "dark").is_err());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = AppConfig::default();
        original.set_value("display.color", "false").unwrap();
        original.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig::load(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[input]\nmin_distance_m = 1500.0\nmax_distance_m = \"oops\"\n").unwrap();

        assert!(AppConfig::load(&config_path).is_err());
    }

    #[test]
    fn test_update_file_leaves_malformed_file_untouched() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let original = "[input]\nmin_distance_m = 1500.0\nmax_distance_m = \"oops\"\n";
        fs::write(&config_path, original).unwrap();

        let result = AppConfig::update_file(&config_path, "display.color", "false");

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), original);
    }

    #[test]
    fn test_update_file_keeps_existing_settings() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[input]\nmin_distance_m = 1500.0\n").unwrap();

        let updated = AppConfig::update_file(&config_path, "display.color", "false").unwrap();
        assert_eq!(updated.input.min_distance_m, 1500.0);

        let reloaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(reloaded.input.min_distance_m, 1500.0);
        assert!(!reloaded.display.color);
    }

    #[test]
    fn test_update_file_rejects_invalid_value() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        assert!(AppConfig::update_file(&config_path, "input.min_distance_m", "-3").is_err());
        assert!(!config_path.exists());
    }
}
