use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use cooperpace::calculator::{self, CalculationResponse};
use cooperpace::config::{AppConfig, OutputFormat};
use cooperpace::display;
use cooperpace::error::PaceCalcError;
use cooperpace::logging::{self, LogLevel};
use cooperpace::pace;

/// cooperpace - Training paces from a 12-minute run test
///
/// Estimates threshold pace from the distance covered in 12 minutes and
/// derives training zones, HYROX race pace and speed-repetition splits.
#[derive(Parser)]
#[command(name = "cooperpace")]
#[command(version)]
#[command(about = "Training paces from a 12-minute run test", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate paces for a 12-minute test distance
    Calculate {
        /// Maximum distance covered in 12 minutes (meters)
        #[arg(allow_hyphen_values = true)]
        distance: String,

        /// Output format (defaults to the configured one)
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,

        /// Skip the plausible distance range check
        #[arg(long)]
        no_range_check: bool,
    },

    /// Format a pace given in decimal minutes per kilometer as mm:ss
    Format {
        /// Pace in minutes per kilometer, e.g. 4.25
        min_per_km: f64,
    },

    /// Show the distance band multiplier table
    Bands,

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    // Logging is configured from this file, so failures go straight to stderr
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    if let Err(err) = logging::init_logging(&log_config) {
        eprintln!("{}", format!("Failed to initialize logging: {:#}", err).yellow());
    }

    match run(cli.command, config, config_path) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: AppConfig, config_path: PathBuf) -> Result<ExitCode> {
    match command {
        Commands::Calculate {
            distance,
            format,
            no_range_check,
        } => {
            let format = format.unwrap_or(config.display.format);
            let color = config.display.color && format == OutputFormat::Table;
            if !color {
                colored::control::set_override(false);
            }

            let result = calculator::parse_distance(&distance)
                .map_err(PaceCalcError::from)
                .and_then(|d| {
                    if no_range_check {
                        Ok(d)
                    } else {
                        config.input.check(d).map_err(PaceCalcError::from)
                    }
                })
                .and_then(calculator::calculate_paces);

            match result {
                Ok(report) => {
                    println!("{}", display::render_report(&report, format, color)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) if err.is_invalid_input() => {
                    err.log_rejection(&distance);
                    if format == OutputFormat::Json {
                        let response = CalculationResponse::Error {
                            error: err.user_message(),
                        };
                        println!("{}", display::render_json(&response)?);
                    } else {
                        eprintln!("{}", err.user_message().red());
                    }
                    Ok(ExitCode::from(2))
                }
                Err(err) => Err(err.into()),
            }
        }

        Commands::Format { min_per_km } => {
            if !min_per_km.is_finite() || min_per_km < 0.0 {
                return Err(anyhow!("pace must be a finite, non-negative number"));
            }
            println!("{}", pace::min_per_km_to_mm_ss(min_per_km));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Bands => {
            println!("{}", display::render_bands());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { list, set, get } => {
            if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected KEY=VALUE, got {}", key_value))?;
                AppConfig::update_file(&config_path, key.trim(), value.trim())?;
                println!("{} {} = {}", "✓".green(), key.trim(), value.trim());
            } else if let Some(key) = get {
                println!("{}", config.get_value(&key)?);
            } else if list {
                println!("{}", format!("Configuration ({})", config_path.display()).bold());
                for (key, value) in config.entries() {
                    println!("  {:<24} {}", key, value);
                }
            } else {
                println!("Use --list, --get KEY or --set KEY=VALUE");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
