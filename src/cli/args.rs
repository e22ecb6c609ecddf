//! Command-line argument definitions for the AQI lookup tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::Config;
use crate::constants::{DATASET_AREA, DATASET_GEO, DATASET_REPORT};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the AQI lookup tool
///
/// Keeps AirNow reporting-area, ZIP code and geo tables fresh in memory and
/// answers lookups against them.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "aqi-lookup",
    version,
    about = "Keep AirNow air quality tables fresh and answer lookups against them",
    long_about = "Periodically downloads the AirNow reporting-area file, a ZIP code to \
                  reporting area table and a ZIP code database, skipping downloads whose \
                  ETag has not changed, and answers area, ZIP code, forecast and \
                  observation lookups from memory."
)]
pub struct Args {
    /// Path to the JSON configuration file
    ///
    /// Defaults to `<config dir>/aqi-lookup/config.json`.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        global = true,
        help = "Path to the JSON configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load every dataset, then keep refreshing until interrupted
    Watch(WatchArgs),
    /// Load the dataset a query needs and answer it
    Lookup(LookupArgs),
}

/// Arguments for the watch command
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// Exit after the initial refresh instead of scheduling more
    #[arg(long = "once", help = "Exit after the initial refresh")]
    pub once: bool,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    #[command(subcommand)]
    pub query: Query,

    /// Print the answer as JSON
    #[arg(long = "json", help = "Print the answer as JSON")]
    pub json: bool,
}

/// A single lookup
#[derive(Debug, Clone, Subcommand)]
pub enum Query {
    /// Reporting area of a ZIP code
    Area { zip_code: String },
    /// ZIP code of a city
    Zip { city: String, state: String },
    /// State of a ZIP code
    State { zip_code: String },
    /// City and state of a ZIP code
    City { zip_code: String },
    /// Forecast for a reporting area
    Forecast {
        area: String,
        /// Days after the issue date (0 = today)
        #[arg(short = 'd', long = "offset-days", default_value_t = 0)]
        offset_days: i32,
    },
    /// Latest observation for a reporting area
    Observation { area: String },
    /// Reporting area closest to a point
    Nearest {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

impl Query {
    /// Dataset that must be loaded to answer the query
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::Area { .. } => DATASET_AREA,
            Self::Zip { .. } | Self::State { .. } | Self::City { .. } => DATASET_GEO,
            Self::Forecast { .. } | Self::Observation { .. } | Self::Nearest { .. } => {
                DATASET_REPORT
            }
        }
    }
}

impl Args {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether to show spinners and summaries
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Configuration file to load
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if no path was given and the default
    ///   location cannot be determined or does not exist
    pub fn config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }

        let path = Config::default_config_path()?;
        if !path.exists() {
            return Err(Error::configuration(format!(
                "No configuration file given and {} does not exist",
                path.display()
            )));
        }

        Ok(path)
    }
}
