//! Application constants for the AQI lookup service
//!
//! This module contains configuration defaults, dataset names, AirNow field
//! codes and the default field layouts used throughout the crate.

// =============================================================================
// Dataset Names
// =============================================================================

/// ZIP code to reporting area table
pub const DATASET_AREA: &str = "area";

/// ZIP code to city/state table
pub const DATASET_GEO: &str = "geo";

/// AirNow reporting-area forecast and observation table
pub const DATASET_REPORT: &str = "report";

/// All datasets, in the order they are refreshed at startup
pub const DATASET_NAMES: &[&str] = &[DATASET_AREA, DATASET_GEO, DATASET_REPORT];

// =============================================================================
// Refresh Protocol
// =============================================================================

/// Header carrying the freshness token of a remote dataset
pub const FRESHNESS_TOKEN_HEADER: &str = "etag";

/// Maximum number of per-record error messages kept in refresh statistics
pub const MAX_RECORDED_ERRORS: usize = 20;

// =============================================================================
// AirNow Reporting Area Records
// =============================================================================

/// Data type codes found in the reporting-area file
pub mod data_type {
    /// Forecast row, keyed by area and day offset
    pub const FORECAST: &str = "F";

    /// Observation row, keyed by area
    pub const OBSERVATION: &str = "O";

    /// Rows of these types are kept, everything else is dropped
    pub const ACCEPTED: &[&str] = &[FORECAST, OBSERVATION];
}

/// AQI value stored when the source leaves the field blank
pub const AQI_NOT_REPORTED: i32 = -1;

/// Valid time used when a row leaves the time field blank
pub const DEFAULT_VALID_TIME: &str = "00:00";

/// Layout of an assembled valid date, minus the trailing time zone
pub const VALID_DATE_FORMAT: &str = "%m/%d/%y %H:%M";

/// Five-digit US ZIP code
pub const ZIP_CODE_PATTERN: &str = r"^\d{5}$";

// =============================================================================
// Default Field Layouts
// =============================================================================

/// Default column indexes of the AirNow `reportingarea.dat` file
pub mod report_layout {
    pub const VALID_DATE: usize = 1;
    pub const VALID_TIME: usize = 2;
    pub const TIME_ZONE: usize = 3;
    pub const DAY_OFFSET: usize = 4;
    pub const DATA_TYPE: usize = 5;
    pub const PRIMARY: usize = 6;
    pub const AREA: usize = 7;
    pub const LATITUDE: usize = 9;
    pub const LONGITUDE: usize = 10;
    pub const MAIN_POLLUTANT: usize = 11;
    pub const AQI: usize = 12;
    pub const AQI_CATEGORY: usize = 13;
    pub const ACTION_DAY: usize = 14;
    pub const DISCUSSION: usize = 15;
}

/// Default column indexes of the ZIP code database CSV
pub mod geo_layout {
    pub const ZIP_CODE: usize = 0;
    pub const CITY: usize = 2;
    pub const STATE: usize = 3;
}

/// Default column indexes of the ZIP code to reporting area file
pub mod area_layout {
    pub const ZIP_CODE: usize = 0;
    pub const AREA: usize = 1;
}

// =============================================================================
// HTTP Client Defaults
// =============================================================================

/// Connect timeout applied when the configuration does not set one
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Whole-request timeout applied when the configuration does not set one
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 300_000;

/// User agent sent with every probe and fetch
pub const DEFAULT_USER_AGENT: &str = concat!("aqi-lookup/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// CLI Defaults
// =============================================================================

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "aqi-lookup";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
