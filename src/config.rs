//! Configuration loading and validation.
//!
//! The configuration is a JSON document with one section per dataset plus an
//! optional HTTP client section:
//!
//! ```json
//! {
//!   "http": { "connectTimeoutMs": 10000 },
//!   "area": {
//!     "url": "https://example.org/zip_to_area.txt",
//!     "recordDelimiter": "\n",
//!     "fieldDelimiterPattern": "\\|",
//!     "refreshIntervalMs": 86400000
//!   },
//!   "geo": { "...": "..." },
//!   "report": { "...": "..." }
//! }
//! ```
//!
//! `fieldIndexByRole` may override some or all column indexes; roles it
//! leaves out fall back to the dataset's default layout.

use crate::app::services::field_mapper::FieldLayout;
use crate::app::services::refresh::DataSource;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DATASET_AREA, DATASET_GEO, DATASET_REPORT,
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings of one remote dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    /// Absolute http(s) URL of the flat file
    pub url: String,

    /// Literal record separator, e.g. `"\n"` or `"\r\n"`
    pub record_delimiter: String,

    /// Regular expression separating fields within a record
    pub field_delimiter_pattern: String,

    /// Column index overrides keyed by field role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_index_by_role: Option<FieldLayout>,

    /// Time between scheduled refreshes
    pub refresh_interval_ms: u64,
}

impl DataSourceConfig {
    /// Create a dataset section with the default layout
    pub fn new(
        url: impl Into<String>,
        record_delimiter: impl Into<String>,
        field_delimiter_pattern: impl Into<String>,
        refresh_interval_ms: u64,
    ) -> Self {
        Self {
            url: url.into(),
            record_delimiter: record_delimiter.into(),
            field_delimiter_pattern: field_delimiter_pattern.into(),
            field_index_by_role: None,
            refresh_interval_ms,
        }
    }

    /// Override column indexes
    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.field_index_by_role = Some(layout);
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Configured layout with `defaults` filling in missing roles
    pub fn layout(&self, defaults: &FieldLayout) -> FieldLayout {
        match &self.field_index_by_role {
            Some(layout) => layout.clone().with_defaults(defaults),
            None => defaults.clone(),
        }
    }

    /// Source description for the refresh controller
    pub fn data_source(&self, defaults: &FieldLayout) -> DataSource {
        DataSource::new(
            self.url.as_str(),
            self.record_delimiter.as_str(),
            self.field_delimiter_pattern.as_str(),
            self.layout(defaults),
        )
    }

    /// Check a dataset section
    ///
    /// # Errors
    /// * Returns `Error::Configuration` naming the dataset and the bad setting
    pub fn validate(&self, dataset: &str) -> Result<()> {
        let url = reqwest::Url::parse(&self.url).map_err(|e| {
            Error::configuration(format!(
                "Dataset '{}' has an invalid url '{}': {}",
                dataset, self.url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "Dataset '{}' url must use http or https, got '{}'",
                dataset,
                url.scheme()
            )));
        }

        if self.record_delimiter.is_empty() {
            return Err(Error::configuration(format!(
                "Dataset '{}' has an empty recordDelimiter",
                dataset
            )));
        }

        if self.field_delimiter_pattern.is_empty() {
            return Err(Error::configuration(format!(
                "Dataset '{}' has an empty fieldDelimiterPattern",
                dataset
            )));
        }

        Regex::new(&self.field_delimiter_pattern).map_err(|e| {
            Error::configuration(format!(
                "Dataset '{}' has an invalid fieldDelimiterPattern '{}': {}",
                dataset, self.field_delimiter_pattern, e
            ))
        })?;

        if self.refresh_interval_ms == 0 {
            return Err(Error::configuration(format!(
                "Dataset '{}' refreshIntervalMs must be positive",
                dataset
            )));
        }

        Ok(())
    }
}

/// HTTP client settings shared by all datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    /// ZIP code to reporting area file
    pub area: DataSourceConfig,

    /// ZIP code database
    pub geo: DataSourceConfig,

    /// AirNow reporting-area file
    pub report: DataSourceConfig,
}

impl Config {
    /// Read and validate a configuration file
    ///
    /// # Errors
    /// * `Error::Io` if the file cannot be read
    /// * `Error::Configuration` if it is not valid JSON, lacks a required key
    ///   or fails validation
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config = Self::from_json(&content)?;
        debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Parse and validate a configuration document
    ///
    /// # Errors
    /// * `Error::Configuration` if the document is malformed or invalid
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/aqi-lookup/config.json` for the current user
    ///
    /// # Errors
    /// * `Error::Configuration` if the platform has no config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Unable to determine the user config directory"))
    }

    /// Check every dataset section and the HTTP settings
    pub fn validate(&self) -> Result<()> {
        for (dataset, source) in self.datasets() {
            source.validate(dataset)?;
        }

        if self.http.connect_timeout_ms == 0 || self.http.request_timeout_ms == 0 {
            return Err(Error::configuration("HTTP timeouts must be positive"));
        }

        Ok(())
    }

    /// Dataset sections with their names
    pub fn datasets(&self) -> [(&'static str, &DataSourceConfig); 3] {
        [
            (DATASET_AREA, &self.area),
            (DATASET_GEO, &self.geo),
            (DATASET_REPORT, &self.report),
        ]
    }
}
