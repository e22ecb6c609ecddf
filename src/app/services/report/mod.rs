//! AirNow forecast and observation reports
//!
//! The AirNow reporting-area file mixes several row types. Only primary
//! forecast (`F`) and observation (`O`) rows are kept:
//!
//! - forecasts are keyed by reporting area and day offset
//! - observations are keyed by reporting area
//! - observation coordinates feed the nearest-area search
//!
//! ## Usage
//!
//! ```rust
//! use aqi_lookup::app::services::report::ReportService;
//!
//! let service = ReportService::new();
//! let error = service.get_observation_report("Albuquerque").unwrap_err();
//! assert!(error.is_not_found());
//! ```

pub mod mapper;
pub mod service;

#[cfg(test)]
pub mod tests;

pub use mapper::ReportMapper;
pub use service::ReportService;
