//! Report lookups by reporting area

use super::mapper::ReportMapper;
use crate::app::models::{AreaLocation, ForecastKey, Report};
use crate::app::services::field_mapper::{FieldLayout, FieldRole};
use crate::app::services::lookup_table::LookupTable;
use crate::constants::report_layout;
use crate::{Error, Result};
use std::sync::Arc;

/// Tables shared between [`ReportService`] and its mapper
#[derive(Debug, Clone, Default)]
pub(crate) struct ReportTables {
    pub(crate) forecasts: Arc<LookupTable<ForecastKey, Report>>,
    pub(crate) observations: Arc<LookupTable<String, Report>>,
    pub(crate) locations: Arc<LookupTable<String, AreaLocation>>,
}

/// Answers forecast, observation and nearest-area lookups
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    tables: ReportTables,
}

impl ReportService {
    /// Create a service with empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper that writes into this service's tables
    pub fn mapper(&self) -> ReportMapper {
        ReportMapper::new(self.tables.clone())
    }

    /// Forecast for a reporting area, `offset_days` after the issue date
    ///
    /// # Arguments
    /// * `area` - Reporting area name as published by AirNow
    /// * `offset_days` - 0 for today, 1 for tomorrow and so on
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if no forecast exists for that day
    pub fn get_forecast_report(&self, area: &str, offset_days: i32) -> Result<Report> {
        let key = ForecastKey::new(area.trim(), offset_days);

        self.tables
            .forecasts
            .get(&key)
            .ok_or_else(|| Error::not_found("forecast report", key.area))
    }

    /// Latest observation for a reporting area
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if the area has no observation
    pub fn get_observation_report(&self, area: &str) -> Result<Report> {
        let area = area.trim();

        self.tables
            .observations
            .get(&area.to_string())
            .ok_or_else(|| Error::not_found("observation report", area))
    }

    /// Reporting area whose observation site is closest to a point
    ///
    /// Distance is planar in decimal degrees, which is adequate for picking
    /// between neighbouring areas.
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if no area has known coordinates
    pub fn find_nearest_area(&self, latitude: f64, longitude: f64) -> Result<String> {
        self.tables
            .locations
            .snapshot()
            .into_iter()
            .map(|(area, location)| (location.distance_to(latitude, longitude), area))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, area)| area)
            .ok_or_else(|| {
                Error::not_found("nearest area", format!("{}, {}", latitude, longitude))
            })
    }

    /// Number of forecasts known
    pub fn forecast_count(&self) -> usize {
        self.tables.forecasts.len()
    }

    /// Number of areas with an observation
    pub fn observation_count(&self) -> usize {
        self.tables.observations.len()
    }

    /// Column layout of the AirNow `reportingarea.dat` file
    pub fn default_layout() -> FieldLayout {
        FieldLayout::from_pairs([
            (FieldRole::ValidDate, report_layout::VALID_DATE),
            (FieldRole::ValidTime, report_layout::VALID_TIME),
            (FieldRole::TimeZone, report_layout::TIME_ZONE),
            (FieldRole::DayOffset, report_layout::DAY_OFFSET),
            (FieldRole::DataType, report_layout::DATA_TYPE),
            (FieldRole::Primary, report_layout::PRIMARY),
            (FieldRole::Area, report_layout::AREA),
            (FieldRole::Latitude, report_layout::LATITUDE),
            (FieldRole::Longitude, report_layout::LONGITUDE),
            (FieldRole::MainPollutant, report_layout::MAIN_POLLUTANT),
            (FieldRole::Aqi, report_layout::AQI),
            (FieldRole::AqiCategory, report_layout::AQI_CATEGORY),
            (FieldRole::ActionDay, report_layout::ACTION_DAY),
            (FieldRole::Discussion, report_layout::DISCUSSION),
        ])
    }
}
