//! Mapping of reporting-area rows into report tables

use super::service::ReportTables;
use crate::app::models::{AreaLocation, ForecastKey, Report};
use crate::app::services::field_mapper::field_parsers::parse_valid_date;
use crate::app::services::field_mapper::{
    FieldFilter, FieldRole, MappedRecord, RecordMapper,
};
use crate::constants::{AQI_NOT_REPORTED, DATASET_REPORT, data_type};
use crate::Result;

const REQUIRED_ROLES: &[FieldRole] = &[
    FieldRole::ValidDate,
    FieldRole::ValidTime,
    FieldRole::TimeZone,
    FieldRole::DayOffset,
    FieldRole::DataType,
    FieldRole::Primary,
    FieldRole::Area,
    FieldRole::MainPollutant,
    FieldRole::Aqi,
    FieldRole::AqiCategory,
    FieldRole::ActionDay,
    FieldRole::Discussion,
];

/// Writes primary forecast and observation rows
#[derive(Debug)]
pub struct ReportMapper {
    tables: ReportTables,
    filters: Vec<FieldFilter>,
}

impl ReportMapper {
    pub(crate) fn new(tables: ReportTables) -> Self {
        Self {
            tables,
            filters: vec![
                FieldFilter::one_of(FieldRole::DataType, data_type::ACCEPTED),
                FieldFilter::Flag {
                    role: FieldRole::Primary,
                },
            ],
        }
    }

    /// Build the report carried by a row
    ///
    /// A blank AQI is stored as [`AQI_NOT_REPORTED`].
    fn report(record: &MappedRecord<'_>) -> Result<Report> {
        let time_zone_id = record.get(FieldRole::TimeZone)?.trim();

        let valid_date = parse_valid_date(
            record.get(FieldRole::ValidDate)?.trim(),
            record.optional(FieldRole::ValidTime),
            time_zone_id,
        )?;

        let aqi = match record.optional(FieldRole::Aqi) {
            Some(_) => record.parse_i32(FieldRole::Aqi)?,
            None => AQI_NOT_REPORTED,
        };

        Ok(Report {
            aqi,
            aqi_category: record.get(FieldRole::AqiCategory)?.trim().to_string(),
            main_pollutant: record.get(FieldRole::MainPollutant)?.trim().to_string(),
            valid_date,
            time_zone_id: time_zone_id.to_string(),
            action_day: record.parse_flag(FieldRole::ActionDay)?,
            discussion: record.get(FieldRole::Discussion)?.trim().to_string(),
        })
    }

    /// Coordinates of a row, when both are mapped and present
    fn location(record: &MappedRecord<'_>) -> Result<Option<AreaLocation>> {
        let latitude = record.parse_coordinate(FieldRole::Latitude)?;
        let longitude = record.parse_coordinate(FieldRole::Longitude)?;

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => AreaLocation::new(latitude, longitude).map(Some),
            _ => Ok(None),
        }
    }
}

impl RecordMapper for ReportMapper {
    fn dataset(&self) -> &str {
        DATASET_REPORT
    }

    fn required_roles(&self) -> &[FieldRole] {
        REQUIRED_ROLES
    }

    fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    fn map(&self, record: &MappedRecord<'_>) -> Result<()> {
        let area = record.get(FieldRole::Area)?.trim().to_string();
        let report = Self::report(record)?;
        let forecast = record
            .get(FieldRole::DataType)?
            .trim()
            .eq_ignore_ascii_case(data_type::FORECAST);

        // Parse everything before writing so a bad row leaves no trace
        if forecast {
            let offset_days = record.parse_i32(FieldRole::DayOffset)?;
            self.tables
                .forecasts
                .put(ForecastKey::new(area, offset_days), report);
        } else {
            let location = Self::location(record)?;
            if let Some(location) = location {
                self.tables.locations.put(area.clone(), location);
            }
            self.tables.observations.put(area, report);
        }

        Ok(())
    }
}
