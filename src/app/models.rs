//! Data models for AQI lookups
//!
//! This module contains the keys and values stored in the lookup tables:
//! normalised city/state pairs, forecast keys and AirNow reports.

use crate::constants::AQI_NOT_REPORTED;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// City and State Key
// =============================================================================

/// A city and state pair, normalised for case-insensitive equality
///
/// The city is title-cased word by word and the state is upper-cased on
/// construction, so `("fOo", "cA")` and `("Foo", "CA")` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityAndState {
    city: String,
    state: String,
}

impl CityAndState {
    /// Create a normalised city and state pair
    pub fn new(city: &str, state: &str) -> Self {
        Self {
            city: capitalize_fully(city),
            state: state.to_uppercase(),
        }
    }

    /// Title-cased city name
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Upper-cased state code
    pub fn state(&self) -> &str {
        &self.state
    }
}

impl fmt::Display for CityAndState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}

/// Lower-case everything, then upper-case the first letter after whitespace
fn capitalize_fully(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut capitalize_next = true;

    for ch in value.chars() {
        if ch.is_whitespace() {
            result.push(ch);
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }

    result
}

// =============================================================================
// Forecast Key
// =============================================================================

/// Composite key of a forecast report: reporting area plus day offset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastKey {
    pub area: String,
    pub offset_days: i32,
}

impl ForecastKey {
    pub fn new(area: impl Into<String>, offset_days: i32) -> Self {
        Self {
            area: area.into(),
            offset_days,
        }
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day offset {})", self.area, self.offset_days)
    }
}

// =============================================================================
// Report
// =============================================================================

/// An AirNow forecast or observation for one reporting area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Air Quality Index, or -1 when the source did not report one
    pub aqi: i32,

    /// Category name published alongside the AQI (e.g. "Good")
    pub aqi_category: String,

    /// Pollutant driving the AQI (e.g. "OZONE", "PM2.5")
    pub main_pollutant: String,

    /// Instant the report is valid for
    pub valid_date: DateTime<Utc>,

    /// Time zone abbreviation the source used for the valid date
    pub time_zone_id: String,

    /// Whether an air quality action day was declared
    pub action_day: bool,

    /// Free-text forecaster discussion, often blank
    pub discussion: String,
}

impl Report {
    /// Whether the source published an AQI value for this report
    pub fn has_aqi(&self) -> bool {
        self.aqi != AQI_NOT_REPORTED
    }
}

// =============================================================================
// Area Location
// =============================================================================

/// Coordinates of a reporting area, taken from its observation rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl AreaLocation {
    /// Create a location, rejecting out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::record_parse(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                latitude
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::record_parse(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                longitude
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Planar distance in decimal degrees
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        let lat_diff = self.latitude - latitude;
        let lon_diff = self.longitude - longitude;
        (lat_diff * lat_diff + lon_diff * lon_diff).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_city_and_state_equality_ignores_case() {
        let city_and_state = CityAndState::new("foo", "ca");

        assert_eq!(city_and_state, city_and_state.clone());
        assert_eq!(city_and_state, CityAndState::new("fOo", "cA"));
        assert_ne!(city_and_state, CityAndState::new("bar baz", "wa"));
    }

    #[test]
    fn test_city_and_state_display() {
        assert_eq!(CityAndState::new("bar baz", "wa").to_string(), "Bar Baz, WA");
        assert_eq!(CityAndState::new("foo", "ca").to_string(), "Foo, CA");
        assert_eq!(
            CityAndState::new("SAN  JUAN", "pr").to_string(),
            "San  Juan, PR"
        );
    }

    #[test]
    fn test_city_and_state_as_map_key() {
        let mut zip_codes = HashMap::new();
        zip_codes.insert(CityAndState::new("Aibonito", "PR"), "00705");

        assert_eq!(
            zip_codes.get(&CityAndState::new("aibonito", "pr")),
            Some(&"00705")
        );
    }

    #[test]
    fn test_area_location_validation() {
        assert!(AreaLocation::new(35.0844, -106.6504).is_ok());
        assert!(AreaLocation::new(91.0, 0.0).is_err());
        assert!(AreaLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_area_location_distance() {
        let location = AreaLocation::new(3.0, 4.0).unwrap();
        assert!((location.distance_to(0.0, 0.0) - 5.0).abs() < 1e-9);
    }
}
