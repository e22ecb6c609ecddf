//! ZIP code and city/state lookups
//!
//! Both directions are served from two tables written in lockstep by the
//! same mapper, so a ZIP code found by city is always resolvable back.

use crate::app::models::CityAndState;
use crate::app::services::field_mapper::{
    FieldFilter, FieldLayout, FieldRole, MappedRecord, RecordMapper,
};
use crate::app::services::lookup_table::LookupTable;
use crate::constants::{DATASET_GEO, ZIP_CODE_PATTERN, geo_layout};
use crate::{Error, Result};
use regex::Regex;
use std::sync::Arc;

const REQUIRED_ROLES: &[FieldRole] = &[FieldRole::ZipCode, FieldRole::City, FieldRole::State];

/// Answers ZIP code and state lookups
#[derive(Debug, Clone, Default)]
pub struct GeoService {
    zip_codes: Arc<LookupTable<CityAndState, String>>,
    city_and_states: Arc<LookupTable<String, CityAndState>>,
}

impl GeoService {
    /// Create a service with empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper that writes into this service's tables
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the ZIP code pattern does not compile
    pub fn mapper(&self) -> Result<GeoMapper> {
        let pattern = Regex::new(ZIP_CODE_PATTERN)
            .map_err(|e| Error::configuration(format!("Invalid ZIP code pattern: {}", e)))?;

        Ok(GeoMapper {
            zip_codes: Arc::clone(&self.zip_codes),
            city_and_states: Arc::clone(&self.city_and_states),
            filters: vec![FieldFilter::Matches {
                role: FieldRole::ZipCode,
                pattern,
            }],
        })
    }

    /// ZIP code of a city, matched case-insensitively
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if the city is unknown
    ///
    /// # Examples
    /// ```
    /// use aqi_lookup::app::services::geo::GeoService;
    ///
    /// let service = GeoService::new();
    /// let error = service.get_zip_code("aibonito", "pr").unwrap_err();
    /// assert_eq!(error.to_string(), "Unable to find ZIP code of Aibonito, PR");
    /// ```
    pub fn get_zip_code(&self, city: &str, state: &str) -> Result<String> {
        let key = CityAndState::new(city.trim(), state.trim());

        match self.zip_codes.get(&key) {
            Some(zip_code) if !zip_code.trim().is_empty() => Ok(zip_code),
            _ => Err(Error::not_found("ZIP code", key.to_string())),
        }
    }

    /// State code of a ZIP code
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if the ZIP code is unknown
    pub fn get_state(&self, zip_code: &str) -> Result<String> {
        self.lookup_city_and_state(zip_code, "state")
            .map(|city_and_state| city_and_state.state().to_string())
    }

    /// City and state of a ZIP code
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if the ZIP code is unknown
    pub fn get_city_and_state(&self, zip_code: &str) -> Result<CityAndState> {
        self.lookup_city_and_state(zip_code, "city")
    }

    /// Number of ZIP codes known
    pub fn len(&self) -> usize {
        self.city_and_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.city_and_states.is_empty()
    }

    /// Column layout of the ZIP code database CSV
    pub fn default_layout() -> FieldLayout {
        FieldLayout::from_pairs([
            (FieldRole::ZipCode, geo_layout::ZIP_CODE),
            (FieldRole::City, geo_layout::CITY),
            (FieldRole::State, geo_layout::STATE),
        ])
    }

    fn lookup_city_and_state(&self, zip_code: &str, what: &str) -> Result<CityAndState> {
        let zip_code = zip_code.trim();

        self.city_and_states
            .get(&zip_code.to_string())
            .filter(|city_and_state| !city_and_state.state().trim().is_empty())
            .ok_or_else(|| Error::not_found(what, zip_code))
    }
}

/// Writes quoted `zip, city, state` rows in both directions
#[derive(Debug)]
pub struct GeoMapper {
    zip_codes: Arc<LookupTable<CityAndState, String>>,
    city_and_states: Arc<LookupTable<String, CityAndState>>,
    filters: Vec<FieldFilter>,
}

impl RecordMapper for GeoMapper {
    fn dataset(&self) -> &str {
        DATASET_GEO
    }

    fn required_roles(&self) -> &[FieldRole] {
        REQUIRED_ROLES
    }

    fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    fn unquote_fields(&self) -> bool {
        true
    }

    fn map(&self, record: &MappedRecord<'_>) -> Result<()> {
        let zip_code = record.get(FieldRole::ZipCode)?.trim().to_string();
        let city_and_state =
            CityAndState::new(record.get(FieldRole::City)?, record.get(FieldRole::State)?);

        self.zip_codes.put(city_and_state.clone(), zip_code.clone());
        self.city_and_states.put(zip_code, city_and_state);
        Ok(())
    }
}
