//! ZIP code to AirNow reporting area lookups

use crate::app::services::field_mapper::{
    FieldFilter, FieldLayout, FieldRole, MappedRecord, RecordMapper,
};
use crate::app::services::lookup_table::LookupTable;
use crate::constants::{DATASET_AREA, area_layout};
use crate::{Error, Result};
use std::sync::Arc;

const REQUIRED_ROLES: &[FieldRole] = &[FieldRole::ZipCode, FieldRole::Area];

/// Answers reporting area lookups by ZIP code
#[derive(Debug, Clone, Default)]
pub struct AreaService {
    areas: Arc<LookupTable<String, String>>,
}

impl AreaService {
    /// Create a service with an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper that writes into this service's table
    pub fn mapper(&self) -> AreaMapper {
        AreaMapper {
            areas: Arc::clone(&self.areas),
            filters: vec![FieldFilter::LeadingAsciiDigit {
                role: FieldRole::ZipCode,
            }],
        }
    }

    /// Reporting area of a ZIP code
    ///
    /// # Errors
    /// * Returns `Error::NotFound` if the ZIP code is unknown or has a blank area
    pub fn get_area(&self, zip_code: &str) -> Result<String> {
        let zip_code = zip_code.trim();

        self.areas
            .get(&zip_code.to_string())
            .filter(|area| !area.trim().is_empty())
            .ok_or_else(|| Error::not_found("area", zip_code))
    }

    /// Number of ZIP codes known
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Column layout of the ZIP code to reporting area file
    pub fn default_layout() -> FieldLayout {
        FieldLayout::from_pairs([
            (FieldRole::ZipCode, area_layout::ZIP_CODE),
            (FieldRole::Area, area_layout::AREA),
        ])
    }
}

/// Writes `zip code -> area` rows, skipping header and comment lines
#[derive(Debug)]
pub struct AreaMapper {
    areas: Arc<LookupTable<String, String>>,
    filters: Vec<FieldFilter>,
}

impl RecordMapper for AreaMapper {
    fn dataset(&self) -> &str {
        DATASET_AREA
    }

    fn required_roles(&self) -> &[FieldRole] {
        REQUIRED_ROLES
    }

    fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    fn map(&self, record: &MappedRecord<'_>) -> Result<()> {
        let zip_code = record.get(FieldRole::ZipCode)?;
        let area = record.get(FieldRole::Area)?;

        self.areas
            .put(zip_code.trim().to_string(), area.trim().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::field_mapper::Tokenizer;

    fn load(service: &AreaService, lines: &[&str]) {
        let mapper = service.mapper();
        let layout = AreaService::default_layout();
        let tokenizer = Tokenizer::new(r"\|", false).unwrap();

        for line in lines {
            let fields = tokenizer.split(line);
            let record = layout.record(&fields);
            if mapper.filters().iter().all(|f| f.accepts(&record).unwrap()) {
                mapper.map(&record).unwrap();
            }
        }
    }

    #[test]
    fn test_get_area() {
        let service = AreaService::new();
        load(&service, &["70801|Baton Rouge Area", "87101|Albuquerque"]);

        assert_eq!(service.get_area("70801").unwrap(), "Baton Rouge Area");
        assert_eq!(service.get_area(" 87101 ").unwrap(), "Albuquerque");
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_header_rows_are_ignored() {
        let service = AreaService::new();
        load(&service, &["Zipcode|ReportingArea", "70801|Baton Rouge Area"]);

        assert_eq!(service.len(), 1);
        assert!(service.get_area("Zipcode").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_zip_code_is_not_found() {
        let service = AreaService::new();

        let error = service.get_area("99999").unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Unable to find area of 99999");
    }

    #[test]
    fn test_area_is_trimmed() {
        let service = AreaService::new();
        load(&service, &["70801|Baton Rouge Area\r", "87101| Albuquerque "]);

        assert_eq!(service.get_area("70801").unwrap(), "Baton Rouge Area");
        assert_eq!(service.get_area("87101").unwrap(), "Albuquerque");
    }

    #[test]
    fn test_blank_area_is_not_found() {
        let service = AreaService::new();
        load(&service, &["70801| "]);

        assert!(service.get_area("70801").unwrap_err().is_not_found());
    }

    #[test]
    fn test_clones_share_the_table() {
        let service = AreaService::new();
        let reader = service.clone();
        load(&service, &["70801|Baton Rouge Area"]);

        assert_eq!(reader.get_area("70801").unwrap(), "Baton Rouge Area");
    }
}
