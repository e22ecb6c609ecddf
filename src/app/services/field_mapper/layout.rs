//! Field roles, index layouts and typed field access

use super::field_parsers::{parse_coordinate, parse_flag, parse_i32};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic role of a field within a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldRole {
    ZipCode,
    Area,
    City,
    State,
    ValidDate,
    ValidTime,
    TimeZone,
    DayOffset,
    DataType,
    Primary,
    MainPollutant,
    Aqi,
    AqiCategory,
    ActionDay,
    Discussion,
    Latitude,
    Longitude,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same spelling as the configuration keys
        let name = match self {
            Self::ZipCode => "zipCode",
            Self::Area => "area",
            Self::City => "city",
            Self::State => "state",
            Self::ValidDate => "validDate",
            Self::ValidTime => "validTime",
            Self::TimeZone => "timeZone",
            Self::DayOffset => "dayOffset",
            Self::DataType => "dataType",
            Self::Primary => "primary",
            Self::MainPollutant => "mainPollutant",
            Self::Aqi => "aqi",
            Self::AqiCategory => "aqiCategory",
            Self::ActionDay => "actionDay",
            Self::Discussion => "discussion",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        };
        f.write_str(name)
    }
}

/// Maps field roles to their index within a tokenized record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLayout {
    index_by_role: HashMap<FieldRole, usize>,
}

impl FieldLayout {
    /// Create a layout from a role to index map
    pub fn new(index_by_role: HashMap<FieldRole, usize>) -> Self {
        Self { index_by_role }
    }

    /// Create a layout from role/index pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (FieldRole, usize)>) -> Self {
        Self {
            index_by_role: pairs.into_iter().collect(),
        }
    }

    /// Index mapped to a role, if any
    pub fn index_of(&self, role: FieldRole) -> Option<usize> {
        self.index_by_role.get(&role).copied()
    }

    /// Whether a role has an index
    pub fn contains(&self, role: FieldRole) -> bool {
        self.index_by_role.contains_key(&role)
    }

    /// Fill in roles missing from this layout with those of `defaults`
    pub fn with_defaults(mut self, defaults: &FieldLayout) -> Self {
        for (role, index) in &defaults.index_by_role {
            self.index_by_role.entry(*role).or_insert(*index);
        }
        self
    }

    /// Check that every required role has an index
    ///
    /// # Errors
    /// * Returns `Error::Configuration` naming the first missing role
    pub fn require(&self, dataset: &str, roles: &[FieldRole]) -> Result<()> {
        match roles.iter().find(|role| !self.contains(**role)) {
            Some(role) => Err(Error::configuration(format!(
                "Dataset '{}' has no field index for required role '{}'",
                dataset, role
            ))),
            None => Ok(()),
        }
    }

    /// View tokenized fields through this layout
    pub fn record<'a>(&'a self, fields: &'a [String]) -> MappedRecord<'a> {
        MappedRecord {
            fields,
            layout: self,
        }
    }
}

/// Role-based, typed access to the fields of one record
#[derive(Debug, Clone, Copy)]
pub struct MappedRecord<'a> {
    fields: &'a [String],
    layout: &'a FieldLayout,
}

impl<'a> MappedRecord<'a> {
    /// Raw value of a field; blank values are returned as-is
    ///
    /// # Errors
    /// * Returns `Error::RecordParse` if the role is unmapped or the record is too short
    pub fn get(&self, role: FieldRole) -> Result<&'a str> {
        let index = self.layout.index_of(role).ok_or_else(|| {
            Error::record_parse(format!("No field index configured for role '{}'", role))
        })?;

        self.fields.get(index).map(String::as_str).ok_or_else(|| {
            Error::record_parse(format!(
                "Record has {} fields, role '{}' expects index {}",
                self.fields.len(),
                role,
                index
            ))
        })
    }

    /// Trimmed value of a field, or `None` if unmapped, absent or blank
    pub fn optional(&self, role: FieldRole) -> Option<&'a str> {
        self.layout
            .index_of(role)
            .and_then(|index| self.fields.get(index))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Strictly parse an integer field
    pub fn parse_i32(&self, role: FieldRole) -> Result<i32> {
        parse_i32(self.get(role)?, role)
    }

    /// Strictly parse a yes/no flag field
    pub fn parse_flag(&self, role: FieldRole) -> Result<bool> {
        parse_flag(self.get(role)?, role)
    }

    /// Parse an optional coordinate field; blank gives `None`
    pub fn parse_coordinate(&self, role: FieldRole) -> Result<Option<f64>> {
        self.optional(role)
            .map(|value| parse_coordinate(value, role))
            .transpose()
    }
}
