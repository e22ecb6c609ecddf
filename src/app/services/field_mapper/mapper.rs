//! The per-dataset mapping seam used by the refresh controller

use super::filters::FieldFilter;
use super::layout::{FieldRole, MappedRecord};
use crate::Result;

/// Turns accepted records of one dataset into lookup table writes
///
/// The refresh controller is generic over this trait, so a dataset only
/// declares its roles, filters and the table writes for one record.
pub trait RecordMapper: Send + Sync {
    /// Dataset name used in log messages
    fn dataset(&self) -> &str;

    /// Roles that must have a field index in the configured layout
    fn required_roles(&self) -> &[FieldRole];

    /// Filters a record must pass before [`RecordMapper::map`] is called
    fn filters(&self) -> &[FieldFilter];

    /// Whether fields are wrapped in double quotes that must be stripped
    fn unquote_fields(&self) -> bool {
        false
    }

    /// Write one accepted record into the lookup tables
    ///
    /// # Errors
    /// * Returns `Error::RecordParse` for malformed fields; the caller skips the record
    fn map(&self, record: &MappedRecord<'_>) -> Result<()>;
}
