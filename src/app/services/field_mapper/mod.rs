//! Record tokenizing and declarative field mapping
//!
//! Every dataset is described by the same three pieces rather than by its
//! own parser:
//! - [`tokenizer`] - Splits a raw record into fields on a regex separator
//! - [`layout`] - Maps semantic roles to field indexes and reads typed values
//! - [`filters`] - Row predicates evaluated before a record is mapped
//! - [`field_parsers`] - Strict integer, flag, coordinate and timestamp parsing
//! - [`mapper`] - The [`RecordMapper`] trait implemented once per dataset
//!
//! ## Usage
//!
//! ```rust
//! use aqi_lookup::app::services::field_mapper::{FieldLayout, FieldRole, Tokenizer};
//!
//! # fn example() -> aqi_lookup::Result<()> {
//! let tokenizer = Tokenizer::new(",", true)?;
//! let layout = FieldLayout::from_pairs([(FieldRole::ZipCode, 0), (FieldRole::City, 2)]);
//!
//! let fields = tokenizer.split(r#""00705","STANDARD","Aibonito","PR""#);
//! let record = layout.record(&fields);
//!
//! assert_eq!(record.get(FieldRole::City)?, "Aibonito");
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod filters;
pub mod layout;
pub mod mapper;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use filters::FieldFilter;
pub use layout::{FieldLayout, FieldRole, MappedRecord};
pub use mapper::RecordMapper;
pub use tokenizer::Tokenizer;
