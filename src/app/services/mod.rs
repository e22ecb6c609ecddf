//! Core business logic services

pub mod area;
pub mod datasets;
pub mod field_mapper;
pub mod geo;
pub mod http_source;
pub mod lookup_table;
pub mod record_stream;
pub mod refresh;
pub mod report;
pub mod scheduler;
