//! Bulk import of students from CSV sources.
//!
//! [`ImportPipeline::import`] reads every source on its own task and merges
//! the parsed batches into the record store through a single consumer.
//! [`source`] holds the CSV reader: headerless `id,name,program` rows, the
//! whole source rejected on the first malformed row.

pub mod pipeline;
pub mod source;

pub use pipeline::{ImportPipeline, ImportReport, SourceFailure};
pub use source::{parse_students_csv, read_students_csv};
