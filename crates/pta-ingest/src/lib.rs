//! CSV ingestion for price trend analysis.
//!
//! Loads a single comma-separated file (or an in-memory upload) into a
//! [`RawTable`](pta_model::RawTable) with trimmed, distinct header names.

mod csv_table;
mod error;

pub use csv_table::{UPLOAD_ORIGIN, read_csv_bytes, read_csv_from_reader, read_csv_table};
pub use error::{IngestError, Result};
