//! Cell-level normalization.
//!
//! - **datetime**: per-cell date/time inference across mixed formats
//! - **numeric**: thousands-separator aware float parsing and formatting

pub mod datetime;
pub mod numeric;

pub use datetime::{format_iso8601_date, parse_timestamp};
pub use numeric::{format_thousands, parse_value};
