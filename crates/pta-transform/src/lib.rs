//! Price series transformation.
//!
//! This crate turns a raw table into an analysable series:
//!
//! - **resolve**: ordered keyword rules picking the date and value columns
//! - **normalization**: per-cell date inference and numeric parsing
//! - **normalize**: column parsing and the stable date sort
//! - **sma**: simple moving averages
//! - **overlay**: per-window overlay cache

pub mod normalization;
pub mod normalize;
pub mod overlay;
pub mod resolve;
pub mod sma;

pub use normalization::{format_iso8601_date, format_thousands, parse_timestamp, parse_value};
pub use normalize::{normalize, parse_date_column, parse_value_column};
pub use overlay::OverlaySet;
pub use resolve::{COLUMN_RULES, ColumnRule, resolve_columns, resolve_required};
pub use sma::{compute_sma, simple_moving_average};
