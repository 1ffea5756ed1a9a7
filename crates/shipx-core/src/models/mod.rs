//! Data models: configuration and extracted records.

pub mod config;
pub mod records;

pub use config::ShipxConfig;
pub use records::{PackageRecord, SummaryRow, Table, TableRows, TableSet};
