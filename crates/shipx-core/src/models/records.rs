//! Records produced by an extraction run.

use serde::{Deserialize, Serialize};

/// One package line of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(rename = "Time")]
    pub time: String,

    #[serde(rename = "Pickup Date")]
    pub pickup_date: String,

    #[serde(rename = "Customer")]
    pub customer: String,

    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "Tracking Number")]
    pub tracking: String,

    #[serde(rename = "Weight")]
    pub weight: String,
}

impl PackageRecord {
    /// Column headers, in output order.
    pub const HEADERS: [&'static str; 6] = [
        "Time",
        "Pickup Date",
        "Customer",
        "Service",
        "Tracking Number",
        "Weight",
    ];

    /// Cell values, in header order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.pickup_date.clone(),
            self.customer.clone(),
            self.service.clone(),
            self.tracking.clone(),
            self.weight.clone(),
        ]
    }
}

/// One row of a tabular summary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Type")]
    pub description: String,

    #[serde(rename = "International")]
    pub international: u64,

    #[serde(rename = "Ground")]
    pub ground: u64,

    #[serde(rename = "Air")]
    pub air: u64,

    #[serde(rename = "Unknown service, not specified")]
    pub unspecified: u64,

    #[serde(rename = "Total Packages")]
    pub total_packages: u64,

    /// Weight with its unit, empty when the row has none.
    #[serde(rename = "Weight")]
    pub weight: String,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 7] = [
        "Type",
        "International",
        "Ground",
        "Air",
        "Unknown service, not specified",
        "Total Packages",
        "Weight",
    ];

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.description.clone(),
            self.international.to_string(),
            self.ground.to_string(),
            self.air.to_string(),
            self.unspecified.to_string(),
            self.total_packages.to_string(),
            self.weight.clone(),
        ]
    }
}

/// Rows of a named table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRows {
    Packages(Vec<PackageRecord>),
    Summary(Vec<SummaryRow>),
}

/// A named output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub rows: TableRows,
}

impl Table {
    pub fn len(&self) -> usize {
        match &self.rows {
            TableRows::Packages(rows) => rows.len(),
            TableRows::Summary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column headers of this table.
    pub fn headers(&self) -> Vec<&'static str> {
        match &self.rows {
            TableRows::Packages(_) => PackageRecord::HEADERS.to_vec(),
            TableRows::Summary(_) => SummaryRow::HEADERS.to_vec(),
        }
    }

    /// All rows as string cells, in header order.
    pub fn cells(&self) -> Vec<Vec<String>> {
        match &self.rows {
            TableRows::Packages(rows) => rows.iter().map(PackageRecord::cells).collect(),
            TableRows::Summary(rows) => rows.iter().map(SummaryRow::cells).collect(),
        }
    }
}

/// Every table of one run, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    pub tables: Vec<Table>,
}

impl TableSet {
    /// Look up a table by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Total number of package records across all package tables.
    pub fn package_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| matches!(t.rows, TableRows::Packages(_)))
            .map(Table::len)
            .sum()
    }

    /// Tables that have at least one row.
    pub fn non_empty(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| !t.is_empty())
    }
}
