//! Collects parsed records into named tables.

use crate::models::records::{PackageRecord, SummaryRow, Table, TableRows, TableSet};

/// Accumulates tables in the order they are added.
#[derive(Debug, Default)]
pub struct RecordAggregator {
    tables: Vec<Table>,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append package records to the named table, creating it if needed.
    pub fn add_packages(&mut self, name: &str, records: Vec<PackageRecord>) {
        match self.table_mut(name) {
            Some(Table {
                rows: TableRows::Packages(rows),
                ..
            }) => rows.extend(records),
            _ => self.tables.push(Table {
                name: name.to_string(),
                rows: TableRows::Packages(records),
            }),
        }
    }

    /// Append summary rows to the named table, creating it if needed.
    pub fn add_summary(&mut self, name: &str, records: Vec<SummaryRow>) {
        match self.table_mut(name) {
            Some(Table {
                rows: TableRows::Summary(rows),
                ..
            }) => rows.extend(records),
            _ => self.tables.push(Table {
                name: name.to_string(),
                rows: TableRows::Summary(records),
            }),
        }
    }

    pub fn finish(self) -> TableSet {
        TableSet {
            tables: self.tables,
        }
    }

    fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }
}
