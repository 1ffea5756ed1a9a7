//! Table writers for the supported output formats.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

use shipx_core::{ReportInfo, Result, ShipxError, Table, TableSet, TableWriter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document keyed by table name
    Json,
    /// A directory with one CSV file per table
    Csv,
}

impl OutputFormat {
    /// Parse the format name stored in the configuration.
    pub fn from_config(name: &str) -> anyhow::Result<Self> {
        <Self as clap::ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format in configuration: {}", name))
    }

    pub fn writer(self) -> Box<dyn TableWriter> {
        match self {
            OutputFormat::Json => Box::new(JsonWriter),
            OutputFormat::Csv => Box::new(CsvWriter),
        }
    }
}

/// Writes all non-empty tables into one JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<&'a str>,
    tables: TablesByName<'a>,
}

/// Non-empty tables as a map from name to rows, in table order.
struct TablesByName<'a>(&'a TableSet);

impl Serialize for TablesByName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let tables: Vec<&Table> = self.0.non_empty().collect();
        let mut map = serializer.serialize_map(Some(tables.len()))?;
        for table in tables {
            map.serialize_entry(&table.name, &table.rows)?;
        }
        map.end()
    }
}

impl TableWriter for JsonWriter {
    fn extension(&self) -> &str {
        "json"
    }

    fn write(&self, tables: &TableSet, report: &ReportInfo, path: &Path) -> Result<()> {
        let document = JsonReport {
            title: &report.title,
            date_range: report.date_range.as_deref(),
            tables: TablesByName(tables),
        };

        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, &document)
            .map_err(|e| ShipxError::Output(format!("{}: {}", path.display(), e)))?;
        out.write_all(b"\n")?;
        out.flush()?;

        debug!("Wrote {} tables to {}", tables.non_empty().count(), path.display());
        Ok(())
    }
}

/// Writes each non-empty table to `<dir>/<table name>.csv`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn extension(&self) -> &str {
        ""
    }

    fn write(&self, tables: &TableSet, _report: &ReportInfo, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;

        for table in tables.non_empty() {
            let file = path.join(format!("{}.csv", table.name));
            write_csv(table, &file)
                .map_err(|e| ShipxError::Output(format!("{}: {}", file.display(), e)))?;
            debug!("Wrote {} rows to {}", table.len(), file.display());
        }
        Ok(())
    }
}

fn write_csv(table: &Table, path: &Path) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.headers())?;
    for row in table.cells() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
