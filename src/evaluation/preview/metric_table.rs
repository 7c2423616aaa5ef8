use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Tsv,
    Json,
}

/// Exported time series of one profile: one row per snapshot, one column
/// per metric. Undefined cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl MetricTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing trailing cells are padded with `None` and
    /// extra cells are dropped.
    pub fn push_row(&mut self, mut row: Vec<Option<f64>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.index_of(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        let idx = self.index_of(name)?;
        self.rows.get(row)?[idx]
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TableFormat) -> Result<(), ProfileError> {
        match fmt {
            TableFormat::Csv => self.export_with_delimiter(path, ','),
            TableFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TableFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: char,
    ) -> Result<(), ProfileError> {
        let sep = delimiter.to_string();
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(w, "{}", self.columns.join(sep.as_str()))?;
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default())
                .collect();
            writeln!(w, "{}", cells.join(sep.as_str()))?;
        }
        w.flush()?;
        Ok(())
    }

    /// Array of objects keyed by column name, in column order.
    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(c, cell)| (c.clone(), cell.map_or(Value::Null, Value::from)))
                    .collect();
                Value::Object(obj)
            })
            .collect();
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &records)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}
