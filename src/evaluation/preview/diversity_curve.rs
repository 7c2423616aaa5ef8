use std::path::Path;

use crate::error::ProfileError;
use crate::evaluation::{BASE_COLUMNS, MetricTable, Snapshot, TableFormat};

/// Append-only series of snapshots of one profile.
///
/// The measurement columns are fixed when the curve is created, so every
/// row of the exported table has the same shape.
#[derive(Debug, Clone, Default)]
pub struct DiversityCurve {
    measurement_columns: Vec<String>,
    entries: Vec<Snapshot>,
}

impl DiversityCurve {
    pub fn new(measurement_columns: Vec<String>) -> Self {
        Self {
            measurement_columns,
            entries: vec![],
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn columns(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.measurement_columns.iter().cloned())
            .collect()
    }

    pub fn to_table(&self) -> MetricTable {
        let mut table = MetricTable::new(self.columns());
        for s in &self.entries {
            let row = s
                .base_values()
                .into_iter()
                .chain(self.measurement_columns.iter().map(|c| s.measurement(c)))
                .collect();
            table.push_row(row);
        }
        table
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TableFormat) -> Result<(), ProfileError> {
        self.to_table().export(path, fmt)
    }
}
