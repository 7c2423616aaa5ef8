use serde::Serialize;

use crate::core::{FrequencyTable, Species};
use crate::estimation::richness::{doubletons, observed_richness, singletons};

/// Scalar sufficient statistics of one view of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct SampleSummary {
    /// Abundance: total occurrences `n`. Incidence: sampling units `T`.
    pub sample_size: u64,
    pub species_total: u64,
    pub observed: u64,
    pub singletons: u64,
    pub doubletons: u64,
}

impl SampleSummary {
    pub fn new<S: Species>(table: &FrequencyTable<S>, sample_size: u64, species_total: u64) -> Self {
        Self {
            sample_size,
            species_total,
            observed: observed_richness(table),
            singletons: singletons(table),
            doubletons: doubletons(table),
        }
    }

    /// Summary with the species total taken from the table itself.
    pub fn of<S: Species>(table: &FrequencyTable<S>, sample_size: u64) -> Self {
        Self::new(table, sample_size, table.total())
    }
}
