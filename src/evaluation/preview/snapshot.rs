use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

use crate::core::SampleView;
use crate::estimation::SampleSummary;
use crate::evaluation::{Measurement, MeasurementsExt};

/// Names of the columns every snapshot carries regardless of configuration.
pub const BASE_COLUMNS: [&str; 11] = [
    "abundance_no_observations",
    "incidence_no_observations",
    "abundance_sum_species_counts",
    "incidence_sum_species_counts",
    "degree_of_aggregation",
    "abundance_observed_species",
    "incidence_observed_species",
    "abundance_singletons",
    "incidence_singletons",
    "abundance_doubletons",
    "incidence_doubletons",
];

/// All metrics of one profile at one point of the stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub abundance: SampleSummary,
    pub incidence: SampleSummary,
    /// Absent until the first species occurrence.
    pub degree_of_aggregation: Option<f64>,
    pub measurements: Vec<Measurement>,
}

impl Snapshot {
    pub fn summary(&self, view: SampleView) -> &SampleSummary {
        match view {
            SampleView::Abundance => &self.abundance,
            SampleView::Incidence => &self.incidence,
        }
    }

    /// Number of observations (incidence sampling units) seen so far.
    pub fn observations(&self) -> u64 {
        self.incidence.sample_size
    }

    pub fn measurement(&self, name: &str) -> Option<f64> {
        self.measurements.value(name)
    }

    /// Values of [`BASE_COLUMNS`], in order.
    pub fn base_values(&self) -> [Option<f64>; 11] {
        let (a, i) = (&self.abundance, &self.incidence);
        [
            Some(a.sample_size as f64),
            Some(i.sample_size as f64),
            Some(a.species_total as f64),
            Some(i.species_total as f64),
            self.degree_of_aggregation,
            Some(a.observed as f64),
            Some(i.observed as f64),
            Some(a.singletons as f64),
            Some(i.singletons as f64),
            Some(a.doubletons as f64),
            Some(i.doubletons as f64),
        ]
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        match BASE_COLUMNS.iter().position(|c| *c == column) {
            Some(idx) => self.base_values()[idx],
            None => self.measurement(column),
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "observations={}, occurrences={}, species={}/{}, q1={}/{}, q2={}/{}",
            self.incidence.sample_size,
            self.abundance.sample_size,
            self.abundance.observed,
            self.incidence.observed,
            self.abundance.singletons,
            self.incidence.singletons,
            self.abundance.doubletons,
            self.incidence.doubletons,
        )?;
        if let Some(d) = self.degree_of_aggregation {
            write!(f, ", aggregation={d:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap() -> Snapshot {
        Snapshot {
            abundance: SampleSummary {
                sample_size: 4,
                species_total: 4,
                observed: 2,
                singletons: 1,
                doubletons: 0,
            },
            incidence: SampleSummary {
                sample_size: 2,
                species_total: 3,
                observed: 2,
                singletons: 1,
                doubletons: 1,
            },
            degree_of_aggregation: Some(0.25),
            measurements: vec![Measurement::new("abundance_c0", 1.0)],
        }
    }

    #[test]
    fn value_reads_base_and_measurement_columns() {
        let s = snap();
        assert_eq!(s.value("abundance_no_observations"), Some(4.0));
        assert_eq!(s.value("incidence_sum_species_counts"), Some(3.0));
        assert_eq!(s.value("degree_of_aggregation"), Some(0.25));
        assert_eq!(s.value("incidence_doubletons"), Some(1.0));
        assert_eq!(s.value("abundance_c0"), Some(1.0));
        assert_eq!(s.value("incidence_c0"), None);
        assert_eq!(s.observations(), 2);
    }

    #[test]
    fn display_omits_undefined_aggregation() {
        let mut s = snap();
        assert!(s.to_string().ends_with("aggregation=0.250000"));
        s.degree_of_aggregation = None;
        assert!(!s.to_string().contains("aggregation"));
        assert!(s.to_string().starts_with("observations=2, occurrences=4"));
    }
}
