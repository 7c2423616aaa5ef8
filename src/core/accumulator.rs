use std::collections::HashSet;

use crate::core::{FrequencyTable, SampleView, Species};
use crate::error::ProfileError;
use crate::estimation::SampleSummary;

/// Online sufficient statistics of one profile.
#[derive(Debug, Clone)]
pub struct Accumulator<S: Species> {
    abundance: FrequencyTable<S>,
    incidence: FrequencyTable<S>,

    abundance_sample_size: u64,
    incidence_sample_size: u64,

    abundance_species_total: u64,
    incidence_species_total: u64,

    spatial_aggregation: Option<f64>,
}

impl<S: Species> Accumulator<S> {
    pub fn new() -> Self {
        Self {
            abundance: FrequencyTable::new(),
            incidence: FrequencyTable::new(),
            abundance_sample_size: 0,
            incidence_sample_size: 0,
            abundance_species_total: 0,
            incidence_species_total: 0,
            spatial_aggregation: None,
        }
    }

    /// Records the (possibly repeated) species extracted from one observation.
    pub fn update(&mut self, species: &[S]) {
        let mut distinct: HashSet<&S> = HashSet::with_capacity(species.len());
        for s in species {
            self.abundance.increment(s.clone());
            distinct.insert(s);
        }
        for s in &distinct {
            self.incidence.increment((*s).clone());
        }

        let occurrences = species.len() as u64;
        let distinct = distinct.len() as u64;

        self.abundance_sample_size += occurrences;
        self.incidence_sample_size += 1;

        self.abundance_species_total += occurrences;
        self.incidence_species_total += distinct;

        self.spatial_aggregation = if self.abundance_species_total > 0 {
            Some(
                1.0 - self.incidence_species_total as f64 / self.abundance_species_total as f64,
            )
        } else {
            None
        };
    }

    pub fn table(&self, view: SampleView) -> &FrequencyTable<S> {
        match view {
            SampleView::Abundance => &self.abundance,
            SampleView::Incidence => &self.incidence,
        }
    }

    /// Abundance: total occurrences. Incidence: number of observations.
    pub fn sample_size(&self, view: SampleView) -> u64 {
        match view {
            SampleView::Abundance => self.abundance_sample_size,
            SampleView::Incidence => self.incidence_sample_size,
        }
    }

    /// Cumulative per-observation species count (with repeats for abundance,
    /// distinct for incidence).
    pub fn species_total(&self, view: SampleView) -> u64 {
        match view {
            SampleView::Abundance => self.abundance_species_total,
            SampleView::Incidence => self.incidence_species_total,
        }
    }

    /// `1 - cumulative incidence count / cumulative abundance count`.
    pub fn spatial_aggregation(&self) -> Result<f64, ProfileError> {
        self.spatial_aggregation
            .ok_or(ProfileError::NoAbundanceObserved)
    }

    pub(crate) fn spatial_aggregation_opt(&self) -> Option<f64> {
        self.spatial_aggregation
    }

    pub fn summary(&self, view: SampleView) -> SampleSummary {
        SampleSummary::new(
            self.table(view),
            self.sample_size(view),
            self.species_total(view),
        )
    }
}

impl<S: Species> Default for Accumulator<S> {
    fn default() -> Self {
        Self::new()
    }
}
