use log::debug;
use strum::IntoEnumIterator;

use crate::core::{Accumulator, SampleView, Species};
use crate::error::ProfileError;
use crate::estimation::{
    chao2_from, completeness, estimate_stderr, sampling_effort_abundance,
    sampling_effort_incidence,
};
use crate::evaluation::config::{effort_column, stderr_columns};
use crate::evaluation::metric_family::interleave;
use crate::evaluation::{Measurement, ProfileConfig, Snapshot, ViewContext};

/// Turns the current state of an [`Accumulator`] into a [`Snapshot`]
/// according to a [`ProfileConfig`].
///
/// Measurement order matches [`ProfileConfig::measurement_columns`].
#[derive(Debug, Clone)]
pub struct DiversityEvaluator {
    config: ProfileConfig,
}

impl DiversityEvaluator {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn measurement_columns(&self) -> Vec<String> {
        self.config.measurement_columns()
    }

    pub fn evaluate<S: Species + Sync>(
        &self,
        acc: &Accumulator<S>,
    ) -> Result<Snapshot, ProfileError> {
        let contexts: Vec<ViewContext<'_, S>> = SampleView::iter()
            .map(|view| {
                let summary = acc.summary(view);
                let chao2 = chao2_from(summary.observed, summary.singletons, summary.doubletons);
                ViewContext {
                    view,
                    table: acc.table(view),
                    summary,
                    chao2,
                    completeness: completeness(summary.observed, chao2),
                }
            })
            .collect();

        let mut measurements = Vec::new();
        for family in &self.config.metrics {
            let eval = family.evaluator::<S>();
            let [abundance, incidence] = [&contexts[0], &contexts[1]].map(|ctx| {
                let mut out = Vec::new();
                eval(ctx, &mut out);
                out
            });
            measurements.extend(interleave(abundance, incidence));
        }

        for &target in &self.config.completeness_targets {
            for ctx in &contexts {
                let effort = match ctx.view {
                    SampleView::Abundance => {
                        sampling_effort_abundance(target, &ctx.summary, ctx.completeness)
                    }
                    SampleView::Incidence => {
                        sampling_effort_incidence(target, &ctx.summary, ctx.completeness)
                    }
                };
                measurements.push(Measurement::new(effort_column(ctx.view, target), effort));
            }
        }

        if let Some(bootstrap) = &self.config.bootstrap {
            for ctx in &contexts {
                let errors =
                    estimate_stderr(ctx.table, ctx.summary.sample_size, ctx.view, bootstrap)?;
                let [d0, d1, d2] = stderr_columns(ctx.view);
                measurements.push(Measurement::new(d0, errors.richness));
                measurements.push(Measurement::new(d1, errors.shannon));
                measurements.push(Measurement::new(d2, errors.simpson));
            }
            debug!(
                "bootstrap with {} repetitions at {} observations",
                bootstrap.repetitions,
                acc.sample_size(SampleView::Incidence)
            );
        }

        Ok(Snapshot {
            abundance: contexts[0].summary,
            incidence: contexts[1].summary,
            degree_of_aggregation: acc.spatial_aggregation_opt(),
            measurements,
        })
    }
}

impl Default for DiversityEvaluator {
    fn default() -> Self {
        Self::new(ProfileConfig::default())
    }
}
