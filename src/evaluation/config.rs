use std::collections::BTreeSet;

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::core::SampleView;
use crate::error::ProfileError;
use crate::evaluation::MetricFamily;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_REPETITIONS: usize = 100;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_repetitions() -> usize {
    DEFAULT_REPETITIONS
}

fn default_metrics() -> BTreeSet<MetricFamily> {
    BTreeSet::from([
        MetricFamily::Richness,
        MetricFamily::Completeness,
        MetricFamily::Coverage,
    ])
}

fn default_targets() -> Vec<f64> {
    vec![0.9, 0.95, 0.99]
}

/// Bootstrap standard errors attached to every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BootstrapConfig {
    #[serde(default = "default_repetitions")]
    #[schemars(
        title = "Repetitions",
        description = "Number of bootstrap samples drawn per snapshot (at least 2).",
        default = "default_repetitions"
    )]
    pub repetitions: usize,

    #[serde(default = "default_seed")]
    #[schemars(
        title = "Random seed",
        description = "Seed of the first bootstrap sample; sample r uses seed + r.",
        default = "default_seed"
    )]
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            seed: DEFAULT_SEED,
        }
    }
}

/// What a profile measures and when it takes snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileConfig {
    #[serde(default = "default_metrics")]
    #[schemars(
        title = "Metric families",
        description = "Enabled families: richness, shannon, simpson, completeness, coverage.",
        default = "default_metrics"
    )]
    pub metrics: BTreeSet<MetricFamily>,

    #[serde(default = "default_targets")]
    #[schemars(
        title = "Completeness targets",
        description = "Completeness levels in (0, 1) to extrapolate the sampling effort for.",
        default = "default_targets"
    )]
    pub completeness_targets: Vec<f64>,

    #[serde(default)]
    #[schemars(
        title = "Step size",
        description = "Snapshot every this many observations; absent for a single final snapshot."
    )]
    pub step_size: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Bootstrap",
        description = "Attach bootstrap standard errors of D0, D1 and D2 to every snapshot."
    )]
    pub bootstrap: Option<BootstrapConfig>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            completeness_targets: default_targets(),
            step_size: None,
            bootstrap: None,
        }
    }
}

impl ProfileConfig {
    pub fn with_metrics<I: IntoIterator<Item = MetricFamily>>(mut self, metrics: I) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    pub fn with_all_metrics(self) -> Self {
        self.with_metrics(MetricFamily::iter())
    }

    pub fn with_completeness_targets<I: IntoIterator<Item = f64>>(mut self, targets: I) -> Self {
        self.completeness_targets = targets.into_iter().collect();
        self
    }

    pub fn with_step_size(mut self, step_size: u64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: BootstrapConfig) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.step_size == Some(0) {
            return Err(ProfileError::InvalidConfig(
                "step_size must be > 0".to_string(),
            ));
        }
        if let Some(t) = self
            .completeness_targets
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0 && **t < 1.0))
        {
            return Err(ProfileError::InvalidConfig(format!(
                "completeness target must lie in (0, 1), got {t}"
            )));
        }
        for (i, t) in self.completeness_targets.iter().enumerate() {
            if self.completeness_targets[..i].contains(t) {
                return Err(ProfileError::InvalidConfig(format!(
                    "duplicate completeness target {t}"
                )));
            }
        }
        if let Some(b) = &self.bootstrap {
            if b.repetitions < 2 {
                return Err(ProfileError::InvalidConfig(format!(
                    "bootstrap repetitions must be >= 2, got {}",
                    b.repetitions
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn schema() -> Schema {
        schema_for!(ProfileConfig)
    }

    /// Names of the measurement columns every snapshot of this profile carries.
    pub fn measurement_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for family in &self.metrics {
            columns.extend(family.all_columns());
        }
        for target in &self.completeness_targets {
            for view in SampleView::iter() {
                columns.push(effort_column(view, *target));
            }
        }
        if self.bootstrap.is_some() {
            for view in SampleView::iter() {
                columns.extend(stderr_columns(view));
            }
        }
        columns
    }
}

pub(crate) fn effort_column(view: SampleView, target: f64) -> String {
    format!("{}_l_{}", view.prefix(), target)
}

pub(crate) fn stderr_columns(view: SampleView) -> [String; 3] {
    ["d0", "d1", "d2"].map(|order| format!("{}_{}_stderr", view.prefix(), order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn defaults() {
        let c = ProfileConfig::default();
        assert_eq!(
            c.metrics.iter().copied().collect::<Vec<_>>(),
            vec![
                MetricFamily::Richness,
                MetricFamily::Completeness,
                MetricFamily::Coverage
            ]
        );
        assert_eq!(c.completeness_targets, vec![0.9, 0.95, 0.99]);
        assert_eq!(c.step_size, None);
        assert_eq!(c.bootstrap, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn default_columns() {
        let cols = ProfileConfig::default().measurement_columns();
        assert_eq!(
            cols,
            vec![
                "abundance_sample_d0",
                "incidence_sample_d0",
                "abundance_estimate_d0",
                "incidence_estimate_d0",
                "abundance_c0",
                "incidence_c0",
                "abundance_c1",
                "incidence_c1",
                "abundance_l_0.9",
                "incidence_l_0.9",
                "abundance_l_0.95",
                "incidence_l_0.95",
                "abundance_l_0.99",
                "incidence_l_0.99",
            ]
        );
    }

    #[test]
    fn bootstrap_columns_come_last() {
        let cols = ProfileConfig::default()
            .with_metrics([MetricFamily::Simpson])
            .with_completeness_targets([])
            .with_bootstrap(BootstrapConfig::default())
            .measurement_columns();
        assert_eq!(
            cols,
            vec![
                "abundance_sample_d2",
                "incidence_sample_d2",
                "abundance_estimate_d2",
                "incidence_estimate_d2",
                "abundance_d0_stderr",
                "abundance_d1_stderr",
                "abundance_d2_stderr",
                "incidence_d0_stderr",
                "incidence_d1_stderr",
                "incidence_d2_stderr",
            ]
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad = [
            ProfileConfig::default().with_step_size(0),
            ProfileConfig::default().with_completeness_targets([0.9, 1.0]),
            ProfileConfig::default().with_completeness_targets([0.0]),
            ProfileConfig::default().with_completeness_targets([f64::NAN]),
            ProfileConfig::default().with_completeness_targets([0.9, 0.95, 0.9]),
            ProfileConfig::default().with_bootstrap(BootstrapConfig {
                repetitions: 1,
                seed: 0,
            }),
        ];
        for c in bad {
            assert!(
                matches!(c.validate(), Err(ProfileError::InvalidConfig(_))),
                "{c:?}"
            );
        }
        assert!(ProfileConfig::default().with_step_size(1).validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let c = ProfileConfig::from_json(r#"{"step_size": 10, "bootstrap": {}}"#).unwrap();
        assert_eq!(c.step_size, Some(10));
        assert_eq!(c.bootstrap, Some(BootstrapConfig::default()));
        assert_eq!(c.metrics, ProfileConfig::default().metrics);

        let c = ProfileConfig::from_json(r#"{"metrics": ["shannon", "richness"]}"#).unwrap();
        assert_eq!(
            c.metrics.into_iter().collect::<Vec<_>>(),
            vec![MetricFamily::Richness, MetricFamily::Shannon]
        );
    }

    #[test]
    fn from_json_errors() {
        assert!(matches!(
            ProfileConfig::from_json("{"),
            Err(ProfileError::Json(_))
        ));
        assert!(matches!(
            ProfileConfig::from_json(r#"{"step_size": 0}"#),
            Err(ProfileError::InvalidConfig(_))
        ));
        assert!(matches!(
            ProfileConfig::from_json(r#"{"completeness_targets": [0.9, 0.9]}"#),
            Err(ProfileError::InvalidConfig(_))
        ));
        assert!(matches!(
            ProfileConfig::from_json(r#"{"metrics": ["evenness"]}"#),
            Err(ProfileError::Json(_))
        ));
    }

    #[test]
    fn schema_lists_every_field() {
        let v = serde_json::to_value(ProfileConfig::schema()).unwrap();
        let props = v.get("properties").cloned().unwrap_or_else(|| json!({}));
        for key in ["metrics", "completeness_targets", "step_size", "bootstrap"] {
            assert!(props.get(key).is_some(), "missing {key}");
        }
        assert_eq!(
            props["completeness_targets"]["default"],
            Value::from(vec![0.9, 0.95, 0.99])
        );
    }
}
