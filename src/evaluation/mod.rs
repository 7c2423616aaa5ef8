pub(crate) mod config;
mod evaluators;
mod measurement;
mod metric_family;
mod preview;

pub use config::{BootstrapConfig, ProfileConfig};
pub use evaluators::DiversityEvaluator;
pub use measurement::{Measurement, MeasurementsExt};
pub use metric_family::{MetricEvaluator, MetricFamily, ViewContext};
pub use preview::{BASE_COLUMNS, DiversityCurve, MetricTable, Snapshot, TableFormat};
