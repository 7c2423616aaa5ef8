mod diversity_curve;
mod metric_table;
mod snapshot;

pub use diversity_curve::DiversityCurve;
pub use metric_table::{MetricTable, TableFormat};
pub use snapshot::{BASE_COLUMNS, Snapshot};
