pub mod bootstrap;
pub mod completeness;
pub mod diversity;
pub mod effort;
pub mod richness;
mod summary;

pub use bootstrap::{BootstrapErrors, estimate_stderr};
pub use completeness::{completeness, coverage};
pub use diversity::{asymptotic_shannon, asymptotic_simpson, sample_shannon, sample_simpson};
pub use effort::{sampling_effort_abundance, sampling_effort_incidence};
pub use richness::{chao2, chao2_from, doubletons, observed_richness, singletons};
pub use summary::SampleSummary;
