mod n_gram;
mod trace_variant;

pub use n_gram::n_gram;
pub use trace_variant::trace_variant;
