mod accumulator;
mod frequency_table;
mod sample_view;

pub use accumulator::Accumulator;
pub use frequency_table::{FrequencyTable, Species};
pub use sample_view::SampleView;
