mod profiler;

pub use profiler::{ProfileState, Profiler, SpeciesFn};
