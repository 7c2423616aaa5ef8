mod traces;

pub use traces::{random_log, running_example};
