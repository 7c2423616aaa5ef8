pub mod math;
pub mod sampling;
