pub mod core;
pub mod error;
pub mod estimation;
pub mod evaluation;
pub mod retrieval;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::ProfileError;
