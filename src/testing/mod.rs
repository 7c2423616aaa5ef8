pub mod dummies;

pub use dummies::{random_log, running_example};

/// Routes `log` output through the test harness; safe to call repeatedly.
#[cfg(test)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
