use crate::core::{FrequencyTable, Species};

/// `Q1`: species observed exactly once.
pub fn singletons<S: Species>(table: &FrequencyTable<S>) -> u64 {
    table.frequency_count(1)
}

/// `Q2`: species observed exactly twice.
pub fn doubletons<S: Species>(table: &FrequencyTable<S>) -> u64 {
    table.frequency_count(2)
}

/// Sample D0, the number of distinct species seen.
pub fn observed_richness<S: Species>(table: &FrequencyTable<S>) -> u64 {
    table.len() as u64
}

/// Estimated number of unseen species: `Q1²/(2·Q2)`, or the bias-corrected
/// `Q1·(Q1-1)/2` without doubletons.
pub fn chao2_excess(singletons: u64, doubletons: u64) -> f64 {
    let q1 = singletons as f64;
    if doubletons > 0 {
        q1 * q1 / (2.0 * doubletons as f64)
    } else {
        q1 * (q1 - 1.0).max(0.0) / 2.0
    }
}

/// Chao2 asymptotic richness from precomputed `S_obs`, `Q1`, `Q2`.
pub fn chao2_from(observed: u64, singletons: u64, doubletons: u64) -> f64 {
    observed as f64 + chao2_excess(singletons, doubletons)
}

/// Chao2 asymptotic richness of `table`.
pub fn chao2<S: Species>(table: &FrequencyTable<S>) -> f64 {
    chao2_from(observed_richness(table), singletons(table), doubletons(table))
}
