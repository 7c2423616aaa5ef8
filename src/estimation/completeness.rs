/// `S_obs / S_est`; 0 when the estimate is 0.
pub fn completeness(observed: u64, estimated_richness: f64) -> f64 {
    if estimated_richness == 0.0 {
        return 0.0;
    }
    observed as f64 / estimated_richness
}

/// Good-Turing-Chao sample coverage.
///
/// `sample_size` is `n` (abundance) or `T` (incidence) and `species_total`
/// is the sum of counts `Y` of the same view.
pub fn coverage(sample_size: u64, singletons: u64, doubletons: u64, species_total: u64) -> f64 {
    if doubletons == 0 && sample_size == 1 {
        return 0.0;
    }
    if singletons == 0 && doubletons == 0 {
        return 1.0;
    }
    let n1 = sample_size as f64 - 1.0;
    let f1 = singletons as f64;
    let f2 = doubletons as f64;
    let y = species_total as f64;
    1.0 - f1 / y * ((n1 * f1) / (n1 * f1 + 2.0 * f2))
}
