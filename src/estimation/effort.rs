use crate::estimation::SampleSummary;
use crate::estimation::richness::chao2_excess;

fn non_negative(effort: f64) -> f64 {
    if effort.is_nan() || effort < 0.0 {
        0.0
    } else {
        effort
    }
}

/// Additional occurrences needed for completeness `target`, from abundance data.
pub fn sampling_effort_abundance(target: f64, summary: &SampleSummary, completeness: f64) -> f64 {
    if target <= completeness || summary.doubletons == 0 {
        return 0.0;
    }
    let n = summary.sample_size as f64;
    let f1 = summary.singletons as f64;
    let f2 = summary.doubletons as f64;
    let excess = chao2_excess(summary.singletons, summary.doubletons);
    let s_obs = summary.observed as f64;

    non_negative((n * f1 / (2.0 * f2)) * (excess / ((1.0 - target) * (excess + s_obs))).ln())
}

/// Additional sampling units needed for completeness `target`, from incidence data.
pub fn sampling_effort_incidence(target: f64, summary: &SampleSummary, completeness: f64) -> f64 {
    if target <= completeness || summary.sample_size < 2 || summary.doubletons == 0 {
        return 0.0;
    }
    let t = summary.sample_size as f64;
    let q1 = summary.singletons as f64;
    let q2 = summary.doubletons as f64;
    let s_obs = summary.observed as f64;

    let chao2_corrected = s_obs + (1.0 - 1.0 / t) * q1 * q1 / (2.0 * q2);

    let nom = (1.0 - (t / (t - 1.0)) * (2.0 * q2 / (q1 * q1)) * (target * chao2_corrected - s_obs)).ln();
    let denom = (1.0 - 2.0 * q2 / ((t - 1.0) * q1 + 2.0 * q2)).ln();

    non_negative(nom / denom)
}
