use std::collections::BTreeMap;

use crate::core::{FrequencyTable, SampleView, Species};
use crate::estimation::SampleSummary;
use crate::utils::math::{harmonic_range, unseen_shannon_tail};

/// Exponential of the plug-in Shannon entropy, `exp(-Σ p·ln p)` with
/// `p = x / total`. An empty sample has diversity 1.
pub fn sample_shannon<S: Species>(table: &FrequencyTable<S>, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let n = total as f64;
    let entropy: f64 = table
        .sorted_counts()
        .into_iter()
        .filter(|&x| x > 0)
        .map(|x| {
            let p = x as f64 / n;
            -p * p.ln()
        })
        .sum();
    entropy.exp()
}

/// Inverse Simpson concentration `1 / Σ p²`.
pub fn sample_simpson<S: Species>(table: &FrequencyTable<S>, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let n = total as f64;
    let a: f64 = table
        .sorted_counts()
        .into_iter()
        .map(|x| {
            let p = x as f64 / n;
            p * p
        })
        .sum();
    if a > 0.0 { 1.0 / a } else { 1.0 }
}

fn unseen_coefficient(sample_size: u64, singletons: u64, doubletons: u64) -> f64 {
    let n1 = (sample_size as f64) - 1.0;
    let f1 = singletons as f64;
    let f2 = doubletons as f64;
    if doubletons > 0 {
        2.0 * f2 / (n1 * f1 + 2.0 * f2)
    } else if singletons > 0 {
        2.0 / (n1 * (f1 - 1.0) + 2.0)
    } else {
        1.0
    }
}

/// Asymptotic Shannon entropy (log space) from abundance counts.
pub fn shannon_entropy_abundance<S: Species>(
    table: &FrequencyTable<S>,
    sample_size: u64,
    singletons: u64,
    doubletons: u64,
) -> f64 {
    if sample_size == 0 {
        return 0.0;
    }
    let n = sample_size as f64;

    // counts-of-counts, so every distinct frequency is handled once
    let mut fingerprint: BTreeMap<u64, u64> = BTreeMap::new();
    for x in table.counts().filter(|&x| x > 0 && x < sample_size) {
        *fingerprint.entry(x).or_insert(0) += 1;
    }
    let detected: f64 = fingerprint
        .iter()
        .map(|(&x, &species)| species as f64 * (x as f64 / n) * harmonic_range(x, sample_size - 1))
        .sum();

    let a = unseen_coefficient(sample_size, singletons, doubletons);
    if a == 1.0 {
        return detected;
    }
    let undetected = (singletons as f64 / n) * unseen_shannon_tail(a, sample_size);
    detected + undetected
}

/// Asymptotic Shannon entropy (log space) from incidence counts over
/// `sampling_units` observations.
pub fn shannon_entropy_incidence<S: Species>(
    table: &FrequencyTable<S>,
    sampling_units: u64,
    singletons: u64,
    doubletons: u64,
) -> f64 {
    let u = table.total();
    if u == 0 || sampling_units == 0 {
        return 0.0;
    }
    let t = sampling_units as f64;
    let u = u as f64;
    let h_o = shannon_entropy_abundance(table, sampling_units, singletons, doubletons);
    (t / u) * h_o + (u / t).ln()
}

/// Asymptotic Simpson diversity from abundance counts; 0 without any species
/// seen twice or more.
pub fn simpson_abundance<S: Species>(table: &FrequencyTable<S>, sample_size: u64) -> f64 {
    let denom: f64 = table
        .sorted_counts()
        .into_iter()
        .filter(|&x| x >= 2)
        .map(|x| x as f64 * (x - 1) as f64)
        .sum();
    if denom == 0.0 {
        return 0.0;
    }
    let n = sample_size as f64;
    n * (n - 1.0) / denom
}

/// Asymptotic Simpson diversity from incidence counts over `sampling_units`
/// observations; 0 without any species seen in two observations or more.
pub fn simpson_incidence<S: Species>(table: &FrequencyTable<S>, sampling_units: u64) -> f64 {
    let denom: f64 = table
        .sorted_counts()
        .into_iter()
        .filter(|&y| y > 1)
        .map(|y| y as f64 * (y - 1) as f64)
        .sum();
    if denom == 0.0 {
        return 0.0;
    }
    let u = table.total() as f64;
    let t = sampling_units as f64;
    let nom = (1.0 - 1.0 / t) * u;
    nom * nom / denom
}

pub fn asymptotic_shannon<S: Species>(
    table: &FrequencyTable<S>,
    view: SampleView,
    summary: &SampleSummary,
) -> f64 {
    let entropy = match view {
        SampleView::Abundance => shannon_entropy_abundance(
            table,
            summary.sample_size,
            summary.singletons,
            summary.doubletons,
        ),
        SampleView::Incidence => shannon_entropy_incidence(
            table,
            summary.sample_size,
            summary.singletons,
            summary.doubletons,
        ),
    };
    entropy.exp()
}

pub fn asymptotic_simpson<S: Species>(
    table: &FrequencyTable<S>,
    view: SampleView,
    summary: &SampleSummary,
) -> f64 {
    match view {
        SampleView::Abundance => simpson_abundance(table, summary.sample_size),
        SampleView::Incidence => simpson_incidence(table, summary.sample_size),
    }
}
