use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{FrequencyTable, SampleView, Species};
use crate::error::ProfileError;
use crate::estimation::SampleSummary;
use crate::evaluation::BootstrapConfig;
use crate::estimation::completeness::coverage;
use crate::estimation::diversity::{asymptotic_shannon, asymptotic_simpson};
use crate::estimation::richness::chao2_from;
use crate::utils::sampling::{binomial, multinomial};

/// Standard errors of the three asymptotic Hill numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BootstrapErrors {
    pub richness: f64,
    pub shannon: f64,
    pub simpson: f64,
}

/// Standard errors from `config.repetitions` bootstrap samples of `table`,
/// drawn from the assemblage of Chao et al. (2014).
pub fn estimate_stderr<S: Species + Sync>(
    table: &FrequencyTable<S>,
    sample_size: u64,
    view: SampleView,
    config: &BootstrapConfig,
) -> Result<BootstrapErrors, ProfileError> {
    let BootstrapConfig { repetitions, seed } = *config;
    if repetitions < 2 {
        return Err(ProfileError::InvalidConfig(format!(
            "bootstrap needs at least 2 repetitions, got {repetitions}"
        )));
    }
    if table.is_empty() || sample_size == 0 {
        return Ok(BootstrapErrors::default());
    }

    let assemblage = Assemblage::estimate(table, sample_size, view);

    let estimates: Vec<[f64; 3]> = (0..repetitions)
        .into_par_iter()
        .map(|r| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(r as u64));
            let resample = assemblage.draw(&mut rng);
            point_estimates(&resample, sample_size, view)
        })
        .collect();

    Ok(BootstrapErrors {
        richness: std_dev(estimates.iter().map(|e| e[0])),
        shannon: std_dev(estimates.iter().map(|e| e[1])),
        simpson: std_dev(estimates.iter().map(|e| e[2])),
    })
}

fn point_estimates(table: &FrequencyTable<usize>, sample_size: u64, view: SampleView) -> [f64; 3] {
    let summary = SampleSummary::of(table, sample_size);
    [
        chao2_from(summary.observed, summary.singletons, summary.doubletons),
        asymptotic_shannon(table, view, &summary),
        asymptotic_simpson(table, view, &summary),
    ]
}

fn std_dev<I: Iterator<Item = f64> + Clone>(values: I) -> f64 {
    let n = values.clone().count();
    if n < 2 {
        return 0.0;
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let ss: f64 = values.map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

struct Assemblage {
    view: SampleView,
    sample_size: u64,
    /// Relative abundances (abundance) or detection probabilities
    /// (incidence), detected species first by descending count.
    probabilities: Vec<f64>,
}

impl Assemblage {
    fn estimate<S: Species>(table: &FrequencyTable<S>, sample_size: u64, view: SampleView) -> Self {
        let summary = SampleSummary::of(table, sample_size);
        let n = sample_size as f64;
        let f1 = summary.singletons as f64;
        let f2 = summary.doubletons as f64;

        let undetected_hat = if summary.doubletons > 0 {
            (n - 1.0) / n * f1 * f1 / (2.0 * f2)
        } else {
            (n - 1.0) / n * f1 * (f1 - 1.0).max(0.0) / 2.0
        };
        let undetected = undetected_hat.ceil().max(0.0) as usize;

        let c = coverage(
            sample_size,
            summary.singletons,
            summary.doubletons,
            summary.species_total,
        );
        // incidence probabilities are scaled by the mean incidences per unit
        let scale = match view {
            SampleView::Abundance => 1.0,
            SampleView::Incidence => summary.species_total as f64 / n,
        };

        let relative: Vec<f64> = table
            .sorted_counts()
            .into_iter()
            .map(|x| x as f64 / n)
            .collect();
        let weight: f64 = relative.iter().map(|p| p * (1.0 - p).powf(n)).sum();
        let lambda = if weight > 0.0 {
            scale * (1.0 - c) / weight
        } else {
            0.0
        };

        let mut probabilities: Vec<f64> = relative
            .iter()
            .map(|&p| (p * (1.0 - lambda * (1.0 - p).powf(n))).clamp(0.0, 1.0))
            .collect();
        if undetected > 0 {
            let each = (scale * (1.0 - c) / undetected as f64).clamp(0.0, 1.0);
            probabilities.extend(std::iter::repeat_n(each, undetected));
        }

        Self {
            view,
            sample_size,
            probabilities,
        }
    }

    fn draw(&self, rng: &mut StdRng) -> FrequencyTable<usize> {
        let counts: Vec<u64> = match self.view {
            SampleView::Abundance => multinomial(rng, self.sample_size, &self.probabilities),
            SampleView::Incidence => self
                .probabilities
                .iter()
                .map(|&p| binomial(rng, self.sample_size, p))
                .collect(),
        };
        counts.into_iter().enumerate().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&'static str, u64)]) -> FrequencyTable<&'static str> {
        pairs.iter().copied().collect()
    }

    fn cfg(repetitions: usize, seed: u64) -> BootstrapConfig {
        BootstrapConfig { repetitions, seed }
    }

    fn rich_table() -> FrequencyTable<&'static str> {
        table(&[
            ("a", 9),
            ("b", 6),
            ("c", 4),
            ("d", 3),
            ("e", 2),
            ("f", 2),
            ("g", 1),
            ("h", 1),
            ("i", 1),
        ])
    }

    #[test]
    fn rejects_fewer_than_two_repetitions() {
        let err =
            estimate_stderr(&rich_table(), 29, SampleView::Abundance, &cfg(1, 42)).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfig(_)));
    }

    #[test]
    fn empty_table_has_zero_errors() {
        let e = estimate_stderr(&table(&[]), 0, SampleView::Abundance, &cfg(10, 42)).unwrap();
        assert_eq!(e, BootstrapErrors::default());
        let e = estimate_stderr(&table(&[]), 5, SampleView::Incidence, &cfg(10, 42)).unwrap();
        assert_eq!(e, BootstrapErrors::default());
    }

    #[test]
    fn same_seed_gives_same_errors() {
        let t = rich_table();
        let a = estimate_stderr(&t, 29, SampleView::Abundance, &cfg(50, 7)).unwrap();
        let b = estimate_stderr(&t, 29, SampleView::Abundance, &cfg(50, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn equal_tables_built_separately_give_same_errors() {
        let pairs: Vec<(String, u64)> = (0..40).map(|i| (format!("s{i}"), i % 7 + 1)).collect();
        let total: u64 = pairs.iter().map(|(_, c)| c).sum();
        for view in [SampleView::Abundance, SampleView::Incidence] {
            let runs: Vec<BootstrapErrors> = (0..5)
                .map(|k| {
                    let mut shuffled = pairs.clone();
                    shuffled.rotate_left(k * 3);
                    let t: FrequencyTable<String> = shuffled.into_iter().collect();
                    let size = match view {
                        SampleView::Abundance => total,
                        SampleView::Incidence => 12,
                    };
                    estimate_stderr(&t, size, view, &cfg(50, 7)).unwrap()
                })
                .collect();
            assert!(runs.windows(2).all(|w| w[0] == w[1]), "{view}: {runs:?}");
        }
    }

    #[test]
    fn abundance_errors_are_positive_and_finite() {
        let e = estimate_stderr(&rich_table(), 29, SampleView::Abundance, &cfg(100, 42)).unwrap();
        for v in [e.richness, e.shannon, e.simpson] {
            assert!(v.is_finite());
            assert!(v > 0.0);
        }
    }

    #[test]
    fn incidence_errors_are_finite() {
        let t = table(&[("a", 8), ("b", 5), ("c", 3), ("d", 2), ("e", 1), ("f", 1)]);
        let e = estimate_stderr(&t, 10, SampleView::Incidence, &cfg(100, 42)).unwrap();
        for v in [e.richness, e.shannon, e.simpson] {
            assert!(v.is_finite());
            assert!(v >= 0.0);
        }
        assert!(e.richness > 0.0);
    }

    #[test]
    fn source_table_is_untouched() {
        let t = rich_table();
        let before = t.clone();
        let _ = estimate_stderr(&t, 29, SampleView::Abundance, &cfg(20, 1)).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn assemblage_adds_undetected_species() {
        let t = rich_table();
        let a = Assemblage::estimate(&t, 29, SampleView::Abundance);
        // Q1 = 3, Q2 = 2: ceil(28/29 · 9/4) = 3 undetected
        assert_eq!(a.probabilities.len(), 9 + 3);
        assert!(a.probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn std_dev_basics() {
        assert_eq!(std_dev([5.0].into_iter()), 0.0);
        assert!((std_dev([1.0, 2.0, 3.0, 4.0].into_iter()) - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
