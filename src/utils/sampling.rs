use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Draws from Binomial(`trials`, `p`); `p` outside (0, 1) or NaN is clamped
/// to the degenerate cases.
pub fn binomial<R: Rng + ?Sized>(rng: &mut R, trials: u64, p: f64) -> u64 {
    if trials == 0 || !(p > 0.0) {
        return 0;
    }
    if p >= 1.0 {
        return trials;
    }
    Binomial::new(trials, p).map_or(0, |dist| dist.sample(rng))
}

/// Draws category counts of a multinomial sample of size `trials`.
///
/// Weights need not sum to one; non-positive weights never receive a draw.
/// Implemented as a chain of conditional binomials.
pub fn multinomial<R: Rng + ?Sized>(rng: &mut R, trials: u64, weights: &[f64]) -> Vec<u64> {
    let mut out = vec![0; weights.len()];
    let Some(last) = weights.iter().rposition(|&w| w > 0.0) else {
        return out;
    };

    let mut remaining = trials;
    let mut remaining_mass: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    for (i, &w) in weights.iter().enumerate().take(last + 1) {
        if remaining == 0 {
            break;
        }
        if !(w > 0.0) {
            continue;
        }
        let k = if i == last {
            remaining
        } else {
            let share = (w / remaining_mass).clamp(0.0, 1.0);
            binomial(rng, remaining, share)
        };
        out[i] = k;
        remaining -= k;
        remaining_mass -= w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn binomial_degenerate_probabilities() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(binomial(&mut rng, 10, 0.0), 0);
        assert_eq!(binomial(&mut rng, 10, 1.0), 10);
        assert_eq!(binomial(&mut rng, 0, 0.4), 0);
        assert_eq!(binomial(&mut rng, 10, f64::NAN), 0);
    }

    #[test]
    fn binomial_never_exceeds_trials() {
        let mut rng = StdRng::seed_from_u64(11);
        for &p in &[0.01, 0.3, 0.5, 0.7, 0.99] {
            for _ in 0..200 {
                assert!(binomial(&mut rng, 25, p) <= 25);
            }
        }
    }

    #[test]
    fn binomial_mean_is_close_to_np() {
        let mut rng = StdRng::seed_from_u64(42);
        let reps = 20_000;
        for &p in &[0.1, 0.5, 0.8] {
            let total: u64 = (0..reps).map(|_| binomial(&mut rng, 40, p)).sum();
            let mean = total as f64 / reps as f64;
            assert!((mean - 40.0 * p).abs() < 0.2, "p={p} mean={mean}");
        }
    }

    #[test]
    fn multinomial_preserves_sample_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let w = [0.5, 0.0, 0.25, 0.25];
        for _ in 0..100 {
            let draw = multinomial(&mut rng, 37, &w);
            assert_eq!(draw.iter().sum::<u64>(), 37);
            assert_eq!(draw[1], 0);
        }
    }

    #[test]
    fn multinomial_without_positive_weight_is_all_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(multinomial(&mut rng, 10, &[0.0, 0.0]), vec![0, 0]);
        assert!(multinomial(&mut rng, 10, &[]).is_empty());
    }

    #[test]
    fn multinomial_unnormalised_weights() {
        let mut rng = StdRng::seed_from_u64(5);
        let reps = 5_000;
        let mut first = 0u64;
        for _ in 0..reps {
            first += multinomial(&mut rng, 10, &[3.0, 1.0])[0];
        }
        let mean = first as f64 / reps as f64;
        assert!((mean - 7.5).abs() < 0.15);
    }
}
