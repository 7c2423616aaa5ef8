use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ten short traces over the activities a..g.
pub fn running_example() -> Vec<Vec<&'static str>> {
    vec![
        vec!["a", "b", "c", "d"],
        vec!["a", "c", "b", "d"],
        vec!["a", "b", "c", "d"],
        vec!["a", "e", "d"],
        vec!["a", "b", "c", "b", "c", "d"],
        vec!["a", "e", "f"],
        vec!["a", "b", "c", "d"],
        vec!["a", "g"],
        vec!["a", "c", "b", "d"],
        vec!["a", "e", "d"],
    ]
}

/// Reproducible log of `traces` traces with 1..=`max_len` activities drawn
/// from `alphabet` symbols, skewed towards the first ones so that rare
/// activities keep producing singletons.
pub fn random_log(seed: u64, traces: usize, alphabet: usize, max_len: usize) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..traces)
        .map(|_| {
            let len = rng.random_range(1..=max_len.max(1));
            (0..len)
                .map(|_| {
                    let u: f64 = rng.random();
                    let idx = ((u * u) * alphabet as f64) as usize;
                    format!("act_{}", idx.min(alphabet.saturating_sub(1)))
                })
                .collect()
        })
        .collect()
}
