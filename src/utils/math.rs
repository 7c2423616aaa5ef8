const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

const HARMONIC_EXACT_LIMIT: u64 = 1024;

const TAIL_SERIES_SWITCH: f64 = 8.0;

/// `H(n) = sum_{k=1}^{n} 1/k`, with `H(0) = 0`.
pub fn harmonic(n: u64) -> f64 {
    if n < HARMONIC_EXACT_LIMIT {
        // smallest terms first
        return (1..=n).rev().map(|k| 1.0 / k as f64).sum();
    }
    let x = n as f64;
    let inv2 = 1.0 / (x * x);
    x.ln() + EULER_GAMMA + 0.5 / x - inv2 / 12.0 + inv2 * inv2 / 120.0
}

/// `sum_{k=from}^{to} 1/k`; zero when the range is empty.
pub fn harmonic_range(from: u64, to: u64) -> f64 {
    if from == 0 || from > to {
        return 0.0;
    }
    if to - from < HARMONIC_EXACT_LIMIT {
        return (from..=to).rev().map(|k| 1.0 / k as f64).sum();
    }
    harmonic(to) - harmonic(from - 1)
}

/// `(1-a)^(1-n) * (-ln a - sum_{r=1}^{n-1} (1-a)^r / r)` for `0 < a < 1`.
pub fn unseen_shannon_tail(a: f64, n: u64) -> f64 {
    if !(a > 0.0 && a < 1.0) || n == 0 {
        return 0.0;
    }
    let b = 1.0 - a;
    let nf = n as f64;

    let tail = if a * nf > TAIL_SERIES_SWITCH {
        let mut sum = 0.0;
        let mut power = 1.0;
        let mut j = 1.0;
        loop {
            power *= b;
            let term = power / (nf - 1.0 + j);
            sum += term;
            if term <= f64::EPSILON * sum {
                break;
            }
            j += 1.0;
        }
        sum
    } else {
        let mut partial = 0.0;
        let mut power = 1.0;
        for r in 1..n {
            power *= b;
            partial += power / r as f64;
        }
        let scale = ((1.0 - nf) * (-a).ln_1p()).exp();
        scale * (-a.ln() - partial)
    };
    tail.max(0.0)
}
