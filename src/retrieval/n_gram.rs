use crate::error::ProfileError;

/// Species are all contiguous windows of `n` activities, repeats kept.
///
/// Traces shorter than `n` contribute no species but still count as an
/// observation.
pub fn n_gram<O, A>(
    n: usize,
) -> Result<impl Fn(&O) -> Vec<Vec<A>> + Clone + Send + Sync + 'static, ProfileError>
where
    O: AsRef<[A]> + 'static,
    A: Clone + 'static,
{
    if n == 0 {
        return Err(ProfileError::InvalidConfig(
            "n-gram length must be > 0".to_string(),
        ));
    }
    Ok(move |trace: &O| {
        let activities = trace.as_ref();
        if activities.len() < n {
            return Vec::new();
        }
        activities.windows(n).map(|w| w.to_vec()).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(n: usize, trace: &[&'static str]) -> Vec<Vec<&'static str>> {
        let f = n_gram::<Vec<&'static str>, &'static str>(n).unwrap();
        f(&trace.to_vec())
    }

    #[test]
    fn windows_keep_repeats() {
        assert_eq!(
            grams(2, &["a", "b", "a", "b"]),
            vec![vec!["a", "b"], vec!["b", "a"], vec!["a", "b"]]
        );
        assert_eq!(grams(1, &["a", "a"]), vec![vec!["a"], vec!["a"]]);
    }

    #[test]
    fn short_and_empty_traces_yield_nothing() {
        assert!(grams(3, &["a", "b"]).is_empty());
        assert!(grams(1, &[]).is_empty());
        assert_eq!(grams(2, &["a", "b"]), vec![vec!["a", "b"]]);
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(
            n_gram::<Vec<char>, char>(0),
            Err(ProfileError::InvalidConfig(_))
        ));
    }

    #[test]
    fn works_on_byte_strings() {
        let f = n_gram::<String, u8>(2).unwrap();
        // String: AsRef<[u8]>
        assert_eq!(f(&"abc".to_string()), vec![b"ab".to_vec(), b"bc".to_vec()]);
    }
}
