use std::collections::HashMap;
use std::collections::hash_map::Iter;
use std::hash::Hash;

/// Opaque species token.
pub trait Species: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> Species for T {}

/// Mapping species -> observed count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Species> {
    counts: HashMap<S, u64>,
}

impl<S: Species> FrequencyTable<S> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    #[inline]
    pub(crate) fn increment(&mut self, species: S) {
        *self.counts.entry(species).or_insert(0) += 1;
    }

    pub fn count(&self, species: &S) -> u64 {
        self.counts.get(species).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of species observed exactly `frequency` times.
    pub fn frequency_count(&self, frequency: u64) -> u64 {
        self.counts.values().filter(|&&c| c == frequency).count() as u64
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Counts in descending order, independent of hashing.
    pub fn sorted_counts(&self) -> Vec<u64> {
        let mut counts: Vec<u64> = self.counts().collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts
    }

    pub fn iter(&self) -> Iter<'_, S, u64> {
        self.counts.iter()
    }
}

impl<S: Species> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a table from `(species, count)` pairs; zero counts are dropped and
/// repeated species are summed.
impl<S: Species> FromIterator<(S, u64)> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for (species, count) in iter {
            if count == 0 {
                continue;
            }
            *counts.entry(species).or_insert(0) += count;
        }
        Self { counts }
    }
}

impl<'a, S: Species> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, &'a u64);
    type IntoIter = Iter<'a, S, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table() {
        let t: FrequencyTable<&str> = FrequencyTable::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.total(), 0);
        assert_eq!(t.count(&"a"), 0);
        assert_eq!(t.frequency_count(1), 0);
    }

    #[test]
    fn increment_inserts_then_counts() {
        let mut t = FrequencyTable::new();
        t.increment("a");
        t.increment("a");
        t.increment("b");
        assert_eq!(t.count(&"a"), 2);
        assert_eq!(t.count(&"b"), 1);
        assert_eq!(t.len(), 2);
        assert_eq!(t.total(), 3);
    }

    #[test]
    fn frequency_counts() {
        let t: FrequencyTable<&str> = [("a", 3), ("b", 1), ("c", 1), ("d", 2)]
            .into_iter()
            .collect();
        assert_eq!(t.frequency_count(1), 2);
        assert_eq!(t.frequency_count(2), 1);
        assert_eq!(t.frequency_count(3), 1);
        assert_eq!(t.frequency_count(4), 0);
    }

    #[test]
    fn sorted_counts_are_descending() {
        let t: FrequencyTable<&str> = [("a", 3), ("b", 1), ("c", 5), ("d", 1)]
            .into_iter()
            .collect();
        assert_eq!(t.sorted_counts(), vec![5, 3, 1, 1]);
    }

    #[test]
    fn from_iter_drops_zero_and_merges_duplicates() {
        let t: FrequencyTable<&str> = [("a", 0), ("b", 2), ("b", 1)].into_iter().collect();
        assert_eq!(t.len(), 1);
        assert_eq!(t.count(&"a"), 0);
        assert_eq!(t.count(&"b"), 3);
    }
}
