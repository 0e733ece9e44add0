// counters.rs - Ordered named counters

/// An ordered mapping from metric name to a non-negative count.
///
/// Insertion order is the output column order, so the same inputs always
/// serialize to the same header. Re-inserting an existing key replaces its
/// value in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSet {
    entries: Vec<(String, u64)>,
}

impl CounterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: u64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// New set holding `self` followed by every key of `other` not already present
    pub fn union(&self, other: &CounterSet) -> CounterSet {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            if !merged.contains_key(key) {
                merged.entries.push((key.to_string(), value));
            }
        }
        merged
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for CounterSet {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut set = CounterSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}
