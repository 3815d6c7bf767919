use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::collections::HashSet;

/// A set of photo keys.
///
/// Persisted as a JSON array of keys (sorted, for stable files) rather than as
/// an object; reading an array with repeated keys collapses them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdSet(HashSet<String>);

impl IdSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from any sequence of keys, dropping duplicates.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// The keys in ascending order.
    #[must_use]
    pub fn to_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.iter().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns true if the key was not already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn union(&self, other: &IdSet) -> IdSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Walks the smaller of the two sets and probes the larger one.
    #[must_use]
    pub fn intersection(&self, other: &IdSet) -> IdSet {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        Self(
            small
                .0
                .iter()
                .filter(|k| large.0.contains(*k))
                .cloned()
                .collect(),
        )
    }

    #[must_use]
    pub fn is_subset(&self, other: &IdSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl<S: Into<String>> FromIterator<S> for IdSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_keys(iter)
    }
}

impl Serialize for IdSet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.to_keys())
    }
}

impl<'de> Deserialize<'de> for IdSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_keys(keys))
    }
}
