//! The set of attractions the server has confirmed as narrated.

use std::collections::BTreeSet;

/// Normalizes an attraction name into a spoken-set key.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized, de-duplicated attraction keys.
///
/// Only ever replaced wholesale from a server-confirmed list; the client
/// never marks an attraction as narrated on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpokenSet {
    keys: BTreeSet<String>,
}

impl SpokenSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole set with the normalized form of `names`.
    ///
    /// Blank names are dropped. Applying the same list twice is a no-op.
    pub fn replace_with<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys = names
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
    }

    /// Whether `name` (in any casing/spacing) is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&normalize(name))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// The keys as sent in a `/speak` query.
    #[must_use]
    pub fn to_query_list(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_normalizes_and_deduplicates() {
        let mut set = SpokenSet::new();

        set.replace_with(["  Red Fort ", "red fort", "INDIA GATE", "   "]);

        assert_eq!(set.to_query_list(), vec!["india gate", "red fort"]);
    }

    #[test]
    fn test_replace_drops_keys_the_server_did_not_echo() {
        // Arrange
        let mut set = SpokenSet::new();
        set.replace_with(["red fort", "jama masjid"]);

        // Act
        set.replace_with(["red fort"]);

        // Assert
        assert_eq!(set.len(), 1);
        assert!(set.contains("Red Fort"));
        assert!(!set.contains("jama masjid"));
    }

    #[test]
    fn test_replace_is_idempotent() {
        let mut once = SpokenSet::new();
        once.replace_with(["Red Fort", "Qutub Minar"]);
        let mut twice = once.clone();

        twice.replace_with(["Red Fort", "Qutub Minar"]);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_replace_with_empty_list_clears() {
        let mut set = SpokenSet::new();
        set.replace_with(["red fort"]);

        set.replace_with(Vec::<String>::new());

        assert!(set.is_empty());
    }
}
