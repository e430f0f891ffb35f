//! Ordered substring replacement dictionaries.
//!
//! Title dictionaries are applied entry by entry, so their order matters when
//! keys overlap (`"com."` vs `"com.example."`). [`Replacements`] keeps the
//! order in which entries appear in the source document instead of hashing
//! them.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// Ordered dictionary of literal `from → to` substring replacements.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the key's original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a replacement.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        match self.entries.iter_mut().find(|(key, _)| *key == from) {
            Some((_, value)) => *value = to,
            None => self.entries.push((from, to)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.insert(from, to);
        self
    }

    /// Iterate over `(from, to)` pairs in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Look up the replacement for a key.
    #[must_use]
    pub fn get(&self, from: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == from)
            .map(|(_, to)| to.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (from, to) in iter {
            replacements.insert(from, to);
        }
        replacements
    }
}

impl<'de> Deserialize<'de> for Replacements {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReplacementsVisitor;

        impl<'de> Visitor<'de> for ReplacementsVisitor {
            type Value = Replacements;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of string replacements")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut replacements = Replacements::new();
                while let Some((from, to)) = map.next_entry::<String, String>()? {
                    replacements.insert(from, to);
                }
                Ok(replacements)
            }
        }

        deserializer.deserialize_map(ReplacementsVisitor)
    }
}
