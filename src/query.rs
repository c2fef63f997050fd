//! Flat key/value form state carried in a URL query string.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Ordered string pairs, encoded as `application/x-www-form-urlencoded`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pairs: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string; a leading `?` is ignored
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Replace the first entry for `key`, or append a new one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// First value stored for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut query = SearchQuery::new();
        query.set("location", "barcelona");
        query.set("checkIn", "01-06-2024");
        query.set("guests-adults", "2");

        assert_eq!(
            query.to_query_string(),
            "location=barcelona&checkIn=01-06-2024&guests-adults=2"
        );
    }

    #[test]
    fn set_replaces_existing_key() {
        let mut query = SearchQuery::new();
        query.set("guests-adults", "1");
        query.set("guests-adults", "3");

        assert_eq!(query.len(), 1);
        assert_eq!(query.get("guests-adults"), Some("3"));
    }

    #[test]
    fn escapes_and_unescapes_values() {
        let mut query = SearchQuery::new();
        query.set("location", "new york & co");
        let encoded = query.to_query_string();
        assert_eq!(encoded, "location=new+york+%26+co");

        let decoded = SearchQuery::parse(&format!("?{}", encoded));
        assert_eq!(decoded.get("location"), Some("new york & co"));
    }

    #[test]
    fn duplicate_keys_read_first_value() {
        let query = SearchQuery::parse("location=seoul&location=busan");
        assert_eq!(query.get("location"), Some("seoul"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn empty_input_parses_to_empty_query() {
        assert!(SearchQuery::parse("").is_empty());
        assert!(SearchQuery::parse("?").is_empty());
    }
}
