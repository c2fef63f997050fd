use crate::models::LocationRecord;
use crate::sources::traits::LocationDirectory;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Cities known to the static directory
pub fn cities() -> Vec<LocationRecord> {
    [
        ("new-york", "New York"),
        ("barcelona", "Barcelona"),
        ("los-angeles", "Los Angeles"),
        ("seoul", "Seoul"),
        ("busan", "Busan"),
        ("tokyo", "Tokyo"),
        ("paris", "Paris"),
        ("london", "London"),
        ("lisbon", "Lisbon"),
        ("madrid", "Madrid"),
        ("amsterdam", "Amsterdam"),
        ("stockholm", "Stockholm"),
    ]
    .into_iter()
    .map(|(value, label)| LocationRecord::new(value, label))
    .collect()
}

/// In-memory location directory
pub struct StaticLocationDirectory {
    records: Vec<LocationRecord>,
    defaults: Vec<LocationRecord>,
    latency: Duration,
}

impl StaticLocationDirectory {
    /// Directory over the built-in city list with no simulated latency
    pub fn new() -> Self {
        let records = cities();
        let defaults = records.iter().take(3).cloned().collect();
        Self::with_records(records, defaults)
    }

    pub fn with_records(records: Vec<LocationRecord>, defaults: Vec<LocationRecord>) -> Self {
        Self {
            records,
            defaults,
            latency: Duration::ZERO,
        }
    }

    /// Delay every search by `latency`, mimicking a remote lookup
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn matching(&self, query: &str) -> Vec<LocationRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Default for StaticLocationDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationDirectory for StaticLocationDirectory {
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let found = self.matching(query);
        debug!("Directory search {:?} matched {} locations", query, found.len());
        Ok(found)
    }

    async fn find(&self, key: &str) -> Result<Option<LocationRecord>> {
        Ok(self.records.iter().find(|record| record.value == key).cloned())
    }

    fn default_options(&self) -> Vec<LocationRecord> {
        self.defaults.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cities() -> StaticLocationDirectory {
        StaticLocationDirectory::with_records(
            vec![
                LocationRecord::new("barcelona", "Barcelona"),
                LocationRecord::new("new-york", "New York"),
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn search_matches_label_substring() {
        let found = two_cities().search("bar").await.unwrap();
        assert_eq!(found, vec![LocationRecord::new("barcelona", "Barcelona")]);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let found = two_cities().search("NEW y").await.unwrap();
        assert_eq!(found, vec![LocationRecord::new("new-york", "New York")]);
    }

    #[tokio::test]
    async fn find_requires_exact_key() {
        let directory = two_cities();
        assert_eq!(
            directory.find("barcelona").await.unwrap(),
            Some(LocationRecord::new("barcelona", "Barcelona"))
        );
        assert_eq!(directory.find("Barcelona").await.unwrap(), None);
        assert_eq!(directory.find("nowhere").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_search() {
        let directory = two_cities().with_latency(Duration::from_millis(600));

        let early = tokio::time::timeout(Duration::from_millis(599), directory.search("bar")).await;
        assert!(early.is_err());

        let started = tokio::time::Instant::now();
        let found = directory.search("bar").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(600));
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn built_in_list_offers_three_defaults() {
        let directory = StaticLocationDirectory::new();
        let keys: Vec<_> = directory
            .default_options()
            .into_iter()
            .map(|record| record.value)
            .collect();
        assert_eq!(keys, vec!["new-york", "barcelona", "los-angeles"]);
        assert_eq!(directory.search("bar").await.unwrap().len(), 1);
    }
}
