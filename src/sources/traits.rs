use crate::models::{LocationRecord, RoomOffer};
use crate::sources::navigation::Navigation;
use crate::sources::types::SearchCriteria;
use anyhow::Result;
use async_trait::async_trait;

/// Directory of destinations the location input can pick from
/// A static list stands in today; a real search service can replace it
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    /// Records whose label contains `query`, case-insensitive
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>>;

    /// Exact lookup by key
    async fn find(&self, key: &str) -> Result<Option<LocationRecord>>;

    /// Options shown before the user types anything
    fn default_options(&self) -> Vec<LocationRecord>;
}

/// Source of room offers for a resolved search
#[async_trait]
pub trait OfferInventory: Send + Sync {
    async fn list_offers(
        &self,
        location: Option<&LocationRecord>,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RoomOffer>>;

    /// Get the name of the inventory source
    fn source_name(&self) -> &'static str;
}

/// Performs the actual route transition for a submitted form
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, target: &Navigation) -> Result<()>;
}
