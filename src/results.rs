//! Results page: decode the submitted query, resolve the destination, list offers.

use crate::config::Settings;
use crate::error::BookingError;
use crate::models::{LocationRecord, RoomOffer};
use crate::query::SearchQuery;
use crate::sources::traits::{LocationDirectory, OfferInventory};
use crate::sources::types::SearchCriteria;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Offers found for a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub criteria: SearchCriteria,
    /// `None` when the query named no location
    pub location: Option<LocationRecord>,
    pub offers: Vec<RoomOffer>,
}

impl SearchResults {
    /// Some query fields were missing or unreadable
    pub fn is_partial(&self) -> bool {
        !self.criteria.is_complete()
    }

    /// Page title, e.g. "Rooms in Barcelona at June 1, 2024"
    pub fn headline(&self) -> String {
        let place = self
            .location
            .as_ref()
            .map(|l| l.label.as_str())
            .unwrap_or("anywhere");
        let when = self
            .criteria
            .check_in
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "any date".to_string());
        format!("Rooms in {} at {}", place, when)
    }
}

/// What the results page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsPage {
    Results(SearchResults),
    /// The query named a location key the directory does not know
    NoSuchDestination { key: String },
}

/// Reads a submitted search back from its query string
pub struct ResultsReader {
    directory: Arc<dyn LocationDirectory>,
    inventory: Arc<dyn OfferInventory>,
    settings: Settings,
}

impl ResultsReader {
    pub fn new(directory: Arc<dyn LocationDirectory>, inventory: Arc<dyn OfferInventory>) -> Self {
        Self::with_settings(directory, inventory, Settings::default())
    }

    pub fn with_settings(
        directory: Arc<dyn LocationDirectory>,
        inventory: Arc<dyn OfferInventory>,
        settings: Settings,
    ) -> Self {
        Self {
            directory,
            inventory,
            settings,
        }
    }

    /// Decode a raw query string into typed criteria
    pub fn parse_query(&self, raw: &str) -> SearchCriteria {
        let criteria =
            SearchCriteria::from_query(&SearchQuery::parse(raw), &self.settings.date_format);
        for issue in &criteria.issues {
            warn!("{}", issue);
        }
        criteria
    }

    /// Exact-key lookup in the location directory
    pub async fn resolve_location(&self, key: &str) -> Result<LocationRecord> {
        self.directory
            .find(key)
            .await
            .with_context(|| format!("Location lookup for {:?} failed", key))?
            .ok_or_else(|| BookingError::LocationNotFound(key.to_string()).into())
    }

    pub async fn list_offers(
        &self,
        location: Option<&LocationRecord>,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RoomOffer>> {
        self.inventory
            .list_offers(location, criteria)
            .await
            .with_context(|| format!("Failed to list offers from {}", self.inventory.source_name()))
    }

    /// Build the results page for a raw query string
    pub async fn load(&self, raw: &str) -> Result<ResultsPage> {
        let criteria = self.parse_query(raw);

        let location = match criteria.location.as_deref() {
            Some(key) => match self.resolve_location(key).await {
                Ok(record) => Some(record),
                Err(err) => {
                    if let Some(BookingError::LocationNotFound(key)) =
                        err.downcast_ref::<BookingError>()
                    {
                        warn!("No destination for location {:?}", key);
                        return Ok(ResultsPage::NoSuchDestination { key: key.clone() });
                    }
                    return Err(err);
                }
            },
            None => None,
        };

        let offers = self.list_offers(location.as_ref(), &criteria).await?;
        let results = SearchResults {
            criteria,
            location,
            offers,
        };

        if results.is_partial() {
            info!("Showing {} offers for a partial search", results.offers.len());
        } else {
            info!("{}: {} offers", results.headline(), results.offers.len());
        }
        Ok(ResultsPage::Results(results))
    }
}
