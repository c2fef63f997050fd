use crate::models::{LocationRecord, RoomOffer};
use crate::sources::traits::OfferInventory;
use crate::sources::types::SearchCriteria;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Fixed offer list standing in for an availability service
pub struct StaticOfferInventory {
    offers: Vec<RoomOffer>,
}

impl StaticOfferInventory {
    pub fn new() -> Self {
        Self::with_offers(vec![
            RoomOffer::new("Hotel 5 Stars", 155),
            RoomOffer::new("Cozy House 56", 100),
            RoomOffer::new("Room in center", 70),
        ])
    }

    pub fn with_offers(offers: Vec<RoomOffer>) -> Self {
        Self { offers }
    }

    pub fn offers(&self) -> &[RoomOffer] {
        &self.offers
    }
}

impl Default for StaticOfferInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OfferInventory for StaticOfferInventory {
    async fn list_offers(
        &self,
        location: Option<&LocationRecord>,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<RoomOffer>> {
        // Same offers for every destination and date range
        info!(
            "Listing {} static offers for {}",
            self.offers.len(),
            location.map(|l| l.label.as_str()).unwrap_or("any location")
        );
        Ok(self.offers.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_offers_unchanged() {
        let inventory = StaticOfferInventory::new();
        let offers = inventory
            .list_offers(None, &SearchCriteria::default())
            .await
            .unwrap();

        let names: Vec<_> = offers.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Hotel 5 Stars", "Cozy House 56", "Room in center"]);
        assert_eq!(offers[0].price, 155);
    }
}
