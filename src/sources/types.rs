use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::query::SearchQuery;

pub const LOCATION_KEY: &str = "location";
pub const CHECK_IN_KEY: &str = "checkIn";
pub const CHECK_OUT_KEY: &str = "checkOut";
pub const GUESTS_FIELD: &str = "guests";
pub const GUEST_COUNTERS: [&str; 3] = ["adults", "children", "infants"];

/// Guest counts read back from a query; `None` when absent or unreadable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub infants: Option<u32>,
}

impl GuestCounts {
    pub fn total(&self) -> u32 {
        [self.adults, self.children, self.infants]
            .iter()
            .map(|count| count.unwrap_or(0))
            .sum()
    }
}

/// Typed search parameters decoded from a results-page query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Location key, as produced by the booking form
    pub location: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: GuestCounts,
    /// Query keys that were absent or empty
    pub unspecified: Vec<String>,
    /// Query keys that were present but unreadable
    #[serde(skip)]
    pub issues: Vec<BookingError>,
}

impl SearchCriteria {
    /// Decode a query; missing or malformed fields become unspecified
    pub fn from_query(query: &SearchQuery, date_format: &str) -> Self {
        let mut criteria = SearchCriteria::default();

        criteria.location = criteria.text(query, LOCATION_KEY);
        criteria.check_in = criteria.date(query, CHECK_IN_KEY, date_format);
        criteria.check_out = criteria.date(query, CHECK_OUT_KEY, date_format);

        let [adults, children, infants] =
            GUEST_COUNTERS.map(|counter| criteria.count(query, &guest_key(counter)));
        criteria.guests = GuestCounts {
            adults,
            children,
            infants,
        };

        criteria
    }

    /// True when every field of the query contract was readable
    pub fn is_complete(&self) -> bool {
        self.unspecified.is_empty() && self.issues.is_empty()
    }

    fn text(&mut self, query: &SearchQuery, key: &str) -> Option<String> {
        match query.get(key) {
            Some(value) if !value.trim().is_empty() => Some(value.to_string()),
            _ => {
                self.unspecified.push(key.to_string());
                None
            }
        }
    }

    fn date(&mut self, query: &SearchQuery, key: &str, format: &str) -> Option<NaiveDate> {
        let raw = self.text(query, key)?;
        match NaiveDate::parse_from_str(&raw, format) {
            Ok(date) => Some(date),
            Err(err) => {
                self.issues.push(BookingError::MalformedQuery {
                    key: key.to_string(),
                    reason: format!("`{}` is not a date: {}", raw, err),
                });
                None
            }
        }
    }

    fn count(&mut self, query: &SearchQuery, key: &str) -> Option<u32> {
        let raw = self.text(query, key)?;
        match raw.trim().parse::<u32>() {
            Ok(count) => Some(count),
            Err(err) => {
                self.issues.push(BookingError::MalformedQuery {
                    key: key.to_string(),
                    reason: format!("`{}` is not a guest count: {}", raw, err),
                });
                None
            }
        }
    }
}

/// Query key of one guest counter, e.g. `guests-adults`
pub fn guest_key(counter: &str) -> String {
    format!("{}-{}", GUESTS_FIELD, counter)
}
