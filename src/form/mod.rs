pub mod schema;

pub use schema::{FieldSpec, FormSchema};

use crate::config::Settings;
use crate::error::{BookingError, BookingResult};
use crate::models::{Field, FieldKind, FieldValue, GuestCounter, LocationRecord, MinDate};
use crate::query::SearchQuery;
use crate::sources::navigation::Navigation;
use crate::sources::traits::{LocationDirectory, NavigationSink};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Outcome of a location search issued by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSearch {
    /// The newest request; its options were applied to the form
    Current {
        token: u64,
        options: Vec<LocationRecord>,
    },
    /// A newer search was issued while this one was in flight
    Superseded { token: u64 },
}

/// Booking form state: named fields, location options and submission
pub struct BookingForm {
    fields: Vec<Field>,
    settings: Settings,
    directory: Arc<dyn LocationDirectory>,
    location_options: Mutex<Vec<LocationRecord>>,
    search_token: AtomicU64,
}

impl BookingForm {
    /// Create the standard booking form
    pub fn new(directory: Arc<dyn LocationDirectory>) -> BookingResult<Self> {
        Self::with_schema(FormSchema::booking(), directory, Settings::default())
    }

    /// Create a form from a custom schema and settings
    pub fn with_schema(
        schema: FormSchema,
        directory: Arc<dyn LocationDirectory>,
        settings: Settings,
    ) -> BookingResult<Self> {
        let fields = schema.build()?;
        let options = directory.default_options();
        debug!("Booking form mounted with {} fields", fields.len());

        Ok(Self {
            fields,
            settings,
            directory,
            location_options: Mutex::new(options),
            search_token: AtomicU64::new(0),
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> BookingResult<&mut Field> {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => Ok(field),
            None => {
                warn!("Ignoring update of unknown field {:?}", name);
                Err(BookingError::UnknownField(name.to_string()))
            }
        }
    }

    /// Replace a field's value. Date ordering is left to the caller.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) -> BookingResult<()> {
        let field = self.field_mut(name)?;

        if field.kind() != value.kind() {
            warn!("Ignoring {:?} value for field {:?}", value.kind(), name);
            return Err(BookingError::FieldKindMismatch {
                field: name.to_string(),
                expected: field.kind(),
                actual: value.kind(),
            });
        }

        match (&mut field.value, value) {
            (FieldValue::PeopleCount(current), FieldValue::PeopleCount(requested)) => {
                let values = matching_counter_values(name, current, &requested)?;
                // Schema bounds apply; only values are taken from the replacement
                for (counter, value) in current.iter_mut().zip(values) {
                    counter.set(value);
                }
            }
            (slot, other) => *slot = other,
        }
        Ok(())
    }

    pub fn guest_counter(&self, field: &str, counter: &str) -> Option<&GuestCounter> {
        match &self.field(field)?.value {
            FieldValue::PeopleCount(counters) => counters.iter().find(|c| c.name == counter),
            _ => None,
        }
    }

    /// Set a guest counter, clamped to its bounds; returns the stored value
    pub fn set_guest_counter(
        &mut self,
        field: &str,
        counter: &str,
        new_value: i64,
    ) -> BookingResult<u32> {
        let target = self.field_mut(field)?;
        let counters = match &mut target.value {
            FieldValue::PeopleCount(counters) => counters,
            other => {
                return Err(BookingError::FieldKindMismatch {
                    field: field.to_string(),
                    expected: FieldKind::PeopleCount,
                    actual: other.kind(),
                })
            }
        };

        match counters.iter_mut().find(|c| c.name == counter) {
            Some(c) => {
                let stored = c.set(new_value);
                if i64::from(stored) != new_value {
                    debug!("Clamped {}-{} from {} to {}", field, counter, new_value, stored);
                }
                Ok(stored)
            }
            None => {
                warn!("Ignoring update of unknown counter {}-{}", field, counter);
                Err(BookingError::UnknownCounter {
                    field: field.to_string(),
                    counter: counter.to_string(),
                })
            }
        }
    }

    pub fn increment_guest(&mut self, field: &str, counter: &str) -> BookingResult<u32> {
        let current = self.current_count(field, counter)?;
        self.set_guest_counter(field, counter, current + 1)
    }

    pub fn decrement_guest(&mut self, field: &str, counter: &str) -> BookingResult<u32> {
        let current = self.current_count(field, counter)?;
        self.set_guest_counter(field, counter, current - 1)
    }

    fn current_count(&self, field: &str, counter: &str) -> BookingResult<i64> {
        if self.field(field).is_none() {
            return Err(BookingError::UnknownField(field.to_string()));
        }
        self.guest_counter(field, counter)
            .map(|c| i64::from(c.value))
            .ok_or_else(|| BookingError::UnknownCounter {
                field: field.to_string(),
                counter: counter.to_string(),
            })
    }

    pub fn total_guests(&self, field: &str) -> u32 {
        match self.field(field).map(|f| &f.value) {
            Some(FieldValue::PeopleCount(counters)) => counters.iter().map(|c| c.value).sum(),
            _ => 0,
        }
    }

    /// "1 guest", "3 guests", or empty when nobody is counted
    pub fn guests_summary(&self, field: &str) -> String {
        match self.total_guests(field) {
            0 => String::new(),
            1 => "1 guest".to_string(),
            n => format!("{} guests", n),
        }
    }

    /// Field that receives focus once `name` is filled
    pub fn next_focus(&self, name: &str) -> Option<&str> {
        self.field(name)?.focus_on_next.as_deref()
    }

    /// Earliest date the picker for `name` should offer
    pub fn min_date(&self, name: &str, today: NaiveDate) -> Option<NaiveDate> {
        match self.field(name)?.min_date.as_ref()? {
            MinDate::Today => Some(today),
            MinDate::FromField(other) => match self.field(other)?.value {
                FieldValue::Date(date) => date,
                _ => None,
            },
        }
    }

    pub fn location_options(&self) -> Vec<LocationRecord> {
        self.location_options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Look up destinations for the location input.
    ///
    /// An empty or blank query returns the directory's default options instead
    /// of matching the whole directory.
    ///
    /// Every call takes a fresh token; when a newer search starts before this
    /// one resolves, the response is dropped and the options stay untouched.
    pub async fn search_locations(&self, query: &str) -> Result<LocationSearch> {
        let token = self.search_token.fetch_add(1, Ordering::SeqCst) + 1;

        let options = if query.trim().is_empty() {
            self.directory.default_options()
        } else {
            self.directory
                .search(query)
                .await
                .with_context(|| format!("Location search for {:?} failed", query))?
        };

        if self.search_token.load(Ordering::SeqCst) != token {
            debug!("Discarding superseded location search #{} ({:?})", token, query);
            return Ok(LocationSearch::Superseded { token });
        }

        *self
            .location_options
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = options.clone();
        Ok(LocationSearch::Current { token, options })
    }

    /// Flatten the form into query pairs, one per field and one per guest counter
    pub fn serialize(&self) -> SearchQuery {
        let mut query = SearchQuery::new();

        for field in &self.fields {
            match &field.value {
                FieldValue::Location(location) => {
                    let key = location.as_ref().map(|l| l.value.as_str()).unwrap_or("");
                    query.set(field.name.as_str(), key);
                }
                FieldValue::Date(date) => {
                    let formatted = date
                        .map(|d| d.format(&self.settings.date_format).to_string())
                        .unwrap_or_default();
                    query.set(field.name.as_str(), formatted);
                }
                FieldValue::PeopleCount(counters) => {
                    for counter in counters {
                        query.set(
                            format!("{}-{}", field.name, counter.name),
                            counter.value.to_string(),
                        );
                    }
                }
            }
        }

        query
    }

    /// Navigation target for the results route; the caller performs it
    pub fn submit(&self) -> Navigation {
        let navigation = Navigation {
            path: self.settings.results_route.clone(),
            query: self.serialize().to_query_string(),
        };
        info!("Booking form submitted: {}", navigation);
        navigation
    }

    /// Submit and hand the target to `sink`
    pub fn submit_to(&self, sink: &dyn NavigationSink) -> Result<Navigation> {
        let navigation = self.submit();
        sink.navigate(&navigation)
            .with_context(|| format!("Failed to navigate to {}", navigation))?;
        Ok(navigation)
    }
}

/// Requested value for each current counter, in schema order.
///
/// The replacement must name exactly the schema's counters, once each.
fn matching_counter_values(
    field: &str,
    current: &[GuestCounter],
    requested: &[GuestCounter],
) -> BookingResult<Vec<i64>> {
    for (i, counter) in requested.iter().enumerate() {
        let known = current.iter().any(|c| c.name == counter.name);
        let repeated = requested[..i].iter().any(|c| c.name == counter.name);
        if !known || repeated {
            warn!("Rejecting {} counters: unexpected {:?}", field, counter.name);
            return Err(BookingError::UnknownCounter {
                field: field.to_string(),
                counter: counter.name.clone(),
            });
        }
    }

    current
        .iter()
        .map(|counter| {
            requested
                .iter()
                .find(|c| c.name == counter.name)
                .map(|c| i64::from(c.value))
                .ok_or_else(|| {
                    warn!("Rejecting {} counters: {:?} is missing", field, counter.name);
                    BookingError::MissingCounter {
                        field: field.to_string(),
                        counter: counter.name.clone(),
                    }
                })
        })
        .collect()
}
