use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directory entry mapping an internal key to a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub value: String,
    pub label: String,
}

impl LocationRecord {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Bookable room returned by an offer inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub name: String,
    /// Nightly price in whole dollars
    pub price: u32,
}

impl RoomOffer {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn display_price(&self) -> String {
        format!("{}$", self.price)
    }
}

/// One bounded guest counter (adults, children, infants)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounter {
    pub name: String,
    pub label: String,
    pub description: String,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl GuestCounter {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        value: u32,
        min: u32,
        max: u32,
    ) -> Self {
        let mut counter = Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            value: 0,
            min,
            max,
        };
        counter.set(i64::from(value));
        counter
    }

    /// Store `requested` bounded to `[min, max]` and return the stored value
    pub fn set(&mut self, requested: i64) -> u32 {
        // max wins over min for a misconfigured counter
        let bounded = requested.max(i64::from(self.min)).min(i64::from(self.max));
        self.value = bounded as u32;
        self.value
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > self.min
    }
}

/// Kind tag of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Location,
    Date,
    PeopleCount,
}

/// Current value of a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Location(Option<LocationRecord>),
    Date(Option<NaiveDate>),
    PeopleCount(Vec<GuestCounter>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Location(_) => FieldKind::Location,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::PeopleCount(_) => FieldKind::PeopleCount,
        }
    }
}

/// Lower bound rule for a date field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinDate {
    Today,
    /// Not before the value of another date field
    FromField(String),
}

/// One named, typed input slot in the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    pub focus_on_next: Option<String>,
    pub min_date: Option<MinDate>,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }
}
