use crate::error::{BookingError, BookingResult};
use crate::models::{Field, FieldValue, GuestCounter, MinDate};
use crate::sources::types::{CHECK_IN_KEY, CHECK_OUT_KEY, GUESTS_FIELD, LOCATION_KEY};
use std::collections::HashSet;

/// Declaration of one form field and its defaults
#[derive(Debug, Clone)]
pub struct FieldSpec {
    field: Field,
}

impl FieldSpec {
    pub fn location(name: impl Into<String>) -> Self {
        Self::with_value(name, FieldValue::Location(None))
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::with_value(name, FieldValue::Date(None))
    }

    pub fn people_count(name: impl Into<String>, counters: Vec<GuestCounter>) -> Self {
        Self::with_value(name, FieldValue::PeopleCount(counters))
    }

    fn with_value(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            field: Field {
                name: name.into(),
                value,
                focus_on_next: None,
                min_date: None,
            },
        }
    }

    pub fn focus_on_next(mut self, next: impl Into<String>) -> Self {
        self.field.focus_on_next = Some(next.into());
        self
    }

    pub fn min_date(mut self, rule: MinDate) -> Self {
        self.field.min_date = Some(rule);
        self
    }
}

/// Ordered set of field declarations
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    specs: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// The standard booking form: location, check-in, check-out and guests
    pub fn booking() -> Self {
        Self::new()
            .field(FieldSpec::location(LOCATION_KEY).focus_on_next(CHECK_IN_KEY))
            .field(
                FieldSpec::date(CHECK_IN_KEY)
                    .focus_on_next(CHECK_OUT_KEY)
                    .min_date(MinDate::Today),
            )
            .field(
                FieldSpec::date(CHECK_OUT_KEY)
                    .focus_on_next(GUESTS_FIELD)
                    .min_date(MinDate::FromField(CHECK_IN_KEY.to_string())),
            )
            .field(FieldSpec::people_count(
                GUESTS_FIELD,
                vec![
                    GuestCounter::new("adults", "Adults", "Ages 13+", 1, 0, 10),
                    GuestCounter::new("children", "Children", "Ages 4-12", 0, 0, 10),
                    GuestCounter::new("infants", "Infants", "Under 4 years old", 0, 0, 10),
                ],
            ))
    }

    /// Materialize the fields, rejecting duplicate names
    pub fn build(self) -> BookingResult<Vec<Field>> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.specs.len());
        for spec in self.specs {
            if !seen.insert(spec.field.name.clone()) {
                return Err(BookingError::DuplicateField(spec.field.name));
            }
            fields.push(spec.field);
        }
        Ok(fields)
    }
}
