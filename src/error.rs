use thiserror::Error;

use crate::models::FieldKind;

/// Recoverable failures of the booking form and the results reader.
///
/// None of these are fatal: form mutations that fail leave the form untouched,
/// and the results reader turns them into a reduced or "no such destination" page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` has no counter `{counter}`")]
    UnknownCounter { field: String, counter: String },

    #[error("field `{field}` needs a value for counter `{counter}`")]
    MissingCounter { field: String, counter: String },

    #[error("field `{field}` expects a {expected:?} value, got {actual:?}")]
    FieldKindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("field `{0}` is defined more than once")]
    DuplicateField(String),

    #[error("no destination matches location `{0}`")]
    LocationNotFound(String),

    #[error("query field `{key}` could not be read: {reason}")]
    MalformedQuery { key: String, reason: String },
}

pub type BookingResult<T> = Result<T, BookingError>;
