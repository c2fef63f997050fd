pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod query;
pub mod results;
pub mod sources;

pub use config::Settings;
pub use error::{BookingError, BookingResult};
pub use form::{BookingForm, LocationSearch};
pub use query::SearchQuery;
pub use results::{ResultsPage, ResultsReader, SearchResults};
