use std::sync::Arc;

use anyhow::Context;
use booking_search::form::FormSchema;
use booking_search::models::FieldValue;
use booking_search::sources::directory::cities;
use booking_search::sources::{RecordingNavigator, StaticLocationDirectory, StaticOfferInventory};
use booking_search::{BookingForm, LocationSearch, ResultsPage, ResultsReader, Settings};
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings {
            search_latency_ms: 600,
            ..Settings::default()
        },
    };

    info!("🏨 Booking Search - demo flow");
    info!("=============================");

    let directory = Arc::new(
        StaticLocationDirectory::with_records(cities(), settings.default_locations.clone())
            .with_latency(settings.search_latency()),
    );
    let inventory = Arc::new(StaticOfferInventory::new());

    let mut form =
        BookingForm::with_schema(FormSchema::booking(), directory.clone(), settings.clone())?;

    // Type into the location input and pick the first suggestion
    info!("Searching locations for \"bar\"...");
    let picked = match form.search_locations("bar").await? {
        LocationSearch::Current { options, .. } => options.into_iter().next(),
        LocationSearch::Superseded { .. } => None,
    }
    .context("No location matched \"bar\"")?;
    info!("Picked {} ({})", picked.label, picked.value);

    form.set_field_value("location", FieldValue::Location(Some(picked)))?;
    form.set_field_value("checkIn", FieldValue::Date(NaiveDate::from_ymd_opt(2024, 6, 1)))?;
    form.set_field_value("checkOut", FieldValue::Date(NaiveDate::from_ymd_opt(2024, 6, 5)))?;
    form.increment_guest("guests", "adults")?;
    info!("Guests: {}", form.guests_summary("guests"));

    let navigator = RecordingNavigator::new();
    let navigation = form.submit_to(&navigator)?;

    // The results page only sees the URL
    let reader = ResultsReader::with_settings(directory, inventory, settings);
    let page = reader.load(&navigation.query).await?;

    match &page {
        ResultsPage::Results(results) => {
            println!("{}", results.headline());
            println!();
            for (i, offer) in results.offers.iter().enumerate() {
                println!("{}. {} ({})", i + 1, offer.name, offer.display_price());
            }
            println!();
        }
        ResultsPage::NoSuchDestination { key } => {
            println!("No such destination: {}", key);
        }
    }

    let json = serde_json::to_string_pretty(&page)?;
    println!("{}", json);

    Ok(())
}
