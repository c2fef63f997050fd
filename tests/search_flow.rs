use std::sync::Arc;

use booking_search::models::{FieldValue, LocationRecord};
use booking_search::sources::{RecordingNavigator, StaticLocationDirectory, StaticOfferInventory};
use booking_search::{BookingForm, ResultsPage, ResultsReader};
use chrono::NaiveDate;

fn setup() -> (BookingForm, ResultsReader) {
    let directory = Arc::new(StaticLocationDirectory::new());
    let form = BookingForm::new(directory.clone()).unwrap();
    let reader = ResultsReader::new(directory, Arc::new(StaticOfferInventory::new()));
    (form, reader)
}

#[tokio::test]
async fn barcelona_search_round_trips_through_the_url() {
    let (mut form, reader) = setup();
    let navigator = RecordingNavigator::new();

    form.set_field_value(
        "location",
        FieldValue::Location(Some(LocationRecord::new("barcelona", "Barcelona"))),
    )
    .unwrap();
    form.set_field_value("checkIn", FieldValue::Date(NaiveDate::from_ymd_opt(2024, 6, 1)))
        .unwrap();
    form.set_field_value("checkOut", FieldValue::Date(NaiveDate::from_ymd_opt(2024, 6, 5)))
        .unwrap();
    form.set_guest_counter("guests", "adults", 2).unwrap();

    form.submit_to(&navigator).unwrap();
    let target = navigator.last().unwrap();
    assert_eq!(
        target.target(),
        "/search?location=barcelona&checkIn=01-06-2024&checkOut=05-06-2024&guests-adults=2&guests-children=0&guests-infants=0"
    );

    let page = reader.load(&target.query).await.unwrap();
    let ResultsPage::Results(results) = page else {
        panic!("expected a results page");
    };
    assert_eq!(results.location.unwrap().label, "Barcelona");
    assert_eq!(results.offers, StaticOfferInventory::new().offers());
}

#[tokio::test]
async fn every_counter_and_date_survives_the_round_trip() {
    let cases = [
        ("seoul", (2025, 1, 31), (2025, 2, 2), [1, 0, 0]),
        ("new-york", (2024, 12, 24), (2025, 1, 2), [10, 10, 10]),
        ("lisbon", (2024, 2, 29), (2024, 3, 1), [0, 3, 1]),
    ];

    for (key, check_in, check_out, [adults, children, infants]) in cases {
        let (mut form, reader) = setup();
        let location = reader.resolve_location(key).await.unwrap();
        let check_in = NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2);
        let check_out = NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2);

        form.set_field_value("location", FieldValue::Location(Some(location)))
            .unwrap();
        form.set_field_value("checkIn", FieldValue::Date(check_in)).unwrap();
        form.set_field_value("checkOut", FieldValue::Date(check_out)).unwrap();
        form.set_guest_counter("guests", "adults", adults).unwrap();
        form.set_guest_counter("guests", "children", children).unwrap();
        form.set_guest_counter("guests", "infants", infants).unwrap();

        let criteria = reader.parse_query(&form.submit().query);

        assert_eq!(criteria.location.as_deref(), Some(key));
        assert_eq!(criteria.check_in, check_in);
        assert_eq!(criteria.check_out, check_out);
        assert_eq!(criteria.guests.adults, Some(adults as u32));
        assert_eq!(criteria.guests.children, Some(children as u32));
        assert_eq!(criteria.guests.infants, Some(infants as u32));
        assert!(criteria.is_complete());
    }
}

#[tokio::test]
async fn untouched_form_yields_partial_results() {
    let (form, reader) = setup();

    let page = reader.load(&form.submit().query).await.unwrap();
    let ResultsPage::Results(results) = page else {
        panic!("expected a results page");
    };
    assert!(results.is_partial());
    assert_eq!(
        results.criteria.unspecified,
        vec!["location", "checkIn", "checkOut"]
    );
    assert_eq!(results.criteria.guests.adults, Some(1));
}
