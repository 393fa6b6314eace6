use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use wanderplan_api::models::trip::{CreateTripRequest, Pace, PartySize, TripLocation};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request() -> CreateTripRequest {
    CreateTripRequest {
        name: "Beach".to_string(),
        location: TripLocation {
            name: "Cancun".to_string(),
            lat: 21.1619,
            lng: -86.8515,
        },
        start_date: date(2025, 6, 1),
        end_date: date(2025, 6, 5),
        party_size: PartySize::Couple,
        budget: 1000.0,
        pace: Pace::Relaxed,
    }
}

#[test]
fn test_duration_is_inclusive_day_count() {
    assert_eq!(request().validate().unwrap(), 5);
}

#[test]
fn test_single_day_trip_has_duration_one() {
    let mut req = request();
    req.end_date = req.start_date;
    assert_eq!(req.validate().unwrap(), 1);
}

#[test]
fn test_inverted_dates_are_rejected() {
    let mut req = request();
    req.start_date = date(2025, 6, 5);
    req.end_date = date(2025, 6, 1);
    assert!(req.validate().is_err());
}

#[test]
fn test_blank_name_is_rejected() {
    let mut req = request();
    req.name = "   ".to_string();
    assert!(req.validate().is_err());
}

#[test]
fn test_blank_destination_is_rejected() {
    let mut req = request();
    req.location.name = String::new();
    assert!(req.validate().is_err());
}

#[test]
fn test_non_positive_budget_is_rejected() {
    let mut req = request();
    req.budget = 0.0;
    assert!(req.validate().is_err());
}

#[test]
fn test_into_trip_starts_without_itinerary() {
    let req = request();
    let duration = req.validate().unwrap();
    let owner = ObjectId::new();
    let trip = req.into_trip(owner, duration);

    assert_eq!(trip.user_id, owner);
    assert_eq!(trip.duration_days, 5);
    assert!(trip.generated_itinerary.is_none());
    assert!(trip.created_at.is_some());
    assert!(trip.updated_at.is_none());
}

#[test]
fn test_party_size_and_pace_wire_format() {
    let req: CreateTripRequest = serde_json::from_value(serde_json::json!({
        "name": "Beach",
        "location": { "name": "Cancun", "lat": 21.1619, "lng": -86.8515 },
        "startDate": "2025-06-01",
        "endDate": "2025-06-05",
        "partySize": "couple",
        "budget": 1000,
        "pace": "relaxed"
    }))
    .unwrap();

    assert_eq!(req.party_size, PartySize::Couple);
    assert_eq!(req.pace, Pace::Relaxed);
    assert_eq!(req.validate().unwrap(), 5);
}

#[test]
fn test_unknown_party_size_fails_to_parse() {
    let result = serde_json::from_value::<PartySize>(serde_json::json!("crowd"));
    assert!(result.is_err());
}

#[test]
fn test_party_descriptions_for_prompting() {
    assert_eq!(PartySize::Solo.description(), "Just Me");
    assert_eq!(PartySize::Couple.description(), "a Couple (2 people)");
    assert_eq!(PartySize::Friends.description(), "a Group of Friends");
    assert_eq!(PartySize::Family.description(), "a Family");
}
