use serde_json::json;

use wanderplan_api::models::itinerary::GeneratedItinerary;
use wanderplan_api::models::trip::Trip;

#[test]
fn test_itinerary_round_trips_unchanged() {
    let original = json!({
        "tripName": "Beach",
        "hotels": [
            {
                "name": "Playa Grand",
                "address": "Blvd Kukulcan Km 9",
                "priceRange": "$120-180/night",
                "rating": 4.5
            }
        ],
        "itinerary": {
            "day1": {
                "theme": "Arrival and relaxation",
                "morning": "Check in and hit the beach",
                "afternoon": "Lunch at the marina",
                "evening": "Sunset dinner"
            }
        },
        "budgetSummary": { "lodging": 600, "food": 250 }
    });

    let parsed: GeneratedItinerary = serde_json::from_value(original.clone()).unwrap();
    let round_tripped = serde_json::to_value(&parsed).unwrap();

    assert_eq!(round_tripped, original);
}

#[test]
fn test_unrecognized_keys_are_preserved() {
    let original = json!({
        "tripName": "Beach",
        "localTips": ["Carry small bills", "Taxis are cash only"],
        "weatherNote": "Hurricane season starts in June"
    });

    let parsed: GeneratedItinerary = serde_json::from_value(original.clone()).unwrap();
    assert_eq!(
        parsed.extra.get("weatherNote"),
        Some(&json!("Hurricane season starts in June"))
    );

    let round_tripped = serde_json::to_value(&parsed).unwrap();
    assert_eq!(round_tripped, original);
}

#[test]
fn test_partial_hotels_are_tolerated() {
    let parsed: GeneratedItinerary = serde_json::from_value(json!({
        "hotels": [ { "name": "Playa Grand" }, { "rating": 3.9 }, {} ]
    }))
    .unwrap();

    assert_eq!(parsed.hotels.len(), 3);
    let first = parsed.hotels[0].details().unwrap();
    assert_eq!(first.name.as_deref(), Some("Playa Grand"));
    assert!(first.rating.is_none());
    assert_eq!(parsed.hotels[1].details().unwrap().rating, Some(3.9));
}

#[test]
fn test_free_form_day_entries_are_accepted() {
    let original = json!({
        "itinerary": {
            "day1": "Relax on the beach all day",
            "day2": { "theme": "Ruins", "morning": "Tour Chichen Itza" }
        }
    });

    let parsed: GeneratedItinerary = serde_json::from_value(original.clone()).unwrap();
    assert!(parsed.itinerary["day1"].plan().is_none());
    assert_eq!(
        parsed.itinerary["day2"].plan().unwrap().theme.as_deref(),
        Some("Ruins")
    );

    let round_tripped = serde_json::to_value(&parsed).unwrap();
    assert_eq!(round_tripped, original);
}

#[test]
fn test_string_hotels_are_accepted() {
    let original = json!({
        "hotels": ["Playa Grand", "Hotel Sol"]
    });

    let parsed: GeneratedItinerary = serde_json::from_value(original.clone()).unwrap();
    assert_eq!(parsed.hotels.len(), 2);
    assert!(parsed.hotels[0].details().is_none());

    let round_tripped = serde_json::to_value(&parsed).unwrap();
    assert_eq!(round_tripped, original);
}

#[test]
fn test_empty_object_is_a_valid_itinerary() {
    let parsed: GeneratedItinerary = serde_json::from_value(json!({})).unwrap();
    assert!(parsed.trip_name.is_none());
    assert!(parsed.hotels.is_empty());
    assert!(parsed.itinerary.is_empty());
}

#[test]
fn test_trip_document_round_trips_with_saved_itinerary() {
    let trip_doc = json!({
        "_id": { "$oid": "66b1f0a2c8d9e3a4b5c6d7e8" },
        "userId": { "$oid": "66b1f0a2c8d9e3a4b5c6d7e9" },
        "name": "Beach",
        "location": { "name": "Cancun", "lat": 21.1619, "lng": -86.8515 },
        "startDate": "2025-06-01",
        "endDate": "2025-06-05",
        "durationDays": 5,
        "partySize": "couple",
        "budget": 1000.0,
        "pace": "relaxed",
        "generatedItinerary": {
            "tripName": "Beach",
            "budgetSummary": { "lodging": 600 }
        },
        "createdAt": "2025-05-20T12:00:00Z"
    });

    let trip: Trip = serde_json::from_value(trip_doc).unwrap();
    assert_eq!(trip.duration_days, 5);

    let itinerary = trip.generated_itinerary.as_ref().unwrap();
    assert_eq!(itinerary.trip_name.as_deref(), Some("Beach"));
    assert_eq!(itinerary.budget_summary.get("lodging"), Some(&json!(600)));
}
