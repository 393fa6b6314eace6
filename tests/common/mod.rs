use chrono::{NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;

use wanderplan_api::models::trip::{Pace, PartySize, Trip, TripLocation};

#[allow(dead_code)]
pub fn sample_trip() -> Trip {
    Trip {
        id: Some(ObjectId::new()),
        user_id: ObjectId::new(),
        name: "Beach".to_string(),
        location: TripLocation {
            name: "Cancun".to_string(),
            lat: 21.1619,
            lng: -86.8515,
        },
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
        duration_days: 5,
        party_size: PartySize::Couple,
        budget: 1000.0,
        pace: Pace::Relaxed,
        generated_itinerary: None,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}
