use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::itinerary::GeneratedItinerary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartySize {
    Solo,
    Couple,
    Friends,
    Family,
}

impl PartySize {
    /// Phrasing used when describing the party to the generation model.
    pub fn description(&self) -> &'static str {
        match self {
            PartySize::Solo => "Just Me",
            PartySize::Couple => "a Couple (2 people)",
            PartySize::Friends => "a Group of Friends",
            PartySize::Family => "a Family",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    Moderate,
    Packed,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Packed => "packed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub name: String,
    pub location: TripLocation,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub party_size: PartySize,
    pub budget: f64,
    pub pace: Pace,
    // Populated by the generate-review-save flow, null until then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_itinerary: Option<GeneratedItinerary>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub name: String,
    pub location: TripLocation,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub party_size: PartySize,
    pub budget: f64,
    pub pace: Pace,
}

impl CreateTripRequest {
    /// Validates the submitted trip basics and returns the inclusive duration
    /// in days. The duration is always recomputed server-side from the dates.
    pub fn validate(&self) -> Result<i64, String> {
        if self.name.trim().is_empty() {
            return Err("Trip name is required".to_string());
        }
        if self.location.name.trim().is_empty() {
            return Err("Destination is required".to_string());
        }
        if self.end_date < self.start_date {
            return Err("End date must be on or after the start date".to_string());
        }
        if self.budget <= 0.0 {
            return Err("Budget must be greater than zero".to_string());
        }
        Ok((self.end_date - self.start_date).num_days() + 1)
    }

    pub fn into_trip(self, owner: ObjectId, duration_days: i64) -> Trip {
        Trip {
            id: None,
            user_id: owner,
            name: self.name,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            duration_days,
            party_size: self.party_size,
            budget: self.budget,
            pace: self.pace,
            generated_itinerary: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }
}
