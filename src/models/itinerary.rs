use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Itinerary produced by the generation model. The model is only asked for
/// this shape, not guaranteed to return it, so every field is optional and
/// unrecognized keys are preserved through the flattened map rather than
/// dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hotels: Vec<HotelEntry>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub itinerary: HashMap<String, DayEntry>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub budget_summary: HashMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The model usually lists hotels as objects but sometimes as bare strings;
/// whatever came back is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HotelEntry {
    Detailed(HotelSuggestion),
    Other(Value),
}

impl HotelEntry {
    pub fn details(&self) -> Option<&HotelSuggestion> {
        match self {
            HotelEntry::Detailed(hotel) => Some(hotel),
            HotelEntry::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day of the plan: either structured time slots or whatever free-form
/// value the model produced for that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayEntry {
    Structured(DayPlan),
    Other(Value),
}

impl DayEntry {
    pub fn plan(&self) -> Option<&DayPlan> {
        match self {
            DayEntry::Structured(plan) => Some(plan),
            DayEntry::Other(_) => None,
        }
    }
}

/// Named time slots ("morning", "afternoon", ...) plus an optional theme line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(flatten)]
    pub slots: Map<String, Value>,
}
