use serde::Serialize;
use serde_json::Value;

/// Normalized shape of a round-trip flight search. The option lists come back
/// from the upstream provider as-is; only the envelope around them is fixed.
#[derive(Debug, Serialize)]
pub struct FlightResults {
    pub origin: String,
    pub destination: String,
    #[serde(rename = "departDate")]
    pub depart_date: String,
    #[serde(rename = "returnDate")]
    pub return_date: String,
    pub best_flights: Value,
    pub flights: Value,
    pub search_info: SearchInfo,
    pub booking_link: String,
}

#[derive(Debug, Serialize)]
pub struct SearchInfo {
    pub currency: String,
    pub total_results: i64,
}
