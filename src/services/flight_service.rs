use chrono::NaiveDate;
use serde_json::{json, Value};
use std::env;
use url::Url;

use crate::models::flight::{FlightResults, SearchInfo};

const SERP_API_URL: &str = "https://serpapi.com/search";
const GOOGLE_FLIGHTS_URL: &str = "https://www.google.com/travel/flights";

#[derive(Debug)]
pub enum FlightError {
    EnvironmentError(String),
    InvalidAirportCode(String),
    RequestError(String),
    ApiError(String),
}

impl std::fmt::Display for FlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
            FlightError::InvalidAirportCode(code) => {
                write!(f, "Invalid airport code: {}", code)
            }
            FlightError::RequestError(err) => write!(f, "Request error: {}", err),
            FlightError::ApiError(err) => write!(f, "API error: {}", err),
        }
    }
}

impl std::error::Error for FlightError {}

/// Airport codes must be exactly three letters; normalized to upper case
/// before they are sent upstream.
pub fn normalize_airport_code(code: &str) -> Result<String, FlightError> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(FlightError::InvalidAirportCode(code.to_string()))
    }
}

/// Deep link into Google Flights for the same search, handed to the frontend
/// as a booking shortcut.
pub fn booking_link(origin: &str, destination: &str, depart_date: &str, return_date: &str) -> String {
    let query = format!(
        "Flights from {} to {} on {} returning {}",
        origin, destination, depart_date, return_date
    );
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("q", &query)
        .finish();
    format!("{}?{}", GOOGLE_FLIGHTS_URL, encoded)
}

/// Flight search adapter over the SerpAPI google_flights engine.
pub struct FlightService {
    api_key: String,
    client: reqwest::Client,
}

impl FlightService {
    pub fn new() -> Result<Self, FlightError> {
        let api_key = env::var("SERP_API_KEY")
            .map_err(|_| FlightError::EnvironmentError("SERP_API_KEY not set".to_string()))?;

        let client = reqwest::Client::new();

        Ok(Self { api_key, client })
    }

    /// Round-trip search between two airports on the trip's stored dates.
    /// Upstream failures surface immediately; nothing is retried.
    pub async fn search_round_trip(
        &self,
        origin: &str,
        destination: &str,
        depart: NaiveDate,
        ret: NaiveDate,
    ) -> Result<FlightResults, FlightError> {
        let origin = normalize_airport_code(origin)?;
        let destination = normalize_airport_code(destination)?;

        let depart_date = depart.format("%Y-%m-%d").to_string();
        let return_date = ret.format("%Y-%m-%d").to_string();

        let url = Url::parse_with_params(
            SERP_API_URL,
            &[
                ("api_key", self.api_key.as_str()),
                ("engine", "google_flights"),
                ("departure_id", origin.as_str()),
                ("arrival_id", destination.as_str()),
                ("outbound_date", depart_date.as_str()),
                ("return_date", return_date.as_str()),
                ("currency", "USD"),
                ("hl", "en"),
                ("adults", "1"),
            ],
        )
        .map_err(|e| FlightError::RequestError(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FlightError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlightError::ApiError(format!(
                "Flight search responded with status: {}",
                response.status()
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| FlightError::ApiError(e.to_string()))?;

        Ok(FlightResults {
            booking_link: booking_link(&origin, &destination, &depart_date, &return_date),
            best_flights: data
                .get("best_flights")
                .cloned()
                .unwrap_or_else(|| json!([])),
            flights: data
                .pointer("/flights_results/results")
                .cloned()
                .unwrap_or_else(|| json!([])),
            search_info: SearchInfo {
                currency: data
                    .pointer("/search_metadata/currency")
                    .and_then(Value::as_str)
                    .unwrap_or("USD")
                    .to_string(),
                total_results: data
                    .pointer("/search_information/total_results")
                    .and_then(Value::as_i64)
                    .unwrap_or(0),
            },
            origin,
            destination,
            depart_date,
            return_date,
        })
    }
}
