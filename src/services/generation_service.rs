use regex::Regex;
use serde_json::{json, Map, Value};
use std::env;

use crate::models::trip::Trip;

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug)]
pub enum GenerationError {
    EnvironmentError(String),
    RequestError(String),
    ApiError(String),
    EmptyResponse,
    ParseError(String),
    NotAnObject,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
            GenerationError::RequestError(err) => write!(f, "Request error: {}", err),
            GenerationError::ApiError(err) => write!(f, "API error: {}", err),
            GenerationError::EmptyResponse => {
                write!(f, "Generation response contained no text candidates")
            }
            GenerationError::ParseError(err) => write!(f, "{}", err),
            GenerationError::NotAnObject => {
                write!(f, "Parsed generation response is not a JSON object")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Natural-language prompt for one trip. Demands the plan as a single fenced
/// JSON block so the response survives [`extract_itinerary_json`].
pub fn build_prompt(trip: &Trip, origin_airport: &str, return_airport: &str) -> String {
    format!(
        "Generate a simple travel plan for the location: {location}. It should be spread out over {duration} days. It will be for {party}. The estimated budget is ${budget}. The desired pace of travel is {pace}. (Flight details: From {origin}, Return {ret}).\n\n\
        You must provide the plan in a JSON format, enclosed ONLY within a single ```json ... ``` code block. Do not include any text before or after the JSON block.\n\
        The JSON structure should include:\n\
        - \"tripName\": \"{name}\" (string).\n\
        - \"duration\": {duration} (number).\n\
        - \"travelerCount\": Based on \"{party}\".\n\
        - \"budget\": {budget} (number).\n\
        - \"pace\": \"{pace}\" (string).\n\
        - \"location\": \"{location}\" (string).\n\
        - \"hotels\": An array of 2-3 hotel recommendations, each with \"name\", \"address\", \"priceRange\", and \"rating\".\n\
        - \"itinerary\": An object where keys are \"day1\", \"day2\", etc. Each day has \"morning\", \"afternoon\", and \"evening\" descriptions plus an optional \"theme\".\n\
        - \"budgetSummary\": An object summarizing estimated costs per category.\n\n\
        The plan should be well-made, realistic for the budget, and matched to the requested pace.",
        location = trip.location.name,
        duration = trip.duration_days,
        party = trip.party_size.description(),
        budget = trip.budget,
        pace = trip.pace.as_str(),
        origin = origin_airport,
        ret = return_airport,
        name = trip.name,
    )
}

/// Pulls the itinerary object out of the model's raw text. Prefers a single
/// ```json fenced block; falls back to parsing the whole body. The parsed
/// value must be an object.
pub fn extract_itinerary_json(text: &str) -> Result<Map<String, Value>, GenerationError> {
    let fence = Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap();

    let value: Value = match fence.captures(text).and_then(|cap| cap.get(1)) {
        Some(block) => serde_json::from_str(block.as_str()).map_err(|e| {
            GenerationError::ParseError(format!("Failed to parse JSON within backticks: {}", e))
        })?,
        None => serde_json::from_str(text.trim()).map_err(|e| {
            GenerationError::ParseError(format!("Response was not valid JSON: {}", e))
        })?,
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(GenerationError::NotAnObject),
    }
}

/// Itinerary generation adapter over the Gemini generateContent API.
pub struct GenerationService {
    api_key: String,
    client: reqwest::Client,
}

impl GenerationService {
    pub fn new() -> Result<Self, GenerationError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GenerationError::EnvironmentError("GEMINI_API_KEY not set".to_string()))?;

        let client = reqwest::Client::new();

        Ok(Self { api_key, client })
    }

    /// Previews an itinerary for the trip. Does not touch the database; the
    /// caller persists the result only after the user confirms it.
    pub async fn generate_itinerary(
        &self,
        trip: &Trip,
        origin_airport: &str,
        return_airport: &str,
    ) -> Result<Map<String, Value>, GenerationError> {
        let prompt = build_prompt(trip, origin_airport, return_airport);

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_URL, GEMINI_MODEL, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.8,
                "topP": 0.9,
                "topK": 40,
                "maxOutputTokens": 8192
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::ApiError(format!(
                "Status: {}, Body: {}",
                status, body
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))?;

        let text = data
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or(GenerationError::EmptyResponse)?;

        extract_itinerary_json(text)
    }
}
