mod common;

use serde_json::json;

use wanderplan_api::services::generation_service::{
    build_prompt, extract_itinerary_json, GenerationError,
};

#[test]
fn test_fenced_json_block_is_extracted() {
    let text = "Here is your travel plan!\n```json\n{\"tripName\": \"Beach\", \"duration\": 5}\n```\nEnjoy your trip!";

    let map = extract_itinerary_json(text).unwrap();
    assert_eq!(map.get("tripName"), Some(&json!("Beach")));
    assert_eq!(map.get("duration"), Some(&json!(5)));
}

#[test]
fn test_fence_contents_win_over_surrounding_prose() {
    let text = "{\"decoy\": true} ```json\n{\"tripName\": \"Beach\"}\n``` trailing words";

    let map = extract_itinerary_json(text).unwrap();
    assert!(map.contains_key("tripName"));
    assert!(!map.contains_key("decoy"));
}

#[test]
fn test_whole_body_fallback_when_no_fence() {
    let text = "  {\"tripName\": \"Beach\", \"hotels\": []}  ";

    let map = extract_itinerary_json(text).unwrap();
    assert_eq!(map.get("tripName"), Some(&json!("Beach")));
}

#[test]
fn test_non_json_body_is_a_parse_error() {
    let result = extract_itinerary_json("Sorry, I cannot help with that.");
    assert!(matches!(result, Err(GenerationError::ParseError(_))));
}

#[test]
fn test_invalid_json_inside_fence_is_a_parse_error() {
    let result = extract_itinerary_json("```json\n{\"tripName\": \n```");
    match result {
        Err(GenerationError::ParseError(message)) => {
            assert!(message.contains("backticks"));
        }
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_fenced_array_is_rejected() {
    let result = extract_itinerary_json("```json\n[1, 2, 3]\n```");
    assert!(matches!(result, Err(GenerationError::NotAnObject)));
}

#[test]
fn test_prompt_embeds_trip_details() {
    let trip = common::sample_trip();
    let prompt = build_prompt(&trip, "LAX", "CUN");

    assert!(prompt.contains("Cancun"));
    assert!(prompt.contains("5 days"));
    assert!(prompt.contains("a Couple (2 people)"));
    assert!(prompt.contains("$1000"));
    assert!(prompt.contains("relaxed"));
    assert!(prompt.contains("From LAX"));
    assert!(prompt.contains("Return CUN"));
}

#[test]
fn test_prompt_demands_a_single_fenced_block() {
    let trip = common::sample_trip();
    let prompt = build_prompt(&trip, "LAX", "CUN");

    assert!(prompt.contains("```json"));
    assert!(prompt.contains("budgetSummary"));
    assert!(prompt.contains("hotels"));
    assert!(prompt.contains("itinerary"));
}
