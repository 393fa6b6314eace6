use wanderplan_api::services::flight_service::{booking_link, normalize_airport_code, FlightError};

#[test]
fn test_airport_codes_are_uppercased() {
    assert_eq!(normalize_airport_code("lax").unwrap(), "LAX");
    assert_eq!(normalize_airport_code("CUN").unwrap(), "CUN");
    assert_eq!(normalize_airport_code(" jfk ").unwrap(), "JFK");
}

#[test]
fn test_airport_codes_must_be_three_letters() {
    assert!(matches!(
        normalize_airport_code("LAXX"),
        Err(FlightError::InvalidAirportCode(_))
    ));
    assert!(matches!(
        normalize_airport_code("LA"),
        Err(FlightError::InvalidAirportCode(_))
    ));
    assert!(matches!(
        normalize_airport_code("L4X"),
        Err(FlightError::InvalidAirportCode(_))
    ));
    assert!(matches!(
        normalize_airport_code(""),
        Err(FlightError::InvalidAirportCode(_))
    ));
}

#[test]
fn test_invalid_code_error_names_the_code() {
    let err = normalize_airport_code("LAXX").unwrap_err();
    assert_eq!(err.to_string(), "Invalid airport code: LAXX");
}

#[test]
fn test_booking_link_targets_google_flights() {
    let link = booking_link("LAX", "CUN", "2025-06-01", "2025-06-05");

    assert!(link.starts_with("https://www.google.com/travel/flights?q="));
    assert!(link.contains("LAX"));
    assert!(link.contains("CUN"));
    assert!(link.contains("2025-06-01"));
    assert!(link.contains("2025-06-05"));
}

#[test]
fn test_booking_link_encodes_the_query() {
    let link = booking_link("LAX", "CUN", "2025-06-01", "2025-06-05");

    // The human-readable query must be urlencoded, never raw
    assert!(!link.contains(' '));
    assert!(link.contains("Flights+from+LAX+to+CUN"));
}
