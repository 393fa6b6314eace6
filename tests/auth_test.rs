use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mongodb::bson::oid::ObjectId;
use serial_test::serial;

use wanderplan_api::middleware::auth::Claims;
use wanderplan_api::routes::account::auth::{
    clear_session_cookie, generate_token, generate_verification_code, is_strong_password,
    is_valid_email, session_cookie,
};
use wanderplan_api::routes::account::password_reset::generate_reset_token;

#[test]
fn test_password_strength_rules() {
    assert!(is_strong_password("Sunny!day2025"));
    assert!(is_strong_password("Abcdef1!"));

    // Too short
    assert!(!is_strong_password("Ab1!"));
    // No uppercase
    assert!(!is_strong_password("abcdef1!"));
    // No digit
    assert!(!is_strong_password("Abcdefg!"));
    // No special character
    assert!(!is_strong_password("Abcdefg1"));
}

#[test]
fn test_email_validation() {
    assert!(is_valid_email("traveler@example.com"));
    assert!(is_valid_email("first.last+tag@sub.example.org"));

    assert!(!is_valid_email("not-an-email"));
    assert!(!is_valid_email("missing@domain@twice.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn test_verification_code_is_six_digits() {
    for _ in 0..100 {
        let code = generate_verification_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(code.chars().next(), Some('0'));
    }
}

#[test]
fn test_reset_tokens_are_long_hex_and_unique() {
    let first = generate_reset_token();
    let second = generate_reset_token();

    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(first, second);
}

#[test]
#[serial]
fn test_token_round_trip() {
    std::env::set_var("JWT_SECRET", "test_secret");

    let user_id = ObjectId::new();
    let token = generate_token("traveler@example.com", user_id).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret("test_secret".as_bytes()),
        &validation,
    )
    .unwrap();

    assert_eq!(data.claims.sub, "traveler@example.com");
    assert_eq!(data.claims.user_id, user_id.to_hex());
    assert!(data.claims.exp > data.claims.iat);

    std::env::remove_var("JWT_SECRET");
}

#[test]
#[serial]
fn test_token_rejected_with_wrong_secret() {
    std::env::set_var("JWT_SECRET", "test_secret");

    let token = generate_token("traveler@example.com", ObjectId::new()).unwrap();

    let result = decode::<Claims>(
        &token,
        &DecodingKey::from_secret("another_secret".as_bytes()),
        &Validation::new(Algorithm::HS256),
    );
    assert!(result.is_err());

    std::env::remove_var("JWT_SECRET");
}

#[test]
fn test_session_cookie_is_http_only() {
    let cookie = session_cookie("some-token");

    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), "some-token");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn test_clear_cookie_expires_immediately() {
    let cookie = clear_session_cookie();

    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), "");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::ZERO)
    );
}
