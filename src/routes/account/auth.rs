use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpResponse, Responder,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo;
use crate::middleware::auth::{Claims, SESSION_COOKIE};
use crate::models::user::User;
use crate::services::email_service::EmailService;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn signup(data: web::Data<Arc<Client>>, input: web::Json<SignupRequest>) -> impl Responder {
    let client = data.into_inner();
    let collection = mongo::users(&client);
    let input = input.into_inner();

    if input.username.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty()
    {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username, password, and email are required"
        }));
    }
    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid email address"
        }));
    }
    if !is_strong_password(&input.password) {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Password must be at least 8 characters long, include an uppercase letter, a number, and a special character."
        }));
    }

    match collection
        .find_one(doc! { "$or": [ { "email": &input.email }, { "username": &input.username } ] })
        .await
    {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Email or username already exists"
            }));
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("Database error during signup: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to create user"
            }));
        }
    }

    let hashed = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(err) => {
            eprintln!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to create user"
            }));
        }
    };

    let verification_code = generate_verification_code();
    let user = User {
        id: None,
        username: input.username,
        email: input.email.clone(),
        password: hashed,
        is_verified: false,
        verification_code: Some(verification_code.clone()),
        verification_code_expires: Some(Utc::now() + Duration::minutes(15)),
        reset_password_token: None,
        reset_password_expires: None,
        created_at: Some(Utc::now()),
    };

    let inserted_id = match collection.insert_one(&user).await {
        Ok(result) => result.inserted_id.as_object_id(),
        Err(err) => {
            eprintln!("Failed to insert user: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to create user"
            }));
        }
    };

    let email_service = match EmailService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Failed to initialize email service: {}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to send verification email"
            }));
        }
    };
    if let Err(err) = email_service
        .send_verification_email(&input.email, &verification_code)
        .await
    {
        eprintln!("Failed to send verification email: {}", err);
        return HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to send verification email"
        }));
    }

    HttpResponse::Created().json(json!({
        "success": true,
        "message": "Signup successful! Please check your email for the verification code.",
        "id": inserted_id.map(|id| id.to_hex())
    }))
}

pub async fn login(data: web::Data<Arc<Client>>, input: web::Json<LoginRequest>) -> impl Responder {
    let client = data.into_inner();
    let collection = mongo::users(&client);
    let input = input.into_inner();

    if input.username.trim().is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username and password are required"
        }));
    }

    let user = match collection.find_one(doc! { "username": &input.username }).await {
        Ok(Some(user)) => user,
        // A missing user and a wrong password answer identically
        Ok(None) => {
            return HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Incorrect username or password"
            }));
        }
        Err(err) => {
            eprintln!("Database error during login: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to process login"
            }));
        }
    };

    if !bcrypt::verify(&input.password, &user.password).unwrap_or(false) {
        return HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Incorrect username or password"
        }));
    }

    if !user.is_verified {
        return HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Please verify your email to log in."
        }));
    }

    let user_id = match user.id {
        Some(id) => id,
        None => {
            eprintln!("User document for {} is missing an _id", user.username);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to process login"
            }));
        }
    };

    match generate_token(&user.email, user_id) {
        Ok(token) => HttpResponse::Ok().cookie(session_cookie(&token)).json(json!({
            "success": true,
            "message": "Login successful",
            "userId": user_id.to_hex(),
            "username": user.username
        })),
        Err(err) => {
            eprintln!("Token generation failed: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Token generation failed"
            }))
        }
    }
}

pub async fn logout() -> impl Responder {
    HttpResponse::Ok()
        .cookie(clear_session_cookie())
        .json(json!({
            "success": true,
            "message": "Logged out successfully"
        }))
}

pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::days(1))
        .finish()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::ZERO)
        .finish()
}

pub fn generate_token(email: &str, user_id: ObjectId) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "default_secret".to_string());
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_hex(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}

/// Six numeric digits, no leading zero, emailed at signup.
pub fn generate_verification_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

pub fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

/// At least 8 characters with an uppercase letter, a digit, and one of
/// `!@#$%^&*`.
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| "!@#$%^&*".contains(c))
}
