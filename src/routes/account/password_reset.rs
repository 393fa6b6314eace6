use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use mongodb::bson::doc;
use mongodb::Client;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo;
use crate::routes::account::auth::{clear_session_cookie, is_strong_password};
use crate::services::email_service::EmailService;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

// The response never reveals whether the email exists.
const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent.";

pub async fn forgot_password(
    data: web::Data<Arc<Client>>,
    input: web::Json<ForgotPasswordRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = mongo::users(&client);

    if input.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Email is required"
        }));
    }

    let user = match collection.find_one(doc! { "email": &input.email }).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Ok().json(json!({
                "success": true,
                "message": FORGOT_PASSWORD_MESSAGE
            }));
        }
        Err(err) => {
            eprintln!("Database error during forgot-password: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error during password reset request."
            }));
        }
    };

    let reset_token = generate_reset_token();
    let expires_at = (Utc::now() + Duration::hours(1)).to_rfc3339();

    if let Err(err) = collection
        .update_one(
            doc! { "_id": user.id },
            doc! { "$set": {
                "resetPasswordToken": &reset_token,
                "resetPasswordExpires": expires_at
            } },
        )
        .await
    {
        eprintln!("Failed to store reset token: {:?}", err);
        return HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Internal server error during password reset request."
        }));
    }

    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
    let reset_link = format!("{}/reset-password/{}", frontend_url, reset_token);

    let email_service = match EmailService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Failed to initialize email service: {}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to send password reset email"
            }));
        }
    };
    if let Err(err) = email_service
        .send_password_reset_email(&user.email, &reset_link)
        .await
    {
        eprintln!("Failed to send password reset email: {}", err);
        return HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to send password reset email"
        }));
    }

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": FORGOT_PASSWORD_MESSAGE
    }))
}

pub async fn reset_password(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<ResetPasswordRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = mongo::users(&client);
    let token = path.into_inner();

    if input.password.is_empty() || input.confirm_password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "New password and confirmation are required."
        }));
    }
    if input.password != input.confirm_password {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Passwords do not match."
        }));
    }
    if !is_strong_password(&input.password) {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Password must be at least 8 characters long, include an uppercase letter, a number, and a special character."
        }));
    }

    let user = match collection
        .find_one(doc! { "resetPasswordToken": &token })
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Password reset token is invalid or has expired."
            }));
        }
        Err(err) => {
            eprintln!("Database error during password reset: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error during password reset."
            }));
        }
    };

    let expired = user
        .reset_password_expires
        .map(|expires| expires < Utc::now())
        .unwrap_or(true);
    if expired {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Password reset token is invalid or has expired."
        }));
    }

    let hashed = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(err) => {
            eprintln!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error during password reset."
            }));
        }
    };

    match collection
        .update_one(
            doc! { "_id": user.id },
            doc! {
                "$set": { "password": hashed },
                "$unset": { "resetPasswordToken": "", "resetPasswordExpires": "" }
            },
        )
        .await
    {
        Ok(_) => HttpResponse::Ok()
            .cookie(clear_session_cookie())
            .json(json!({
                "success": true,
                "message": "Password has been reset successfully. Please log in."
            })),
        Err(err) => {
            eprintln!("Failed to update password: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error during password reset."
            }))
        }
    }
}

/// 32 random bytes as lowercase hex, single use, 1 hour lifetime.
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
