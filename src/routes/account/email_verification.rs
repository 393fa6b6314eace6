use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo;

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

pub async fn verify_email(
    data: web::Data<Arc<Client>>,
    input: web::Json<VerifyEmailRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = mongo::users(&client);

    if input.code.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Verification code is required."
        }));
    }

    let user = match collection
        .find_one(doc! { "verificationCode": &input.code })
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid or expired verification code."
            }));
        }
        Err(err) => {
            eprintln!("Database error during email verification: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error."
            }));
        }
    };

    let expired = user
        .verification_code_expires
        .map(|expires| expires < Utc::now())
        .unwrap_or(true);
    if expired {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid or expired verification code."
        }));
    }

    match collection
        .update_one(
            doc! { "_id": user.id },
            doc! {
                "$set": { "isVerified": true },
                "$unset": { "verificationCode": "", "verificationCodeExpires": "" }
            },
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Email successfully verified."
        })),
        Err(err) => {
            eprintln!("Failed to mark user verified: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error."
            }))
        }
    }
}
