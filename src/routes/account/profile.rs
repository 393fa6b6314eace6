use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::doc;
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::routes::account::auth::clear_session_cookie;

pub async fn get_profile(user: AuthenticatedUser, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let user_id = match user.object_id() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID in session"
            }));
        }
    };

    match mongo::users(&client).find_one(doc! { "_id": user_id }).await {
        Ok(Some(user)) => HttpResponse::Ok().json(json!({
            "success": true,
            "user": user.profile()
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "User not found"
        })),
        Err(err) => {
            eprintln!("Failed to fetch user profile: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve profile"
            }))
        }
    }
}

pub async fn delete_account(user: AuthenticatedUser, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let user_id = match user.object_id() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID in session"
            }));
        }
    };

    // Two sequential deletes, not a transaction. A crash in between leaves
    // orphaned trips, which stay unreachable because every trip read is
    // owner-scoped.
    if let Err(err) = mongo::trips(&client)
        .delete_many(doc! { "userId": user_id })
        .await
    {
        eprintln!("Failed to delete trips for account {}: {:?}", user_id, err);
        return HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to delete account"
        }));
    }

    match mongo::users(&client).delete_one(doc! { "_id": user_id }).await {
        Ok(result) if result.deleted_count == 0 => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "User not found"
        })),
        Ok(_) => HttpResponse::Ok()
            .cookie(clear_session_cookie())
            .json(json!({
                "success": true,
                "message": "Account deleted successfully"
            })),
        Err(err) => {
            eprintln!("Failed to delete user {}: {:?}", user_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to delete account"
            }))
        }
    }
}
