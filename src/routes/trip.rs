use actix_web::{web, HttpResponse, Responder};
use bson::to_bson;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::mongo;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::itinerary::GeneratedItinerary;
use crate::models::trip::{CreateTripRequest, Trip};
use crate::services::generation_service::{GenerationError, GenerationService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateItineraryRequest {
    pub origin_airport: String,
    pub return_airport: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveItineraryRequest {
    pub itinerary: Option<Value>,
}

/// Every single-trip read and write goes through this filter, so a trip owned
/// by someone else is indistinguishable from one that does not exist.
pub fn owned_trip_filter(trip_id: ObjectId, owner: ObjectId) -> Document {
    doc! { "_id": trip_id, "userId": owner }
}

/// The one answer for a trip the caller cannot see, whether it is absent,
/// deleted, or owned by another account.
pub fn trip_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Trip not found"
    }))
}

fn owner_id(user: &AuthenticatedUser) -> Result<ObjectId, HttpResponse> {
    user.object_id().map_err(|_| {
        HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid user ID in session"
        }))
    })
}

fn parse_trip_id(id: &str) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(id).map_err(|_| {
        HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid trip ID format"
        }))
    })
}

/*
    GET /api/trips — all trips owned by the caller, newest first
*/
pub async fn get_trips(user: AuthenticatedUser, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let cursor = mongo::trips(&client)
        .find(doc! { "userId": owner })
        .sort(doc! { "createdAt": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(json!({
                "success": true,
                "trips": trips
            })),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Failed to retrieve saved trips"
                }))
            }
        },
        Err(err) => {
            eprintln!("Failed to query trips: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve saved trips"
            }))
        }
    }
}

/*
    POST /api/trips — initial save of the trip basics, itinerary unset
*/
pub async fn create_trip(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    input: web::Json<CreateTripRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let input = input.into_inner();
    let duration_days = match input.validate() {
        Ok(duration) => duration,
        Err(message) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": message
            }));
        }
    };

    let trip = input.into_trip(owner, duration_days);

    match mongo::trips(&client).insert_one(&trip).await {
        Ok(result) => match result.inserted_id.as_object_id() {
            Some(id) => HttpResponse::Created().json(json!({
                "success": true,
                "message": "Trip created successfully",
                "tripId": id.to_hex()
            })),
            None => {
                eprintln!("Trip insert returned a non-ObjectId id");
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Failed to create trip"
                }))
            }
        },
        Err(err) => {
            eprintln!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to create trip"
            }))
        }
    }
}

/*
    GET /api/trips/{id} — details for one owned trip. A trip owned by someone
    else answers exactly like a missing one.
*/
pub async fn get_trip(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match mongo::trips(&client)
        .find_one(owned_trip_filter(trip_id, owner))
        .await
    {
        Ok(Some(trip)) => HttpResponse::Ok().json(json!({
            "success": true,
            "trip": trip
        })),
        Ok(None) => trip_not_found(),
        Err(err) => {
            eprintln!("Failed to fetch trip {}: {:?}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve trip details"
            }))
        }
    }
}

/*
    DELETE /api/trips/{id} — deleting an already-deleted trip is a plain 404
*/
pub async fn delete_trip(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match mongo::trips(&client)
        .delete_one(owned_trip_filter(trip_id, owner))
        .await
    {
        Ok(result) if result.deleted_count == 0 => trip_not_found(),
        Ok(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Trip deleted successfully"
        })),
        Err(err) => {
            eprintln!("Failed to delete trip {}: {:?}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to delete trip"
            }))
        }
    }
}

/*
    POST /api/trips/generate-itinerary/{id} — preview step; the generated plan
    is returned for review and persisted only by the PUT below.
*/
pub async fn generate_itinerary(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<GenerateItineraryRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if input.origin_airport.trim().is_empty() || input.return_airport.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Origin and return airports are required."
        }));
    }

    let trip = match mongo::trips(&client)
        .find_one(owned_trip_filter(trip_id, owner))
        .await
    {
        Ok(Some(trip)) => trip,
        Ok(None) => return trip_not_found(),
        Err(err) => {
            eprintln!("Failed to fetch trip {}: {:?}", trip_id, err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve trip details"
            }));
        }
    };

    let service = match GenerationService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Failed to initialize generation service: {}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Itinerary generation is not configured"
            }));
        }
    };

    match service
        .generate_itinerary(&trip, &input.origin_airport, &input.return_airport)
        .await
    {
        Ok(itinerary) => HttpResponse::Ok().json(json!({
            "success": true,
            "itineraryData": itinerary
        })),
        // Parse failures carry the parser's message verbatim to aid debugging
        Err(err @ (GenerationError::ParseError(_) | GenerationError::NotAnObject)) => {
            eprintln!("Generation parse failure for trip {}: {}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": err.to_string()
            }))
        }
        Err(err) => {
            eprintln!("Failed to generate itinerary for trip {}: {}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to generate itinerary"
            }))
        }
    }
}

/*
    PUT /api/trips/{id}/itinerary — persists a reviewed itinerary onto the
    trip, overwriting any previous one.
*/
pub async fn save_itinerary(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<SaveItineraryRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let owner = match owner_id(&user) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let itinerary = match input.into_inner().itinerary {
        Some(value) if value.is_object() => value,
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid or missing itinerary data in request body."
            }));
        }
    };

    // Round-trip through the model so a structurally broken payload is
    // rejected here instead of surfacing on the next read.
    let itinerary: GeneratedItinerary = match serde_json::from_value(itinerary) {
        Ok(itinerary) => itinerary,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": format!("Itinerary does not match the expected shape: {}", err)
            }));
        }
    };

    let itinerary_bson = match to_bson(&itinerary) {
        Ok(bson) => bson,
        Err(err) => {
            eprintln!("Failed to convert itinerary to BSON: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to update trip"
            }));
        }
    };

    match mongo::trips(&client)
        .update_one(
            owned_trip_filter(trip_id, owner),
            doc! { "$set": {
                "generatedItinerary": itinerary_bson,
                "updatedAt": Utc::now().to_rfc3339()
            } },
        )
        .await
    {
        Ok(result) if result.matched_count == 0 => trip_not_found(),
        Ok(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Itinerary added successfully"
        })),
        Err(err) => {
            eprintln!("Failed to update trip {}: {:?}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to update trip"
            }))
        }
    }
}
