use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::oid::ObjectId;
use mongodb::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::routes::trip::{owned_trip_filter, trip_not_found};
use crate::services::flight_service::{FlightError, FlightService};

#[derive(Debug, Deserialize)]
pub struct FlightQuery {
    pub origin: Option<String>,
    #[serde(rename = "return")]
    pub return_airport: Option<String>,
}

/*
    GET /api/trip-flights/{id}?origin=&return= — round-trip search on the
    trip's stored dates
*/
pub async fn trip_flights(
    user: AuthenticatedUser,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    query: web::Query<FlightQuery>,
) -> impl Responder {
    let client = data.into_inner();

    let (origin, return_airport) = match (&query.origin, &query.return_airport) {
        (Some(origin), Some(return_airport)) => (origin.clone(), return_airport.clone()),
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Both departure and return airports are required"
            }));
        }
    };

    let owner = match user.object_id() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID in session"
            }));
        }
    };
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid trip ID format"
            }));
        }
    };

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

    let service = match FlightService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Failed to initialize flight service: {}", err);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Flight search is not configured"
            }));
        }
    };

    match service
        .search_round_trip(&origin, &return_airport, trip.start_date, trip.end_date)
        .await
    {
        Ok(results) => HttpResponse::Ok().json(json!({
            "success": true,
            "tripId": trip_id.to_hex(),
            "data": results
        })),
        Err(err @ FlightError::InvalidAirportCode(_)) => HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": err.to_string()
        })),
        Err(err) => {
            eprintln!("Flight search failed for trip {}: {}", trip_id, err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve flight information"
            }))
        }
    }
}
