use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wanderplan_api::{db, middleware, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            // Session tokens travel in a cookie, so CORS must echo the origin
            // and allow credentials.
            .wrap(Cors::permissive())
            .app_data(web::Data::new(client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            // Public routes
                            .route("/signup", web::post().to(routes::account::auth::signup))
                            .route("/login", web::post().to(routes::account::auth::login))
                            .route(
                                "/verify-email",
                                web::post().to(routes::account::email_verification::verify_email),
                            )
                            .route(
                                "/forgot-password",
                                web::post().to(routes::account::password_reset::forgot_password),
                            )
                            .route(
                                "/reset-password/{token}",
                                web::post().to(routes::account::password_reset::reset_password),
                            )
                            .route("/logout", web::post().to(routes::account::auth::logout))
                            // Protected routes
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route(
                                        "/profile",
                                        web::get().to(routes::account::profile::get_profile),
                                    )
                                    .route(
                                        "/delete-account",
                                        web::delete().to(routes::account::profile::delete_account),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/trips")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("", web::get().to(routes::trip::get_trips))
                            .route("", web::post().to(routes::trip::create_trip))
                            .route(
                                "/generate-itinerary/{id}",
                                web::post().to(routes::trip::generate_itinerary),
                            )
                            .route("/{id}", web::get().to(routes::trip::get_trip))
                            .route("/{id}", web::delete().to(routes::trip::delete_trip))
                            .route(
                                "/{id}/itinerary",
                                web::put().to(routes::trip::save_itinerary),
                            ),
                    )
                    .service(
                        web::scope("/trip-flights")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/{id}", web::get().to(routes::flight::trip_flights)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
