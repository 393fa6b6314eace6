pub mod email_service;
pub mod flight_service;
pub mod generation_service;
