pub mod account;
pub mod flight;
pub mod health;
pub mod trip;
